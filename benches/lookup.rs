use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use symdel::{SymSpell, Verbosity};

// Synthetic dictionary of syllable combinations with deterministic pseudo frequencies.
fn sample_terms(count: usize) -> Vec<(String, i64)> {
    let syllables = [
        "ba", "de", "ki", "lo", "mu", "na", "pe", "ri", "so", "tu", "ve", "wa",
    ];
    (0..count)
        .map(|i| {
            let term = format!(
                "{}{}{}",
                syllables[i % syllables.len()],
                syllables[(i / syllables.len()) % syllables.len()],
                syllables[(i / (syllables.len() * syllables.len())) % syllables.len()],
            );
            (term, (i % 997 + 1) as i64)
        })
        .collect()
}

fn build_engine(terms: &[(String, i64)]) -> SymSpell {
    let mut symspell = SymSpell::new(terms.len(), 2, 7, 1, 5).unwrap();
    for (term, count) in terms {
        symspell.create_dictionary_entry(term.as_str(), *count, None);
    }
    symspell
}

fn bench_build(c: &mut Criterion) {
    let terms = sample_terms(1_024);
    let mut group = c.benchmark_group("dictionary_build");

    for &count in &[256usize, 1_024usize] {
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| black_box(build_engine(&terms[..count])));
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let terms = sample_terms(1_024);
    let engine = build_engine(&terms);
    let mut group = c.benchmark_group("lookup");

    group.bench_function("top_ed2", |b| {
        b.iter(|| black_box(engine.lookup(black_box("badeki"), Verbosity::Top, 2, false)));
    });
    group.bench_function("all_ed2", |b| {
        b.iter(|| black_box(engine.lookup(black_box("badeki"), Verbosity::All, 2, false)));
    });
    group.bench_function("exact", |b| {
        b.iter(|| black_box(engine.lookup(black_box("badeba"), Verbosity::Top, 0, false)));
    });

    group.finish();
}

fn bench_lookup_compound(c: &mut Criterion) {
    let terms = sample_terms(1_024);
    let engine = build_engine(&terms);
    let mut group = c.benchmark_group("lookup_compound");

    group.bench_function("three_terms", |b| {
        b.iter(|| black_box(engine.lookup_compound(black_box("badeki losomu navepe"), 2)));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup, bench_lookup_compound);
criterion_main!(benches);
