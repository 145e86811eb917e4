#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::symspell::{parse_words, transfer_case, unicode_normalization_form_kc};
    use crate::{SuggestionStage, SymSpell, Verbosity, damerau_levenshtein_osa};

    #[test]
    fn test_construction_rejects_bad_parameters() {
        assert!(SymSpell::new(16, -1, 7, 1, 5).is_err());
        assert!(SymSpell::new(16, 2, 1, 1, 5).is_err());
        assert!(SymSpell::new(16, 2, 2, 1, 5).is_err());
        assert!(SymSpell::new(16, 2, 7, -1, 5).is_err());
        assert!(SymSpell::new(16, 2, 7, 1, 17).is_err());
        assert!(SymSpell::new(0, 0, 2, 0, 0).is_ok());
        assert!(SymSpell::new(16, 2, 7, 1, 16).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_lookup_rejects_distance_beyond_dictionary_bound() {
        let symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
        symspell.lookup("anything", Verbosity::Top, 3, false);
    }

    #[test]
    fn test_words_with_shared_prefix_should_retain_counts() {
        let mut symspell = SymSpell::new(16, 1, 3, 1, 5).unwrap();

        symspell.create_dictionary_entry("pipe", 5, None);
        symspell.create_dictionary_entry("pips", 10, None);

        {
            let result = symspell.lookup("pip", Verbosity::All, 1, false);
            assert_eq!(2, result.len());
            assert_eq!("pips", result[0].term);
            assert_eq!(10, result[0].count);
            assert_eq!(1, result[0].distance);
            assert_eq!("pipe", result[1].term);
            assert_eq!(5, result[1].count);
            assert_eq!(1, result[1].distance);
        }

        {
            let result = symspell.lookup("pipe", Verbosity::All, 1, false);
            assert_eq!(2, result.len());
            assert_eq!("pipe", result[0].term);
            assert_eq!(5, result[0].count);
            assert_eq!(0, result[0].distance);
            assert_eq!("pips", result[1].term);
            assert_eq!(10, result[1].count);
        }

        {
            let result = symspell.lookup("pips", Verbosity::All, 1, false);
            assert_eq!(2, result.len());
            assert_eq!("pips", result[0].term);
            assert_eq!(10, result[0].count);
            assert_eq!("pipe", result[1].term);
            assert_eq!(5, result[1].count);
        }
    }

    #[test]
    fn test_verbosity_should_control_lookup_results() {
        let mut symspell = SymSpell::new(16, 2, 3, 1, 5).unwrap();

        symspell.create_dictionary_entry("steam", 1, None);
        symspell.create_dictionary_entry("steams", 2, None);
        symspell.create_dictionary_entry("steem", 3, None);

        {
            let result = symspell.lookup("steems", Verbosity::Top, 2, false);
            assert_eq!(1, result.len());
        }
        {
            let result = symspell.lookup("steems", Verbosity::Closest, 2, false);
            assert_eq!(2, result.len());
            // the minimum-distance tier only
            assert!(result.iter().all(|suggestion| suggestion.distance == 1));
        }
        {
            let result = symspell.lookup("steems", Verbosity::All, 2, false);
            assert_eq!(3, result.len());
        }
    }

    #[test]
    fn test_lookup_should_return_most_frequent() {
        let mut symspell = SymSpell::new(16, 2, 3, 1, 5).unwrap();

        symspell.create_dictionary_entry("steama", 4, None);
        symspell.create_dictionary_entry("steamb", 6, None);
        symspell.create_dictionary_entry("steamc", 2, None);

        let result = symspell.lookup("steam", Verbosity::Top, 2, false);
        assert_eq!(1, result.len());
        assert_eq!("steamb", result[0].term);
        assert_eq!(6, result[0].count);
    }

    #[test]
    fn test_lookup_should_find_exact_match() {
        let mut symspell = SymSpell::new(16, 2, 3, 1, 5).unwrap();

        symspell.create_dictionary_entry("steama", 4, None);
        symspell.create_dictionary_entry("steamb", 6, None);
        symspell.create_dictionary_entry("steamc", 2, None);

        let result = symspell.lookup("steama", Verbosity::Top, 2, false);
        assert_eq!(1, result.len());
        assert_eq!("steama", result[0].term);
        assert_eq!(0, result[0].distance);
        assert_eq!(4, result[0].count);
    }

    #[test]
    fn test_lookup_should_not_return_non_word_delete() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();

        symspell.create_dictionary_entry("pawn", 10, None);

        assert!(symspell.lookup("paw", Verbosity::Top, 0, false).is_empty());
        assert!(symspell.lookup("awn", Verbosity::Top, 0, false).is_empty());
    }

    #[test]
    fn test_lookup_should_not_return_low_count_word() {
        let mut symspell = SymSpell::new(16, 2, 7, 10, 5).unwrap();

        symspell.create_dictionary_entry("pawn", 1, None);

        assert!(symspell.lookup("pawn", Verbosity::Top, 0, false).is_empty());
    }

    #[test]
    fn test_lookup_should_not_return_low_count_word_thats_also_delete_word() {
        let mut symspell = SymSpell::new(16, 2, 7, 10, 5).unwrap();

        symspell.create_dictionary_entry("flame", 20, None);
        symspell.create_dictionary_entry("flam", 1, None);

        assert!(symspell.lookup("flam", Verbosity::Top, 0, false).is_empty());
    }

    #[test]
    fn test_below_threshold_counts_accumulate_until_promotion() {
        let mut symspell = SymSpell::new(16, 2, 7, 10, 5).unwrap();

        assert!(!symspell.create_dictionary_entry("word", 5, None));
        assert!(symspell.lookup("word", Verbosity::Top, 2, false).is_empty());
        assert_eq!(0, symspell.get_dictionary_size());

        // the second observation crosses the threshold and indexes the deletes
        assert!(symspell.create_dictionary_entry("word", 5, None));
        assert_eq!(1, symspell.get_dictionary_size());

        let result = symspell.lookup("word", Verbosity::Top, 0, false);
        assert_eq!(1, result.len());
        assert_eq!(10, result[0].count);

        // fuzzy matches work, so the deletes were indexed at promotion time
        let result = symspell.lookup("wor", Verbosity::Top, 2, false);
        assert_eq!(1, result.len());
        assert_eq!("word", result[0].term);
        assert_eq!(1, result[0].distance);
    }

    #[test]
    fn test_counts_saturate_instead_of_wrapping() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();

        symspell.create_dictionary_entry("big", i64::MAX - 1, None);
        symspell.create_dictionary_entry("big", 5, None);

        let result = symspell.lookup("big", Verbosity::Top, 0, false);
        assert_eq!(i64::MAX, result[0].count);
    }

    #[test]
    fn test_non_positive_count_is_rejected_with_threshold() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();

        assert!(!symspell.create_dictionary_entry("zero", 0, None));
        assert!(!symspell.create_dictionary_entry("negative", -3, None));
        assert_eq!(0, symspell.get_dictionary_size());
    }

    #[test]
    fn test_include_unknown_synthesizes_single_item() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
        symspell.create_dictionary_entry("steam", 4, None);

        let result = symspell.lookup("qwblx", Verbosity::Top, 2, true);
        assert_eq!(1, result.len());
        assert_eq!("qwblx", result[0].term);
        assert_eq!(3, result[0].distance);
        assert_eq!(0, result[0].count);

        // a found suggestion suppresses the synthetic item
        let result = symspell.lookup("steem", Verbosity::Top, 2, true);
        assert_eq!(1, result.len());
        assert_eq!("steam", result[0].term);
    }

    #[test]
    fn test_returned_distances_match_the_distance_engine() {
        let mut symspell = SymSpell::new(16, 2, 3, 1, 5).unwrap();
        for (term, count) in [("steam", 1), ("steams", 2), ("steem", 3), ("stream", 5)] {
            symspell.create_dictionary_entry(term, count, None);
        }

        for input in ["steems", "steam", "stean", "tseam", "str"] {
            let result = symspell.lookup(input, Verbosity::All, 2, false);
            for suggestion in &result {
                assert_eq!(
                    suggestion.distance,
                    damerau_levenshtein_osa(input, &suggestion.term, 2),
                    "distance mismatch for {input} -> {}",
                    suggestion.term
                );
            }
            // ordered by distance ascending, then count descending, without duplicate terms
            for pair in result.windows(2) {
                assert!(
                    pair[0].distance < pair[1].distance
                        || (pair[0].distance == pair[1].distance
                            && pair[0].count >= pair[1].count)
                );
                assert_ne!(pair[0].term, pair[1].term);
            }
        }
    }

    #[test]
    fn test_coarse_compact_level_only_broadens_candidates() {
        // compact_level 16 collapses most hash bits; collisions must not change results
        let mut symspell = SymSpell::new(16, 2, 3, 1, 16).unwrap();

        symspell.create_dictionary_entry("steam", 1, None);
        symspell.create_dictionary_entry("steams", 2, None);
        symspell.create_dictionary_entry("steem", 3, None);

        let result = symspell.lookup("steems", Verbosity::All, 2, false);
        assert_eq!(3, result.len());
        for suggestion in &result {
            assert_eq!(
                suggestion.distance,
                damerau_levenshtein_osa("steems", &suggestion.term, 2)
            );
        }
    }

    #[test]
    fn test_staged_build_matches_direct_build() {
        let mut direct = SymSpell::new(16, 2, 3, 1, 5).unwrap();
        let mut staged = SymSpell::new(16, 2, 3, 1, 5).unwrap();

        let entries = [("steam", 1), ("steams", 2), ("steem", 3), ("pipe", 5)];
        for (term, count) in entries {
            direct.create_dictionary_entry(term, count, None);
        }
        let mut staging = SuggestionStage::new(16);
        for (term, count) in entries {
            staged.create_dictionary_entry(term, count, Some(&mut staging));
        }

        // exact matches are live before commit, fuzzy matches are not
        assert_eq!(1, staged.lookup("steam", Verbosity::Top, 0, false).len());
        assert!(staged.lookup("steems", Verbosity::Top, 2, false).is_empty());

        staged.commit_staged(staging);

        for input in ["steems", "steam", "pip", "pipe"] {
            let expected = direct.lookup(input, Verbosity::All, 2, false);
            let got = staged.lookup(input, Verbosity::All, 2, false);
            assert_eq!(expected.len(), got.len(), "result size differs for {input}");
            for (e, g) in expected.iter().zip(got.iter()) {
                assert_eq!(e.term, g.term);
                assert_eq!(e.distance, g.distance);
                assert_eq!(e.count, g.count);
            }
        }
    }

    #[test]
    fn test_load_dictionary_skips_malformed_lines() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();

        let corpus = "the 23135851162\nmalformed\nfoo notanumber\nof 13151942776\n";
        symspell
            .load_dictionary_from_reader(Cursor::new(corpus), 0, 1, " ")
            .unwrap();

        assert_eq!(2, symspell.get_dictionary_size());
        assert_eq!(1, symspell.lookup("the", Verbosity::Top, 0, false).len());
        assert_eq!(1, symspell.lookup("of", Verbosity::Top, 0, false).len());

        // staged deletes were committed as part of the load
        let result = symspell.lookup("teh", Verbosity::Top, 2, false);
        assert_eq!("the", result[0].term);
        assert_eq!(1, result[0].distance);
    }

    #[test]
    fn test_load_dictionary_with_empty_separator_splits_on_whitespace() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();

        let corpus = "the\t23135851162\nof  13151942776\n";
        symspell
            .load_dictionary_from_reader(Cursor::new(corpus), 0, 1, "")
            .unwrap();

        assert_eq!(2, symspell.get_dictionary_size());
    }

    #[test]
    fn test_lookup_compound() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
        let corpus = "the 120\nquick 100\nbrown 90\nfox 80\n";
        symspell
            .load_dictionary_from_reader(Cursor::new(corpus), 0, 1, " ")
            .unwrap();
        symspell
            .load_bigram_dictionary_from_reader(Cursor::new("quick brown 100\n"), 0, 2, " ")
            .unwrap();

        let input = "thequikc bruwn fox";
        let results = symspell.lookup_compound(input, 2);
        assert_eq!(1, results.len());
        assert_eq!("the quick brown fox", results[0].term);
        assert_eq!(
            damerau_levenshtein_osa(input, &results[0].term, i64::MAX),
            results[0].distance
        );
    }

    #[test]
    fn test_lookup_compound_merges_split_words() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
        let corpus = "where 360468339\nis 4705743816\nthe 23135851162\nlove 130425504\n";
        symspell
            .load_dictionary_from_reader(Cursor::new(corpus), 0, 1, " ")
            .unwrap();

        let results = symspell.lookup_compound("whereis th elove", 2);
        assert_eq!(1, results.len());
        assert_eq!("where is the love", results[0].term);
        assert_eq!(2, results[0].distance);
    }

    #[test]
    fn test_lookup_compound_keeps_unknown_terms() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
        symspell.create_dictionary_entry("the", 120, None);

        let results = symspell.lookup_compound("the zzzzzzzz", 2);
        assert_eq!(1, results.len());
        assert_eq!("the zzzzzzzz", results[0].term);
        assert_eq!(0, results[0].distance);
    }

    #[test]
    fn test_word_segmentation() {
        let mut symspell = SymSpell::new(16, 0, 7, 1, 5).unwrap();
        let corpus = "the 23135851162\nquick 413058445\nbrown 76337547\nfox 23979655\n";
        symspell
            .load_dictionary_from_reader(Cursor::new(corpus), 0, 1, " ")
            .unwrap();

        let result = symspell.word_segmentation("thequickbrownfox", 0);
        assert_eq!("the quick brown fox", result.segmented_string);

        // works with upper case and preserves case
        let result = symspell.word_segmentation("THEQUICKBROWNFOX", 0);
        assert_eq!("THE QUICK BROWN FOX", result.segmented_string);
    }

    #[test]
    fn test_word_segmentation_corrects_spelling() {
        let mut symspell = SymSpell::new(16, 1, 7, 1, 5).unwrap();
        let corpus = "the 23135851162\nquick 413058445\nbrown 76337547\nfox 23979655\n";
        symspell
            .load_dictionary_from_reader(Cursor::new(corpus), 0, 1, " ")
            .unwrap();

        let result = symspell.word_segmentation("thfquickbrownfox", 1);
        assert_eq!("the quick brown fox", result.segmented_string);
    }

    #[test]
    fn test_normalization() {
        let typo = "scientiﬁc";
        let correction = "scientific";
        assert_eq!(correction, unicode_normalization_form_kc(typo));
    }

    #[test]
    fn test_transfer_case() {
        // transfer case with UTF8 characters; the tail beyond the source stays unchanged
        let source = "LEG MOZE OZNACZAC LAKE W POBLIZU RZEKI";
        let target = "Łęg może oznaczać łąkę w pobliżu rzeki (łąka łęgowa)";
        let correction = "ŁĘG MOŻE OZNACZAĆ ŁĄKĘ W POBLIŻU RZEKI (łąka łęgowa)";
        assert_eq!(correction, transfer_case(source, target));
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(
            vec!["it's", "a", "word_list", "no1"],
            parse_words("It's a word_list, No1!")
        );
        assert!(parse_words("  ,.!? ").is_empty());
    }

    #[test]
    fn test_unicode_terms() {
        let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
        symspell.create_dictionary_entry("部分", 10, None);
        symspell.create_dictionary_entry("生活", 8, None);

        let result = symspell.lookup("部分", Verbosity::Top, 0, false);
        assert_eq!(1, result.len());

        let result = symspell.lookup("部", Verbosity::Top, 2, false);
        assert_eq!("部分", result[0].term);
        assert_eq!(1, result[0].distance);
    }
}
