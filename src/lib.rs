/*!

Spelling correction & fuzzy search based on the symmetric delete spelling correction algorithm.

#### Usage

Single word spelling correction

```rust
use symdel::{SymSpell, Verbosity};

let max_edit_distance_dictionary = 2; //maximum edit distance per dictionary precalculation
let mut symspell = SymSpell::new(16, max_edit_distance_dictionary, 7, 1, 5).unwrap();

symspell.create_dictionary_entry("house", 231_310_420, None);
symspell.create_dictionary_entry("hour", 94_703_042, None);

//lookup suggestions for single-word input strings
let input_term = "hous";
let suggestion_verbosity = Verbosity::Closest; //Top, Closest, All
let max_edit_distance_lookup = 1; //max edit distance per lookup (<= max_edit_distance_dictionary)
let suggestions = symspell.lookup(input_term, suggestion_verbosity, max_edit_distance_lookup, false);
//display suggestions, edit distance and term frequency
println!("{suggestions:?}");
```

Bulk loading a frequency dictionary through a staging area, then compound aware multi-word
spelling correction

```rust
use std::io::Cursor;
use symdel::SymSpell;

let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();

// single term dictionary: one "<term> <count>" pair per line
let term_index = 0; //column of the term in the dictionary text file
let count_index = 1; //column of the term frequency in the dictionary text file
let corpus = "the 23135851162\nquick 413058445\nbrown 76337547\nfox 23979655\n";
symspell
    .load_dictionary_from_reader(Cursor::new(corpus), term_index, count_index, " ")
    .unwrap();
// bigram dictionary
symspell
    .load_bigram_dictionary_from_reader(Cursor::new("quick brown 773549\n"), 0, 2, " ")
    .unwrap();

//lookup suggestions for multi-word input strings (supports compound splitting & merging)
let compound_suggestions = symspell.lookup_compound("thequikc bruwn fox", 2);
assert_eq!("the quick brown fox", compound_suggestions[0].term);
```

Word segmentation of noisy text

```rust
use symdel::SymSpell;

let mut symspell = SymSpell::new(16, 0, 7, 1, 5).unwrap();
symspell.create_dictionary_entry("it", 1_545_844_189, None);
symspell.create_dictionary_entry("was", 1_041_744_883, None);

//word segmentation and correction for multi-word input strings with/without spaces
let result = symspell.word_segmentation("itwas", 0);
assert_eq!("it was", result.segmented_string);
```

*/

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

mod distance;
mod stage;
mod symspell;
mod test;

pub use distance::{DamerauOsa, damerau_levenshtein_osa};
pub use stage::SuggestionStage;
pub use symspell::{Composition, Error, Suggestion, SymSpell, Verbosity};
