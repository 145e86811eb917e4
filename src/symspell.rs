// Symmetric Delete spelling correction.
//
// The symmetric delete algorithm reduces the complexity of edit candidate generation and
// dictionary lookup for a given Damerau-Levenshtein distance. It is language independent:
// opposite to other algorithms only deletes are required, no transposes + replaces + inserts.
// Transposes + replaces + inserts of the input term are transformed into deletes of the
// dictionary term. Replaces and inserts are expensive and language dependent: e.g. Chinese
// has 70,000 Unicode Han characters!
//
// Compound splitting / decompounding of multi-word input strings covers three cases:
// 1. mistakenly inserted space into a correct word led to two incorrect terms
// 2. mistakenly omitted space between two correct words led to one incorrect combined term
// 3. multiple independent input terms with/without spelling errors
//
// MIT License
// Permission is hereby granted, free of charge, to any person obtaining a copy of this software
// and associated documentation files (the "Software"), to deal in the Software without
// restriction, including without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all copies or
// substantial portions of the Software.
// https://opensource.org/licenses/MIT

use std::cmp::{self, Ordering, min};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use thiserror::Error;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::distance::{DamerauOsa, FastVec};
use crate::stage::SuggestionStage;

/// Errors surfaced by construction and the bulk loaders.
#[derive(Debug, Error)]
pub enum Error {
    #[error("max_dictionary_edit_distance must be >= 0")]
    InvalidMaxEditDistance,
    #[error("prefix_length must be > 1 and > max_dictionary_edit_distance")]
    InvalidPrefixLength,
    #[error("count_threshold must be >= 0")]
    InvalidCountThreshold,
    #[error("compact_level must be <= 16")]
    InvalidCompactLevel,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Normalize ligatures: "scientiﬁc" "ﬁelds" "ﬁnal"
pub fn unicode_normalization_form_kc(input: &str) -> String {
    input.nfkc().collect::<String>()
}

/// Transfer the letter case char-wise from source to target string.
pub fn transfer_case(source: &str, target: &str) -> String {
    // source = "HeLLo WoRLd!";
    // target = "rustacean community!";
    // result = "RuSTacEaN community!";

    let mut result = String::new();

    use itertools::EitherOrBoth;
    use itertools::Itertools;

    for pair in source.chars().zip_longest(target.chars()) {
        match pair {
            EitherOrBoth::Both(s, t) => {
                if s.is_uppercase() {
                    result.push_str(&t.to_string().to_uppercase());
                } else {
                    // dictionary words are already lowercased
                    result.push(t);
                }
            }
            // only the source has characters left
            EitherOrBoth::Left(_) => (),
            // only the target has characters left, append unchanged
            EitherOrBoth::Right(t) => result.push(t),
        }
    }
    result
}

/// Parse a string into words, splitting at non-alphanumeric characters, except for
/// underscore and apostrophes.
pub fn parse_words(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    let text_normalized = text.to_lowercase();
    let mut start = false;
    let mut start_pos = 0;

    for (pos, ch) in text_normalized.char_indices() {
        start = match ch {
            // start of term
            token if token.is_alphanumeric() => {
                if !start {
                    start_pos = pos;
                }
                true
            }

            // underscore and apostrophes are part of the word
            '_' | '\'' | '’' => true,

            // end of term
            _ => {
                if start {
                    terms.push(text_normalized[start_pos..pos].to_string());
                }
                false
            }
        };
    }

    if start {
        terms.push(text_normalized[start_pos..].to_string());
    }

    terms
}

fn len(s: &str) -> usize {
    s.chars().count()
}

fn remove(s: &str, index: usize) -> String {
    s.chars()
        .enumerate()
        .filter(|(i, _)| i != &index)
        .map(|(_, ch)| ch)
        .collect()
}

fn slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end - start).collect()
}

fn suffix(s: &str, start: usize) -> String {
    s.chars().skip(start).collect()
}

fn at(s: &str, i: isize) -> Option<char> {
    if i < 0 {
        return None;
    }
    s.chars().nth(i as usize)
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    /// The word segmented and spelling corrected string.
    pub segmented_string: String,
    /// The edit distance sum between input string and corrected string.
    pub distance_sum: i64,
    /// The sum of word occurrence probabilities in log scale (a measure of how common and
    /// probable the corrected segmentation is).
    pub prob_log_sum: f64,
}

impl Composition {
    pub fn empty() -> Self {
        Self {
            segmented_string: String::new(),
            distance_sum: 0,
            prob_log_sum: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestion {
    /// The suggested correctly spelled word.
    pub term: String,
    /// Edit distance between searched for word and suggestion.
    pub distance: i64,
    /// Frequency of suggestion in the dictionary (a measure of how common the word is).
    pub count: i64,
}

impl Suggestion {
    pub fn empty() -> Suggestion {
        Suggestion {
            term: String::new(),
            distance: 0,
            count: 0,
        }
    }

    pub fn new(term: impl Into<String>, distance: i64, count: i64) -> Suggestion {
        Suggestion {
            term: term.into(),
            distance,
            count,
        }
    }
}

// Order by distance ascending, then by frequency count descending
impl Ord for Suggestion {
    fn cmp(&self, other: &Suggestion) -> Ordering {
        let distance_cmp = self.distance.cmp(&other.distance);
        if distance_cmp == Ordering::Equal {
            return other.count.cmp(&self.count);
        }
        distance_cmp
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Suggestion) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Suggestion) -> bool {
        self.distance == other.distance && self.count == other.count
    }
}
impl Eq for Suggestion {}

/// Controls the closeness/quantity of returned spelling suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verbosity {
    /// Top suggestion with the highest term frequency of the suggestions of smallest edit
    /// distance found.
    Top,
    /// All suggestions of smallest edit distance found, suggestions ordered by term frequency.
    Closest,
    /// All suggestions within max_edit_distance, suggestions ordered by edit distance, then by
    /// term frequency (slower, no early termination).
    All,
}

/// SymSpell spell checker and corrector.
#[derive(PartialEq)]
pub struct SymSpell {
    // Maximum edit distance for dictionary precalculation.
    max_dictionary_edit_distance: i64,
    // The length of word prefixes, from which deletes are generated. (5..7).
    prefix_length: i64,
    // The minimum frequency count for dictionary words to be considered valid for
    // spelling correction.
    count_threshold: i64,
    // Mask applied to delete hashes, derived from compact_level. The low 2 bits of every
    // stored hash carry min(rune length, 3).
    compact_mask: u32,
    // Maximum dictionary term length.
    max_dictionary_word_length: i64,
    // Mapping of delete hashes to the dictionary words the deletes were derived from.
    // Hash collisions are tolerated, because suggestions are ultimately verified via an
    // edit distance function.
    deletes: AHashMap<u32, Vec<Box<str>>>,
    // Dictionary of unique correct spelling words, and the frequency count for each word.
    words: AHashMap<Box<str>, i64>,
    // Words whose accumulated count has not yet reached count_threshold.
    below_threshold_words: AHashMap<Box<str>, i64>,
    // Bigrams optionally used for improved correction quality in lookup_compound.
    bigrams: AHashMap<Box<str>, i64>,
    // Minimum bigram count in the bigram dictionary.
    bigram_count_min: i64,
    // Number of all words in the corpus used to generate the frequency dictionary.
    // This is used to calculate the word occurrence probability p from word counts c: p=c/N.
    // N equals the sum of all counts c in the dictionary only if the dictionary is complete,
    // but not if the dictionary is truncated or filtered.
    corpus_word_count: usize,
}

impl SymSpell {
    /// Creates a new SymSpell instance.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - The expected number of words in the dictionary.
    /// * `max_dictionary_edit_distance` - Maximum edit distance per dictionary precalculation.
    /// * `prefix_length` - The length of word prefixes from which deletes are generated;
    ///   must exceed both 1 and `max_dictionary_edit_distance`.
    /// * `count_threshold` - The minimum frequency count for dictionary words to be
    ///   considered correct spellings.
    /// * `compact_level` - Trades delete-hash precision (0) for memory (16).
    pub fn new(
        initial_capacity: usize,
        max_dictionary_edit_distance: i64,
        prefix_length: i64,
        count_threshold: i64,
        compact_level: u8,
    ) -> Result<Self, Error> {
        if max_dictionary_edit_distance < 0 {
            return Err(Error::InvalidMaxEditDistance);
        }
        if prefix_length <= 1 || prefix_length <= max_dictionary_edit_distance {
            return Err(Error::InvalidPrefixLength);
        }
        if count_threshold < 0 {
            return Err(Error::InvalidCountThreshold);
        }
        if compact_level > 16 {
            return Err(Error::InvalidCompactLevel);
        }
        Ok(Self {
            max_dictionary_edit_distance, //2
            prefix_length,                //7
            count_threshold,              //1
            compact_mask: (u32::MAX >> (3 + compact_level)) << 2,
            max_dictionary_word_length: 0,
            deletes: AHashMap::new(),
            words: AHashMap::with_capacity(initial_capacity),
            below_threshold_words: AHashMap::new(),
            bigrams: AHashMap::new(),
            bigram_count_min: i64::MAX,
            corpus_word_count: 1_024_908_267_229,
        })
    }

    /// Get the number of entries in the dictionary.
    pub fn get_dictionary_size(&self) -> usize {
        self.words.len()
    }

    /// Create/update an entry in the dictionary.
    ///
    /// For every word there are deletes with an edit distance of 1..max_edit_distance created
    /// and added to the dictionary. Every delete entry has a suggestions list, which points to
    /// the original term(s) it was created from. The dictionary may be dynamically updated
    /// (word frequency and new words) at any time by calling `create_dictionary_entry`.
    ///
    /// When `staging` is given, the delete variants are buffered there instead of being
    /// written to the live index; call [`SymSpell::commit_staged`] once after bulk adding.
    ///
    /// # Arguments
    ///
    /// * `key` - The word to add to the dictionary.
    /// * `count` - The frequency count for the word.
    /// * `staging` - Optional staging area for bulk loads.
    ///
    /// Returns true if the word was added as a new correctly spelled word, or false if the
    /// word is added as a below threshold word, or updates an existing correctly spelled word.
    pub fn create_dictionary_entry(
        &mut self,
        key: impl AsRef<str>,
        count: i64,
        staging: Option<&mut SuggestionStage>,
    ) -> bool {
        let key = key.as_ref();
        let mut count = count;
        if count <= 0 {
            // with a threshold in place a non-positive count can never promote
            if self.count_threshold > 0 {
                return false;
            }
            count = 0;
        }

        if self.count_threshold > 1 {
            if let Some(&count_previous) = self.below_threshold_words.get(key) {
                count = count.saturating_add(count_previous);
                // has the count crossed the threshold
                if count >= self.count_threshold {
                    self.below_threshold_words.remove(key);
                } else {
                    self.below_threshold_words.insert(Box::from(key), count);
                    return false;
                }
            } else if let Some(&count_previous) = self.words.get(key) {
                self.words
                    .insert(Box::from(key), count.saturating_add(count_previous));
                return false;
            } else if count < self.count_threshold {
                self.below_threshold_words.insert(Box::from(key), count);
                return false;
            }
        } else if let Some(&count_previous) = self.words.get(key) {
            self.words
                .insert(Box::from(key), count.saturating_add(count_previous));
            return false;
        } else if count < self.count_threshold {
            self.below_threshold_words.insert(Box::from(key), count);
            return false;
        }

        self.words.insert(Box::from(key), count);

        let key_len = len(key) as i64;
        if key_len > self.max_dictionary_word_length {
            self.max_dictionary_word_length = key_len;
        }

        let edits = self.edits_prefix(key);

        match staging {
            Some(staging) => {
                for delete in &edits {
                    staging.add(self.get_string_hash(delete), key);
                }
            }
            None => {
                for delete in &edits {
                    let delete_hash = self.get_string_hash(delete);
                    self.deletes
                        .entry(delete_hash)
                        .and_modify(|bucket| bucket.push(Box::from(key)))
                        .or_insert_with(|| vec![Box::from(key)]);
                }
            }
        }
        true
    }

    /// Merges staged dictionary additions into the live delete index.
    pub fn commit_staged(&mut self, staging: SuggestionStage) {
        staging.commit_to(&mut self.deletes);
    }

    /// Load multiple dictionary entries from a file of word/frequency count pairs.
    ///
    /// # Arguments
    ///
    /// * `corpus` - The path of the file.
    /// * `term_index` - The column position of the word.
    /// * `count_index` - The column position of the frequency count.
    /// * `separator` - Separator between word and frequency; the empty string splits on
    ///   any whitespace.
    pub fn load_dictionary(
        &mut self,
        corpus: impl AsRef<Path>,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<(), Error> {
        let file = File::open(corpus)?;
        self.load_dictionary_from_reader(BufReader::new(file), term_index, count_index, separator)
    }

    /// Load dictionary entries from any buffered reader of word/frequency count lines.
    /// Lines with fewer than two fields or an unparseable count are skipped.
    pub fn load_dictionary_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<(), Error> {
        let mut staging = SuggestionStage::new(16_384);
        for line in reader.lines() {
            let line = line?;
            let line_parts: Vec<&str> = if separator.is_empty() {
                line.split_whitespace().collect()
            } else {
                line.split(separator).collect()
            };
            if line_parts.len() < 2 {
                continue;
            }
            let Some(term) = line_parts.get(term_index) else {
                continue;
            };
            let Some(count) = line_parts.get(count_index).and_then(|c| c.parse::<i64>().ok())
            else {
                continue;
            };
            self.create_dictionary_entry(*term, count, Some(&mut staging));
        }
        let staged_deletes = staging.delete_count();
        self.commit_staged(staging);
        debug!(terms = self.words.len(), staged_deletes, "dictionary loaded");
        Ok(())
    }

    /// Load multiple bigram entries from a file of bigram/frequency count pairs.
    /// Only used in `lookup_compound` for improved compound splitting/merging/correction
    /// quality.
    ///
    /// # Arguments
    ///
    /// * `corpus` - The path of the file.
    /// * `term_index` - The column position of the first word of the bigram.
    /// * `count_index` - The column position of the frequency count.
    /// * `separator` - Separator between words and frequency; with a single space (or the
    ///   empty string) the bigram key spans two whitespace separated columns.
    pub fn load_bigram_dictionary(
        &mut self,
        corpus: impl AsRef<Path>,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<(), Error> {
        let file = File::open(corpus)?;
        self.load_bigram_dictionary_from_reader(
            BufReader::new(file),
            term_index,
            count_index,
            separator,
        )
    }

    /// Load bigram entries from any buffered reader of bigram/frequency count lines.
    pub fn load_bigram_dictionary_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<(), Error> {
        let key_spans_two_columns = separator == " " || separator.is_empty();
        let min_parts = if key_spans_two_columns { 3 } else { 2 };
        for line in reader.lines() {
            let line = line?;
            let line_parts: Vec<&str> = if separator.is_empty() {
                line.split_whitespace().collect()
            } else {
                line.split(separator).collect()
            };
            if line_parts.len() < min_parts {
                continue;
            }
            let Some(count) = line_parts.get(count_index).and_then(|c| c.parse::<i64>().ok())
            else {
                continue;
            };
            let key = if key_spans_two_columns {
                let (Some(first), Some(second)) =
                    (line_parts.get(term_index), line_parts.get(term_index + 1))
                else {
                    continue;
                };
                [*first, *second].join(" ")
            } else {
                let Some(term) = line_parts.get(term_index) else {
                    continue;
                };
                (*term).to_string()
            };
            self.bigrams.insert(key.into_boxed_str(), count);
            if count < self.bigram_count_min {
                self.bigram_count_min = count;
            }
        }
        debug!(bigrams = self.bigrams.len(), "bigram dictionary loaded");
        Ok(())
    }

    /// Find suggested spellings for a given input word.
    ///
    /// # Arguments
    ///
    /// * `input` - The word being spell checked.
    /// * `verbosity` - The value controlling the quantity/closeness of the returned
    ///   suggestions.
    /// * `max_edit_distance` - The maximum edit distance between input and suggested words;
    ///   must not exceed the `max_dictionary_edit_distance` the dictionary was built with.
    /// * `include_unknown` - Whether to return the input itself (with edit distance
    ///   `max_edit_distance + 1` and count 0) when no suggestion is found.
    ///
    /// # Examples
    ///
    /// ```
    /// use symdel::{SymSpell, Verbosity};
    ///
    /// let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
    /// symspell.create_dictionary_entry("house", 231_310_420, None);
    /// let suggestions = symspell.lookup("hous", Verbosity::Top, 2, false);
    /// assert_eq!("house", suggestions[0].term);
    /// ```
    pub fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: i64,
        include_unknown: bool,
    ) -> Vec<Suggestion> {
        // the lookup distance can't be bigger than the max_dictionary_edit_distance used to
        // construct the underlying dictionary structure
        if max_edit_distance > self.max_dictionary_edit_distance {
            panic!("max_edit_distance is bigger than max_dictionary_edit_distance");
        }

        let mut suggestions = self.lookup_core(input, verbosity, max_edit_distance);
        if include_unknown && suggestions.is_empty() {
            suggestions.push(Suggestion::new(input, max_edit_distance + 1, 0));
        }
        suggestions
    }

    fn lookup_core(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: i64,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = Vec::new();

        let input_len = len(input) as i64;
        // early termination - word is too big to possibly match any words
        if input_len - max_edit_distance > self.max_dictionary_word_length {
            return suggestions;
        }

        if let Some(&suggestion_count) = self.words.get(input) {
            suggestions.push(Suggestion::new(input, 0, suggestion_count));
            // early termination - return exact match, unless caller wants all matches
            if verbosity != Verbosity::All {
                return suggestions;
            }
        }

        // early termination, if we only want to check if the word is in the dictionary or get
        // its frequency e.g. for word segmentation
        if max_edit_distance == 0 {
            return suggestions;
        }

        // deletes we've considered already
        let mut hashset1: AHashSet<String> = AHashSet::new();
        // suggestions we've considered already; the input itself was considered in the exact
        // match above
        let mut hashset2: AHashSet<String> = AHashSet::new();
        hashset2.insert(input.to_string());

        let mut max_edit_distance2 = max_edit_distance;
        let mut candidate_pointer = 0;
        let mut candidates: Vec<String> = Vec::new();

        let mut input_prefix_len = input_len;
        if input_prefix_len > self.prefix_length {
            input_prefix_len = self.prefix_length;
            candidates.push(slice(input, 0, input_prefix_len as usize));
        } else {
            candidates.push(input.to_string());
        }

        let mut distance_comparer = DamerauOsa::new();

        while candidate_pointer < candidates.len() {
            let candidate = candidates[candidate_pointer].clone();
            candidate_pointer += 1;
            let candidate_len = len(&candidate) as i64;
            let length_diff = input_prefix_len - candidate_len;

            // save some time - early termination:
            // if the candidate distance is already higher than the suggestion distance, then
            // there are no better suggestions to be expected
            if length_diff > max_edit_distance2 {
                // skip to next candidate if Verbosity::All, look no further if Top or Closest
                // (candidates are ordered by delete distance, so none are closer than current)
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            // read the candidate entry from the delete index
            if let Some(dict_suggestions) = self.deletes.get(&self.get_string_hash(&candidate)) {
                // iterate through suggestions (to other correct dictionary items) of the
                // delete item and add them to the suggestion list
                for suggestion in dict_suggestions {
                    let suggestion_len = len(suggestion) as i64;

                    if suggestion.as_ref() == input {
                        continue;
                    }

                    if (suggestion_len - input_len).abs() > max_edit_distance2
                        || suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && suggestion.as_ref() != candidate)
                    {
                        continue;
                    }

                    let sugg_prefix_len = min(suggestion_len, self.prefix_length);
                    if sugg_prefix_len > input_prefix_len
                        && sugg_prefix_len - candidate_len > max_edit_distance2
                    {
                        continue;
                    }

                    // We allow simultaneous edits (deletes) of max_edit_distance on both the
                    // dictionary and the input term. For replaces and adjacent transposes the
                    // resulting edit distance stays <= max_edit_distance, for inserts and
                    // deletes it might exceed max_edit_distance.
                    // Example: (bank==bnak and bank==bink, but bank!=kanb and bank!=xban and
                    // bank!=baxn for max_edit_distance=1). Two deletes on each side of a pair
                    // makes them all equal, but the first two pairs have edit distance=1, the
                    // others edit distance=2.
                    let distance;
                    if candidate_len == 0 {
                        // suggestions which have no common chars with the input
                        // (input_len <= max_edit_distance && suggestion_len <= max_edit_distance)
                        distance = cmp::max(input_len, suggestion_len);
                        if distance > max_edit_distance2
                            || !hashset2.insert(suggestion.to_string())
                        {
                            continue;
                        }
                    } else if suggestion_len == 1 {
                        distance = if !input.contains(&slice(suggestion, 0, 1)) {
                            input_len
                        } else {
                            input_len - 1
                        };
                        if distance > max_edit_distance2
                            || !hashset2.insert(suggestion.to_string())
                        {
                            continue;
                        }
                    // number of edits in prefix == max_edit_distance AND no identical suffix:
                    // then edit distance > max_edit_distance and no need for a distance
                    // calculation (input_len >= prefix_length && suggestion_len >= prefix_length)
                    } else if self.has_different_suffix(
                        max_edit_distance,
                        input,
                        input_len,
                        candidate_len,
                        suggestion,
                        suggestion_len,
                    ) {
                        continue;
                    } else {
                        // delete_in_suggestion_prefix is somewhat expensive, and only pays off
                        // when verbosity is Top or Closest
                        if (verbosity != Verbosity::All
                            && !self.delete_in_suggestion_prefix(
                                &candidate,
                                candidate_len,
                                suggestion,
                                suggestion_len,
                            ))
                            || !hashset2.insert(suggestion.to_string())
                        {
                            continue;
                        }

                        distance =
                            distance_comparer.distance(input, suggestion, max_edit_distance2);
                        if distance < 0 {
                            continue;
                        }
                    }

                    // save some time - do not process higher distances than those already
                    // found, if verbosity < All (note: max_edit_distance2 always equals
                    // max_edit_distance when Verbosity::All)
                    if distance <= max_edit_distance2 {
                        let suggestion_count = self.words[suggestion.as_ref()];
                        let si = Suggestion::new(suggestion.as_ref(), distance, suggestion_count);

                        if !suggestions.is_empty() {
                            match verbosity {
                                Verbosity::Closest => {
                                    // we will calculate the distance only to the smallest
                                    // found distance so far
                                    if distance < max_edit_distance2 {
                                        suggestions.clear();
                                    }
                                }
                                Verbosity::Top => {
                                    if distance < max_edit_distance2
                                        || suggestion_count > suggestions[0].count
                                    {
                                        max_edit_distance2 = distance;
                                        suggestions[0] = si;
                                    }
                                    continue;
                                }
                                Verbosity::All => (),
                            }
                        }

                        if verbosity != Verbosity::All {
                            max_edit_distance2 = distance;
                        }
                        suggestions.push(si);
                    }
                }
            }

            // add edits: derive edits (deletes) from the candidate and add them to the
            // candidates list; this is a recursive process until the maximum edit distance
            // has been reached
            if length_diff < max_edit_distance && candidate_len <= self.prefix_length {
                // save some time - do not create edits with an edit distance bigger than the
                // suggestions already found
                if verbosity != Verbosity::All && length_diff >= max_edit_distance2 {
                    continue;
                }

                for i in 0..candidate_len {
                    let delete = remove(&candidate, i as usize);
                    if !hashset1.contains(&delete) {
                        hashset1.insert(delete.clone());
                        candidates.push(delete);
                    }
                }
            }
        }

        // sort by ascending edit distance, then by descending word frequency, and drop
        // later duplicates of the same term
        if suggestions.len() > 1 {
            suggestions.sort();
            let mut seen: AHashSet<String> = AHashSet::with_capacity(suggestions.len());
            suggestions.retain(|suggestion| seen.insert(suggestion.term.clone()));
        }
        suggestions
    }

    /// Find suggested spellings for a multi-word input string (supports word splitting
    /// and merging).
    ///
    /// Three cases are covered:
    /// 1. mistakenly inserted space into a correct word led to two incorrect terms
    /// 2. mistakenly omitted space between two correct words led to one incorrect combined term
    /// 3. multiple independent input terms with/without spelling errors
    ///
    /// Returns a single-element list with the corrected string, the total edit distance to the
    /// input, and a composite Naive-Bayes frequency score.
    ///
    /// # Examples
    ///
    /// ```
    /// use symdel::SymSpell;
    ///
    /// let mut symspell = SymSpell::new(16, 2, 7, 1, 5).unwrap();
    /// symspell.create_dictionary_entry("where", 360_468_339, None);
    /// symspell.create_dictionary_entry("is", 4_705_743_816, None);
    /// symspell.create_dictionary_entry("the", 23_135_851_162, None);
    /// symspell.create_dictionary_entry("love", 130_425_504, None);
    /// let suggestions = symspell.lookup_compound("whereis th elove", 2);
    /// assert_eq!("where is the love", suggestions[0].term);
    /// ```
    pub fn lookup_compound(&self, input: &str, edit_distance_max: i64) -> Vec<Suggestion> {
        // parse input string into single terms
        let term_list1 = parse_words(input);

        // suggestions for a single term
        let mut suggestions: Vec<Suggestion>;
        // one line with separate parts
        let mut suggestion_parts: Vec<Suggestion> = Vec::new();

        let mut distance_comparer = DamerauOsa::new();
        let n = self.corpus_word_count as f64;

        // translate every term to its best suggestion, otherwise it remains unchanged
        let mut last_combi = false;
        for i in 0..term_list1.len() {
            suggestions = self.lookup(&term_list1[i], Verbosity::Top, edit_distance_max, false);

            // combi check, always before split
            if i > 0 && !last_combi {
                let mut suggestions_combi = self.lookup(
                    &[term_list1[i - 1].as_str(), term_list1[i].as_str()].concat(),
                    Verbosity::Top,
                    edit_distance_max,
                    false,
                );

                if !suggestions_combi.is_empty() {
                    let best1 = suggestion_parts[suggestion_parts.len() - 1].clone();
                    let best2 = if !suggestions.is_empty() {
                        suggestions[0].clone()
                    } else {
                        // unknown word: estimated edit distance and an estimated word count
                        // C = 10 / 10^word length l, from the word occurrence probability
                        // P = 10 / (N * 10^l) (Peter Norvig, Natural Language Corpus Data,
                        // page 224, http://norvig.com/ngrams/ch14.pdf)
                        Suggestion::new(
                            term_list1[i].as_str(),
                            edit_distance_max + 1,
                            (10f64 / 10f64.powf(len(&term_list1[i]) as f64)) as i64,
                        )
                    };

                    // distance1 = edit distance between the two split terms and their best
                    // corrections: the comparative value for the combination
                    let distance1 = best1.distance + best2.distance;
                    if distance1 >= 0
                        && (suggestions_combi[0].distance + 1 < distance1
                            || (suggestions_combi[0].distance + 1 == distance1
                                && suggestions_combi[0].count as f64
                                    > best1.count as f64 / n * best2.count as f64))
                    {
                        suggestions_combi[0].distance += 1;
                        let last_i = suggestion_parts.len() - 1;
                        suggestion_parts[last_i] = suggestions_combi[0].clone();
                        last_combi = true;
                        continue;
                    }
                }
            }
            last_combi = false;

            // always split terms without suggestion / never split terms with suggestion ed=0 /
            // never split single char terms
            if !suggestions.is_empty() && (suggestions[0].distance == 0 || len(&term_list1[i]) == 1)
            {
                // choose best suggestion
                suggestion_parts.push(suggestions[0].clone());
            } else {
                // if no perfect suggestion, split the word into pairs; the single-term
                // correction (if any) seeds the comparison
                let mut suggestion_split_best: Option<Suggestion> = if !suggestions.is_empty() {
                    Some(suggestions[0].clone())
                } else {
                    None
                };

                let term_length = len(&term_list1[i]);
                if term_length > 1 {
                    for j in 1..term_length {
                        let part1 = slice(&term_list1[i], 0, j);
                        let part2 = slice(&term_list1[i], j, term_length);
                        let suggestions1 =
                            self.lookup(&part1, Verbosity::Top, edit_distance_max, false);
                        if suggestions1.is_empty() {
                            continue;
                        }
                        let suggestions2 =
                            self.lookup(&part2, Verbosity::Top, edit_distance_max, false);
                        if suggestions2.is_empty() {
                            continue;
                        }

                        // best suggestion for the split pair
                        let split_term = [
                            suggestions1[0].term.as_str(),
                            suggestions2[0].term.as_str(),
                        ]
                        .join(" ");

                        let mut distance2 = distance_comparer.distance(
                            &term_list1[i],
                            &split_term,
                            edit_distance_max,
                        );
                        if distance2 < 0 {
                            distance2 = edit_distance_max + 1;
                        }

                        let best_distance =
                            suggestion_split_best.as_ref().map(|best| best.distance);
                        if let Some(best_distance) = best_distance {
                            if distance2 > best_distance {
                                continue;
                            }
                            if distance2 < best_distance {
                                // a strictly closer split supersedes everything found so far
                                suggestion_split_best = None;
                            }
                        }

                        let bigram_count = match self.bigrams.get(split_term.as_str()) {
                            // the split pair exists in the bigram dictionary
                            Some(&bigram_frequency) => {
                                // increase the count if the split corrections are part of or
                                // identical to the input
                                if !suggestions.is_empty() {
                                    let best_si = &suggestions[0];
                                    if [
                                        suggestions1[0].term.as_str(),
                                        suggestions2[0].term.as_str(),
                                    ]
                                    .concat()
                                        == term_list1[i]
                                    {
                                        // make the count bigger than the count of the single
                                        // term correction
                                        cmp::max(bigram_frequency, best_si.count + 2)
                                    } else if suggestions1[0].term == best_si.term
                                        || suggestions2[0].term == best_si.term
                                    {
                                        // make the count bigger than the count of the single
                                        // term correction
                                        cmp::max(bigram_frequency, best_si.count + 1)
                                    } else {
                                        bigram_frequency
                                    }
                                // no single term correction exists
                                } else if [
                                    suggestions1[0].term.as_str(),
                                    suggestions2[0].term.as_str(),
                                ]
                                .concat()
                                    == term_list1[i]
                                {
                                    cmp::max(
                                        bigram_frequency,
                                        cmp::max(suggestions1[0].count, suggestions2[0].count) + 2,
                                    )
                                } else {
                                    bigram_frequency
                                }
                            }
                            None => {
                                // the Naive Bayes probability of the word combination is the
                                // product of the two word probabilities: P(AB) = P(A) * P(B);
                                // use it to estimate the frequency count of the combination,
                                // which then ranks the best splitting variant
                                min(
                                    self.bigram_count_min,
                                    (suggestions1[0].count as f64 / n
                                        * suggestions2[0].count as f64)
                                        as i64,
                                )
                            }
                        };

                        let suggestion_split = Suggestion::new(split_term, distance2, bigram_count);
                        let replace = suggestion_split_best
                            .as_ref()
                            .map_or(true, |best| suggestion_split.count > best.count);
                        if replace {
                            suggestion_split_best = Some(suggestion_split);
                        }
                    }

                    match suggestion_split_best {
                        // select the best suggestion for the split pair
                        Some(best) => suggestion_parts.push(best),
                        None => {
                            suggestion_parts.push(Suggestion::new(
                                term_list1[i].as_str(),
                                edit_distance_max + 1,
                                (10f64 / 10f64.powf(term_length as f64)) as i64,
                            ));
                        }
                    }
                } else {
                    suggestion_parts.push(Suggestion::new(
                        term_list1[i].as_str(),
                        edit_distance_max + 1,
                        (10f64 / 10f64.powf(term_length as f64)) as i64,
                    ));
                }
            }
        }

        let mut count = n;
        let mut s = String::new();
        for si in &suggestion_parts {
            s.push_str(&si.term);
            s.push(' ');
            count *= si.count as f64 / n;
        }

        let term = s.trim_end().to_string();
        let distance = distance_comparer.distance(input, &term, i64::MAX);
        vec![Suggestion::new(term, distance, count as i64)]
    }

    /// Divides a string into words by inserting missing spaces at the appropriate positions.
    ///
    /// Works on text with any case (which is retained in the output) and on noisy text with
    /// spelling mistakes (which are corrected in the output). Existing spaces are allowed and
    /// considered for optimum segmentation.
    ///
    /// Uses a triangular-matrix approach without recursion: while each string of length n can
    /// be segmented into 2^n−1 possible compositions, the optimum composition is found in
    /// linear time.
    ///
    /// # Arguments
    ///
    /// * `input` - The string being segmented.
    /// * `max_edit_distance` - The maximum edit distance per looked-up part.
    pub fn word_segmentation(&self, input: &str, max_edit_distance: i64) -> Composition {
        // normalize ligatures and remove U+002D (hyphen-minus)
        let input = &unicode_normalization_form_kc(input).replace('\u{002D}', "");

        let asize = len(input);
        if asize == 0 {
            return Composition::empty();
        }

        let mut ci: usize = 0;
        let mut compositions: Vec<Composition> = vec![Composition::empty(); asize];

        // outer loop (column): all possible part start positions
        for j in 0..asize {
            // inner loop (row): all possible part lengths (from the start position): a part
            // can't be bigger than the longest word in the dictionary (other than a long
            // unknown word)
            let imax = min(asize - j, self.max_dictionary_word_length as usize);
            for i in 1..=imax {
                // get the top spelling correction/ed for the part
                let mut part = slice(input, j, j + i);

                let mut sep_len = 0;
                let mut top_ed: i64 = 0;

                if part.chars().next().is_some_and(char::is_whitespace) {
                    // remove the space for the distance calculation
                    part = remove(&part, 0);
                } else {
                    // add ed+1: the space did not exist and had to be inserted
                    sep_len = 1;
                }

                // remove spaces from the part, add the number of removed spaces to top_ed
                top_ed += part.len() as i64;
                part = part.replace(' ', "");
                top_ed -= part.len() as i64;

                // lookup against the lowercase term; the original case is restored below
                let results =
                    self.lookup(&part.to_lowercase(), Verbosity::Top, max_edit_distance, false);
                let top_prob_log = if !results.is_empty() {
                    // retain/preserve letter case during correction
                    if results[0].distance > 0 {
                        part = transfer_case(&part, results[0].term.as_str());
                        top_ed += results[0].distance;
                    }

                    // Naive Bayes: we assume the word probabilities of two words to be
                    // independent, so the probability of a word combination is the product of
                    // the word probabilities. Instead of the product of probabilities we
                    // compute the sum of the logarithm of probabilities, because word
                    // probabilities are around 10^-10 and the product of many such small
                    // numbers could underflow the floating point range: log(ab)=log(a)+log(b)
                    (results[0].count as f64 / self.corpus_word_count as f64).log10()
                } else {
                    let part_len = len(&part);

                    // default if the word is not found; otherwise a long input text would win
                    // as a long unknown word (with ed=edmax+1), although many spaces should
                    // have been inserted instead
                    top_ed += part_len as i64;
                    (10.0 / (self.corpus_word_count as f64 * 10.0f64.powf(part_len as f64)))
                        .log10()
                };

                let di = (i + ci) % asize;
                // set values in the first loop
                if j == 0 {
                    compositions[i - 1] = Composition {
                        segmented_string: part.clone(),
                        distance_sum: top_ed,
                        prob_log_sum: top_prob_log,
                    };
                } else if i as i64 == self.max_dictionary_word_length
                    // replace values on a better prob_log_sum at the same edit distance
                    // OR one space difference
                    || (((compositions[ci].distance_sum + top_ed == compositions[di].distance_sum)
                        || (compositions[ci].distance_sum + sep_len + top_ed
                            == compositions[di].distance_sum))
                        && (compositions[di].prob_log_sum
                            < compositions[ci].prob_log_sum + top_prob_log))
                    // replace values on a smaller edit distance
                    || (compositions[ci].distance_sum + sep_len + top_ed
                        < compositions[di].distance_sum)
                {
                    // keep punctuation or apostrophe adjacent to the previous word
                    if (part.len() == 1
                        && part.chars().next().is_some_and(|ch| ch.is_ascii_punctuation()))
                        || (part.len() == 3 && part.starts_with('’'))
                    {
                        compositions[di] = Composition {
                            segmented_string: [
                                compositions[ci].segmented_string.as_str(),
                                part.as_str(),
                            ]
                            .concat(),
                            distance_sum: compositions[ci].distance_sum + top_ed,
                            prob_log_sum: compositions[ci].prob_log_sum + top_prob_log,
                        };
                    } else {
                        compositions[di] = Composition {
                            segmented_string: [
                                compositions[ci].segmented_string.as_str(),
                                part.as_str(),
                            ]
                            .join(" "),
                            distance_sum: compositions[ci].distance_sum + sep_len + top_ed,
                            prob_log_sum: compositions[ci].prob_log_sum + top_prob_log,
                        };
                    }
                }
            }
            if j != 0 {
                ci += 1;
            }
            ci = if ci == asize { 0 } else { ci };
        }
        compositions[ci].clone()
    }

    // Check whether all delete chars are present in the suggestion prefix in the correct
    // order; otherwise this is just a hash collision.
    fn delete_in_suggestion_prefix(
        &self,
        delete: &str,
        delete_len: i64,
        suggestion: &str,
        suggestion_len: i64,
    ) -> bool {
        if delete_len == 0 {
            return true;
        }
        let suggestion_len = min(self.prefix_length, suggestion_len);
        let sugg_chars: FastVec<char> = suggestion.chars().take(suggestion_len as usize).collect();
        let mut j = 0;
        for del_char in delete.chars() {
            while j < sugg_chars.len() && del_char != sugg_chars[j] {
                j += 1;
            }
            if j == sugg_chars.len() {
                return false;
            }
        }
        true
    }

    // Boundary tail check: when the candidate consumed the full edit budget inside the
    // prefix window, a tail mismatch not explained by a single adjacent swap already proves
    // the edit distance exceeds the bound, so the distance calculation can be skipped.
    fn has_different_suffix(
        &self,
        max_edit_distance: i64,
        input: &str,
        input_len: i64,
        candidate_len: i64,
        suggestion: &str,
        suggestion_len: i64,
    ) -> bool {
        if self.prefix_length - max_edit_distance != candidate_len {
            return false;
        }
        let min_len = min(input_len, suggestion_len) - self.prefix_length;
        (min_len > 1
            && suffix(input, (input_len - min_len) as usize)
                != suffix(suggestion, (suggestion_len - min_len) as usize))
            || (min_len > 0
                && at(input, (input_len - min_len) as isize)
                    != at(suggestion, (suggestion_len - min_len) as isize)
                && (at(input, (input_len - min_len - 1) as isize)
                    != at(suggestion, (suggestion_len - min_len) as isize)
                    || at(input, (input_len - min_len) as isize)
                        != at(suggestion, (suggestion_len - min_len - 1) as isize)))
    }

    // All deletes for a word within the prefix window, up to max_dictionary_edit_distance.
    fn edits_prefix(&self, key: &str) -> AHashSet<String> {
        let mut hash_set = AHashSet::new();

        let key_len = len(key) as i64;
        if key_len <= self.max_dictionary_edit_distance {
            hash_set.insert(String::new());
        }

        if key_len > self.prefix_length {
            let shortened_key = slice(key, 0, self.prefix_length as usize);
            hash_set.insert(shortened_key.clone());
            self.edits(&shortened_key, 0, &mut hash_set);
        } else {
            hash_set.insert(key.to_string());
            self.edits(key, 0, &mut hash_set);
        }

        hash_set
    }

    // Inexpensive and language independent: only deletes, no transposes + replaces + inserts.
    // Replaces and inserts are expensive and language dependent (Chinese has 70,000 Unicode
    // Han characters).
    fn edits(&self, word: &str, edit_distance: i64, delete_words: &mut AHashSet<String>) {
        let edit_distance = edit_distance + 1;
        let word_len = len(word);

        if word_len > 1 {
            for i in 0..word_len {
                let delete = remove(word, i);
                if !delete_words.contains(&delete) {
                    delete_words.insert(delete.clone());
                    if edit_distance < self.max_dictionary_edit_distance {
                        self.edits(&delete, edit_distance, delete_words);
                    }
                }
            }
        }
    }

    // FNV-1a over the rune values, masked by compact_mask, with the low 2 bits carrying
    // min(rune length, 3). Two delete strings share a bucket only when both their masked
    // hash and their length category match.
    fn get_string_hash(&self, s: &str) -> u32 {
        let mut rune_len: usize = 0;
        let mut hash: u32 = 2_166_136_261;
        for ch in s.chars() {
            rune_len += 1;
            hash ^= ch as u32;
            hash = hash.wrapping_mul(16_777_619);
        }

        let len_mask = min(rune_len, 3) as u32;
        (hash & self.compact_mask) | len_mask
    }
}
