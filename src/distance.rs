use std::cmp;
use std::mem;

use smallvec::SmallVec;

const VEC_SIZE: usize = 16;
pub type FastVec<T> = SmallVec<[T; VEC_SIZE]>;

/// Damerau-Levenshtein edit distance, like Levenshtein but allows for adjacent transpositions.
/// Optimal string alignment version (OSA): each substring can only be edited once.
/// E.g., "CA" to "ABC" has an edit distance of 2 for Damerau-Levenshtein, but a distance of 3
/// when using the optimal string alignment algorithm.
/// https://en.wikipedia.org/wiki/Damerau%E2%80%93Levenshtein_distance#Optimal_string_alignment_distance
///
/// The comparer owns two cost buffers that are reused and grown monotonically across calls,
/// so repeated comparisons against the same dictionary allocate nothing beyond the rune
/// buffers. It is not thread-safe; each concurrent caller owns its own comparer.
pub struct DamerauOsa {
    base_char1_costs: Vec<i64>,
    base_prev_char1_costs: Vec<i64>,
}

impl Default for DamerauOsa {
    fn default() -> Self {
        Self::new()
    }
}

impl DamerauOsa {
    pub fn new() -> Self {
        Self {
            base_char1_costs: Vec::new(),
            base_prev_char1_costs: Vec::new(),
        }
    }

    /// Computes the Damerau-Levenshtein optimal string alignment edit distance between two
    /// strings. Returns -1 if the distance is greater than `max_distance`, 0 if the strings
    /// are equivalent, otherwise a positive number whose magnitude increases as the
    /// difference between the strings increases. Operates on Unicode scalar values.
    pub fn distance(&mut self, string1: &str, string2: &str, max_distance: i64) -> i64 {
        if string1.is_empty() || string2.is_empty() {
            return null_distance_results(string1, string2, max_distance);
        }
        if max_distance <= 0 {
            return if string1 == string2 { 0 } else { -1 };
        }

        let mut chars1: FastVec<char> = string1.chars().collect();
        let mut chars2: FastVec<char> = string2.chars().collect();

        // ensure the shorter string is in chars1
        if chars1.len() > chars2.len() {
            mem::swap(&mut chars1, &mut chars2);
        }
        if (chars2.len() - chars1.len()) as i64 > max_distance {
            return -1;
        }

        // identify common prefix and/or suffix that can be ignored
        let (len1, len2, start) = prefix_suffix_prep(&chars1, &chars2);
        if len1 == 0 {
            return if len2 as i64 <= max_distance {
                len2 as i64
            } else {
                -1
            };
        }

        if len2 > self.base_char1_costs.len() {
            self.base_char1_costs = vec![0; len2];
            self.base_prev_char1_costs = vec![0; len2];
        }
        if max_distance < len2 as i64 {
            distance_with_max(
                &chars1,
                &chars2,
                len1,
                len2,
                start,
                max_distance,
                &mut self.base_char1_costs,
                &mut self.base_prev_char1_costs,
            )
        } else {
            dist(
                &chars1,
                &chars2,
                len1,
                len2,
                start,
                &mut self.base_char1_costs,
                &mut self.base_prev_char1_costs,
            )
        }
    }
}

/// Convenience wrapper computing a single distance with a throwaway comparer.
pub fn damerau_levenshtein_osa(a: &str, b: &str, max_distance: i64) -> i64 {
    DamerauOsa::new().distance(a, b, max_distance)
}

// Core two-row dynamic program with rolling transposition costs.
fn dist(
    chars1: &[char],
    chars2: &[char],
    len1: usize,
    len2: usize,
    start: usize,
    char1_costs: &mut [i64],
    prev_char1_costs: &mut [i64],
) -> i64 {
    for (j, cost) in char1_costs.iter_mut().enumerate().take(len2) {
        *cost = j as i64 + 1;
    }
    let mut char1 = char::MAX;
    let mut current_cost: i64 = 0;
    for i in 0..len1 {
        let prev_char1 = char1;
        char1 = chars1[start + i];
        let mut char2 = char::MAX;
        let mut left_char_cost = i as i64;
        let mut above_char_cost = i as i64;
        let mut next_trans_cost: i64 = 0;
        for j in 0..len2 {
            let this_trans_cost = next_trans_cost;
            next_trans_cost = prev_char1_costs[j];
            prev_char1_costs[j] = current_cost;
            current_cost = left_char_cost;
            left_char_cost = char1_costs[j];
            let prev_char2 = char2;
            char2 = chars2[start + j];
            if char1 != char2 {
                // substitution
                if above_char_cost < current_cost {
                    current_cost = above_char_cost; // deletion
                }
                if left_char_cost < current_cost {
                    current_cost = left_char_cost; // insertion
                }
                current_cost += 1;
                if i != 0
                    && j != 0
                    && char1 == prev_char2
                    && prev_char1 == char2
                    && this_trans_cost + 1 < current_cost
                {
                    current_cost = this_trans_cost + 1; // transposition
                }
            }
            char1_costs[j] = current_cost;
            above_char_cost = current_cost;
        }
    }
    current_cost
}

// Banded variant: a sliding window [j_start, j_end) along the inner axis keeps the
// computation within max_distance of the main diagonal; everything outside behaves as
// max_distance + 1. After each outer row the cell on the main anti-diagonal decides
// whether the bound can still be met.
#[allow(clippy::too_many_arguments)]
fn distance_with_max(
    chars1: &[char],
    chars2: &[char],
    len1: usize,
    len2: usize,
    start: usize,
    max_distance: i64,
    char1_costs: &mut [i64],
    prev_char1_costs: &mut [i64],
) -> i64 {
    for (j, cost) in char1_costs.iter_mut().enumerate().take(len2) {
        *cost = if (j as i64) < max_distance {
            j as i64 + 1
        } else {
            max_distance + 1
        };
    }
    let len_diff = len2 - len1;
    let j_start_offset = max_distance - len_diff as i64;
    let mut j_start: usize = 0;
    let mut j_end = max_distance as usize;
    let mut char1 = char::MAX;
    let mut current_cost: i64 = 0;
    for i in 0..len1 {
        let prev_char1 = char1;
        char1 = chars1[start + i];
        let mut char2 = char::MAX;
        let mut left_char_cost = i as i64;
        let mut above_char_cost = i as i64;
        let mut next_trans_cost: i64 = 0;
        // adjust the window
        if i as i64 > j_start_offset {
            j_start += 1;
        }
        if j_end < len2 {
            j_end += 1;
        }
        for j in j_start..j_end {
            let this_trans_cost = next_trans_cost;
            next_trans_cost = prev_char1_costs[j];
            prev_char1_costs[j] = current_cost;
            current_cost = left_char_cost;
            left_char_cost = char1_costs[j];
            let prev_char2 = char2;
            char2 = chars2[start + j];
            if char1 != char2 {
                // substitution
                if above_char_cost < current_cost {
                    current_cost = above_char_cost; // deletion
                }
                if left_char_cost < current_cost {
                    current_cost = left_char_cost; // insertion
                }
                current_cost += 1;
                if i != 0
                    && j != 0
                    && char1 == prev_char2
                    && prev_char1 == char2
                    && this_trans_cost + 1 < current_cost
                {
                    current_cost = this_trans_cost + 1; // transposition
                }
            }
            char1_costs[j] = current_cost;
            above_char_cost = current_cost;
        }
        if char1_costs[i + len_diff] > max_distance {
            return -1;
        }
    }
    if current_cost <= max_distance {
        current_cost
    } else {
        -1
    }
}

// Empty-input cases: the distance is the other string's rune length.
fn null_distance_results(string1: &str, string2: &str, max_distance: i64) -> i64 {
    if string1 == string2 {
        return 0;
    }
    let distance = cmp::max(string1.chars().count(), string2.chars().count()) as i64;
    if distance > max_distance { -1 } else { distance }
}

// Strips the common prefix and suffix, returning the effective lengths and start offset.
fn prefix_suffix_prep(chars1: &[char], chars2: &[char]) -> (usize, usize, usize) {
    let mut len1 = chars1.len();
    let mut len2 = chars2.len();
    let mut start = 0;
    while start < len1 && start < len2 && chars1[start] == chars2[start] {
        start += 1;
    }
    len1 -= start;
    len2 -= start;
    while len1 > 0 && len2 > 0 && chars1[start + len1 - 1] == chars2[start + len2 - 1] {
        len1 -= 1;
        len2 -= 1;
    }
    (len1, len2, start)
}
