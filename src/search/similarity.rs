//! Typo-tolerant similarity between one field text and one search term.
//!
//! Three tiers, each strictly stronger than the next:
//! - Exact match: [`scoring::EXACT_MATCH_SCORE`]
//! - Substring containment: 4..=8, longer terms relative to the text score higher
//! - Fuzzy match within an edit-distance tolerance: 1..=3, closer scores higher
//!
//! Both sides are trimmed and lower-cased before comparison.

use crate::search::distance::levenshtein_chars;

/// Tunable scoring constants.
///
/// Changing these never requires touching the ranking logic.
pub mod scoring {
    /// Score for a text equal to the term.
    pub const EXACT_MATCH_SCORE: u32 = 10;
    /// Lowest score of a substring hit.
    pub const SUBSTRING_BASE_SCORE: u32 = 4;
    /// Extra substring score spread by `|term| / |text|`.
    pub const SUBSTRING_SPAN: u32 = 5;
    /// Highest score of a fuzzy hit (distance 1).
    pub const FUZZY_MAX_SCORE: u32 = 3;
    /// Terms shorter than this never fuzzy-match.
    pub const MIN_FUZZY_TERM_CHARS: usize = 3;
    /// Tolerance is `max(1, |term| / FUZZY_TOLERANCE_DIVISOR)`.
    pub const FUZZY_TOLERANCE_DIVISOR: usize = 4;
    /// Terms longer than this are only compared against the whole text.
    pub const MAX_FUZZY_WINDOW_TERM_CHARS: usize = 32;
}

use scoring::*;

/// Score how well `text` matches `term`.
///
/// Returns 0 for no match, and always 0 for an empty term.
pub fn calculate_similarity(text: &str, term: &str) -> u32 {
    let text = text.trim().to_lowercase();
    let term = term.trim().to_lowercase();

    if term.is_empty() || text.is_empty() {
        return 0;
    }

    if text == term {
        return EXACT_MATCH_SCORE;
    }

    if text.contains(&term) {
        return substring_score(term.chars().count(), text.chars().count());
    }

    let text_chars: Vec<char> = text.chars().collect();
    let term_chars: Vec<char> = term.chars().collect();

    match best_fuzzy_distance(&text_chars, &term_chars) {
        Some(distance) => fuzzy_score(distance),
        None => 0,
    }
}

/// Edit distance allowed for a term of the given length.
pub fn fuzzy_tolerance(term_len: usize) -> usize {
    (term_len / FUZZY_TOLERANCE_DIVISOR).max(1)
}

fn substring_score(term_len: usize, text_len: usize) -> u32 {
    let spread = (SUBSTRING_SPAN as usize * term_len / text_len.max(1)) as u32;
    (SUBSTRING_BASE_SCORE + spread).min(EXACT_MATCH_SCORE - 1)
}

fn fuzzy_score(distance: usize) -> u32 {
    let distance = u32::try_from(distance).unwrap_or(u32::MAX);
    (FUZZY_MAX_SCORE + 1).saturating_sub(distance).max(1)
}

/// Smallest edit distance between the term and a run of whole words in the
/// text, if it is within tolerance.
///
/// Only runs whose length is within tolerance of the term are compared, so a
/// short term never matches a fragment of an unrelated longer word. Inside such
/// a run, windows down to one char shorter than the term are also tried; this
/// lets a transposed pair (`"auht"` for `"auth"`) count as a single edit.
fn best_fuzzy_distance(text: &[char], term: &[char]) -> Option<usize> {
    if term.len() < MIN_FUZZY_TERM_CHARS {
        return None;
    }

    let tolerance = fuzzy_tolerance(term.len());
    let min_window = (term.len() - 1).max(MIN_FUZZY_TERM_CHARS);
    let use_windows = term.len() <= MAX_FUZZY_WINDOW_TERM_CHARS;
    let mut best: Option<usize> = None;

    let mut consider = |candidate: &[char]| {
        if candidate.len().abs_diff(term.len()) > tolerance {
            return;
        }
        let distance = levenshtein_chars(candidate, term);
        if distance <= tolerance && best.is_none_or(|b| distance < b) {
            best = Some(distance);
        }
    };

    for span in word_spans(text, term.len() + tolerance) {
        if span.len().abs_diff(term.len()) > tolerance {
            continue;
        }
        consider(span);

        if use_windows {
            let max_window = (term.len() + 1).min(span.len().saturating_sub(1));
            for window_len in min_window..=max_window {
                for window in span.windows(window_len) {
                    consider(window);
                }
            }
        }
    }

    best
}

/// Every run of consecutive whitespace-separated words, up to `max_len` chars.
fn word_spans(text: &[char], max_len: usize) -> Vec<&[char]> {
    let mut words: Vec<(usize, usize)> = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.iter().enumerate() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, text.len()));
    }

    let mut spans = Vec::new();
    for (i, &(first, _)) in words.iter().enumerate() {
        for &(_, last) in &words[i..] {
            if last - first > max_len {
                break;
            }
            spans.push(&text[first..last]);
        }
    }
    spans
}
