//! Levenshtein edit distance over Unicode scalar values.
//!
//! A multi-byte character (a kana, an accented letter) counts as one unit.
//! Comparison is case-sensitive; callers lower-case first when they want
//! case-insensitive distances.

/// Edit distance between two strings.
///
/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_chars(&a, &b)
}

/// Edit distance between two char slices.
///
/// Uses two rolling rows of the `(|a|+1) x (|b|+1)` table.
pub fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
