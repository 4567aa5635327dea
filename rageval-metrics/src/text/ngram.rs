//! N-gram frequency tables.

use std::collections::HashMap;

/// Occurrence count of each n-gram in one token sequence.
///
/// Keys borrow windows of the token slice they were built from.
pub type NgramCounts<'t> = HashMap<&'t [String], usize>;

/// Count every contiguous `n`-token window of `tokens`.
///
/// Returns an empty table when `n` is zero or longer than the sequence.
pub fn ngram_counts(tokens: &[String], n: usize) -> NgramCounts<'_> {
    let mut counts = NgramCounts::new();
    if n == 0 || n > tokens.len() {
        return counts;
    }
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Total number of n-grams recorded in a table.
pub fn total_count(counts: &NgramCounts<'_>) -> usize {
    counts.values().sum()
}
