//! Bag-of-tokens overlap shared by SQuAD token F1 and content F1.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Precision, recall and F1 of one candidate/reference comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlapScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl OverlapScore {
    /// Both bags empty: a perfect (vacuous) match.
    pub const PERFECT: Self = Self {
        precision: 1.0,
        recall: 1.0,
        f1: 1.0,
    };

    pub const ZERO: Self = Self {
        precision: 0.0,
        recall: 0.0,
        f1: 0.0,
    };
}

/// Multiset overlap between two token bags.
///
/// Shared tokens count `min(candidate_count, reference_count)` times. Two
/// empty bags score 1.0; exactly one empty bag scores 0.0.
pub fn bag_overlap<T: Eq + Hash>(candidate: &[T], reference: &[T]) -> OverlapScore {
    match (candidate.is_empty(), reference.is_empty()) {
        (true, true) => return OverlapScore::PERFECT,
        (true, false) | (false, true) => return OverlapScore::ZERO,
        (false, false) => {}
    }

    let mut reference_counts: HashMap<&T, usize> = HashMap::new();
    for token in reference {
        *reference_counts.entry(token).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for token in candidate {
        if let Some(remaining) = reference_counts.get_mut(token) {
            if *remaining > 0 {
                *remaining -= 1;
                shared += 1;
            }
        }
    }

    if shared == 0 {
        return OverlapScore::ZERO;
    }
    let precision = shared as f64 / candidate.len() as f64;
    let recall = shared as f64 / reference.len() as f64;
    OverlapScore {
        precision,
        recall,
        f1: 2.0 * precision * recall / (precision + recall),
    }
}
