//! ROUGE-L: longest-common-subsequence F-measure.

use crate::error::MetricsError;
use crate::references::{References, best_of};
use crate::text::{lcs_length, tokenize};
use serde::{Deserialize, Serialize};

/// ROUGE-L result against the best-matching reference.
///
/// `f1` holds the F-beta value; it is the F1 score at the default `beta = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScore {
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
    pub lcs: usize,
}

/// ROUGE-L of `candidate` against each reference; the highest F wins.
///
/// All fields come from the same winning reference. On equal F the first
/// reference in input order wins; this tie-break is implementation-defined.
/// References that tokenize to nothing are skipped, and an empty candidate
/// scores all zeros.
pub fn rouge_l<'a>(
    candidate: &str,
    references: impl Into<References<'a>>,
    beta: f64,
) -> Result<RougeScore, MetricsError> {
    let references = references.into();
    references.require_non_empty("ROUGE-L")?;
    if !beta.is_finite() || beta < 0.0 {
        return Err(MetricsError::invalid_input(format!(
            "ROUGE-L beta must be finite and non-negative, got {beta}"
        )));
    }

    let cand_tokens = tokenize(candidate);
    if cand_tokens.is_empty() {
        return Ok(RougeScore::default());
    }

    let beta2 = beta * beta;
    let best = best_of(
        &references,
        |reference| {
            let ref_tokens = tokenize(reference);
            if ref_tokens.is_empty() {
                return None;
            }
            Some(score_pair(&cand_tokens, &ref_tokens, beta2))
        },
        |score| score.f1,
    );
    Ok(best.unwrap_or_default())
}

fn score_pair(cand_tokens: &[String], ref_tokens: &[String], beta2: f64) -> RougeScore {
    let lcs = lcs_length(cand_tokens, ref_tokens);
    let precision = lcs as f64 / cand_tokens.len() as f64;
    let recall = lcs as f64 / ref_tokens.len() as f64;
    let denominator = recall + beta2 * precision;
    let f1 = if denominator == 0.0 {
        0.0
    } else {
        (1.0 + beta2) * precision * recall / denominator
    };
    RougeScore {
        f1,
        precision,
        recall,
        lcs,
    }
}
