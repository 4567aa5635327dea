//! Multi-reference BLEU with Chen & Cherry style smoothing.

use crate::error::MetricsError;
use crate::references::{References, max_reference_counts};
use crate::text::ngram::total_count;
use crate::text::{NgramCounts, ngram_counts, tokenize};
use serde::{Deserialize, Serialize};

/// Log contribution used for a zero precision; drives the geometric mean to 0.
const ZERO_PRECISION_LOG: f64 = -1e9;

/// Highest n-gram order accepted for BLEU.
pub const MAX_NGRAM_ORDER: usize = 16;

/// Options for [`bleu`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BleuOptions {
    /// Highest n-gram order, inclusive.
    pub max_n: usize,
    /// Replace zero precisions with a geometrically shrinking floor.
    pub smooth: bool,
    /// Per-order weights; uniform `1/max_n` when `None`.
    pub weights: Option<Vec<f64>>,
}

impl Default for BleuOptions {
    fn default() -> Self {
        Self {
            max_n: 4,
            smooth: true,
            weights: None,
        }
    }
}

/// BLEU result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BleuScore {
    pub bleu: f64,
    /// Modified precision per order, index 0 = unigrams.
    pub by_n: Vec<f64>,
    /// Brevity penalty.
    pub bp: f64,
}

impl BleuOptions {
    fn resolved_weights(&self) -> Result<Vec<f64>, MetricsError> {
        if self.max_n == 0 {
            return Err(MetricsError::invalid_input("BLEU max_n must be at least 1"));
        }
        if self.max_n > MAX_NGRAM_ORDER {
            return Err(MetricsError::invalid_input(format!(
                "BLEU max_n must be at most {MAX_NGRAM_ORDER}, got {}",
                self.max_n
            )));
        }
        match &self.weights {
            None => Ok(vec![1.0 / self.max_n as f64; self.max_n]),
            Some(weights) if weights.len() != self.max_n => Err(MetricsError::invalid_input(
                format!(
                    "BLEU expects {} n-gram weights, got {}",
                    self.max_n,
                    weights.len()
                ),
            )),
            Some(weights) if weights.iter().any(|w| !w.is_finite() || *w < 0.0) => Err(
                MetricsError::invalid_input("BLEU n-gram weights must be finite and non-negative"),
            ),
            Some(weights) => Ok(weights.clone()),
        }
    }
}

/// Score `candidate` against one or more references with BLEU.
///
/// Candidate n-gram counts are clipped against the largest count of that
/// n-gram in any single reference. The brevity penalty uses the reference
/// length closest to the candidate length, preferring the shorter reference on
/// a tie. An empty candidate scores 0.0 with `bp = 0.0`.
///
/// With smoothing on, the k-th order (counting only orders whose clipped
/// precision is zero) gets precision `1 / (denominator * 2^k)`.
pub fn bleu<'a>(
    candidate: &str,
    references: impl Into<References<'a>>,
    options: &BleuOptions,
) -> Result<BleuScore, MetricsError> {
    let references = references.into();
    references.require_non_empty("BLEU")?;
    let weights = options.resolved_weights()?;

    let cand_tokens = tokenize(candidate);
    if cand_tokens.is_empty() {
        return Ok(BleuScore {
            bleu: 0.0,
            by_n: vec![0.0; options.max_n],
            bp: 0.0,
        });
    }

    let ref_tokens: Vec<Vec<String>> = references.iter().map(tokenize).collect();
    let ref_lens: Vec<usize> = ref_tokens.iter().map(Vec::len).collect();
    let cand_len = cand_tokens.len();
    let bp = brevity_penalty(cand_len, effective_reference_length(cand_len, &ref_lens));

    let mut precisions = Vec::with_capacity(options.max_n);
    let mut smoothing_step = 1i32;
    for n in 1..=options.max_n {
        let cand_counts = ngram_counts(&cand_tokens, n);
        let ref_tables: Vec<NgramCounts<'_>> =
            ref_tokens.iter().map(|toks| ngram_counts(toks, n)).collect();
        let clip_table = max_reference_counts(&ref_tables);

        let matched = clipped_matches(&cand_counts, &clip_table);
        let denominator = total_count(&cand_counts).max(1);
        let mut precision = matched as f64 / denominator as f64;
        if options.smooth && precision == 0.0 {
            precision = 1.0 / (denominator as f64 * 2f64.powi(smoothing_step));
            smoothing_step += 1;
        }
        precisions.push(precision);
    }

    let log_sum: f64 = weights
        .iter()
        .zip(&precisions)
        .map(|(w, p)| w * if *p > 0.0 { p.ln() } else { ZERO_PRECISION_LOG })
        .sum();
    let geometric_mean = if log_sum > ZERO_PRECISION_LOG / 10.0 {
        log_sum.exp()
    } else {
        0.0
    };

    Ok(BleuScore {
        bleu: bp * geometric_mean,
        by_n: precisions,
        bp,
    })
}

/// Sum of candidate n-gram counts, each capped at its clip-table count.
fn clipped_matches(candidate: &NgramCounts<'_>, clip_table: &NgramCounts<'_>) -> usize {
    candidate
        .iter()
        .map(|(gram, &count)| count.min(clip_table.get(gram).copied().unwrap_or(0)))
        .sum()
}

/// Reference length closest to `cand_len`; the shorter one wins a tie.
fn effective_reference_length(cand_len: usize, ref_lens: &[usize]) -> usize {
    ref_lens
        .iter()
        .copied()
        .min_by_key(|&len| (len.abs_diff(cand_len), len))
        .unwrap_or(0)
}

fn brevity_penalty(cand_len: usize, ref_len: usize) -> f64 {
    if cand_len == 0 {
        return 0.0;
    }
    if cand_len > ref_len {
        return 1.0;
    }
    (1.0 - ref_len as f64 / cand_len as f64).exp()
}
