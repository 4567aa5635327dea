//! Content-word F1: overlap restricted to words of three or more characters
//! that are not pure numbers.
//!
//! Low precision means the candidate carries content the reference lacks
//! (possible hallucination or verbosity); low recall means it misses content.

use crate::error::MetricsError;
use crate::metrics::overlap::{OverlapScore, bag_overlap};
use crate::references::{References, best_of};
use crate::text::content_tokens;

/// Content-word precision, recall and F1 against the best reference.
pub fn content_f1<'a>(
    candidate: &str,
    references: impl Into<References<'a>>,
) -> Result<OverlapScore, MetricsError> {
    let references = references.into();
    references.require_non_empty("ContentF1")?;

    let cand_tokens = content_tokens(candidate);
    let best = best_of(
        &references,
        |reference| Some(bag_overlap(&cand_tokens, &content_tokens(reference))),
        |score| score.f1,
    );
    Ok(best.unwrap_or(OverlapScore::ZERO))
}
