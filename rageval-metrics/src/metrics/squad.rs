//! SQuAD-style exact match and token F1.

use crate::error::MetricsError;
use crate::metrics::overlap::bag_overlap;
use crate::references::{References, best_of};
use crate::text::normalize_for_match;

/// 1.0 when the normalized candidate equals any normalized reference.
///
/// Two texts that both normalize to the empty string are equal.
pub fn squad_em<'a>(
    candidate: &str,
    references: impl Into<References<'a>>,
) -> Result<f64, MetricsError> {
    let references = references.into();
    references.require_non_empty("SQuAD EM")?;

    let normalized = normalize_for_match(candidate);
    let matched = references
        .iter()
        .any(|reference| normalize_for_match(reference) == normalized);
    Ok(if matched { 1.0 } else { 0.0 })
}

/// Best bag-of-tokens F1 over the normalized references.
///
/// Both sides empty after normalization scores 1.0; exactly one empty side
/// scores 0.0.
pub fn squad_token_f1<'a>(
    candidate: &str,
    references: impl Into<References<'a>>,
) -> Result<f64, MetricsError> {
    let references = references.into();
    references.require_non_empty("SQuAD token F1")?;

    let normalized = normalize_for_match(candidate);
    let cand_tokens: Vec<&str> = normalized.split_whitespace().collect();
    let best = best_of(
        &references,
        |reference| {
            let normalized_ref = normalize_for_match(reference);
            let ref_tokens: Vec<&str> = normalized_ref.split_whitespace().collect();
            Some(bag_overlap(&cand_tokens, &ref_tokens).f1)
        },
        |f1| *f1,
    );
    Ok(best.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_em_ignores_case_punctuation_articles() {
        assert_eq!(squad_em("The Eiffel Tower!", "eiffel tower").unwrap(), 1.0);
        assert_eq!(squad_em("Paris", "Lyon").unwrap(), 0.0);
    }

    #[test]
    fn test_em_any_reference() {
        assert_eq!(squad_em("Lyon", ["Paris", "a Lyon"]).unwrap(), 1.0);
    }

    #[test]
    fn test_em_empty_strings_match() {
        assert_eq!(squad_em("", "").unwrap(), 1.0);
        assert_eq!(squad_em("the", "?").unwrap(), 1.0);
        assert_eq!(squad_em("", "x").unwrap(), 0.0);
    }

    #[test]
    fn test_token_f1_partial() {
        // candidate {cat, sat, on, mat}, reference {cat, is, on, mat}: 3 shared.
        let f1 = squad_token_f1("The cat sat on the mat.", "The cat is on the mat.").unwrap();
        assert!((f1 - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_token_f1_empty_rules() {
        assert_eq!(squad_token_f1("", "nonempty").unwrap(), 0.0);
        assert_eq!(squad_token_f1("nonempty", "").unwrap(), 0.0);
        assert_eq!(squad_token_f1("", "").unwrap(), 1.0);
        assert_eq!(squad_token_f1("a an the", "!!").unwrap(), 1.0);
    }

    #[test]
    fn test_token_f1_best_reference() {
        let f1 = squad_token_f1("dog runs fast", ["cat sleeps", "dog runs fast"]).unwrap();
        assert_eq!(f1, 1.0);
    }

    #[test]
    fn test_requires_reference() {
        assert!(squad_em("x", Vec::<&str>::new()).unwrap_err().is_invalid_input());
        assert!(
            squad_token_f1("x", Vec::<&str>::new())
                .unwrap_err()
                .is_invalid_input()
        );
    }
}
