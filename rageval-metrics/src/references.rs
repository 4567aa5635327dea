//! Reference sets and the two multi-reference reduction strategies.
//!
//! The scorers do not share one "reduce over references" abstraction:
//!
//! - [`best_of`] scores the candidate against each reference independently and
//!   keeps the best result (ROUGE-L, SQuAD EM/token F1, content F1).
//! - [`max_reference_counts`] merges the references *before* scoring by taking
//!   the per-n-gram maximum count, which is what BLEU clips against.

use crate::error::MetricsError;
use crate::text::NgramCounts;
use serde::{Deserialize, Serialize};

/// Borrowed view over one or more reference texts for a single scoring call.
///
/// A bare string converts into a one-element set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct References<'a> {
    texts: Vec<&'a str>,
}

impl<'a> References<'a> {
    pub fn new(texts: Vec<&'a str>) -> Self {
        Self { texts }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.texts.iter().copied()
    }

    /// Fail with `InvalidInput` when no reference was supplied.
    pub fn require_non_empty(&self, metric: &str) -> Result<(), MetricsError> {
        if self.texts.is_empty() {
            return Err(MetricsError::invalid_input(format!(
                "{metric} requires at least one reference"
            )));
        }
        Ok(())
    }
}

impl<'a> From<&'a str> for References<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(vec![text])
    }
}

impl<'a> From<&'a String> for References<'a> {
    fn from(text: &'a String) -> Self {
        Self::new(vec![text.as_str()])
    }
}

impl<'a> From<&'a [String]> for References<'a> {
    fn from(texts: &'a [String]) -> Self {
        Self::new(texts.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for References<'a> {
    fn from(texts: &'a Vec<String>) -> Self {
        Self::from(texts.as_slice())
    }
}

impl<'a> From<&'a [&'a str]> for References<'a> {
    fn from(texts: &'a [&'a str]) -> Self {
        Self::new(texts.to_vec())
    }
}

impl<'a> From<Vec<&'a str>> for References<'a> {
    fn from(texts: Vec<&'a str>) -> Self {
        Self::new(texts)
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for References<'a> {
    fn from(texts: [&'a str; N]) -> Self {
        Self::new(texts.to_vec())
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for References<'a> {
    fn from(texts: &'a [&'a str; N]) -> Self {
        Self::new(texts.to_vec())
    }
}

impl<'a, 'b> From<&'b References<'a>> for References<'a> {
    fn from(refs: &'b References<'a>) -> Self {
        refs.clone()
    }
}

/// Owned reference input as it appears in serialized QA records: either a
/// single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceText {
    One(String),
    Many(Vec<String>),
}

impl ReferenceText {
    pub fn as_references(&self) -> References<'_> {
        match self {
            Self::One(text) => References::from(text),
            Self::Many(texts) => References::from(texts),
        }
    }
}

impl From<&str> for ReferenceText {
    fn from(text: &str) -> Self {
        Self::One(text.to_string())
    }
}

impl From<Vec<String>> for ReferenceText {
    fn from(texts: Vec<String>) -> Self {
        Self::Many(texts)
    }
}

impl<'a> From<&'a ReferenceText> for References<'a> {
    fn from(refs: &'a ReferenceText) -> Self {
        refs.as_references()
    }
}

/// Best-of-references reduction.
///
/// Scores every reference with `score` and keeps the result whose `key` is
/// strictly greatest, so among equal keys the earliest reference wins. `None`
/// is returned when `score` declined every reference.
pub fn best_of<'a, T, S, K>(references: &References<'a>, mut score: S, key: K) -> Option<T>
where
    S: FnMut(&'a str) -> Option<T>,
    K: Fn(&T) -> f64,
{
    let mut best: Option<T> = None;
    for reference in references.iter() {
        let Some(candidate) = score(reference) else {
            continue;
        };
        let better = match &best {
            Some(current) => key(&candidate) > key(current),
            None => true,
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

/// Max-clip reduction for BLEU.
///
/// Merges per-reference n-gram tables into one table holding, for each
/// n-gram, the highest count seen in any single reference.
pub fn max_reference_counts<'t>(tables: &[NgramCounts<'t>]) -> NgramCounts<'t> {
    let mut merged = NgramCounts::new();
    for table in tables {
        for (gram, &count) in table {
            let slot = merged.entry(*gram).or_insert(0);
            if count > *slot {
                *slot = count;
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{ngram_counts, tokenize};

    #[test]
    fn test_single_string_is_one_reference() {
        let refs = References::from("only one");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.iter().collect::<Vec<_>>(), vec!["only one"]);
    }

    #[test]
    fn test_empty_reference_set_rejected() {
        let refs = References::new(Vec::new());
        let err = refs.require_non_empty("BLEU").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("BLEU"));
    }

    #[test]
    fn test_reference_text_untagged() {
        let one: ReferenceText = serde_json::from_str(r#""a""#).unwrap();
        let many: ReferenceText = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(one.as_references().len(), 1);
        assert_eq!(many.as_references().len(), 2);
    }

    #[test]
    fn test_best_of_first_wins_on_tie() {
        let refs = References::from(["first", "second", "third"]);
        let best = best_of(&refs, |r| Some((r, 0.5)), |(_, score)| *score);
        assert_eq!(best, Some(("first", 0.5)));
    }

    #[test]
    fn test_best_of_skips_declined() {
        let refs = References::from(["", "b", "cc"]);
        let best = best_of(
            &refs,
            |r| if r.is_empty() { None } else { Some(r.len()) },
            |n| *n as f64,
        );
        assert_eq!(best, Some(2));
    }

    #[test]
    fn test_max_reference_counts_takes_single_reference_max() {
        let a = tokenize("go go");
        let b = tokenize("go go go stop");
        let tables = vec![ngram_counts(&a, 2), ngram_counts(&b, 2)];
        let merged = max_reference_counts(&tables);
        assert_eq!(merged[&b[0..2]], 2);
        assert_eq!(merged[&b[2..4]], 1);
    }
}
