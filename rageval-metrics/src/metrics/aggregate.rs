//! Aggregate scoring: runs every scorer once and combines them.

use crate::error::MetricsError;
use crate::metrics::bleu::{BleuOptions, bleu};
use crate::metrics::content::content_f1;
use crate::metrics::rouge::rouge_l;
use crate::metrics::squad::{squad_em, squad_token_f1};
use crate::references::References;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weights of the aggregate score.
///
/// Not normalized: callers may pass weights that do not sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateWeights {
    pub bleu: f64,
    pub rouge_l: f64,
    pub content_f1: f64,
    pub em: f64,
}

impl Default for AggregateWeights {
    fn default() -> Self {
        Self {
            bleu: 0.30,
            rouge_l: 0.40,
            content_f1: 0.20,
            em: 0.10,
        }
    }
}

impl AggregateWeights {
    pub fn new(bleu: f64, rouge_l: f64, content_f1: f64, em: f64) -> Self {
        Self {
            bleu,
            rouge_l,
            content_f1,
            em,
        }
    }

    /// Weighted sum of the four component scores.
    pub fn combine(&self, bleu: f64, rouge_l: f64, content_f1: f64, em: f64) -> f64 {
        self.bleu * bleu + self.rouge_l * rouge_l + self.content_f1 * content_f1 + self.em * em
    }
}

impl From<(f64, f64, f64, f64)> for AggregateWeights {
    fn from((bleu, rouge_l, content_f1, em): (f64, f64, f64, f64)) -> Self {
        Self::new(bleu, rouge_l, content_f1, em)
    }
}

/// Per-call options for [`score_texts`].
///
/// Unknown keys are rejected so a misspelled option never silently falls back
/// to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreOptions {
    pub max_n: usize,
    pub smooth: bool,
    pub beta: f64,
    #[serde(alias = "aggregate_weights")]
    pub weights: AggregateWeights,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            max_n: 4,
            smooth: true,
            beta: 1.0,
            weights: AggregateWeights::default(),
        }
    }
}

impl ScoreOptions {
    pub fn with_weights(mut self, weights: impl Into<AggregateWeights>) -> Self {
        self.weights = weights.into();
        self
    }

    fn bleu_options(&self) -> BleuOptions {
        BleuOptions {
            max_n: self.max_n,
            smooth: self.smooth,
            weights: None,
        }
    }
}

/// Every metric for one candidate, keyed the way reports expect them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextScores {
    #[serde(rename = "BLEU")]
    pub bleu: f64,
    #[serde(rename = "BLEU_by_n")]
    pub bleu_by_n: Vec<f64>,
    #[serde(rename = "BLEU_BP")]
    pub bleu_bp: f64,
    #[serde(rename = "ROUGE_L")]
    pub rouge_l: f64,
    #[serde(rename = "ROUGE_L_precision")]
    pub rouge_l_precision: f64,
    #[serde(rename = "ROUGE_L_recall")]
    pub rouge_l_recall: f64,
    #[serde(rename = "ROUGE_L_lcs")]
    pub rouge_l_lcs: usize,
    #[serde(rename = "SQuAD_EM")]
    pub squad_em: f64,
    #[serde(rename = "SQuAD_token_F1")]
    pub squad_token_f1: f64,
    #[serde(rename = "ContentF1")]
    pub content_f1: f64,
    #[serde(rename = "ContentF1_precision")]
    pub content_f1_precision: f64,
    #[serde(rename = "ContentF1_recall")]
    pub content_f1_recall: f64,
    #[serde(rename = "Aggregate")]
    pub aggregate: f64,
    #[serde(rename = "Aggregate_weights", with = "reported_weights")]
    pub aggregate_weights: AggregateWeights,
}

impl TextScores {
    /// Flat metric-name to value view of the scalar metrics.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("BLEU", self.bleu),
            ("ROUGE_L", self.rouge_l),
            ("ROUGE_L_precision", self.rouge_l_precision),
            ("ROUGE_L_recall", self.rouge_l_recall),
            ("SQuAD_EM", self.squad_em),
            ("SQuAD_token_F1", self.squad_token_f1),
            ("ContentF1", self.content_f1),
            ("ContentF1_precision", self.content_f1_precision),
            ("ContentF1_recall", self.content_f1_recall),
            ("Aggregate", self.aggregate),
        ])
    }
}

/// Score `candidate` with BLEU, ROUGE-L, SQuAD EM/token F1 and content F1,
/// and combine BLEU, ROUGE-L F1, content F1 and EM into `Aggregate`.
///
/// Any sub-metric validation failure is returned as-is.
pub fn score_texts<'a>(
    candidate: &str,
    references: impl Into<References<'a>>,
    options: &ScoreOptions,
) -> Result<TextScores, MetricsError> {
    let references = references.into();
    references.require_non_empty("score_texts")?;
    if references.iter().all(|r| r.trim().is_empty()) {
        tracing::warn!(
            reference_count = references.len(),
            "every reference is empty; overlap metrics will be degenerate"
        );
    }

    let b = bleu(candidate, &references, &options.bleu_options())?;
    let r = rouge_l(candidate, &references, options.beta)?;
    let em = squad_em(candidate, &references)?;
    let token_f1 = squad_token_f1(candidate, &references)?;
    let cf = content_f1(candidate, &references)?;

    let aggregate = options.weights.combine(b.bleu, r.f1, cf.f1, em);
    tracing::debug!(
        candidate_chars = candidate.len(),
        reference_count = references.len(),
        bleu = b.bleu,
        rouge_l = r.f1,
        aggregate,
        "scored candidate"
    );

    Ok(TextScores {
        bleu: b.bleu,
        bleu_by_n: b.by_n,
        bleu_bp: b.bp,
        rouge_l: r.f1,
        rouge_l_precision: r.precision,
        rouge_l_recall: r.recall,
        rouge_l_lcs: r.lcs,
        squad_em: em,
        squad_token_f1: token_f1,
        content_f1: cf.f1,
        content_f1_precision: cf.precision,
        content_f1_recall: cf.recall,
        aggregate,
        aggregate_weights: options.weights,
    })
}

/// Serializes weights under the metric names used in reports.
mod reported_weights {
    use super::AggregateWeights;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Reported {
        #[serde(rename = "BLEU")]
        bleu: f64,
        #[serde(rename = "ROUGE_L")]
        rouge_l: f64,
        #[serde(rename = "ContentF1")]
        content_f1: f64,
        #[serde(rename = "EM")]
        em: f64,
    }

    pub fn serialize<S: Serializer>(w: &AggregateWeights, s: S) -> Result<S::Ok, S::Error> {
        Reported {
            bleu: w.bleu,
            rouge_l: w.rouge_l,
            content_f1: w.content_f1,
            em: w.em,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<AggregateWeights, D::Error> {
        let r = Reported::deserialize(d)?;
        Ok(AggregateWeights::new(r.bleu, r.rouge_l, r.content_f1, r.em))
    }
}
