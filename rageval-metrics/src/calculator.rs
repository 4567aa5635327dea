//! Scoring of QA pairs for evaluation runs.
//!
//! Every pair is independent, so the parallel path simply hands each one to
//! tokio's blocking pool; no state is shared between workers.

use crate::config::MetricsConfig;
use crate::error::MetricsError;
use crate::metrics::{AggregateWeights, ScoreOptions, TextScores, score_texts};
use crate::references::{ReferenceText, References};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One generated answer with its ground-truth reference(s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub candidate: String,
    pub references: ReferenceText,
}

impl QaPair {
    pub fn new(candidate: impl Into<String>, references: impl Into<ReferenceText>) -> Self {
        Self {
            candidate: candidate.into(),
            references: references.into(),
        }
    }
}

/// The subset of metrics stored per test-run answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerMetrics {
    pub bleu: f64,
    pub rouge: f64,
    pub aggregate: f64,
    pub squad_em: f64,
    pub squad_token_f1: f64,
    pub content_f1: f64,
}

impl From<&TextScores> for AnswerMetrics {
    fn from(scores: &TextScores) -> Self {
        Self {
            bleu: scores.bleu,
            rouge: scores.rouge_l,
            aggregate: scores.aggregate,
            squad_em: scores.squad_em,
            squad_token_f1: scores.squad_token_f1,
            content_f1: scores.content_f1,
        }
    }
}

/// Scores answers with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    options: ScoreOptions,
}

impl MetricsCalculator {
    pub fn new(weights: impl Into<AggregateWeights>) -> Self {
        Self {
            options: ScoreOptions::default().with_weights(weights),
        }
    }

    pub fn from_config(config: &MetricsConfig) -> Self {
        Self {
            options: config.score_options(),
        }
    }

    pub fn with_options(options: ScoreOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScoreOptions {
        &self.options
    }

    /// Stored metrics for one answer.
    pub fn evaluate_answer<'a>(
        &self,
        candidate: &str,
        references: impl Into<References<'a>>,
    ) -> Result<AnswerMetrics, MetricsError> {
        let scores = self.evaluate_answer_full(candidate, references)?;
        Ok(AnswerMetrics::from(&scores))
    }

    /// Every metric for one answer.
    pub fn evaluate_answer_full<'a>(
        &self,
        candidate: &str,
        references: impl Into<References<'a>>,
    ) -> Result<TextScores, MetricsError> {
        score_texts(candidate, references, &self.options)
    }

    /// Score pairs in order on the current thread; the first failure aborts.
    pub fn batch_evaluate(&self, pairs: &[QaPair]) -> Result<Vec<AnswerMetrics>, MetricsError> {
        pairs
            .iter()
            .map(|pair| self.evaluate_answer(&pair.candidate, &pair.references))
            .collect()
    }

    /// Score pairs concurrently on the blocking pool, preserving input order.
    pub async fn batch_score_parallel(
        &self,
        pairs: Vec<QaPair>,
    ) -> Result<Vec<TextScores>, MetricsError> {
        let total = pairs.len();
        tracing::debug!(pairs = total, "starting parallel batch");

        let handles: Vec<_> = pairs
            .into_iter()
            .map(|pair| {
                let options = self.options.clone();
                tokio::task::spawn_blocking(move || {
                    score_texts(&pair.candidate, &pair.references, &options)
                })
            })
            .collect();

        let mut results = Vec::with_capacity(total);
        for joined in futures::future::join_all(handles).await {
            let scores = joined.map_err(|e| MetricsError::Batch(e.to_string()))??;
            results.push(scores);
        }

        tracing::debug!(pairs = total, "finished parallel batch");
        Ok(results)
    }

    /// Parallel counterpart of [`batch_evaluate`](Self::batch_evaluate).
    pub async fn batch_evaluate_parallel(
        &self,
        pairs: Vec<QaPair>,
    ) -> Result<Vec<AnswerMetrics>, MetricsError> {
        let scores = self.batch_score_parallel(pairs).await?;
        Ok(scores.iter().map(AnswerMetrics::from).collect())
    }
}

/// Parse QA pairs from JSON Lines text; blank lines are skipped.
pub fn parse_qa_pairs(jsonl: &str) -> Result<Vec<QaPair>, MetricsError> {
    let mut pairs = Vec::new();
    for (index, line) in jsonl.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let pair: QaPair = serde_json::from_str(line).map_err(|e| {
            MetricsError::invalid_input(format!("line {}: {e}", index + 1))
        })?;
        pairs.push(pair);
    }
    Ok(pairs)
}

/// Read QA pairs from a JSON Lines file.
pub async fn read_qa_pairs(path: &Path) -> Result<Vec<QaPair>, MetricsError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_qa_pairs(&content)
}
