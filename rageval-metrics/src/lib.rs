//! # rageval-metrics — lexical scoring of generated answers
//!
//! Scores a generated answer against one or more reference answers with
//! BLEU, ROUGE-L, SQuAD-style exact match and token F1, and a content-word F1,
//! then folds them into a weighted aggregate.
//!
//! Every scorer is a pure function: no caches, no globals beyond compiled
//! regexes, so calls can be fanned out across threads freely.
//!
//! ```
//! use rageval_metrics::{ScoreOptions, score_texts};
//!
//! let scores = score_texts(
//!     "Paris is the capital of France.",
//!     "The capital of France is Paris.",
//!     &ScoreOptions::default(),
//! )
//! .unwrap();
//! assert!((scores.rouge_l - 0.7143).abs() < 0.01);
//! ```

// Foundation
pub mod config;
pub mod error;

// Text preprocessing
pub mod text;

// Scoring
pub mod metrics;
pub mod references;

// Pipeline-facing surfaces
pub mod calculator;
pub mod request;
pub mod triad;

// Re-exports
pub use calculator::{AnswerMetrics, MetricsCalculator, QaPair};
pub use config::{MetricsConfig, load_config, load_layered};
pub use error::MetricsError;
pub use metrics::{
    AggregateWeights, BleuOptions, BleuScore, OverlapScore, RougeScore, ScoreOptions, TextScores,
    bleu, content_f1, rouge_l, score_texts, squad_em, squad_token_f1,
};
pub use references::{ReferenceText, References};
pub use request::{ScoreRequest, score_value};
pub use triad::{EvaluationRecord, JudgeScore, TriadEvaluation, TriadJudge};
