//! The lexical scorers and their aggregate.

pub mod aggregate;
pub mod bleu;
pub mod content;
pub mod overlap;
pub mod rouge;
pub mod squad;

pub use aggregate::{AggregateWeights, ScoreOptions, TextScores, score_texts};
pub use bleu::{BleuOptions, BleuScore, bleu};
pub use content::content_f1;
pub use overlap::OverlapScore;
pub use rouge::{RougeScore, rouge_l};
pub use squad::{squad_em, squad_token_f1};
