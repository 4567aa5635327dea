//! Text preprocessing shared by every scorer: tokenization, normalization,
//! n-gram tables and LCS.

pub mod lcs;
pub mod ngram;
pub mod tokenize;

pub use lcs::lcs_length;
pub use ngram::{NgramCounts, ngram_counts};
pub use tokenize::{content_tokens, normalize_for_match, tokenize, word_tokens};
