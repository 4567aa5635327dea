//! Tokenization and answer normalization.
//!
//! Two views of a text are used by the scorers:
//!
//! - [`tokenize`] keeps symbols as one-character tokens, so sentence structure
//!   (a trailing `.`, a `,` between clauses) contributes to n-gram and LCS
//!   matching. BLEU and ROUGE-L consume this view.
//! - [`word_tokens`] drops punctuation entirely and is the basis for
//!   content-word filtering.
//!
//! All functions are total: any string, including the empty string, yields a
//! (possibly empty) result.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|\S").expect("token pattern is a valid regex"));

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is a valid regex"));

static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is a valid regex"));

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Nd}+$").expect("digit pattern is a valid regex"));

static ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(a|an|the)\b").expect("article pattern is a valid regex"));

/// Minimum length (in characters) of a content word.
pub const MIN_CONTENT_LEN: usize = 3;

/// Casefold `text` and split it into word runs and single-symbol tokens.
///
/// ```
/// use rageval_metrics::text::tokenize;
/// assert_eq!(tokenize("Paris, France."), vec!["paris", ",", "france", "."]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let folded = text.to_lowercase();
    TOKEN_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Casefold `text` and keep only its word runs; punctuation is a separator.
pub fn word_tokens(text: &str) -> Vec<String> {
    let folded = text.to_lowercase();
    WORD_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// SQuAD-style answer normalization used by exact match and token F1.
///
/// Casefolds, turns punctuation into spaces, removes the articles
/// "a", "an" and "the", and collapses whitespace.
pub fn normalize_for_match(text: &str) -> String {
    let folded = text.to_lowercase();
    let no_punct = PUNCT_RE.replace_all(&folded, " ");
    let no_articles = ARTICLE_RE.replace_all(&no_punct, " ");
    no_articles.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `token` counts as a content word: at least [`MIN_CONTENT_LEN`]
/// characters and not made up only of decimal digits.
pub fn is_content_token(token: &str) -> bool {
    token.chars().count() >= MIN_CONTENT_LEN && !DIGITS_RE.is_match(token)
}

/// Word tokens of `text` filtered down to content words.
pub fn content_tokens(text: &str) -> Vec<String> {
    word_tokens(text)
        .into_iter()
        .filter(|t| is_content_token(t))
        .collect()
}
