//! Untyped JSON entry point.
//!
//! Pipeline callers hand over loosely-typed payloads; this module checks the
//! shape before anything is scored so a wrong type surfaces as
//! [`MetricsError::InvalidInput`] instead of a deserializer message.

use crate::error::MetricsError;
use crate::metrics::{ScoreOptions, TextScores, score_texts};
use crate::references::ReferenceText;
use serde_json::Value;

/// A validated scoring request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    pub candidate: String,
    pub references: ReferenceText,
    pub options: ScoreOptions,
}

impl ScoreRequest {
    /// Validate a JSON object of the form
    /// `{"candidate": str, "references": str | [str, ...], "options": {...}?}`.
    pub fn from_value(value: &Value) -> Result<Self, MetricsError> {
        let object = value.as_object().ok_or_else(|| {
            MetricsError::invalid_input(format!(
                "request must be a JSON object, got {}",
                type_name(value)
            ))
        })?;

        let candidate = match object.get("candidate") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => {
                return Err(MetricsError::invalid_input(format!(
                    "candidate must be a string, got {}",
                    type_name(other)
                )));
            }
            None => return Err(MetricsError::invalid_input("candidate is required")),
        };

        let references = match object.get("references") {
            Some(Value::String(text)) => ReferenceText::One(text.clone()),
            Some(Value::Array(items)) => {
                if items.is_empty() {
                    return Err(MetricsError::invalid_input(
                        "references must contain at least one reference",
                    ));
                }
                let texts = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::String(text) => Ok(text.clone()),
                        other => Err(MetricsError::invalid_input(format!(
                            "references[{i}] must be a string, got {}",
                            type_name(other)
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                ReferenceText::Many(texts)
            }
            Some(other) => {
                return Err(MetricsError::invalid_input(format!(
                    "references must be a string or a list of strings, got {}",
                    type_name(other)
                )));
            }
            None => return Err(MetricsError::invalid_input("references are required")),
        };

        let options = match object.get("options") {
            None | Some(Value::Null) => ScoreOptions::default(),
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|e| MetricsError::invalid_input(format!("invalid options: {e}")))?,
        };

        Ok(Self {
            candidate,
            references,
            options,
        })
    }

    pub fn score(&self) -> Result<TextScores, MetricsError> {
        score_texts(&self.candidate, &self.references, &self.options)
    }
}

/// Validate and score a JSON request in one step.
pub fn score_value(value: &Value) -> Result<TextScores, MetricsError> {
    ScoreRequest::from_value(value)?.score()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
