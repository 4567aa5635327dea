//! RAG-triad judgement model: context relevance, groundedness and answer
//! relevance as graded by an external LLM judge.
//!
//! The judge call itself lives behind [`TriadJudge`]; this module owns the
//! result types, their numeric mapping, the report rendering, and the merge
//! with the lexical scores into one [`EvaluationRecord`].

use crate::error::MetricsError;
use crate::metrics::{ScoreOptions, TextScores, score_texts};
use crate::references::References;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-level grade returned by the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeScore {
    Bad,
    Average,
    Good,
    Excellent,
}

impl JudgeScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Average => "average",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for JudgeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric value of a grade on the 0-3 scale.
pub fn score_to_numeric(score: JudgeScore) -> f64 {
    match score {
        JudgeScore::Bad => 0.0,
        JudgeScore::Average => 1.0,
        JudgeScore::Good => 2.0,
        JudgeScore::Excellent => 3.0,
    }
}

/// Are the retrieved contexts relevant to the query?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRelevance {
    pub explanation: String,
    pub score: JudgeScore,
    #[serde(default)]
    pub per_context_scores: Vec<f64>,
}

/// Is the answer faithful to the contexts?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Groundedness {
    pub explanation: String,
    pub score: JudgeScore,
    pub supported_claims: u32,
    pub total_claims: u32,
}

/// Does the answer address the query?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRelevance {
    pub explanation: String,
    pub score: JudgeScore,
}

/// Complete triad judgement for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriadEvaluation {
    pub context_relevance: ContextRelevance,
    pub groundedness: Groundedness,
    pub answer_relevance: AnswerRelevance,
    /// Overall score on the 0-3 scale as reported by the judge.
    pub overall_score: f64,
}

/// Mean of the three dimension grades on the 0-3 scale.
pub fn calculate_overall_score(evaluation: &TriadEvaluation) -> f64 {
    let scores = [
        score_to_numeric(evaluation.context_relevance.score),
        score_to_numeric(evaluation.groundedness.score),
        score_to_numeric(evaluation.answer_relevance.score),
    ];
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Render a triad judgement as a plain-text report.
pub fn format_evaluation_report(evaluation: &TriadEvaluation) -> String {
    let heavy = "=".repeat(80);
    let light = "-".repeat(80);
    let mut lines = vec![
        heavy.clone(),
        "RAG EVALUATION REPORT".to_string(),
        heavy.clone(),
        format!("\nOverall Score: {:.2}/3.0", evaluation.overall_score),
        format!("\n{light}"),
    ];

    let cr = &evaluation.context_relevance;
    lines.push("\n1. CONTEXT RELEVANCE".to_string());
    lines.push(grade_line(cr.score));
    lines.push(format!("   Reasoning: {}", cr.explanation));
    if !cr.per_context_scores.is_empty() {
        lines.push(format!("   Per-context scores: {:?}", cr.per_context_scores));
    }

    let g = &evaluation.groundedness;
    lines.push(format!("\n{light}"));
    lines.push("\n2. GROUNDEDNESS".to_string());
    lines.push(grade_line(g.score));
    lines.push(format!(
        "   Claims: {}/{} supported",
        g.supported_claims, g.total_claims
    ));
    lines.push(format!("   Reasoning: {}", g.explanation));

    let ar = &evaluation.answer_relevance;
    lines.push(format!("\n{light}"));
    lines.push("\n3. ANSWER RELEVANCE".to_string());
    lines.push(grade_line(ar.score));
    lines.push(format!("   Reasoning: {}", ar.explanation));

    lines.push(format!("\n{heavy}"));
    lines.join("\n")
}

fn grade_line(score: JudgeScore) -> String {
    format!(
        "   Score: {} ({:.1}/3.0)",
        score.as_str().to_uppercase(),
        score_to_numeric(score)
    )
}

/// Inputs an LLM judge needs to grade one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub query: String,
    pub contexts: Vec<String>,
    pub answer: String,
}

/// An external structured-output judge producing triad grades.
#[async_trait]
pub trait TriadJudge: Send + Sync {
    async fn judge(&self, request: &JudgeRequest) -> Result<TriadEvaluation, MetricsError>;
}

/// Lexical scores merged with an optional triad judgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub text: TextScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triad: Option<TriadEvaluation>,
}

/// Score `request.answer` lexically against `references`, then ask `judge`
/// for the triad grades.
///
/// Lexical scoring runs first so invalid input is reported without spending
/// a judge call.
pub async fn evaluate_with_judge<'a>(
    judge: &dyn TriadJudge,
    request: &JudgeRequest,
    references: impl Into<References<'a>>,
    options: &ScoreOptions,
) -> Result<EvaluationRecord, MetricsError> {
    let text = score_texts(&request.answer, references, options)?;
    let triad = judge.judge(request).await?;
    tracing::debug!(
        aggregate = text.aggregate,
        triad_overall = triad.overall_score,
        "merged lexical and triad scores"
    );
    Ok(EvaluationRecord {
        text,
        triad: Some(triad),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TriadEvaluation {
        TriadEvaluation {
            context_relevance: ContextRelevance {
                explanation: "Context one answers the question.".into(),
                score: JudgeScore::Excellent,
                per_context_scores: vec![3.0, 1.0],
            },
            groundedness: Groundedness {
                explanation: "All claims appear in the context.".into(),
                score: JudgeScore::Good,
                supported_claims: 4,
                total_claims: 5,
            },
            answer_relevance: AnswerRelevance {
                explanation: "Addresses the question.".into(),
                score: JudgeScore::Average,
            },
            overall_score: 2.0,
        }
    }

    struct FixedJudge;

    #[async_trait]
    impl TriadJudge for FixedJudge {
        async fn judge(&self, _request: &JudgeRequest) -> Result<TriadEvaluation, MetricsError> {
            Ok(sample())
        }
    }

    #[test]
    fn test_score_to_numeric() {
        assert_eq!(score_to_numeric(JudgeScore::Bad), 0.0);
        assert_eq!(score_to_numeric(JudgeScore::Excellent), 3.0);
    }

    #[test]
    fn test_overall_is_mean() {
        assert_eq!(calculate_overall_score(&sample()), 2.0);
    }

    #[test]
    fn test_score_serializes_lowercase() {
        let json = serde_json::to_string(&JudgeScore::Excellent).unwrap();
        assert_eq!(json, r#""excellent""#);
        let parsed: JudgeScore = serde_json::from_str(r#""average""#).unwrap();
        assert_eq!(parsed, JudgeScore::Average);
    }

    #[test]
    fn test_report_layout() {
        let report = format_evaluation_report(&sample());
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "=".repeat(80));
        assert_eq!(lines[1], "RAG EVALUATION REPORT");
        assert!(report.contains("Overall Score: 2.00/3.0"));
        assert!(report.contains("   Score: EXCELLENT (3.0/3.0)"));
        assert!(report.contains("   Per-context scores: [3.0, 1.0]"));
        assert!(report.contains("   Claims: 4/5 supported"));
        assert!(report.contains("   Score: AVERAGE (1.0/3.0)"));
        assert!(report.ends_with(&"=".repeat(80)));
    }

    #[test]
    fn test_report_omits_empty_per_context_scores() {
        let mut eval = sample();
        eval.context_relevance.per_context_scores.clear();
        assert!(!format_evaluation_report(&eval).contains("Per-context"));
    }

    #[tokio::test]
    async fn test_evaluate_with_judge_merges() {
        let request = JudgeRequest {
            query: "What is the capital of France?".into(),
            contexts: vec!["Paris is the capital of France.".into()],
            answer: "Paris is the capital of France.".into(),
        };
        let record = evaluate_with_judge(
            &FixedJudge,
            &request,
            "The capital of France is Paris.",
            &ScoreOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(record.triad, Some(sample()));
        assert!(record.text.rouge_l > 0.7);
    }

    #[tokio::test]
    async fn test_evaluate_with_judge_validates_first() {
        let request = JudgeRequest {
            query: "q".into(),
            contexts: Vec::new(),
            answer: "a".into(),
        };
        let err = evaluate_with_judge(
            &FixedJudge,
            &request,
            Vec::<&str>::new(),
            &ScoreOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
