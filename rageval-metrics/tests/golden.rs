//! Fixed-point regression scenarios for the full score record.

use pretty_assertions::assert_eq;
use rageval_metrics::{ScoreOptions, TextScores, bleu, rouge_l, score_texts, squad_em};

const TOL: f64 = 1e-6;

fn score(candidate: &str, references: &[&str]) -> TextScores {
    score_texts(candidate, references.to_vec(), &ScoreOptions::default()).unwrap()
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOL,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn capital_of_france_golden_scenario() {
    let s = score(
        "Paris is the capital of France.",
        &["The capital of France is Paris."],
    );
    // Documented fixed point, +/- 0.01.
    assert!((s.bleu - 0.4729).abs() < 0.01);
    assert!((s.rouge_l - 0.7143).abs() < 0.01);
    assert!((s.aggregate - 0.6276).abs() < 0.01);

    assert_close(s.bleu, 0.472871, "BLEU");
    assert_eq!(s.bleu_by_n.len(), 4);
    assert_close(s.bleu_bp, 1.0, "BP");
    assert_eq!(s.rouge_l_lcs, 5);
    assert_eq!(s.squad_em, 0.0);
    assert_close(s.squad_token_f1, 1.0, "token F1");
    assert_close(s.content_f1, 1.0, "content F1");
    assert_close(s.aggregate, 0.627576, "aggregate");
}

#[test]
fn cat_on_mat_two_references() {
    let s = score(
        "The cat sat on the mat.",
        &["The cat is sitting on the mat.", "A cat sits on the mat."],
    );
    assert_close(s.bleu, 0.488923, "BLEU");
    assert_close(s.bleu_by_n[0], 6.0 / 7.0, "p1");
    assert_close(s.bleu_by_n[1], 2.0 / 3.0, "p2");
    assert_close(s.rouge_l, 0.8, "ROUGE-L");
    assert_close(s.rouge_l_precision, 6.0 / 7.0, "ROUGE-L P");
    assert_close(s.rouge_l_recall, 0.75, "ROUGE-L R");
    assert_eq!(s.rouge_l_lcs, 6);
    assert_close(s.squad_token_f1, 0.75, "token F1");
    assert_close(s.content_f1, 0.8, "content F1");
    assert_close(s.aggregate, 0.626677, "aggregate");
}

#[test]
fn dog_runs_three_references() {
    let s = score(
        "The dog runs fast.",
        &[
            "The dog is running quickly.",
            "A fast dog runs.",
            "The dog runs rapidly.",
        ],
    );
    assert_close(s.bleu, 0.451801, "BLEU");
    assert_close(s.rouge_l, 0.8, "ROUGE-L");
    assert_close(s.squad_token_f1, 1.0, "token F1");
    assert_close(s.content_f1_precision, 0.75, "content P");
    assert_close(s.content_f1_recall, 1.0, "content R");
    assert_close(s.aggregate, 0.626969, "aggregate");
}

#[test]
fn verbose_answer_is_penalized() {
    let s = score(
        "Paris is the capital of France. It is a beautiful city with many attractions like the Eiffel Tower.",
        &["The capital of France is Paris."],
    );
    assert_close(s.bleu, 0.137859, "BLEU");
    assert_close(s.rouge_l_precision, 0.3, "ROUGE-L P");
    assert_close(s.content_f1_recall, 1.0, "content R");
    assert_close(s.content_f1_precision, 4.0 / 13.0, "content P");
    assert_close(s.aggregate, 0.313253, "aggregate");
}

#[test]
fn wrong_entity_scores_lower_on_em_only() {
    let s = score(
        "The capital of France is Lyon.",
        &["The capital of France is Paris."],
    );
    assert_close(s.bleu, 0.643459, "BLEU");
    assert_close(s.rouge_l, 6.0 / 7.0, "ROUGE-L");
    assert_close(s.squad_token_f1, 0.8, "token F1");
    assert_close(s.content_f1, 0.75, "content F1");
    assert_eq!(s.squad_em, 0.0);
    assert_close(s.aggregate, 0.685895, "aggregate");
}

#[test]
fn exact_match_answer() {
    let text = "The quick brown fox.";
    let s = score(text, &[text]);
    assert_close(s.bleu, 1.0, "BLEU");
    assert_close(s.rouge_l, 1.0, "ROUGE-L");
    assert_eq!(s.squad_em, 1.0);
    assert_close(s.aggregate, 1.0, "aggregate");
}

#[test]
fn empty_candidate_edge_cases() {
    let b = bleu("", "reference text", &Default::default()).unwrap();
    assert_eq!(b.bleu, 0.0);
    assert_eq!(rouge_l("", "reference text", 1.0).unwrap().f1, 0.0);
    assert_eq!(squad_em("", "").unwrap(), 1.0);

    let s = score("", &["reference text"]);
    assert_eq!(s.aggregate, 0.0);
    assert_eq!(s.squad_token_f1, 0.0);
}

#[test]
fn empty_reference_set_is_rejected_everywhere() {
    let none: Vec<&str> = Vec::new();
    assert!(bleu("x", none.clone(), &Default::default()).unwrap_err().is_invalid_input());
    assert!(rouge_l("x", none.clone(), 1.0).unwrap_err().is_invalid_input());
    assert!(squad_em("x", none.clone()).unwrap_err().is_invalid_input());
    assert!(
        score_texts("x", none, &ScoreOptions::default())
            .unwrap_err()
            .is_invalid_input()
    );
}

#[test]
fn numeric_candidate_through_json_is_rejected() {
    let err = rageval_metrics::score_value(&serde_json::json!({
        "candidate": 123,
        "references": "ref"
    }))
    .unwrap_err();
    assert!(err.is_invalid_input());
}
