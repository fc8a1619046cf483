//! Scoring: exact-string comparison of submitted answers.
//!
//! Whitespace and case are significant: "B " and "b" do not match "B".

use std::collections::HashMap;

use crate::exam::models::{
    GeneratedQuestion, MistakeRecord, QuestionOutcome, ScoredResult, NOT_ANSWERED,
};

/// Scored result plus the mistakes that feed the review script.
#[derive(Debug, Clone)]
pub struct Grading {
    pub result: ScoredResult,
    pub mistakes: Vec<MistakeRecord>,
}

/// Scores `questoes` against `respostas`, keyed by question id.
/// A missing or empty answer is never a match.
pub fn score_exam(questoes: &[GeneratedQuestion], respostas: &HashMap<String, String>) -> Grading {
    let mut acertos = 0;
    let mut mistakes = Vec::new();
    let mut detalhes = Vec::with_capacity(questoes.len());

    for questao in questoes {
        let resposta = respostas
            .get(&questao.id)
            .filter(|r| !r.is_empty())
            .cloned();
        let correta = resposta.as_deref() == Some(questao.resposta_correta.as_str());

        if correta {
            acertos += 1;
        } else {
            mistakes.push(MistakeRecord {
                disciplina: questao.disciplina.clone(),
                enunciado: questao.enunciado.clone(),
                resposta_usuario: resposta.clone().unwrap_or_else(|| NOT_ANSWERED.to_string()),
                resposta_correta: questao.resposta_correta.clone(),
            });
        }

        detalhes.push(QuestionOutcome {
            questao: questao.clone(),
            resposta_usuario: resposta,
            correta,
        });
    }

    let total = questoes.len();
    Grading {
        result: ScoredResult {
            acertos,
            total,
            percentual: percentage(acertos, total),
            detalhes,
        },
        mistakes,
    }
}

/// Rounded to two decimals; 0 for an empty exam.
fn percentage(acertos: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (acertos as f64 / total as f64 * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_question;

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_correct() {
        let exam = vec![sample_question("q1", "A"), sample_question("q2", "C")];
        let grading = score_exam(&exam, &answers(&[("q1", "A"), ("q2", "C")]));
        assert_eq!(grading.result.acertos, 2);
        assert_eq!(grading.result.percentual, 100.0);
        assert!(grading.mistakes.is_empty());
        assert!(grading.result.detalhes.iter().all(|d| d.correta));
    }

    #[test]
    fn test_wrong_answer_becomes_mistake() {
        let exam = vec![sample_question("q1", "A"), sample_question("q2", "C")];
        let grading = score_exam(&exam, &answers(&[("q1", "A"), ("q2", "D")]));
        assert_eq!(grading.result.acertos, 1);
        assert_eq!(grading.result.percentual, 50.0);
        assert_eq!(grading.mistakes.len(), 1);
        let mistake = &grading.mistakes[0];
        assert_eq!(mistake.resposta_usuario, "D");
        assert_eq!(mistake.resposta_correta, "C");
        assert_eq!(mistake.disciplina, "Direito Constitucional");
    }

    #[test]
    fn test_missing_and_empty_answers_use_sentinel() {
        let exam = vec![sample_question("q1", "A"), sample_question("q2", "B")];
        let grading = score_exam(&exam, &answers(&[("q2", "")]));
        assert_eq!(grading.result.acertos, 0);
        assert_eq!(grading.mistakes.len(), 2);
        assert!(grading.mistakes.iter().all(|m| m.resposta_usuario == NOT_ANSWERED));
        assert!(grading.result.detalhes.iter().all(|d| d.resposta_usuario.is_none()));
    }

    /// Exact match is intended strictness, not a bug.
    #[test]
    fn test_whitespace_and_case_differences_are_incorrect() {
        let exam = vec![sample_question("q1", "B"), sample_question("q2", "B")];
        let grading = score_exam(&exam, &answers(&[("q1", "B "), ("q2", "b")]));
        assert_eq!(grading.result.acertos, 0);
        assert_eq!(grading.mistakes.len(), 2);
    }

    #[test]
    fn test_answers_for_unknown_ids_are_ignored() {
        let exam = vec![sample_question("q1", "A")];
        let grading = score_exam(&exam, &answers(&[("other", "A")]));
        assert_eq!(grading.result.acertos, 0);
        assert_eq!(grading.result.total, 1);
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_detail_order_follows_exam_order() {
        let exam = vec![sample_question("q2", "A"), sample_question("q1", "A")];
        let grading = score_exam(&exam, &HashMap::new());
        let ids: Vec<_> = grading.result.detalhes.iter().map(|d| d.questao.id.as_str()).collect();
        assert_eq!(ids, vec!["q2", "q1"]);
    }
}
