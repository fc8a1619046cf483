use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of answer options every question must carry.
pub const OPTIONS_PER_QUESTION: usize = 5;

/// Sentinel recorded for a question the candidate left blank.
pub const NOT_ANSWERED: &str = "Não respondida";

// ────────────────────────────────────────────────────────────────────────────
// Model payload (ingress schema)
// ────────────────────────────────────────────────────────────────────────────

/// Top-level object the generation endpoint is told to return.
/// A missing `questoes` key yields an empty batch.
#[derive(Debug, Deserialize)]
pub struct QuestionBatch {
    #[serde(default)]
    pub questoes: Vec<serde_json::Value>,
}

/// A question as emitted by the model, before validation and id assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    pub enunciado: String,
    pub alternativas: Vec<String>,
    pub resposta_correta: String,
    pub explicacao: String,
}

impl QuestionDraft {
    /// Checks the structural contract: non-empty statement, exactly five
    /// options and a correct answer equal to one option verbatim.
    pub fn validate(&self) -> Result<(), String> {
        if self.enunciado.trim().is_empty() {
            return Err("empty statement".to_string());
        }
        if self.alternativas.len() != OPTIONS_PER_QUESTION {
            return Err(format!(
                "expected {OPTIONS_PER_QUESTION} options, got {}",
                self.alternativas.len()
            ));
        }
        if !self.alternativas.contains(&self.resposta_correta) {
            return Err(format!(
                "correct answer {:?} is not one of the options",
                self.resposta_correta
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Domain records
// ────────────────────────────────────────────────────────────────────────────

/// A validated question tagged with its unique id and subject label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub id: String,
    pub disciplina: String,
    pub enunciado: String,
    pub alternativas: Vec<String>,
    pub resposta_correta: String,
    pub explicacao: String,
}

impl GeneratedQuestion {
    pub fn from_draft(draft: QuestionDraft, id: String, disciplina: &str) -> Self {
        Self {
            id,
            disciplina: disciplina.to_string(),
            enunciado: draft.enunciado,
            alternativas: draft.alternativas,
            resposta_correta: draft.resposta_correta,
            explicacao: draft.explicacao,
        }
    }
}

/// What a candidate sees while the exam is open: no answer, no explanation.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub disciplina: String,
    pub enunciado: String,
    pub alternativas: Vec<String>,
}

impl From<&GeneratedQuestion> for QuestionView {
    fn from(q: &GeneratedQuestion) -> Self {
        Self {
            id: q.id.clone(),
            disciplina: q.disciplina.clone(),
            enunciado: q.enunciado.clone(),
            alternativas: q.alternativas.clone(),
        }
    }
}

/// A generated exam awaiting submission. Lives in process memory only.
#[derive(Debug, Clone)]
pub struct ExamSession {
    pub id: Uuid,
    pub questoes: Vec<GeneratedQuestion>,
    pub id_vaga: Option<String>,
    pub banca: String,
    pub created_at: DateTime<Utc>,
}

impl ExamSession {
    pub fn new(questoes: Vec<GeneratedQuestion>, id_vaga: Option<String>, banca: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            questoes,
            id_vaga,
            banca: banca.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// One wrong or blank answer, fed to the tutoring-script prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistakeRecord {
    pub disciplina: String,
    pub enunciado: String,
    pub resposta_usuario: String,
    pub resposta_correta: String,
}

/// Per-question detail echoed back after scoring.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOutcome {
    #[serde(flatten)]
    pub questao: GeneratedQuestion,
    pub resposta_usuario: Option<String>,
    pub correta: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult {
    pub acertos: usize,
    pub total: usize,
    pub percentual: f64,
    pub detalhes: Vec<QuestionOutcome>,
}
