//! Question Generation Service.
//!
//! Flow per subject: build prompt → JSON-mode completion → parse batch →
//! validate each draft → tag with id and subject label.
//!
//! Every failure degrades to "no questions" for that subject. The caller
//! decides whether an empty exam is an error.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::BoardProfile;
use crate::exam::models::{GeneratedQuestion, QuestionBatch, QuestionDraft};
use crate::exam::prompts::{build_question_prompt, question_system_prompt};
use crate::llm_client::{complete_json, CompletionRequest, OutputMode, TextGenerator, QUESTION_MODEL};

/// Favors variety across generated exams.
const QUESTION_TEMPERATURE: f32 = 0.8;

/// Asks the endpoint for `count` questions of `disciplina` and returns the
/// drafts that pass validation. Never fails: any endpoint, parse or schema
/// error yields an empty list.
pub async fn generate_questions(
    llm: &dyn TextGenerator,
    disciplina: &str,
    profile: &BoardProfile,
    count: u32,
) -> Vec<QuestionDraft> {
    let prompt = build_question_prompt(disciplina, profile, count);
    let system = question_system_prompt();
    debug!("Question prompt for '{disciplina}':\n{prompt}");

    let request = CompletionRequest {
        model: QUESTION_MODEL,
        system: &system,
        prompt: &prompt,
        temperature: QUESTION_TEMPERATURE,
        mode: OutputMode::JsonObject,
    };

    let batch: QuestionBatch = match complete_json(llm, request).await {
        Ok(batch) => batch,
        Err(e) => {
            warn!("Question generation failed for '{disciplina}': {e}");
            return Vec::new();
        }
    };

    let received = batch.questoes.len();
    let drafts: Vec<QuestionDraft> = batch
        .questoes
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| {
            let draft = match serde_json::from_value::<QuestionDraft>(raw) {
                Ok(draft) => draft,
                Err(e) => {
                    warn!("Dropping malformed question #{i} for '{disciplina}': {e}");
                    return None;
                }
            };
            match draft.validate() {
                Ok(()) => Some(draft),
                Err(reason) => {
                    warn!("Dropping invalid question #{i} for '{disciplina}': {reason}");
                    None
                }
            }
        })
        .take(count as usize)
        .collect();

    if received > count as usize {
        debug!("Endpoint returned {received} questions for '{disciplina}', kept {count}");
    }
    info!(
        "Generated {}/{} questions for '{disciplina}'",
        drafts.len(),
        count
    );
    drafts
}

/// Generates `per_subject` questions for each subject in order, one endpoint
/// round-trip per subject. Subjects that fail contribute nothing.
pub async fn assemble_exam(
    llm: &dyn TextGenerator,
    disciplinas: &[String],
    profile: &BoardProfile,
    per_subject: u32,
) -> Vec<GeneratedQuestion> {
    let mut exam = Vec::new();

    for disciplina in disciplinas {
        let drafts = generate_questions(llm, disciplina, profile, per_subject).await;
        if drafts.is_empty() {
            warn!("Subject '{disciplina}' produced no questions; continuing with a smaller exam");
        }
        exam.extend(drafts.into_iter().enumerate().map(|(i, draft)| {
            GeneratedQuestion::from_draft(draft, question_id(disciplina, i), disciplina)
        }));
    }

    exam
}

/// `<subject_slug>_<index>_<uuid>`; unique across calls regardless of what
/// the endpoint returns.
fn question_id(disciplina: &str, index: usize) -> String {
    let slug: String = disciplina
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{slug}_{index}_{}", Uuid::new_v4().simple())
}
