//! Exam lifecycle shared by the JSON API and the server-rendered pages.
//!
//! Generation: resolve request → assemble_exam → (optionally) store session.
//! Submission: take session → score → review script → podcast.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::analytics;
use crate::catalog::BoardProfile;
use crate::errors::AppError;
use crate::exam::generator::assemble_exam;
use crate::exam::models::{ExamSession, GeneratedQuestion, ScoredResult};
use crate::exam::scoring::score_exam;
use crate::review::audio::render_podcast;
use crate::review::script::generate_review_script;
use crate::state::AppState;

/// Exam request. Subjects come from the posting when `id_vaga` is set,
/// otherwise from `disciplinas`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamRequest {
    pub banca: String,
    #[serde(default)]
    pub id_vaga: Option<String>,
    #[serde(default)]
    pub disciplinas: Vec<String>,
    #[serde(default)]
    pub num_questoes_por_disciplina: Option<u32>,
}

/// A validated request, ready for generation.
#[derive(Debug)]
struct ExamPlan<'a> {
    profile: &'a BoardProfile,
    id_vaga: Option<String>,
    disciplinas: Vec<String>,
    per_subject: u32,
}

/// Outcome of a submission: the scored result and the podcast, if rendered.
#[derive(Debug, Clone)]
pub struct Submission {
    pub result: ScoredResult,
    pub podcast_path: Option<String>,
}

fn resolve<'a>(state: &'a AppState, request: &ExamRequest) -> Result<ExamPlan<'a>, AppError> {
    let profile = state
        .catalog
        .profile(&request.banca)
        .ok_or_else(|| AppError::Validation(format!("Unknown board '{}'", request.banca)))?;

    let (id_vaga, disciplinas) = match request.id_vaga.as_deref().filter(|v| !v.is_empty()) {
        Some(id) => {
            let posting = state
                .catalog
                .posting(id)
                .ok_or_else(|| AppError::Validation(format!("Unknown job posting '{id}'")))?;
            (Some(posting.id.clone()), posting.disciplinas.clone())
        }
        None => {
            let disciplinas: Vec<String> = request
                .disciplinas
                .iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect();
            if disciplinas.is_empty() {
                return Err(AppError::Validation(
                    "At least one subject (disciplinas) or a job posting (id_vaga) is required"
                        .to_string(),
                ));
            }
            (None, disciplinas)
        }
    };

    let max = state.config.max_questions_per_subject;
    let per_subject = request
        .num_questoes_por_disciplina
        .unwrap_or(state.config.default_questions_per_subject);
    if per_subject == 0 || per_subject > max {
        return Err(AppError::Validation(format!(
            "num_questoes_por_disciplina must be between 1 and {max}"
        )));
    }

    Ok(ExamPlan {
        profile,
        id_vaga,
        disciplinas,
        per_subject,
    })
}

/// Generates an exam without storing it. Fails only when the request is
/// invalid or no subject produced any question.
pub async fn generate_exam(
    state: &AppState,
    request: &ExamRequest,
) -> Result<(Option<String>, Vec<GeneratedQuestion>), AppError> {
    let plan = resolve(state, request)?;

    analytics::track(
        "exam_generation_started",
        json!({
            "banca": request.banca,
            "id_vaga": plan.id_vaga,
            "disciplinas": plan.disciplinas.len(),
        }),
    );

    let questoes = assemble_exam(
        state.llm.as_ref(),
        &plan.disciplinas,
        plan.profile,
        plan.per_subject,
    )
    .await;

    if questoes.is_empty() {
        analytics::track(
            "exam_generation_failed",
            json!({ "banca": request.banca, "id_vaga": plan.id_vaga }),
        );
        return Err(AppError::Generation(
            "Question generation failed for every subject. Please try again.".to_string(),
        ));
    }

    analytics::track(
        "exam_generation_succeeded",
        json!({
            "banca": request.banca,
            "id_vaga": plan.id_vaga,
            "num_questoes": questoes.len(),
        }),
    );

    Ok((plan.id_vaga, questoes))
}

/// Session ids that are not UUIDs can never match a stored session.
pub fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::SessionExpired)
}

/// Generates an exam and stores it as a new session.
pub async fn start_exam(state: &AppState, request: &ExamRequest) -> Result<ExamSession, AppError> {
    let (id_vaga, questoes) = generate_exam(state, request).await?;
    let session = ExamSession::new(questoes, id_vaga, &request.banca);
    info!(
        "Exam session {} created with {} questions",
        session.id,
        session.questoes.len()
    );
    state.sessions.put(session.clone()).await;
    Ok(session)
}

/// Scores a session exactly once. The session is removed before scoring, so
/// a second submission with the same id reports `SessionExpired`.
pub async fn submit_exam(
    state: &AppState,
    session_id: Uuid,
    respostas: &HashMap<String, String>,
) -> Result<Submission, AppError> {
    let session = state
        .sessions
        .take(session_id)
        .await
        .ok_or(AppError::SessionExpired)?;

    let grading = score_exam(&session.questoes, respostas);

    let script = generate_review_script(state.llm.as_ref(), &grading.mistakes).await;
    let podcast_path = render_podcast(
        state.speech.as_ref(),
        &script,
        &session.id.to_string(),
        &state.config.static_dir,
    )
    .await;

    analytics::track(
        "exam_finished",
        json!({
            "simulado_id": session.id,
            "score_percentual": grading.result.percentual,
            "num_acertos": grading.result.acertos,
            "num_erros": grading.mistakes.len(),
            "podcast_gerado_sucesso": podcast_path.is_some(),
        }),
    );

    Ok(Submission {
        result: grading.result,
        podcast_path,
    })
}
