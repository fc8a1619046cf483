//! Axum route handlers for the Exam API.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::JobPosting;
use crate::errors::AppError;
use crate::exam::flow::{generate_exam, parse_session_id, start_exam, submit_exam, ExamRequest};
use crate::exam::models::{ExamSession, GeneratedQuestion, QuestionView, ScoredResult};
use crate::review::audio::podcast_url;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExamSessionResponse {
    pub simulado_id: Uuid,
    pub vaga: Option<JobPosting>,
    pub questoes: Vec<QuestionView>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub respostas: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub result: ScoredResult,
    pub podcast_url: Option<String>,
}

fn session_response(state: &AppState, session: &ExamSession) -> ExamSessionResponse {
    ExamSessionResponse {
        simulado_id: session.id,
        vaga: session
            .id_vaga
            .as_deref()
            .and_then(|id| state.catalog.posting(id))
            .cloned(),
        questoes: session.questoes.iter().map(QuestionView::from).collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/gerar-simulado
///
/// Stateless generation: returns every question with its answer and
/// explanation. Scoring happens client-side.
pub async fn handle_generate_exam(
    State(state): State<AppState>,
    Json(request): Json<ExamRequest>,
) -> Result<Json<Vec<GeneratedQuestion>>, AppError> {
    let (_, questoes) = generate_exam(&state, &request).await?;
    Ok(Json(questoes))
}

/// POST /api/simulados
///
/// Generates an exam and opens a session. Answers stay server-side.
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(request): Json<ExamRequest>,
) -> Result<Json<ExamSessionResponse>, AppError> {
    let session = start_exam(&state, &request).await?;
    Ok(Json(session_response(&state, &session)))
}

/// GET /api/simulados/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExamSessionResponse>, AppError> {
    let id = parse_session_id(&id)?;
    let session = state.sessions.get(id).await.ok_or(AppError::SessionExpired)?;
    Ok(Json(session_response(&state, &session)))
}

/// POST /api/simulados/:id/resultado
///
/// Scores the session once and deletes it. The podcast URL is null when
/// audio rendering failed.
pub async fn handle_submit_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let id = parse_session_id(&id)?;
    let submission = submit_exam(&state, id, &request.respostas).await?;
    Ok(Json(SubmitResponse {
        result: submission.result,
        podcast_url: submission.podcast_path.as_deref().map(podcast_url),
    }))
}
