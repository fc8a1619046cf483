//! Axum route handlers for the standalone audio review.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::exam::models::MistakeRecord;
use crate::review::audio::{podcast_url, render_podcast};
use crate::review::script::generate_review_script;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PodcastRequest {
    #[serde(default)]
    pub erros: Vec<MistakeRecord>,
}

#[derive(Debug, Serialize)]
pub struct PodcastResponse {
    #[serde(rename = "podcastUrl")]
    pub podcast_url: String,
}

/// POST /api/gerar-podcast
///
/// Script → speech for a client-scored exam. Unlike the session flow, a
/// missing audio file is an error here because audio is the whole response.
pub async fn handle_generate_podcast(
    State(state): State<AppState>,
    Json(request): Json<PodcastRequest>,
) -> Result<Json<PodcastResponse>, AppError> {
    let script = generate_review_script(state.llm.as_ref(), &request.erros).await;

    let podcast_id = Uuid::new_v4().to_string();
    let path = render_podcast(
        state.speech.as_ref(),
        &script,
        &podcast_id,
        &state.config.static_dir,
    )
    .await
    .ok_or_else(|| AppError::Audio("Could not render the review podcast".to_string()))?;

    Ok(Json(PodcastResponse {
        podcast_url: podcast_url(&path),
    }))
}
