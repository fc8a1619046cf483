//! Axum route handlers for the read-only catalog.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::{Block, JobPosting, Subject};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostingsQuery {
    pub bloco_id: Option<String>,
}

/// GET /api/vagas?bloco_id=<optional>
pub async fn handle_list_postings(
    State(state): State<AppState>,
    Query(params): Query<PostingsQuery>,
) -> Json<Vec<JobPosting>> {
    let block = params.bloco_id.as_deref().filter(|b| !b.is_empty());
    Json(state.catalog.postings(block).into_iter().cloned().collect())
}

/// GET /api/eixos
pub async fn handle_list_subjects(State(state): State<AppState>) -> Json<Vec<Subject>> {
    Json(state.catalog.subjects().to_vec())
}

/// GET /api/blocos
pub async fn handle_list_blocks(State(state): State<AppState>) -> Json<Vec<Block>> {
    Json(state.catalog.blocks().to_vec())
}

/// GET /api/bancas
pub async fn handle_list_boards(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.boards().into_iter().map(String::from).collect())
}
