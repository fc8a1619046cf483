//! Server-rendered pages. Same exam lifecycle as the JSON session API,
//! driven by plain HTML forms.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use serde_json::json;

use crate::analytics;
use crate::errors::AppError;
use crate::exam::flow::{parse_session_id, start_exam, submit_exam, ExamRequest};
use crate::review::audio::podcast_url;
use crate::state::AppState;

pub mod views;

/// Form field prefix carrying the answer for one question id.
const ANSWER_PREFIX: &str = "q-";

#[derive(Debug, Deserialize)]
pub struct StartForm {
    pub id_vaga: String,
    pub banca: String,
}

fn error_page(err: AppError) -> Response {
    let (status, _, message) = err.parts();
    (status, views::error(&message)).into_response()
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Response {
    analytics::track("page_view", json!({ "page": "selecao_vaga" }));
    let postings = state.catalog.postings(None);
    let boards = state.catalog.boards();
    views::index(&postings, &boards).into_response()
}

/// POST /gerar_simulado
pub async fn handle_start(State(state): State<AppState>, Form(form): Form<StartForm>) -> Response {
    let request = ExamRequest {
        banca: form.banca,
        id_vaga: Some(form.id_vaga),
        disciplinas: Vec::new(),
        num_questoes_por_disciplina: None,
    };
    match start_exam(&state, &request).await {
        Ok(session) => Redirect::to(&format!("/simulado/{}", session.id)).into_response(),
        Err(e) => error_page(e),
    }
}

/// GET /simulado/:id
pub async fn handle_exam(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(e) => return error_page(e),
    };
    let Some(session) = state.sessions.get(id).await else {
        return error_page(AppError::SessionExpired);
    };

    let title = session
        .id_vaga
        .as_deref()
        .and_then(|v| state.catalog.posting(v))
        .map_or("Vaga não encontrada", |p| p.titulo.as_str());
    views::exam(&session, title).into_response()
}

/// POST /resultado
pub async fn handle_result(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(id) = form
        .get("simulado_id")
        .and_then(|raw| parse_session_id(raw).ok())
    else {
        return error_page(AppError::SessionExpired);
    };

    let respostas = answers_from_form(form);
    match submit_exam(&state, id, &respostas).await {
        Ok(submission) => {
            let url = submission.podcast_path.as_deref().map(podcast_url);
            views::result(&submission.result, url.as_deref()).into_response()
        }
        Err(e) => error_page(e),
    }
}

/// Keeps only `q-<question_id>` fields, keyed by question id.
fn answers_from_form(form: HashMap<String, String>) -> HashMap<String, String> {
    form.into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(ANSWER_PREFIX)
                .map(|id| (id.to_string(), value))
        })
        .collect()
}
