pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::catalog::handlers as catalog;
use crate::errors::AppError;
use crate::exam::handlers as exam;
use crate::pages;
use crate::review::audio::STATIC_MOUNT;
use crate::review::handlers as review;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/vagas", get(catalog::handle_list_postings))
        .route("/api/eixos", get(catalog::handle_list_subjects))
        .route("/api/blocos", get(catalog::handle_list_blocks))
        .route("/api/bancas", get(catalog::handle_list_boards))
        // Exam API
        .route("/api/gerar-simulado", post(exam::handle_generate_exam))
        .route("/api/simulados", post(exam::handle_start_session))
        .route("/api/simulados/:id", get(exam::handle_get_session))
        .route(
            "/api/simulados/:id/resultado",
            post(exam::handle_submit_session),
        )
        // Review API
        .route("/api/gerar-podcast", post(review::handle_generate_podcast))
        // Server-rendered pages
        .route("/", get(pages::handle_index))
        .route("/gerar_simulado", post(pages::handle_start))
        .route("/simulado/:id", get(pages::handle_exam))
        .route("/resultado", post(pages::handle_result))
        .nest_service(STATIC_MOUNT, static_files)
        .fallback(handle_not_found)
        .with_state(state)
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
