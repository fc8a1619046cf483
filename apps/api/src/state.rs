use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::exam::session::SessionStore;
use crate::llm_client::speech::SpeechSynthesizer;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    /// Text-generation endpoint. Production: `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Speech-synthesis endpoint. Production: the same `LlmClient`.
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Pluggable session store. Default: `InMemorySessionStore`.
    pub sessions: Arc<dyn SessionStore>,
}
