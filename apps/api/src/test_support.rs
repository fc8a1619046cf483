//! Test doubles for the AI endpoints and shared fixtures.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Duration;
use serde_json::json;
use tempfile::TempDir;

use crate::catalog::{fixtures, BoardProfile, ExampleQuestion};
use crate::config::Config;
use crate::exam::models::GeneratedQuestion;
use crate::exam::session::InMemorySessionStore;
use crate::llm_client::speech::SpeechSynthesizer;
use crate::llm_client::{CompletionRequest, LlmError, OutputMode, TextGenerator};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    Fail,
}

/// Records every call and answers from a queue, then from a fallback reply.
pub struct StubGenerator {
    queue: Mutex<VecDeque<StubReply>>,
    fallback: StubReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    modes: Mutex<Vec<(OutputMode, f32)>>,
}

impl StubGenerator {
    fn with(queue: Vec<StubReply>, fallback: StubReply) -> Self {
        Self {
            queue: Mutex::new(queue.into()),
            fallback,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            modes: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with(Vec::new(), StubReply::Text(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::with(Vec::new(), StubReply::Fail)
    }

    /// Replies in order; calls past the end fail.
    pub fn sequence(replies: Vec<StubReply>) -> Self {
        Self::with(replies, StubReply::Fail)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_mode(&self) -> Option<OutputMode> {
        self.modes.lock().unwrap().last().map(|(mode, _)| *mode)
    }

    pub fn last_temperature(&self) -> Option<f32> {
        self.modes.lock().unwrap().last().map(|(_, t)| *t)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        self.modes
            .lock()
            .unwrap()
            .push((request.mode, request.temperature));

        let reply = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            StubReply::Text(text) => Ok(text),
            StubReply::Fail => Err(LlmError::Api {
                status: 503,
                message: "stubbed outage".to_string(),
            }),
        }
    }
}

pub struct StubSpeech {
    audio: Option<Bytes>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl StubSpeech {
    pub fn replying(audio: &'static [u8]) -> Self {
        Self {
            audio: Some(Bytes::from_static(audio)),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            audio: None,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, text: &str) -> Result<Bytes, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(text.to_string());
        self.audio.clone().ok_or(LlmError::EmptyContent)
    }
}

/// A well-formed `{"questoes": [...]}` payload with `count` questions whose
/// correct answer is always the second option.
pub fn question_payload(count: usize) -> String {
    let questoes: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "enunciado": format!("Q{}", i + 1),
                "alternativas": ["A", "B", "C", "D", "E"],
                "resposta_correta": "B",
                "explicacao": "because"
            })
        })
        .collect();
    json!({ "questoes": questoes }).to_string()
}

pub fn sample_profile() -> BoardProfile {
    BoardProfile {
        nome: "Cesgranrio".to_string(),
        instrucoes: vec![
            "Use enunciados contextualizados.".to_string(),
            "Evite pegadinhas de negação dupla.".to_string(),
        ],
        exemplos: vec![ExampleQuestion {
            disciplina: "Língua Portuguesa".to_string(),
            questao: json!({
                "enunciado": "Assinale a alternativa correta quanto à crase.",
                "alternativas": ["A) ...", "B) ...", "C) ...", "D) ...", "E) ..."],
                "resposta_correta": "C) ..."
            }),
        }],
    }
}

pub fn sample_question(id: &str, correct: &str) -> GeneratedQuestion {
    GeneratedQuestion {
        id: id.to_string(),
        disciplina: "Direito Constitucional".to_string(),
        enunciado: format!("Enunciado {id}"),
        alternativas: ["A", "B", "C", "D", "E"].map(String::from).to_vec(),
        resposta_correta: correct.to_string(),
        explicacao: "because".to_string(),
    }
}

/// App state over the catalog fixture, with a temporary static directory.
/// Keep the returned `TempDir` alive while the state writes files.
pub fn test_state(
    llm: Arc<dyn TextGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
) -> (AppState, TempDir) {
    let static_dir = tempfile::tempdir().unwrap();
    let config = Config {
        openai_api_key: "test-key".to_string(),
        openai_base_url: "http://localhost:0".to_string(),
        data_dir: PathBuf::from("data"),
        static_dir: static_dir.path().to_path_buf(),
        port: 0,
        rust_log: "debug".to_string(),
        llm_timeout_secs: 5,
        session_ttl_minutes: 120,
        default_questions_per_subject: 3,
        max_questions_per_subject: 10,
    };
    let state = AppState {
        config,
        catalog: Arc::new(fixtures::catalog()),
        llm,
        speech,
        sessions: Arc::new(InMemorySessionStore::new(Duration::minutes(120))),
    };
    (state, static_dir)
}
