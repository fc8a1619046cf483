use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use super::{LlmClient, LlmError};

pub const SPEECH_MODEL: &str = "tts-1";
/// Natural-sounding voice that reads Portuguese clearly.
pub const SPEECH_VOICE: &str = "nova";

/// Speech-synthesis seam. Returns the encoded MP3 audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Bytes, LlmError>;
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

#[async_trait]
impl SpeechSynthesizer for LlmClient {
    async fn synthesize(&self, text: &str) -> Result<Bytes, LlmError> {
        let body = SpeechRequest {
            model: SPEECH_MODEL,
            voice: SPEECH_VOICE,
            input: text,
            response_format: "mp3",
        };

        let audio = self.post("audio/speech", &body).await?.bytes().await?;
        if audio.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!("Speech synthesized: {} chars -> {} bytes", text.chars().count(), audio.len());
        Ok(audio)
    }
}
