//! Audio Rendering Service.
//!
//! Writes `<static_dir>/podcasts/resumo_<session_id>.mp3`. Reusing a session
//! id overwrites the same file. Any failure yields `None`.

use std::path::Path;

use tracing::{info, warn};

use crate::llm_client::speech::SpeechSynthesizer;

pub const PODCAST_SUBDIR: &str = "podcasts";
/// Mount point of the static directory in the router.
pub const STATIC_MOUNT: &str = "/static";

/// Synthesizes `script` and stores it under `static_dir`. Returns the path
/// relative to `static_dir`, or `None` when the id is unsafe or any endpoint
/// or I/O step fails.
pub async fn render_podcast(
    speech: &dyn SpeechSynthesizer,
    script: &str,
    session_id: &str,
    static_dir: &Path,
) -> Option<String> {
    if !is_safe_id(session_id) {
        warn!("Refusing to render podcast for unsafe session id {session_id:?}");
        return None;
    }

    let dir = static_dir.join(PODCAST_SUBDIR);
    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        warn!("Could not create podcast directory {}: {e}", dir.display());
        return None;
    }

    let audio = match speech.synthesize(script).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!("Speech synthesis failed for session {session_id}: {e}");
            return None;
        }
    };

    let file_name = format!("resumo_{session_id}.mp3");
    if let Err(e) = tokio::fs::write(dir.join(&file_name), &audio).await {
        warn!("Could not write podcast {file_name}: {e}");
        return None;
    }

    info!("Podcast rendered for session {session_id} ({} bytes)", audio.len());
    Some(format!("{PODCAST_SUBDIR}/{file_name}"))
}

/// Public URL for a path returned by `render_podcast`.
pub fn podcast_url(relative_path: &str) -> String {
    format!("{STATIC_MOUNT}/{relative_path}")
}

fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubSpeech;

    #[tokio::test]
    async fn test_renders_file_and_returns_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let speech = StubSpeech::replying(b"ID3-fake-mp3");

        let path = render_podcast(&speech, "Olá", "abc-123", dir.path()).await;

        assert_eq!(path.as_deref(), Some("podcasts/resumo_abc-123.mp3"));
        let written = std::fs::read(dir.path().join("podcasts/resumo_abc-123.mp3")).unwrap();
        assert_eq!(written, b"ID3-fake-mp3");
        assert_eq!(speech.inputs(), vec!["Olá".to_string()]);
    }

    #[tokio::test]
    async fn test_same_id_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("podcasts/resumo_s1.mp3");
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"old audio that is longer").unwrap();

        let speech = StubSpeech::replying(b"new");
        render_podcast(&speech, "x", "s1", dir.path()).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_distinct_ids_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let speech = StubSpeech::replying(b"audio");
        let a = render_podcast(&speech, "x", "s1", dir.path()).await.unwrap();
        let b = render_podcast(&speech, "x", "s2", dir.path()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_speech_failure_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let speech = StubSpeech::failing();
        assert!(render_podcast(&speech, "x", "s1", dir.path()).await.is_none());
        assert!(!dir.path().join("podcasts/resumo_s1.mp3").exists());
    }

    #[tokio::test]
    async fn test_unsafe_id_is_rejected_without_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let speech = StubSpeech::replying(b"audio");
        assert!(render_podcast(&speech, "x", "../escape", dir.path()).await.is_none());
        assert_eq!(speech.calls(), 0);
    }

    #[test]
    fn test_podcast_url_is_under_static_mount() {
        assert_eq!(
            podcast_url("podcasts/resumo_s1.mp3"),
            "/static/podcasts/resumo_s1.mp3"
        );
    }
}
