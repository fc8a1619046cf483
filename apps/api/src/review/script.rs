//! Explanation Script Service.
//!
//! Always returns usable text: the congratulatory message when there is
//! nothing to review, the apology when the endpoint fails.

use tracing::{debug, info, warn};

use crate::exam::models::MistakeRecord;
use crate::llm_client::{CompletionRequest, OutputMode, TextGenerator, SCRIPT_MODEL};
use crate::review::prompts::{
    build_review_prompt, review_system_prompt, CONGRATULATIONS, SCRIPT_APOLOGY,
};

/// Favors coherent prose over variety.
const SCRIPT_TEMPERATURE: f32 = 0.5;

pub async fn generate_review_script(llm: &dyn TextGenerator, mistakes: &[MistakeRecord]) -> String {
    if mistakes.is_empty() {
        return CONGRATULATIONS.to_string();
    }

    let prompt = build_review_prompt(mistakes);
    let system = review_system_prompt();
    debug!("Review prompt:\n{prompt}");

    let request = CompletionRequest {
        model: SCRIPT_MODEL,
        system: &system,
        prompt: &prompt,
        temperature: SCRIPT_TEMPERATURE,
        mode: OutputMode::Text,
    };

    match llm.complete(request).await {
        Ok(script) => {
            info!(
                "Review script generated for {} mistakes ({} chars)",
                mistakes.len(),
                script.chars().count()
            );
            script
        }
        Err(e) => {
            warn!("Review script generation failed: {e}");
            SCRIPT_APOLOGY.to_string()
        }
    }
}
