// Audio review: mistakes → tutoring script → speech file.
// All endpoint calls go through llm_client traits.

pub mod audio;
pub mod handlers;
pub mod prompts;
pub mod script;
