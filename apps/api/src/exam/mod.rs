// Exam generation, sessions and scoring.
// All endpoint calls go through llm_client; no direct HTTP calls here.

pub mod flow;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod scoring;
pub mod session;
