use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// One year; keeps `chrono::Duration::minutes` well inside its range.
const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// Directory holding vagas.json, perfis_bancas.json, eixos.json and blocos.json.
    pub data_dir: PathBuf,
    /// Served under `/static`; rendered podcasts land in `<static_dir>/podcasts`.
    pub static_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Applied to every text-generation and speech call.
    pub llm_timeout_secs: u64,
    pub session_ttl_minutes: i64,
    pub default_questions_per_subject: u32,
    pub max_questions_per_subject: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string())
                .into(),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            session_ttl_minutes: session_ttl(parse_env("SESSION_TTL_MINUTES", 120)?)?,
            default_questions_per_subject: parse_env("DEFAULT_QUESTIONS_PER_SUBJECT", 3)?,
            max_questions_per_subject: parse_env("MAX_QUESTIONS_PER_SUBJECT", 10)?,
        })
    }
}

fn session_ttl(minutes: i64) -> Result<i64> {
    if !(1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
        bail!("SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}");
    }
    Ok(minutes)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
