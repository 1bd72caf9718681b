//! Process-wide configuration, read from the environment once at startup.
//!
//! Credentials and endpoints live here so that the completion client and the
//! notifier receive them by reference instead of reading ambient state.

use std::env;
use thiserror::Error;

const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/completions";
const DEFAULT_MODELS: &str = "openai/gpt-4o-mini,mistralai/mistral-7b-instruct:free";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_FONT_PATH: &str = "DejaVuSans.ttf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Read-only application configuration, shared behind `Arc` after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub email_address: String,
    pub email_app_password: String,
    pub completion_url: String,
    /// Candidate models in fallback order; the first one is the primary.
    pub models: Vec<String>,
    pub smtp_host: String,
    pub font_path: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: require("OPENROUTER_API_KEY")?,
            email_address: require("EMAIL_ADDRESS")?,
            email_app_password: require("EMAIL_APP_PASSWORD")?,
            completion_url: env::var("COMPLETION_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            models: parse_models(
                &env::var("COMPLETION_MODELS").unwrap_or_else(|_| DEFAULT_MODELS.to_string()),
            ),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            font_path: env::var("FONT_PATH").unwrap_or_else(|_| DEFAULT_FONT_PATH.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|model| model.trim().to_string())
        .filter(|model| !model.is_empty())
        .collect()
}
