//! Remote completion client with ordered model fallback.
//!
//! One attempt is made per candidate model, in order. An authorization
//! rejection moves on to the next candidate; any other failure stops the
//! run. Error messages never carry the bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

const MAX_TOKENS: u32 = 1000;

/// Errors that can occur while generating document text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint returned status {0}")]
    Status(u16),
    #[error("completion response had an unrecognized shape")]
    UnrecognizedShape,
    #[error("completion response contained no usable output")]
    NoUsableOutput,
    #[error("every candidate model was rejected for authorization")]
    AllCandidatesUnauthorized,
}

/// Result of one attempt against one candidate model.
#[derive(Debug)]
pub enum CompletionAttempt {
    /// The endpoint rejected the bearer token for this model; the next
    /// candidate may still be accepted.
    Unauthorized,
    /// Usable text came back.
    Text(String),
}

/// One completion attempt against a single model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str)
        -> Result<CompletionAttempt, GenerationError>;
}

/// Pipeline-facing seam: prompt in, generated text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

/// The response shapes the provider is known to return. Whichever field is
/// present selects the variant; anything else is an unrecognized shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompletionResponse {
    Completion { completion: String },
    TextChoices { choices: Vec<TextChoice> },
    MessageChoices { choices: Vec<MessageChoice> },
    OutputText { output_text: String },
}

#[derive(Debug, Deserialize)]
struct TextChoice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct MessageChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl CompletionResponse {
    fn into_text(self) -> Option<String> {
        let text = match self {
            CompletionResponse::Completion { completion } => completion,
            CompletionResponse::TextChoices { choices } => choices.into_iter().next()?.text,
            CompletionResponse::MessageChoices { choices } => {
                choices.into_iter().next()?.message.content
            }
            CompletionResponse::OutputText { output_text } => output_text,
        };

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn parse_completion_text(body: &str) -> Result<String, GenerationError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|_| GenerationError::UnrecognizedShape)?;
    parsed.into_text().ok_or(GenerationError::NoUsableOutput)
}

/// HTTP client for the OpenRouter completion and account endpoints.
#[derive(Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: Arc<AppConfig>,
}

impl OpenRouterClient {
    pub fn new(http: reqwest::Client, config: Arc<AppConfig>) -> Self {
        Self { http, config }
    }

    fn account_url(&self) -> String {
        let base = self
            .config
            .completion_url
            .trim_end_matches("/completions")
            .trim_end_matches('/');
        format!("{}/account", base)
    }

    /// Diagnostic probe of the provider account endpoint. Never fatal; the
    /// caller decides what to do with the result.
    pub async fn account_status(&self) -> Result<serde_json::Value, GenerationError> {
        let response = self
            .http
            .get(self.account_url())
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<CompletionAttempt, GenerationError> {
        let response = self
            .http
            .post(&self.config.completion_url)
            .bearer_auth(&self.config.api_key)
            .json(&CompletionBody {
                model,
                prompt,
                max_tokens: MAX_TOKENS,
            })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(CompletionAttempt::Unauthorized);
        }
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_completion_text(&body).map(CompletionAttempt::Text)
    }
}

/// Tries an ordered list of candidate models, returning the first success.
pub struct FallbackGenerator<C: CompletionClient> {
    candidates: Vec<String>,
    client: C,
}

impl<C: CompletionClient> FallbackGenerator<C> {
    pub fn new(candidates: Vec<String>, client: C) -> Self {
        Self { candidates, client }
    }
}

#[async_trait]
impl<C: CompletionClient> TextGenerator for FallbackGenerator<C> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        for model in &self.candidates {
            match self.client.complete(model, prompt).await? {
                CompletionAttempt::Text(text) => {
                    log::info!("model {} produced {} characters", model, text.len());
                    return Ok(text);
                }
                CompletionAttempt::Unauthorized => {
                    log::warn!(
                        "model {} rejected for authorization, trying next candidate",
                        model
                    );
                }
            }
        }

        Err(GenerationError::AllCandidatesUnauthorized)
    }
}
