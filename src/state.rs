//! Application state shared across requests.
//!
//! The pipeline components are assembled once at startup; handlers only read
//! from here. `with_components` exists so tests can substitute the generator
//! and notifier seams.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::document::generator::{FallbackGenerator, OpenRouterClient, TextGenerator};
use crate::document::notifier::{Notifier, SmtpNotifier};
use crate::document::pipeline::DocumentPipeline;
use crate::document::renderer::PdfRenderer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http_client: reqwest::Client,
    pub account_client: OpenRouterClient,
    pub pipeline: DocumentPipeline,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let notifier: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(&config)?);

        let http_client = build_http_client();
        let config = Arc::new(config);
        let account_client = OpenRouterClient::new(http_client.clone(), config.clone());
        let generator: Arc<dyn TextGenerator> = Arc::new(FallbackGenerator::new(
            config.models.clone(),
            account_client.clone(),
        ));
        let renderer = PdfRenderer::new(config.font_path.clone());
        let pipeline = DocumentPipeline::new(generator, renderer, notifier);

        Ok(Self {
            config,
            http_client,
            account_client,
            pipeline,
        })
    }

    /// Assemble state around substituted generator and notifier implementations.
    pub fn with_components(
        config: AppConfig,
        generator: Arc<dyn TextGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let http_client = build_http_client();
        let config = Arc::new(config);
        let account_client = OpenRouterClient::new(http_client.clone(), config.clone());
        let renderer = PdfRenderer::new(config.font_path.clone());
        let pipeline = DocumentPipeline::new(generator, renderer, notifier);

        Self {
            config,
            http_client,
            account_client,
            pipeline,
        }
    }
}

fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(900))
        .user_agent(concat!("document-agent-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create reqwest client")
}
