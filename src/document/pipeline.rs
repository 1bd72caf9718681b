//! Stage sequencing for one document run.
//!
//! Each stage converts its own failures into a typed error; the first
//! failure stops the run and nothing after it executes. Validation happens
//! before any external call.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::common::document_filename;
use super::generator::{GenerationError, TextGenerator};
use super::models::{DocumentRequest, RenderedDocument};
use super::notifier::{DeliveryError, Notifier};
use super::prompt::build_prompt;
use super::renderer::{PdfRenderer, RenderError};
use super::validation::ValidationErrors;

/// Pipeline stage names as they appear in failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    Generation,
    Rendering,
    Delivery,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validation => "validation",
            Stage::Generation => "generation",
            Stage::Rendering => "rendering",
            Stage::Delivery => "delivery",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stage-tagged union of the per-stage error types.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Rendering(#[from] RenderError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Validation(_) => Stage::Validation,
            PipelineError::Generation(_) => Stage::Generation,
            PipelineError::Rendering(_) => Stage::Rendering,
            PipelineError::Delivery(_) => Stage::Delivery,
        }
    }
}

/// Outcome surfaced to the caller: the generated text as a preview, or the
/// first failing stage and its message.
#[derive(Debug)]
pub enum PipelineOutcome {
    Done { preview_text: String },
    Failed { stage: Stage, message: String },
}

/// Sequences generation, rendering, and delivery for one request.
#[derive(Clone)]
pub struct DocumentPipeline {
    generator: Arc<dyn TextGenerator>,
    renderer: PdfRenderer,
    notifier: Arc<dyn Notifier>,
}

impl DocumentPipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        renderer: PdfRenderer,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            generator,
            renderer,
            notifier,
        }
    }

    /// Run one request to completion or first failure.
    pub async fn run(&self, request: &DocumentRequest) -> PipelineOutcome {
        match self.execute(request).await {
            Ok(preview_text) => PipelineOutcome::Done { preview_text },
            Err(e) => {
                log::error!("pipeline failed during {}: {}", e.stage(), e);
                PipelineOutcome::Failed {
                    stage: e.stage(),
                    message: e.to_string(),
                }
            }
        }
    }

    async fn execute(&self, request: &DocumentRequest) -> Result<String, PipelineError> {
        request.validate().map_err(PipelineError::Validation)?;

        log::info!(
            "generating {} for {}",
            request.document_type.suffix(),
            request.client_name
        );
        let prompt = build_prompt(request);
        let text = self.generator.generate(&prompt).await?;

        log::info!("rendering {} characters to PDF", text.len());
        let filename = document_filename(&request.client_name, request.document_type);
        let bytes = self
            .renderer
            .render(filename.trim_end_matches(".pdf"), &text)?;
        let document = RenderedDocument { filename, bytes };

        log::info!(
            "delivering {} to {}",
            document.filename,
            request.client_email
        );
        self.notifier
            .deliver(&request.client_email, &request.client_name, &document)
            .await?;

        Ok(text)
    }
}
