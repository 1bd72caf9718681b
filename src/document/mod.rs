//! Document pipeline - turns a submitted request into a drafted, rendered,
//! and emailed PDF.
//!
//! Submodules:
//! - `models` - request and response types
//! - `validation` - required-field checks run before any external call
//! - `prompt` - document-type prompt templates
//! - `generator` - remote completion client with ordered model fallback
//! - `renderer` - plain text to paginated PDF bytes
//! - `notifier` - SMTP delivery of the rendered document
//! - `pipeline` - stage sequencing and outcome reporting
//! - `handlers` - actix-web endpoints

pub mod common;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod pipeline;
pub mod prompt;
pub mod renderer;
pub mod validation;

pub use generator::{FallbackGenerator, GenerationError, OpenRouterClient, TextGenerator};
pub use models::{DocumentRequest, DocumentType, RenderedDocument};
pub use notifier::{DeliveryError, Notifier, SmtpNotifier};
pub use pipeline::{DocumentPipeline, PipelineError, PipelineOutcome, Stage};
pub use renderer::{PdfRenderer, RenderError};
