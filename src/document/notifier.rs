//! SMTP delivery of rendered documents.
//!
//! One multipart message per run: an HTML greeting plus the PDF attachment,
//! sent over an implicit-TLS session with the configured relay. No retry;
//! every failure surfaces as a typed delivery error.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::AppConfig;

use super::models::RenderedDocument;

const SENDER_NAME: &str = "Document Agent";

/// Errors that can occur while delivering a document.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid email address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Delivery seam used by the pipeline.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(
        &self,
        to: &str,
        client_name: &str,
        document: &RenderedDocument,
    ) -> Result<(), DeliveryError>;
}

/// Notifier backed by an authenticated SMTPS relay session on port 465.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl SmtpNotifier {
    /// Build the relay transport once at startup.
    pub fn new(config: &AppConfig) -> Result<Self, DeliveryError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| DeliveryError::Smtp(e.to_string()))?
            .credentials(Credentials::new(
                config.email_address.clone(),
                config.email_app_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            sender: config.email_address.clone(),
        })
    }

    fn body_html(client_name: &str) -> String {
        format!(
            "<html>\n<body>\n\
             <p>Hi {client_name},</p>\n\
             <p>Please find your document attached.</p>\n\
             <p>Best regards,<br>{SENDER_NAME}</p>\n\
             </body>\n</html>"
        )
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn deliver(
        &self,
        to: &str,
        client_name: &str,
        document: &RenderedDocument,
    ) -> Result<(), DeliveryError> {
        let from: Mailbox = format!("{} <{}>", SENDER_NAME, self.sender)
            .parse()
            .map_err(|_| DeliveryError::Address(self.sender.clone()))?;
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|_| DeliveryError::Address(to.to_string()))?;

        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| DeliveryError::Build(e.to_string()))?;
        let attachment =
            Attachment::new(document.filename.clone()).body(document.bytes.clone(), pdf_type);

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(format!("Your Document - {client_name}"))
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(Self::body_html(client_name)),
                    )
                    .singlepart(attachment),
            )
            .map_err(|e| DeliveryError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::Smtp(e.to_string()))
    }
}
