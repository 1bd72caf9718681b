use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{validate_required, ValidationErrors};

/// Kind of document the model is asked to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DocumentType {
    Invoice,
    Contract,
}

impl DocumentType {
    /// Lower-cased suffix used in derived filenames.
    pub fn suffix(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Contract => "contract",
        }
    }
}

/// Payload accepted by `POST /api/documents`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitDocumentRequest {
    #[schema(example = "Jane Doe")]
    pub client_name: String,
    #[schema(example = "jane.doe@example.com")]
    pub client_email: String,
    /// Optional; a blank value falls back to the client name.
    #[serde(default)]
    #[schema(example = "Doe's Digital Solutions")]
    pub business_name: Option<String>,
    pub document_type: DocumentType,
    #[schema(example = "Web design - 5000, Logo - 1500")]
    pub description: String,
}

/// A submission as the pipeline sees it. Built once per run and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub client_name: String,
    pub client_email: String,
    pub business_name: Option<String>,
    pub document_type: DocumentType,
    pub description: String,
}

impl DocumentRequest {
    /// Check required fields. Runs before any external call is made.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.client_name, "client_name", "Client Name", &mut errors);
        validate_required(
            &self.client_email,
            "client_email",
            "Client Email",
            &mut errors,
        );
        validate_required(&self.description, "description", "Description", &mut errors);

        errors.into_result()
    }

    /// The business name used in prompts; blank values fall back to the
    /// client name.
    pub fn resolved_business_name(&self) -> &str {
        match &self.business_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.client_name,
        }
    }
}

impl From<SubmitDocumentRequest> for DocumentRequest {
    fn from(req: SubmitDocumentRequest) -> Self {
        Self {
            client_name: req.client_name,
            client_email: req.client_email,
            business_name: req.business_name,
            document_type: req.document_type,
            description: req.description,
        }
    }
}

/// A rendered PDF together with its derived attachment filename.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Body returned when the pipeline completes.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentSuccessResponse {
    pub success: bool,
    #[schema(example = "INVOICE #1042\nDate: 4 August 2026\n...")]
    pub preview_text: String,
}

/// Body returned when any stage fails.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentFailureResponse {
    pub success: bool,
    #[schema(example = "generation")]
    pub stage: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "client_name": "Jane Doe",
            "client_email": "jane@example.com",
            "business_name": "Doe's Digital Solutions",
            "document_type": "Invoice",
            "description": "Web design - 5000, Logo - 1500"
        }"#;

        let request: SubmitDocumentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.client_name, "Jane Doe");
        assert_eq!(request.document_type, DocumentType::Invoice);
    }

    #[test]
    fn test_business_name_defaults_to_client_name() {
        let request = DocumentRequest {
            client_name: "Jane Doe".to_string(),
            client_email: "jane@example.com".to_string(),
            business_name: Some("   ".to_string()),
            document_type: DocumentType::Invoice,
            description: "Web design".to_string(),
        };
        assert_eq!(request.resolved_business_name(), "Jane Doe");
    }

    #[test]
    fn test_business_name_kept_when_present() {
        let request = DocumentRequest {
            client_name: "Jane Doe".to_string(),
            client_email: "jane@example.com".to_string(),
            business_name: Some("Doe's Digital Solutions".to_string()),
            document_type: DocumentType::Contract,
            description: "6 month retainer".to_string(),
        };
        assert_eq!(request.resolved_business_name(), "Doe's Digital Solutions");
    }
}
