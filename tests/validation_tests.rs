use document_agent_server::document::models::{DocumentRequest, DocumentType};
use document_agent_server::document::validation::{
    validate_required, ValidationError, ValidationErrors,
};

fn request() -> DocumentRequest {
    DocumentRequest {
        client_name: "Jane Doe".to_string(),
        client_email: "jane@example.com".to_string(),
        business_name: None,
        document_type: DocumentType::Invoice,
        description: "Web design - 5000".to_string(),
    }
}

#[test]
fn test_valid_request_passes() {
    assert!(request().validate().is_ok());
}

#[test]
fn test_empty_client_name_fails() {
    let mut req = request();
    req.client_name = "".to_string();

    let errors = req.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.to_message().contains("Client Name must not be empty"));
}

#[test]
fn test_whitespace_client_email_fails() {
    let mut req = request();
    req.client_email = "   ".to_string();

    let errors = req.validate().unwrap_err();
    assert!(errors
        .to_message()
        .contains("Client Email must not be empty"));
}

#[test]
fn test_empty_description_fails() {
    let mut req = request();
    req.description = "".to_string();

    assert!(req.validate().is_err());
}

#[test]
fn test_all_required_fields_reported_together() {
    let mut req = request();
    req.client_name = "".to_string();
    req.client_email = "".to_string();
    req.description = "".to_string();

    let errors = req.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.to_message().contains("3 error(s)"));
}

#[test]
fn test_missing_business_name_is_allowed() {
    let mut req = request();
    req.business_name = None;
    assert!(req.validate().is_ok());

    req.business_name = Some("".to_string());
    assert!(req.validate().is_ok());
}

#[test]
fn test_validate_required_empty() {
    let mut errors = ValidationErrors::new();
    validate_required("", "client_name", "Client Name", &mut errors);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_validate_required_valid() {
    let mut errors = ValidationErrors::new();
    validate_required("Jane Doe", "client_name", "Client Name", &mut errors);
    assert!(errors.is_empty());
}

#[test]
fn test_validation_error_display_includes_suggestion() {
    let error = ValidationError::empty_field("description", "Description");
    let rendered = error.to_string();
    assert!(rendered.contains("[description]"));
    assert!(rendered.contains("Fill in the description"));
}
