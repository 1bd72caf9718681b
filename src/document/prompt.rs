//! Prompt templates for each document type.
//!
//! Selection is by document type; placeholders are filled from the request
//! verbatim. The description is accepted as-is, there is nothing to escape
//! for a plain-text prompt.

use super::common::format_long_date;
use super::models::{DocumentRequest, DocumentType};

/// Build the completion prompt for a request. Pure; never fails.
pub fn build_prompt(request: &DocumentRequest) -> String {
    let business = request.resolved_business_name();

    match request.document_type {
        DocumentType::Invoice => format!(
            "Generate a professional invoice for {client} of {business}.\n\
             Details: {description}\n\
             - Create a unique Invoice Number and use today's date, {date}.\n\
             - List items with prices, calculate subtotal, a 15% tax, and a final total.\n\
             - Do NOT include placeholders like '[Your Company Name]'.",
            client = request.client_name,
            business = business,
            description = request.description,
            date = format_long_date(),
        ),
        DocumentType::Contract => format!(
            "Generate a formal service agreement between {business} and {client}.\n\
             The core of the agreement is: {description}\n\
             - Include clauses for Services, Compensation, Term, Confidentiality, and Termination.\n\
             - Do NOT include placeholders for signatures.",
            business = business,
            client = request.client_name,
            description = request.description,
        ),
    }
}
