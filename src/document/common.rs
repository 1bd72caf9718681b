//! Shared helpers for filename derivation and date formatting.

use chrono::{Datelike, Local};

use super::models::DocumentType;

/// Derive the attachment filename from the client name and document type.
///
/// Spaces become underscores and the document type is appended lower-cased,
/// so "Jane Doe" with an invoice yields "Jane_Doe_invoice.pdf".
pub fn document_filename(client_name: &str, document_type: DocumentType) -> String {
    let safe = sanitize_filename::sanitize(client_name.trim());
    let base = if safe.is_empty() {
        "document".to_string()
    } else {
        safe
    };

    format!("{}_{}.pdf", base.replace(' ', "_"), document_type.suffix())
}

/// Format the current date long-form (e.g. "4 August 2026").
pub fn format_long_date() -> String {
    let now = Local::now().date_naive();
    let months = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    let day = now.day();
    let month = months[(now.month0() as usize).min(months.len() - 1)];
    let year = now.year();

    format!("{day} {month} {year}")
}
