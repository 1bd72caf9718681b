use document_agent_server::document::renderer::{PdfRenderer, RenderError};

fn renderer_without_font() -> PdfRenderer {
    // Points at a path that never exists so the built-in fallback is taken.
    PdfRenderer::new("no-such-font-file.ttf")
}

#[test]
fn test_renders_plain_text_to_pdf_bytes() {
    let bytes = renderer_without_font()
        .render("Jane_Doe_invoice", "INVOICE #1234\nTotal: 7475.00")
        .unwrap();

    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_renders_non_latin_text_with_fallback_font() {
    let text = "請求書 #1234 お支払い合計: ¥7,475";
    let bytes = renderer_without_font().render("invoice", text).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_empty_text_is_rejected() {
    let result = renderer_without_font().render("invoice", "   \n  ");
    assert!(matches!(result, Err(RenderError::EmptyText)));
}

#[test]
fn test_long_text_spans_multiple_pages() {
    let line = "Line item: professional services rendered during the billing period.\n";
    let text = line.repeat(200);

    let bytes = renderer_without_font().render("invoice", &text).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
