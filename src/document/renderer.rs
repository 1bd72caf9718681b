//! Plain text to paginated PDF bytes.
//!
//! The configured Unicode font is loaded at render time when it is present
//! and parseable. Otherwise the renderer falls back to the built-in
//! Helvetica and coerces the text to Latin-1 first, so layout cannot fail
//! on encoding. Text flows as a fixed-width block; overflow starts a new
//! page.

use std::fs;

use printpdf::font::ParsedFont;
use printpdf::text::TextItem;
use printpdf::{
    BuiltinFont, FontId, Layer, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextMatrix,
};
use thiserror::Error;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 8.0;
// Average glyph width as a fraction of the font size.
const CHAR_WIDTH_EM: f32 = 0.6;

/// Errors that can occur during PDF assembly.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document text is empty")]
    EmptyText,
}

/// Stateless renderer; the font file is read on every render.
#[derive(Clone)]
pub struct PdfRenderer {
    font_path: String,
}

enum PageFont {
    Embedded(FontId),
    Builtin(BuiltinFont),
}

impl PdfRenderer {
    pub fn new(font_path: impl Into<String>) -> Self {
        Self {
            font_path: font_path.into(),
        }
    }

    /// Lay out the text as a flowing multi-line block and serialize the
    /// document. A non-empty input always renders; the fallback font path
    /// cannot fail.
    pub fn render(&self, title: &str, text: &str) -> Result<Vec<u8>, RenderError> {
        if text.trim().is_empty() {
            return Err(RenderError::EmptyText);
        }

        let mut doc = PdfDocument::new(title);

        let (font, text) = match self.load_font(&mut doc) {
            Some(font_id) => (PageFont::Embedded(font_id), text.to_string()),
            None => (PageFont::Builtin(BuiltinFont::Helvetica), coerce_latin1(text)),
        };

        let lines = wrap_text(&text, line_capacity());

        let usable_height = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;
        let lines_per_page = ((usable_height / LINE_HEIGHT_MM).floor() as usize).max(1);

        for (page_idx, chunk) in lines.chunks(lines_per_page).enumerate() {
            let mut ops: Vec<Op> = Vec::new();

            let layer_name = format!("Page {} Layer 1", page_idx + 1);
            let layer_id = doc.add_layer(&Layer::new(&*layer_name));
            ops.push(Op::BeginLayer { layer_id });

            ops.push(Op::StartTextSection);
            match &font {
                PageFont::Embedded(font_id) => ops.push(Op::SetFontSize {
                    size: Pt(FONT_SIZE_PT),
                    font: font_id.clone(),
                }),
                PageFont::Builtin(builtin) => ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(FONT_SIZE_PT),
                    font: *builtin,
                }),
            }

            let page_height_pt = Mm(PAGE_HEIGHT_MM).into_pt().0;
            let x_pt = Mm(MARGIN_MM).into_pt().0;

            for (line_idx, line) in chunk.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let y_mm = MARGIN_MM + (line_idx as f32 + 1.0) * LINE_HEIGHT_MM;
                let pdf_y = page_height_pt - Mm(y_mm).into_pt().0;
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Pt(x_pt), Pt(pdf_y)),
                });
                match &font {
                    PageFont::Embedded(font_id) => ops.push(Op::WriteText {
                        items: vec![TextItem::Text(line.clone())],
                        font: font_id.clone(),
                    }),
                    PageFont::Builtin(builtin) => ops.push(Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(line.clone())],
                        font: *builtin,
                    }),
                }
            }
            ops.push(Op::EndTextSection);

            doc.pages
                .push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));
        }

        let mut warnings = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }

    fn load_font(&self, doc: &mut PdfDocument) -> Option<FontId> {
        let data = match fs::read(&self.font_path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!(
                    "font file {} not readable ({}), falling back to built-in Helvetica",
                    self.font_path,
                    e
                );
                return None;
            }
        };

        let mut warnings = Vec::new();
        match ParsedFont::from_bytes(&data, 0, &mut warnings) {
            Some(font) => Some(doc.add_font(&font)),
            None => {
                log::warn!(
                    "font file {} could not be parsed, falling back to built-in Helvetica",
                    self.font_path
                );
                None
            }
        }
    }
}

/// Replace everything outside Latin-1 so the built-in font can encode it.
fn coerce_latin1(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// Characters that fit on one line at the fixed block width.
fn line_capacity() -> usize {
    let line_width_pt = Mm(PAGE_WIDTH_MM - 2.0 * MARGIN_MM).into_pt().0;
    ((line_width_pt / (FONT_SIZE_PT * CHAR_WIDTH_EM)).floor() as usize).max(1)
}

/// Greedy word wrap preserving explicit line breaks. Words longer than a
/// line are hard-split so nothing overflows the block.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }

            while current.chars().count() > max_chars {
                let head: String = current.chars().take(max_chars).collect();
                current = current.chars().skip(max_chars).collect();
                lines.push(head);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_latin1_replaces_out_of_range() {
        assert_eq!(coerce_latin1("Prix: 5000€"), "Prix: 5000?");
        assert_eq!(coerce_latin1("café"), "café");
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_text_keeps_explicit_breaks() {
        let lines = wrap_text("INVOICE #1234\n\nTotal: 7475.00", 80);
        assert_eq!(lines, vec!["INVOICE #1234", "", "Total: 7475.00"]);
    }

    #[test]
    fn test_wrap_text_hard_splits_long_words() {
        let lines = wrap_text("aaaaaaaaaa", 4);
        assert_eq!(lines, vec!["aaaa", "aaaa", "aa"]);
    }
}
