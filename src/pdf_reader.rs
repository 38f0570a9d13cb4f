use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::UTF_16BE;
use lopdf::content::Content;
use lopdf::{Document, Object};

use crate::error::ExtractError;
use crate::layout::{DocumentLayout, TableStrategy, split_cells_on_gutters, tables_from_text};
use crate::model::TableGrid;

/// A loaded PDF exposed through the [`DocumentLayout`] boundary.
///
/// Page text is settled once at load time: for every page the best-scoring
/// candidate wins between pdf-extract's form-feed page split and a direct
/// content-stream decode. Tables are rebuilt on demand per strategy.
pub struct PdfDocument {
    page_texts: Vec<String>,
}

impl PdfDocument {
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let document = Document::load(path)?;
        let whole_text = pdf_extract::extract_text(path).ok();
        Ok(Self::from_document(&document, whole_text.as_deref()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExtractError> {
        let document = Document::load_mem(bytes)?;
        let whole_text = pdf_extract::extract_text_from_mem(bytes).ok();
        Ok(Self::from_document(&document, whole_text.as_deref()))
    }

    fn from_document(document: &Document, whole_text: Option<&str>) -> Self {
        let pages_map = document.get_pages();
        let split_pages = whole_text
            .map(split_text_into_pages)
            .filter(|pages| pages.len() == pages_map.len());

        let mut page_texts = Vec::with_capacity(pages_map.len());
        for (index, (page_no, page_id)) in pages_map.iter().enumerate() {
            let mut candidates = Vec::new();
            if let Some(text) = split_pages
                .as_ref()
                .and_then(|pages| pages.get(index).cloned())
                .filter(|text| !text.trim().is_empty())
            {
                candidates.push(text);
            }
            if let Some(text) = extract_text_from_page_content(document, *page_id) {
                candidates.push(text);
            }
            if let Some(text) = document
                .extract_text(&[*page_no])
                .ok()
                .filter(|text| !text.trim().is_empty())
            {
                candidates.push(text);
            }

            page_texts.push(choose_best_text(&candidates));
        }

        Self { page_texts }
    }
}

impl DocumentLayout for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_texts.len()
    }

    fn extract_text(&self, page: usize) -> Result<String, ExtractError> {
        self.page_texts
            .get(page)
            .cloned()
            .ok_or_else(|| ExtractError::Layout(format!("page {page} is out of range")))
    }

    fn extract_tables(
        &self,
        page: usize,
        strategy: TableStrategy,
    ) -> Result<Vec<TableGrid>, ExtractError> {
        Ok(tables_from_text(&self.extract_text(page)?, strategy))
    }
}

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

/// A decoded page is considered broken when it is dominated by replacement
/// or control characters, or carries pdf-extract's Identity-H marker.
fn looks_decoding_broken(text: &str) -> bool {
    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    if total == 0 {
        return false;
    }

    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    // Identity-H encoded fonts usually carry raw UTF-16BE text.
    let payload = match bytes {
        [0xFE, 0xFF, rest @ ..] | [0xFF, 0xFE, rest @ ..] => rest,
        _ => bytes,
    };
    let wants_utf16 = encoding.is_some_and(|name| {
        let lower = name.to_ascii_lowercase();
        lower.contains("utf16") || lower.contains("identity-h") || lower.contains("unicode")
    });
    if wants_utf16 || bytes.len() != payload.len() {
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(payload);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    String::from_utf8_lossy(bytes).to_string()
}

/// Scores extraction candidates for how much tabular roll content survived:
/// multi-cell lines dominate, register-number-looking lines help, broken
/// decoding disqualifies.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut register_like_lines = 0_i64;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        non_empty_lines += 1;
        if split_cells_on_gutters(line).len() >= 2 {
            multi_cell_lines += 1;
        }
        let has_digit = line.chars().any(|ch| ch.is_ascii_digit());
        if has_digit && line.chars().take(16).any(char::is_uppercase) {
            register_like_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + register_like_lines * 15 + non_empty_lines - broken_penalty
}

fn choose_best_text(candidates: &[String]) -> String {
    candidates
        .iter()
        .max_by_key(|text| extraction_quality_score(text))
        .cloned()
        .unwrap_or_default()
}

/// Decodes a page's content stream directly, splitting text runs into lines
/// at the text-positioning operators. Fallback for documents pdf-extract
/// cannot page-split cleanly.
fn extract_text_from_page_content(document: &Document, page_id: lopdf::ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    text.push_str(&decode_pdf_bytes(encoding, bytes));
                }
                Object::Array(items) => {
                    collect_text(text, encoding, items);
                    text.push(' ');
                }
                Object::Integer(value) => {
                    if *value < -100 {
                        text.push(' ');
                    }
                }
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    current_encoding = encodings.get(font_name).copied();
                }
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            "T*" | "Td" | "TD" | "ET" => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
