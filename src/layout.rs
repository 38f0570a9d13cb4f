use crate::error::ExtractError;
use crate::model::TableGrid;

/// Minimum cells a line must split into before it counts as a table row.
const MIN_COLS: usize = 2;

/// How the layout service infers table cell boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStrategy {
    /// Cells bounded by hard separators: tabs or wide whitespace gutters.
    /// Works on ruled grids whose columns survive text extraction intact.
    Lines,
    /// Cells inferred from text position alone. Looser, but catches pages
    /// whose ruling lines were lost by the extractor.
    Text,
}

/// The document-layout boundary the core extracts through. Implementations
/// must be deterministic for a given document and strategy.
pub trait DocumentLayout {
    fn page_count(&self) -> usize;

    /// Plain text of one zero-based page.
    fn extract_text(&self, page: usize) -> Result<String, ExtractError>;

    /// Row/column cell grids found on one zero-based page. An empty result
    /// is not an error; it only means the strategy found nothing.
    fn extract_tables(
        &self,
        page: usize,
        strategy: TableStrategy,
    ) -> Result<Vec<TableGrid>, ExtractError>;
}

/// Builds table grids out of page text: consecutive lines that split into
/// enough cells under the chosen strategy are grouped into one grid, and a
/// non-row line closes the group. Groups need at least two rows to count.
pub(crate) fn tables_from_text(text: &str, strategy: TableStrategy) -> Vec<TableGrid> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    let flush = |rows: &mut Vec<Vec<String>>, tables: &mut Vec<TableGrid>| {
        if rows.len() >= 2 {
            tables.push(TableGrid {
                rows: std::mem::take(rows),
            });
        } else {
            rows.clear();
        }
    };

    for line in text.lines() {
        let cells = match strategy {
            TableStrategy::Lines => split_cells_on_gutters(line),
            TableStrategy::Text => split_cells_on_whitespace(line),
        };
        if cells.len() >= MIN_COLS {
            current.push(cells);
        } else {
            flush(&mut current, &mut tables);
        }
    }

    flush(&mut current, &mut tables);
    tables
}

/// Strict cell split: a tab or a run of two-plus spaces ends a cell. Single
/// spaces stay inside the cell, so multi-word names survive.
pub(crate) fn split_cells_on_gutters(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    let mut push_cell = |cell: &mut String| {
        let cell = cell.trim();
        if !cell.is_empty() {
            cells.push(cell.to_string());
        }
    };

    for ch in trimmed.chars() {
        if ch == '\t' || (ch.is_whitespace() && whitespace_run >= 1) {
            push_cell(&mut current);
            current.clear();
            whitespace_run = 0;
            continue;
        }
        if ch.is_whitespace() {
            whitespace_run += 1;
            current.push(' ');
            continue;
        }
        whitespace_run = 0;
        current.push(ch);
    }
    push_cell(&mut current);

    cells
}

/// Soft cell split: every whitespace gap is a boundary. Prose lines are not
/// rows, so anything ending like a sentence is rejected outright.
pub(crate) fn split_cells_on_whitespace(line: &str) -> Vec<String> {
    let looks_like_sentence = ['.', '!', '?']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation));
    if looks_like_sentence {
        return Vec::new();
    }
    line.split_whitespace().map(str::to_string).collect()
}
