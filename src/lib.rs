mod columns;
mod csv_out;
mod error;
mod json_out;
mod layout;
mod metadata;
mod model;
mod normalize;
mod options;
mod pdf_reader;
mod rows;
mod sort;
mod warning;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub use crate::csv_out::{write_csv, write_csv_to_string};
pub use crate::error::ExtractError;
pub use crate::json_out::{records_to_json_string, write_json};
pub use crate::layout::{DocumentLayout, TableStrategy};
pub use crate::model::{CandidateRecord, ColumnRoles, ExamMetadata, TableGrid, UNKNOWN};
pub use crate::options::ExtractOptions;
pub use crate::pdf_reader::PdfDocument;
pub use crate::warning::{ExtractWarning, WarningCode};

/// Aggregate outcome counters for one batch run. Individual row-validation
/// skips are deliberately not itemized; only their count is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub document_count: usize,
    pub table_count: usize,
    pub record_count: usize,
    pub rows_skipped: usize,
    pub warnings: Vec<ExtractWarning>,
}

/// The finalized, sorted record collection plus its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchExtraction {
    pub records: Vec<CandidateRecord>,
    pub report: ExtractionReport,
}

/// One document's contribution before it is merged into the aggregate.
#[derive(Debug, Default)]
pub struct DocumentExtraction {
    pub records: Vec<CandidateRecord>,
    pub table_count: usize,
    pub rows_skipped: usize,
}

/// Runs the normalization core against one document behind the layout
/// boundary: exam metadata from the first page, then per page a line-based
/// table pass with a text-based retry, then row extraction and validation.
///
/// Never fails. Per-page layout faults and unresolvable tables are reported
/// as warnings and contribute zero records.
pub fn extract_document(
    layout: &impl DocumentLayout,
    source: &str,
    options: &ExtractOptions,
    warnings: &mut Vec<ExtractWarning>,
) -> DocumentExtraction {
    let mut out = DocumentExtraction::default();

    let metadata = if layout.page_count() == 0 {
        ExamMetadata::unknown()
    } else {
        match layout.extract_text(0) {
            Ok(text) => metadata::extract_metadata(&text),
            Err(error) => {
                warnings.push(
                    ExtractWarning::new(WarningCode::PageLayoutFailed, error.to_string())
                        .with_source(source)
                        .with_page(1),
                );
                ExamMetadata::unknown()
            }
        }
    };

    let stamped_source = options.include_source_file.then_some(source);
    for page in 0..layout.page_count() {
        let grids = match page_tables(layout, page) {
            Ok(grids) => grids,
            Err(error) => {
                warnings.push(
                    ExtractWarning::new(WarningCode::PageLayoutFailed, error.to_string())
                        .with_source(source)
                        .with_page(page + 1),
                );
                continue;
            }
        };

        for grid in &grids {
            out.table_count += 1;
            match rows::extract_rows(grid, &metadata, stamped_source, options) {
                Some(extraction) => {
                    out.records.extend(extraction.records);
                    out.rows_skipped += extraction.rows_skipped;
                }
                None => {
                    warnings.push(
                        ExtractWarning::new(
                            WarningCode::ColumnsUnresolved,
                            "register/name columns could not be identified; table skipped",
                        )
                        .with_source(source)
                        .with_page(page + 1),
                    );
                }
            }
        }
    }

    if out.table_count == 0 {
        warnings.push(
            ExtractWarning::new(
                WarningCode::NoTablesDetected,
                "no tables were detected under either strategy",
            )
            .with_source(source),
        );
    }

    debug!(
        source,
        records = out.records.len(),
        tables = out.table_count,
        "document extraction complete"
    );
    out
}

/// Line-based strategy first; an empty result retries with the text-based
/// strategy. The two are complementary: ruled grids lose nothing under the
/// line split, unruled pages only yield under the positional split.
fn page_tables(
    layout: &impl DocumentLayout,
    page: usize,
) -> Result<Vec<TableGrid>, ExtractError> {
    let grids = layout.extract_tables(page, TableStrategy::Lines)?;
    if grids.is_empty() {
        return layout.extract_tables(page, TableStrategy::Text);
    }
    Ok(grids)
}

/// Extracts and merges every input document into one sorted collection.
///
/// Hard-fails only before processing starts: an empty input list or invalid
/// options. Every per-document fault downgrades to a warning with zero
/// contribution, so all documents are always attempted.
pub fn extract_batch(
    inputs: &[PathBuf],
    options: &ExtractOptions,
) -> Result<BatchExtraction, ExtractError> {
    validate_options(options)?;
    if inputs.is_empty() {
        return Err(ExtractError::NoInputDocuments);
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut document_count = 0_usize;
    let mut table_count = 0_usize;
    let mut rows_skipped = 0_usize;

    for input in inputs {
        let source = source_name(input);
        let document = match PdfDocument::load(input) {
            Ok(document) => document,
            Err(error) => {
                warn!(source = %source, %error, "skipping unreadable document");
                warnings.push(
                    ExtractWarning::new(WarningCode::SourceReadFailed, error.to_string())
                        .with_source(source.as_str()),
                );
                continue;
            }
        };

        let contribution = extract_document(&document, &source, options, &mut warnings);
        document_count += 1;
        table_count += contribution.table_count;
        rows_skipped += contribution.rows_skipped;
        records.extend(contribution.records);
    }

    sort::sort_records(&mut records);
    Ok(BatchExtraction {
        report: ExtractionReport {
            document_count,
            table_count,
            record_count: records.len(),
            rows_skipped,
            warnings,
        },
        records,
    })
}

/// Single-document variant for in-memory consumers. Unlike [`extract_batch`]
/// an undecodable PDF is a hard error here; there is no batch to keep alive.
pub fn extract_bytes(
    pdf_bytes: &[u8],
    source: &str,
    options: &ExtractOptions,
) -> Result<BatchExtraction, ExtractError> {
    validate_options(options)?;
    let document = PdfDocument::from_bytes(pdf_bytes)?;

    let mut warnings = Vec::new();
    let contribution = extract_document(&document, source, options, &mut warnings);
    let mut records = contribution.records;
    sort::sort_records(&mut records);

    Ok(BatchExtraction {
        report: ExtractionReport {
            document_count: 1,
            table_count: contribution.table_count,
            record_count: records.len(),
            rows_skipped: contribution.rows_skipped,
            warnings,
        },
        records,
    })
}

/// Extracts a batch and writes the sorted records straight to a CSV file.
pub fn extract_pdfs_to_csv(
    inputs: &[PathBuf],
    output_csv: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    let batch = extract_batch(inputs, options)?;
    write_csv(
        output_csv,
        &batch.records,
        options.delimiter,
        options.include_source_file,
    )?;
    Ok(batch.report)
}

fn validate_options(options: &ExtractOptions) -> Result<(), ExtractError> {
    if options.min_register_len < 3 {
        return Err(ExtractError::InvalidOption(
            "min_register_len must be at least 3".to_string(),
        ));
    }
    Ok(())
}

fn source_name(input: &Path) -> String {
    input.file_name().map_or_else(
        || input.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
