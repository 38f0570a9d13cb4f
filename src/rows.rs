use crate::columns::resolve_table_roles;
use crate::model::{CandidateRecord, ExamMetadata, TableGrid};
use crate::normalize::clean_text;
use crate::options::ExtractOptions;

const MIN_NAME_LEN: usize = 2;

pub(crate) struct RowExtraction {
    pub records: Vec<CandidateRecord>,
    pub rows_skipped: usize,
}

/// Walks one table and emits a record per valid candidate row. Returns
/// `None` when the register/name columns cannot be identified, in which case
/// the whole table contributes nothing.
///
/// Rows are dropped, never emitted partially, when they are too short, when
/// they re-state the header ("register"/"name" embedded in the row text), or
/// when the cleaned register/name values are below the length floors.
pub(crate) fn extract_rows(
    grid: &TableGrid,
    metadata: &ExamMetadata,
    source_file: Option<&str>,
    options: &ExtractOptions,
) -> Option<RowExtraction> {
    let roles = resolve_table_roles(&grid.rows);
    let (register_idx, name_idx) = (roles.register?, roles.name?);
    let required_cols = register_idx.max(name_idx) + 1;

    let mut records = Vec::new();
    let mut rows_skipped = 0_usize;

    for row in &grid.rows {
        if row.len() < required_cols {
            rows_skipped += 1;
            continue;
        }

        let joined = row.join(" ").to_lowercase();
        if joined.contains("register") || joined.contains("name") {
            continue;
        }

        let register_number = clean_text(&row[register_idx]);
        let name = clean_text(&row[name_idx]);
        if register_number.chars().count() < options.min_register_len
            || name.chars().count() < MIN_NAME_LEN
        {
            rows_skipped += 1;
            continue;
        }

        records.push(CandidateRecord {
            date: metadata.date.clone(),
            time: metadata.time.clone(),
            course: metadata.course.clone(),
            register_number,
            name,
            source_file: source_file.map(ToString::to_string),
        });
    }

    Some(RowExtraction {
        records,
        rows_skipped,
    })
}
