use std::path::Path;

use crate::error::ExtractError;
use crate::model::CandidateRecord;

/// Renders the record collection as a JSON array using the same field names
/// as the CSV columns. Records without a source file omit that field.
pub fn records_to_json_string(records: &[CandidateRecord]) -> Result<String, ExtractError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn write_json(path: &Path, records: &[CandidateRecord]) -> Result<(), ExtractError> {
    std::fs::write(path, records_to_json_string(records)?)?;
    Ok(())
}
