use std::path::Path;

use csv::WriterBuilder;

use crate::error::ExtractError;
use crate::model::CandidateRecord;

const COLUMNS: [&str; 5] = ["Date", "Time", "Course", "Register Number", "Name"];
const SOURCE_COLUMN: &str = "Source File";

fn write_records<W: std::io::Write>(
    mut writer: csv::Writer<W>,
    records: &[CandidateRecord],
    include_source_file: bool,
) -> Result<csv::Writer<W>, ExtractError> {
    let mut headers = COLUMNS.to_vec();
    if include_source_file {
        headers.push(SOURCE_COLUMN);
    }
    writer.write_record(&headers)?;

    for record in records {
        let mut fields = vec![
            record.date.as_str(),
            record.time.as_str(),
            record.course.as_str(),
            record.register_number.as_str(),
            record.name.as_str(),
        ];
        if include_source_file {
            fields.push(record.source_file.as_deref().unwrap_or_default());
        }
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    Ok(writer)
}

/// Writes the final record collection as delimited text, fixed column order
/// `Date, Time, Course, Register Number, Name[, Source File]`. Quoting and
/// escaping of embedded delimiters is the writer's concern.
pub fn write_csv(
    path: &Path,
    records: &[CandidateRecord],
    delimiter: u8,
    include_source_file: bool,
) -> Result<(), ExtractError> {
    let writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    write_records(writer, records, include_source_file)?;
    Ok(())
}

/// In-memory variant of [`write_csv`] for consumers that hand the rendered
/// text onward instead of touching the filesystem.
pub fn write_csv_to_string(
    records: &[CandidateRecord],
    delimiter: u8,
    include_source_file: bool,
) -> Result<String, ExtractError> {
    let writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::<u8>::new());
    let writer = write_records(writer, records, include_source_file)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}
