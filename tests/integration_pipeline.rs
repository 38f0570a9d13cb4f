mod common;

use nominal_roll_to_csv::{
    ExtractOptions, WarningCode, extract_batch, extract_pdfs_to_csv, records_to_json_string,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn roll_page<'a>(session: &'a [&'a str], candidates: &'a [&'a str]) -> Vec<&'a str> {
    let mut lines = session.to_vec();
    lines.push("Register No  Name of Candidate");
    lines.extend_from_slice(candidates);
    lines
}

#[test]
fn extracts_a_single_roll_into_sorted_csv() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("roll.pdf");
    let output = dir.path().join("roll.csv");

    common::create_roll_pdf(
        &input,
        &[roll_page(
            &[
                "University of Calicut",
                "First Semester BCA Examination 15.03.2025 09:30 AM",
                "CSA1B01 - Data Structures [CS 2024 syllabus]",
            ],
            &["VPA21BCA002  Anu S", "VPA21BCA001  John K"],
        )],
    )
    .expect("PDF fixture should be created");

    let report = extract_pdfs_to_csv(&[input], &output, &ExtractOptions::default())
        .expect("extraction should succeed");

    assert_eq!(report.document_count, 1);
    assert_eq!(report.record_count, 2);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);

    let csv = std::fs::read_to_string(&output).expect("CSV should be readable");
    let lines = csv.lines().collect::<Vec<_>>();
    assert_eq!(
        lines[0],
        "Date,Time,Course,Register Number,Name,Source File"
    );
    assert_eq!(
        lines[1],
        "15.03.2025,09:30 AM,CSA1B01 - Data Structures [CS 2024 syllabus],VPA21BCA001,John K,roll.pdf"
    );
    assert_eq!(
        lines[2],
        "15.03.2025,09:30 AM,CSA1B01 - Data Structures [CS 2024 syllabus],VPA21BCA002,Anu S,roll.pdf"
    );
}

#[test]
fn merges_and_sorts_records_across_documents() {
    let dir = tempdir().expect("tempdir should be created");
    let later = dir.path().join("later.pdf");
    let earlier = dir.path().join("earlier.pdf");

    common::create_roll_pdf(
        &later,
        &[roll_page(
            &["Examination 16.03.2025 09:30 AM"],
            &["VPB21BCA001  Rahul M"],
        )],
    )
    .expect("PDF fixture should be created");
    common::create_roll_pdf(
        &earlier,
        &[roll_page(
            &["Examination 15.03.2025 02:00 PM"],
            &["VPA21BCA001  Anju T"],
        )],
    )
    .expect("PDF fixture should be created");

    let batch = extract_batch(&[later, earlier], &ExtractOptions::default())
        .expect("extraction should succeed");

    assert_eq!(batch.report.document_count, 2);
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[0].date, "15.03.2025");
    assert_eq!(batch.records[0].source_file.as_deref(), Some("earlier.pdf"));
    assert_eq!(batch.records[1].date, "16.03.2025");
}

#[test]
fn multi_page_documents_contribute_every_page() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("twopages.pdf");

    common::create_roll_pdf(
        &input,
        &[
            roll_page(
                &["Examination 15.03.2025 09:30 AM"],
                &["VPA21BCA001  John K", "VPA21BCA002  Anu S"],
            ),
            roll_page(&[], &["VPA21BCA003  Mini P"]),
        ],
    )
    .expect("PDF fixture should be created");

    let batch = extract_batch(&[input], &ExtractOptions::default())
        .expect("extraction should succeed");

    assert_eq!(batch.records.len(), 3);
    // Page metadata is global to the document.
    assert!(batch.records.iter().all(|r| r.date == "15.03.2025"));
}

#[test]
fn unreadable_document_is_skipped_without_failing_the_batch() {
    let dir = tempdir().expect("tempdir should be created");
    let good = dir.path().join("good.pdf");
    let broken = dir.path().join("broken.pdf");

    common::create_roll_pdf(
        &good,
        &[roll_page(
            &["Examination 15.03.2025 09:30 AM"],
            &["VPA21BCA001  John K"],
        )],
    )
    .expect("PDF fixture should be created");
    std::fs::write(&broken, b"this is not a pdf").expect("junk file should be written");

    let batch = extract_batch(&[broken, good], &ExtractOptions::default())
        .expect("batch must survive a broken document");

    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].register_number, "VPA21BCA001");
    assert_eq!(batch.report.document_count, 1);
    assert!(
        batch
            .report
            .warnings
            .iter()
            .any(|warning| warning.code == WarningCode::SourceReadFailed
                && warning.source.as_deref() == Some("broken.pdf"))
    );
}

#[test]
fn unresolved_metadata_sorts_ahead_of_resolved_metadata() {
    let dir = tempdir().expect("tempdir should be created");
    let dated = dir.path().join("dated.pdf");
    let undated = dir.path().join("undated.pdf");

    common::create_roll_pdf(
        &dated,
        &[roll_page(
            &["Examination 15.03.2025 09:30 AM"],
            &["VPA21BCA001  John K"],
        )],
    )
    .expect("PDF fixture should be created");
    common::create_roll_pdf(
        &undated,
        &[roll_page(&["Supplementary Examination"], &["VPA21BCA002  Anu S"])],
    )
    .expect("PDF fixture should be created");

    let batch = extract_batch(&[dated, undated], &ExtractOptions::default())
        .expect("extraction should succeed");

    assert_eq!(batch.records[0].date, "Unknown");
    assert_eq!(batch.records[0].register_number, "VPA21BCA002");
    assert_eq!(batch.records[1].date, "15.03.2025");
}

#[test]
fn json_boundary_uses_the_same_field_names() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("roll.pdf");

    common::create_roll_pdf(
        &input,
        &[roll_page(
            &["Examination 15.03.2025 09:30 AM"],
            &["VPA21BCA001  John K"],
        )],
    )
    .expect("PDF fixture should be created");

    let batch = extract_batch(&[input], &ExtractOptions::default())
        .expect("extraction should succeed");
    let json = records_to_json_string(&batch.records).expect("json should render");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json should parse");

    assert_eq!(value[0]["Date"], "15.03.2025");
    assert_eq!(value[0]["Time"], "09:30 AM");
    assert_eq!(value[0]["Register Number"], "VPA21BCA001");
    assert_eq!(value[0]["Name"], "John K");
    assert_eq!(value[0]["Source File"], "roll.pdf");
}

#[test]
fn in_memory_bytes_entry_matches_the_batch_path() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("roll.pdf");

    common::create_roll_pdf(
        &input,
        &[roll_page(
            &["Examination 15.03.2025 09:30 AM"],
            &["VPA21BCA001  John K"],
        )],
    )
    .expect("PDF fixture should be created");
    let bytes = std::fs::read(&input).expect("fixture bytes should be readable");

    let batch = nominal_roll_to_csv::extract_bytes(&bytes, "roll.pdf", &ExtractOptions::default())
        .expect("extraction should succeed");

    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].register_number, "VPA21BCA001");
    assert_eq!(batch.records[0].source_file.as_deref(), Some("roll.pdf"));
}

#[test]
fn source_file_column_can_be_dropped() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("roll.pdf");
    let output = dir.path().join("roll.csv");

    common::create_roll_pdf(
        &input,
        &[roll_page(
            &["Examination 15.03.2025 09:30 AM"],
            &["VPA21BCA001  John K"],
        )],
    )
    .expect("PDF fixture should be created");

    let options = ExtractOptions {
        include_source_file: false,
        ..ExtractOptions::default()
    };
    extract_pdfs_to_csv(&[input], &output, &options).expect("extraction should succeed");

    let csv = std::fs::read_to_string(&output).expect("CSV should be readable");
    assert_eq!(
        csv.lines().next(),
        Some("Date,Time,Course,Register Number,Name")
    );
    assert!(!csv.contains("roll.pdf"));
}
