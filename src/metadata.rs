use regex::Regex;

use crate::model::{ExamMetadata, UNKNOWN};
use crate::normalize::clean_text;

/// Derives the exam session metadata from a document's first page. Each
/// finder is total: unresolved fields come back as the `"Unknown"` sentinel,
/// never as an error.
pub(crate) fn extract_metadata(first_page_text: &str) -> ExamMetadata {
    ExamMetadata {
        date: find_date(first_page_text),
        time: find_time(first_page_text),
        course: find_course(first_page_text),
    }
}

/// First `DD<sep>MM<sep>YYYY` token wins, separators normalized to `.`.
/// No calendar validation; the input is too noisy to reject syntactic hits.
pub(crate) fn find_date(text: &str) -> String {
    let date_re =
        Regex::new(r"\d{2}[./-]\d{2}[./-]\d{4}").expect("hardcoded date regex is valid");
    date_re.find(text).map_or_else(
        || UNKNOWN.to_string(),
        |token| token.as_str().replace(['/', '-'], "."),
    )
}

/// Finds a clock time followed by AM/PM, tolerating "2.00 PM" style input by
/// folding dots into colons before matching. The hour is zero-padded.
pub(crate) fn find_time(text: &str) -> String {
    let folded = text.to_uppercase().replace('.', ":");
    let time_re =
        Regex::new(r"(\d{1,2}:\d{2})\s*(AM|PM)").expect("hardcoded time regex is valid");
    let Some(captures) = time_re.captures(&folded) else {
        return UNKNOWN.to_string();
    };
    let Some((hour, minute)) = captures[1].split_once(':') else {
        return UNKNOWN.to_string();
    };
    format!("{hour:0>2}:{minute} {period}", period = &captures[2])
}

/// Ordered course-name strategies, most precise first. Evaluated
/// left-to-right; the first non-empty hit wins.
const COURSE_STRATEGIES: &[fn(&str) -> Option<String>] =
    &[course_by_code, course_by_label, course_by_syllabus_tag];

/// Extracts the course name, target shape "CODE - Title [... Syllabus]".
/// The page text is flattened first so titles wrapped across lines still
/// match. Falls back to `"Unknown"` when every strategy misses.
pub(crate) fn find_course(text: &str) -> String {
    let flat = clean_text(text);
    COURSE_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&flat))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// High-precision match: a course code (three letters, a digit, then more
/// code characters) through to a bracketed syllabus tag.
fn course_by_code(flat: &str) -> Option<String> {
    let code_re = Regex::new(r"(?i)([A-Z]{3}\d[A-Z0-9()\-\s]{2,}.*?\[[^\]]*?Syllabus\])")
        .expect("hardcoded course code regex is valid");
    code_re
        .captures(flat)
        .map(|captures| clean_text(&captures[1]))
        .filter(|course| !course.is_empty())
}

/// Label-based fallback: text after a "Course:" or "Paper:" marker, up to the
/// syllabus tag. A leaked "Code:" label is scrubbed from the capture.
fn course_by_label(flat: &str) -> Option<String> {
    let label_re = Regex::new(r"(?i)(?:Course|Paper)\s*[:\-]?\s*(.*?\[[^\]]*?Syllabus\])")
        .expect("hardcoded course label regex is valid");
    let captures = label_re.captures(flat)?;
    let code_label_re = Regex::new(r"(?i)Code\s*:").expect("hardcoded code label regex is valid");
    let course = clean_text(&code_label_re.replace_all(&captures[1], ""));
    (!course.is_empty()).then_some(course)
}

/// Last resort: any short run of text ending in a bracketed syllabus tag.
/// Covers titles without a standard code, e.g. "BHAG I [Hindi 2025 syllabus]".
/// Known boilerplate prefixes that leak into the capture are stripped.
fn course_by_syllabus_tag(flat: &str) -> Option<String> {
    let tag_re = Regex::new(r"(?i)([^:]{10,150}?\[[^\]]*?Syllabus\])")
        .expect("hardcoded syllabus tag regex is valid");
    let captures = tag_re.captures(flat)?;
    let mut course = clean_text(&captures[1]);
    for garbage in [r"(?i).*?College\s*:", r"(?i).*?Roll\s*", r"(?i).*?Examination\s*"] {
        let garbage_re = Regex::new(garbage).expect("hardcoded garbage prefix regex is valid");
        course = garbage_re.replace_all(&course, "").trim().to_string();
    }
    (!course.is_empty()).then_some(course)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{extract_metadata, find_course, find_date, find_time};
    use crate::model::UNKNOWN;

    #[test]
    fn normalizes_date_separators_to_dots() {
        assert_eq!(find_date("Exam Date: 15.03.2025"), "15.03.2025");
        assert_eq!(find_date("held on 15/03/2025 at"), "15.03.2025");
        assert_eq!(find_date("15-03-2025"), "15.03.2025");
    }

    #[test]
    fn first_syntactic_date_wins_without_calendar_validation() {
        assert_eq!(find_date("99.99.2025 then 15.03.2025"), "99.99.2025");
    }

    #[test]
    fn missing_date_resolves_to_unknown() {
        assert_eq!(find_date("Semester V Examination"), UNKNOWN);
    }

    #[test]
    fn zero_pads_hour_and_folds_dot_notation() {
        assert_eq!(find_time("Time: 2.00 PM"), "02:00 PM");
    }

    #[test]
    fn time_match_is_case_insensitive() {
        assert_eq!(find_time("starts 9:30am sharp"), "09:30 AM");
    }

    #[test]
    fn date_tokens_do_not_shadow_the_time() {
        assert_eq!(find_time("15.03.2025 at 09:30 AM"), "09:30 AM");
    }

    #[test]
    fn missing_time_resolves_to_unknown() {
        assert_eq!(find_time("Forenoon session"), UNKNOWN);
    }

    #[test]
    fn strict_code_pattern_beats_label_pattern() {
        let text = "Course: ignored CSA1B01 - Data Structures [CS 2024 syllabus]";
        assert_eq!(find_course(text), "CSA1B01 - Data Structures [CS 2024 syllabus]");
    }

    #[test]
    fn label_pattern_catches_codeless_courses() {
        let text = "Paper: Advanced Poetry [English 2024 Syllabus] Time: 10:00 AM";
        assert_eq!(find_course(text), "Advanced Poetry [English 2024 Syllabus]");
    }

    #[test]
    fn syllabus_tag_fallback_strips_boilerplate() {
        let course = find_course("Nominal Roll BHAG I KAVYA [Hindi 2025 syllabus]");
        assert!(course.ends_with("[Hindi 2025 syllabus]"), "got: {course}");
        assert!(!course.to_lowercase().contains("roll"), "got: {course}");
    }

    #[test]
    fn course_title_wrapped_across_lines_still_matches() {
        let text = "CSA1B01 - Data\nStructures and\nAlgorithms [CS 2024 syllabus]";
        assert_eq!(
            find_course(text),
            "CSA1B01 - Data Structures and Algorithms [CS 2024 syllabus]"
        );
    }

    #[test]
    fn missing_course_resolves_to_unknown() {
        assert_eq!(find_course("Register No Name Signature"), UNKNOWN);
    }

    #[test]
    fn metadata_is_extracted_as_one_value() {
        let meta = extract_metadata(
            "Examination 15.03.2025 09:30 AM CSA1B01 - Data Structures [CS 2024 syllabus]",
        );
        assert_eq!(meta.date, "15.03.2025");
        assert_eq!(meta.time, "09:30 AM");
        assert_eq!(meta.course, "CSA1B01 - Data Structures [CS 2024 syllabus]");
    }
}
