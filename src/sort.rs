use chrono::{NaiveDate, NaiveTime};

use crate::model::CandidateRecord;

/// Sorts records by (date, time, course, register number), ascending.
///
/// `"Unknown"` or otherwise unparsable date/time values sort as the minimum
/// for their field, so the ordering is total no matter how much metadata
/// stayed unresolved. Stable, hence idempotent: equal keys keep extraction
/// order.
pub(crate) fn sort_records(records: &mut [CandidateRecord]) {
    records.sort_by_cached_key(|record| {
        (
            parse_date(&record.date),
            parse_time(&record.time),
            record.course.clone(),
            record.register_number.clone(),
        )
    });
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%d.%m.%Y").unwrap_or(NaiveDate::MIN)
}

fn parse_time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%I:%M %p").unwrap_or(NaiveTime::MIN)
}
