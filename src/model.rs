use serde::Serialize;

/// Sentinel for metadata the first-page heuristics could not resolve.
pub const UNKNOWN: &str = "Unknown";

/// One validated candidate row, stamped with its document's exam metadata.
///
/// The serde field names match the downstream column contract, so the same
/// struct serves both the JSON boundary and external consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(rename = "Register Number")]
    pub register_number: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Source File", skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Exam session metadata derived once from a document's first page.
///
/// Global to the document by design: one exam session per nominal roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamMetadata {
    pub date: String,
    pub time: String,
    pub course: String,
}

impl ExamMetadata {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            date: UNKNOWN.to_string(),
            time: UNKNOWN.to_string(),
            course: UNKNOWN.to_string(),
        }
    }
}

/// A table as delivered by the layout service: ordered rows of cell strings.
/// An empty string stands in for a missing cell. Read-only to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    pub rows: Vec<Vec<String>>,
}

/// Which columns of one table hold register numbers and names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnRoles {
    pub register: Option<usize>,
    pub name: Option<usize>,
}

impl ColumnRoles {
    #[must_use]
    pub fn is_resolved(self) -> bool {
        self.register.is_some() && self.name.is_some()
    }
}
