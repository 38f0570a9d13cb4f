/// Classifies the non-fatal faults surfaced by a batch extraction.
///
/// Every code maps to a "zero contribution" outcome: the affected document,
/// page, or table produced no records, but the batch kept going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    /// A document could not be read or decoded; it was skipped entirely.
    SourceReadFailed,
    /// The layout service failed on one page; that page was skipped.
    PageLayoutFailed,
    /// Neither table strategy found any table in the document.
    NoTablesDetected,
    /// A table's register/name columns could not be identified.
    ColumnsUnresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    pub source: Option<String>,
    pub page: Option<usize>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
            page: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }
}
