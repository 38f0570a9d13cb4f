#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Output delimiter for CSV rendering.
    pub delimiter: u8,
    /// Minimum cleaned register-number length; shorter values drop the row.
    pub min_register_len: usize,
    /// Stamp each record with the name of the file it came from.
    pub include_source_file: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            min_register_len: 4,
            include_source_file: true,
        }
    }
}
