/// Flattens a raw text value: newlines become spaces, whitespace runs
/// collapse to a single space, leading/trailing whitespace is dropped.
/// Total over all inputs; empty input yields an empty string.
pub(crate) fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
