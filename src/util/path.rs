/// Derives the output label of a prefix: its last non-empty `/` segment.
///
/// `"raw/2023/01/15/"` becomes `"15"`, `"20230115/"` becomes `"20230115"`.
/// Returns `None` for prefixes made only of separators (or empty ones).
pub fn prefix_label(prefix: &str) -> Option<&str> {
    prefix.split('/').filter(|segment| !segment.is_empty()).next_back()
}
