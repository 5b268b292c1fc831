use crate::error::{Result, StatError};
use crate::model::ReportRow;

const TOTAL_OBJECTS_MARKER: &str = "Total Objects";
const TOTAL_SIZE_MARKER: &str = "Total Size";

/// Parse a report delivered in several chunks.
///
/// Chunks are concatenated before line splitting, so a line may span chunks.
pub fn parse_report_chunks<I, S>(chunks: I) -> Result<Vec<ReportRow>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text: String = chunks.into_iter().map(|c| c.as_ref().to_owned()).collect();
    parse_report(&text)
}

/// Parse the full text of one report into rows, preserving line order
pub fn parse_report(text: &str) -> Result<Vec<ReportRow>> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<ReportRow> {
    if line.starts_with(TOTAL_OBJECTS_MARKER) {
        let value = parse_header_value(line_no, line)?;
        return Ok(ReportRow::TotalObjects { value });
    }
    if line.starts_with(TOTAL_SIZE_MARKER) {
        let value = parse_header_value(line_no, line)?;
        return Ok(ReportRow::TotalSize { value });
    }
    parse_content_row(line_no, line)
}

fn parse_header_value(line_no: usize, line: &str) -> Result<u64> {
    let malformed = |reason: &str| StatError::MalformedHeader {
        line: line_no,
        text: line.to_string(),
        reason: reason.to_string(),
    };

    let (_, value) = line
        .split_once(':')
        .ok_or_else(|| malformed("missing ':' separator"))?;
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| malformed(&format!("invalid value: {}", e)))
}

fn parse_content_row(line_no: usize, line: &str) -> Result<ReportRow> {
    let malformed = |reason: String| StatError::MalformedRow {
        line: line_no,
        text: line.to_string(),
        reason,
    };

    let mut rest = line;
    let mut fields = [""; 3];
    for (i, field) in fields.iter_mut().enumerate() {
        let (token, tail) = next_token(rest)
            .ok_or_else(|| malformed(format!("expected 4 fields, found {}", i)))?;
        *field = token;
        rest = tail;
    }

    let file_name = rest.trim();
    if file_name.is_empty() {
        return Err(malformed("expected 4 fields, found 3".to_string()));
    }

    let [date, time, size] = fields;
    let size = size
        .parse::<u64>()
        .map_err(|e| malformed(format!("invalid size {:?}: {}", size, e)))?;

    Ok(ReportRow::Content {
        date: date.to_string(),
        time: time.to_string(),
        size,
        file_name: file_name.to_string(),
    })
}

/// Split off the next whitespace-delimited token, skipping leading whitespace
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}
