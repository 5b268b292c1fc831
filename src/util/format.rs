use time::Date;
use time::macros::format_description;

const MB: u128 = 1024 * 1024;

/// Format a byte count as megabytes with up to two decimals ("1.5 MB", "0 MB")
///
/// Rounds half up on the second decimal. Trailing fractional zeros are
/// dropped, so exact multiples render without a decimal point.
pub fn format_megabytes(bytes: u128) -> String {
    let hundredths = (bytes * 100 + MB / 2) / MB;
    let (whole, frac) = (hundredths / 100, hundredths % 100);
    if frac == 0 {
        return format!("{} MB", whole);
    }
    let frac = format!("{:02}", frac);
    format!("{}.{} MB", whole, frac.trim_end_matches('0'))
}

/// Reformat a `YYYYMMDD` label as `YYYY-MM-DD`, or `None` if it is not a valid date
pub fn format_compact_date(label: &str) -> Option<String> {
    let compact = format_description!("[year][month][day]");
    let iso = format_description!("[year]-[month]-[day]");

    if label.len() != 8 || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Date::parse(label, &compact)
        .ok()
        .and_then(|date| date.format(&iso).ok())
}
