use crate::error::{Result, StatError};
use crate::model::{HeaderTotals, ReportRow};

/// Extract the `Total Objects` / `Total Size` values from parsed rows.
///
/// Header rows are located by kind rather than by position, so a report
/// whose headers are reordered (or interleaved with listing lines) is
/// accepted. Each header must appear exactly once.
pub fn extract_totals(rows: &[ReportRow]) -> Result<HeaderTotals> {
    if rows.len() < 2 {
        return Err(StatError::StructuralMismatch(format!(
            "expected at least 2 rows, found {}",
            rows.len()
        )));
    }

    let mut total_objects = None;
    let mut total_size = None;

    for row in rows.iter().filter(|r| r.is_header()) {
        match row {
            ReportRow::TotalObjects { value } => set_once(&mut total_objects, *value, "Total Objects")?,
            ReportRow::TotalSize { value } => set_once(&mut total_size, *value, "Total Size")?,
            ReportRow::Content { .. } => {}
        }
    }

    match (total_objects, total_size) {
        (Some(total_objects), Some(total_size)) => Ok(HeaderTotals {
            total_objects,
            total_size,
        }),
        (None, _) => Err(StatError::StructuralMismatch(
            "missing 'Total Objects' row".to_string(),
        )),
        (_, None) => Err(StatError::StructuralMismatch(
            "missing 'Total Size' row".to_string(),
        )),
    }
}

fn set_once(slot: &mut Option<u64>, value: u64, name: &str) -> Result<()> {
    if slot.replace(value).is_some() {
        return Err(StatError::StructuralMismatch(format!(
            "duplicate '{}' row",
            name
        )));
    }
    Ok(())
}
