//! `date,<column>` CSV rendering of per-prefix aggregates

use anyhow::{Context, Result, bail};

use crate::model::AggregateResult;
use crate::util::format_compact_date;

/// Which aggregate goes in the second CSV column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CsvColumn {
    Count,
    #[default]
    Size,
}

impl CsvColumn {
    pub fn header(self) -> &'static str {
        match self {
            CsvColumn::Count => "count",
            CsvColumn::Size => "size",
        }
    }
}

/// Render one row per label, with `YYYYMMDD` labels written as `YYYY-MM-DD`
pub fn render_csv(result: &AggregateResult, column: CsvColumn) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", column.header()])?;

    for (label, summary) in result.iter() {
        let Some(date) = format_compact_date(label) else {
            bail!("Label {:?} is not a YYYYMMDD date", label);
        };
        let value = match column {
            CsvColumn::Count => summary.count,
            CsvColumn::Size => summary.size,
        };
        writer.write_record([date, value.to_string()])?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV")?;
    let mut text = String::from_utf8(bytes).context("CSV output is not UTF-8")?;
    // No newline after the last row
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
