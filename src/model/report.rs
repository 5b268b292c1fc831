/// One parsed line of a prefix report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    /// `Total Objects: N`
    TotalObjects { value: u64 },
    /// `Total Size: N`, in bytes
    TotalSize { value: u64 },
    /// `date time size file_name` listing line
    Content {
        date: String,
        time: String,
        size: u64,
        file_name: String,
    },
}

impl ReportRow {
    #[inline]
    pub fn is_header(&self) -> bool {
        !matches!(self, ReportRow::Content { .. })
    }
}

/// The two header aggregates of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderTotals {
    pub total_objects: u64,
    pub total_size: u64,
}
