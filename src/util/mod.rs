mod format;
mod path;

pub use format::{format_compact_date, format_megabytes};
pub use path::prefix_label;
