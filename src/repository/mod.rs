mod command;
mod source;
mod store;

pub use command::{parse_prefix_list, CommandSource};
pub use source::ReportSource;
pub use store::{load_aggregates_from, ArtifactStore, AGGREGATES_FILE, PREFIX_LIST_FILE, TOTALS_FILE};
