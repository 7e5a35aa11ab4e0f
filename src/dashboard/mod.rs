//! Response dashboard logic
//!
//! Pure computations over the fetched response records: summary statistics,
//! filtering and sorting, pagination, and CSV export. Records are loaded
//! wholesale per invocation and never mutated; every view here is derived.

pub mod export;
pub mod filter;
pub mod pagination;
pub mod stats;

pub use export::{ExportError, default_file_name, to_csv};
pub use filter::{FilterState, apply_filters, sort_by_column};
pub use pagination::{PageView, page_window, paginate};
pub use stats::ResponseStats;

/// Which response columns carry the group key and the submission timestamp.
#[derive(Debug, Clone)]
pub struct Columns {
    pub group: String,
    pub timestamp: String,
}
