// Public module exports for the sheetprep binary and tests
pub mod cleaner;
pub mod config;
pub mod error;
pub mod exporter;
pub mod loader;
pub mod logging;
pub mod table;

pub use cleaner::TableCleaner;
pub use error::{PrepError, PrepResult};
pub use table::{CleaningSummary, ColumnSelection, MinLength, Table};
