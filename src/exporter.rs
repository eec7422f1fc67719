//! Output collaborator: serializes a cleaned [`Table`] to delimited text,
//! one row per line.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::error::{PrepError, PrepResult};
use crate::table::Table;

/// Default output delimiter, matching the semicolon-separated TXT files
/// this pipeline historically produced
pub const DEFAULT_DELIMITER: u8 = b';';

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Write header (if any) and rows to `path`. The file starts with a UTF-8
/// BOM so Excel picks the right encoding when reopening the export.
pub fn export_table(table: &Table, path: &Path, options: &ExportOptions) -> PrepResult<()> {
    let path_display = path.to_string_lossy().to_string();

    let mut file =
        File::create(path).map_err(|e| PrepError::write_error(path_display.clone(), e))?;
    file.write_all(b"\xEF\xBB\xBF")
        .map_err(|e| PrepError::write_error(path_display.clone(), e))?;

    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(file);

    if !table.headers.is_empty() {
        writer
            .write_record(&table.headers)
            .map_err(|e| PrepError::write_error(path_display.clone(), e))?;
    }
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| PrepError::write_error(path_display.clone(), e))?;
    }
    writer
        .flush()
        .map_err(|e| PrepError::write_error(path_display.clone(), e))?;

    info!("Wrote {} rows to {}", table.row_count(), path_display);
    Ok(())
}
