//! Input collaborator: turns a file path into a [`Table`] of text cells.
//!
//! Excel and OpenDocument workbooks go through calamine with every cell
//! stringified; CSV/TXT files go through the csv crate with delimiter
//! sniffing (`;`, `,`, tab) and a Latin-1 fallback for files that are not
//! valid UTF-8.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{PrepError, PrepResult};
use crate::table::Table;

/// Delimiters tried, in order, when sniffing a CSV/TXT file
const SNIFF_DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Sheet to read from a workbook; the first sheet when unset
    pub sheet: Option<String>,
}

/// Load one sheet's tabular data from a spreadsheet or delimited text file.
/// The first row becomes the header row; every cell is stringified.
pub fn load_table(path: &Path, options: &LoadOptions) -> PrepResult<Table> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => load_workbook(path, options),
        "csv" | "txt" => load_delimited(path),
        _ => Err(PrepError::UnsupportedFormat {
            extension: if extension.is_empty() {
                path.to_string_lossy().to_string()
            } else {
                extension
            },
        }),
    }?;

    info!(
        "Loaded {} data rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

fn load_workbook(path: &Path, options: &LoadOptions) -> PrepResult<Table> {
    let path_display = path.to_string_lossy().to_string();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PrepError::unreadable_file_with_source(path_display.clone(), e))?;

    let sheet_name = match &options.sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|candidate| candidate == name) {
                return Err(PrepError::SheetNotFound { name: name.clone() });
            }
            name.clone()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| PrepError::unreadable_file(path_display.clone()))?,
    };
    debug!("Reading sheet '{}'", sheet_name);

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PrepError::unreadable_file_with_source(path_display, e))?;

    let mut rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    let headers = if rows.is_empty() {
        Vec::new()
    } else {
        rows.remove(0)
    };
    Ok(Table::new(headers, rows))
}

/// Stringify a workbook cell. Error cells read as empty rather than
/// aborting the load.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|datetime| datetime.to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
    }
}

fn load_delimited(path: &Path) -> PrepResult<Table> {
    let path_display = path.to_string_lossy().to_string();
    let bytes = fs::read(path)
        .map_err(|e| PrepError::unreadable_file_with_source(path_display.clone(), e))?;
    let text = decode_text(&bytes);

    // Try each candidate delimiter and accept the first that yields more
    // than one column. A file that only ever parses to a single column is
    // kept as-is under the first delimiter that parses cleanly.
    let mut single_column_fallback: Option<Vec<Vec<String>>> = None;
    for delimiter in SNIFF_DELIMITERS {
        let Some(records) = parse_delimited(&text, delimiter) else {
            continue;
        };
        let width = records.iter().map(|record| record.len()).max().unwrap_or(0);
        if width > 1 {
            debug!("Sniffed delimiter {:?}", delimiter as char);
            return Ok(build_table(records, width));
        }
        if single_column_fallback.is_none() {
            single_column_fallback = Some(records);
        }
    }

    match single_column_fallback {
        Some(records) => Ok(build_table(records, 1)),
        None => Err(PrepError::unreadable_file(path_display)),
    }
}

/// Decode file contents the way the pipeline's users save them: UTF-8
/// first, Latin-1 (windows-1252) when that fails.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            Cow::Owned(decoded.into_owned())
        }
    }
}

fn parse_delimited(text: &str, delimiter: u8) -> Option<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.ok()?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }
    Some(records)
}

fn build_table(mut records: Vec<Vec<String>>, width: usize) -> Table {
    // Ragged rows pad out to the widest one so every row shares the width
    for record in &mut records {
        record.resize(width, String::new());
    }
    let headers = if records.is_empty() {
        Vec::new()
    } else {
        records.remove(0)
    };
    Table::new(headers, records)
}
