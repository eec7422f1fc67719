use std::collections::HashSet;

use tracing::debug;

use crate::error::PrepResult;
use crate::table::{CleaningSummary, ColumnSelection, MinLength, Table};

/// Pure cleaning transform over an in-memory table.
///
/// Runs four ordered stages, each a full pass: column projection, whitespace
/// normalization, duplicate elimination, minimum-length filtering on the
/// first output column. Inputs are validated up front so a run either
/// applies completely or not at all; no I/O happens here.
pub struct TableCleaner;

impl TableCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(
        &self,
        table: &Table,
        selection: &ColumnSelection,
        min_length: MinLength,
    ) -> PrepResult<(Table, CleaningSummary)> {
        selection.validate(table.column_count())?;

        let mut summary = CleaningSummary {
            input_rows: table.rows.len(),
            ..CleaningSummary::default()
        };

        // Stage 1: projection. Short rows read as empty cells, never a panic.
        let headers = if table.headers.is_empty() {
            Vec::new()
        } else {
            project_row(&table.headers, selection)
        };
        let mut rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| project_row(row, selection))
            .collect();

        // Stage 2: trim ends and collapse internal whitespace runs. A row
        // counts as trimmed once, no matter how many of its cells changed.
        for row in &mut rows {
            let mut changed = false;
            for cell in row.iter_mut() {
                let normalized = normalize_whitespace(cell);
                if normalized != *cell {
                    *cell = normalized;
                    changed = true;
                }
            }
            if changed {
                summary.rows_trimmed += 1;
            }
        }

        // Stage 3: exact full-row duplicates collapse to their first
        // occurrence, preserving order.
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(rows.len());
        let mut deduped = Vec::with_capacity(rows.len());
        for row in rows {
            if seen.insert(row.clone()) {
                deduped.push(row);
            } else {
                summary.duplicates_removed += 1;
            }
        }

        // Stage 4: drop rows whose first output column is too short.
        let threshold = min_length.value();
        let mut kept = Vec::with_capacity(deduped.len());
        for row in deduped {
            let length = row.first().map(|cell| cell.chars().count()).unwrap_or(0);
            if length < threshold {
                summary.length_filtered += 1;
            } else {
                kept.push(row);
            }
        }

        summary.output_rows = kept.len();
        debug!(
            input_rows = summary.input_rows,
            output_rows = summary.output_rows,
            trimmed = summary.rows_trimmed,
            duplicates = summary.duplicates_removed,
            length_filtered = summary.length_filtered,
            "cleaning run finished"
        );

        Ok((Table::new(headers, kept), summary))
    }
}

impl Default for TableCleaner {
    fn default() -> Self {
        Self::new()
    }
}

fn project_row(row: &[String], selection: &ColumnSelection) -> Vec<String> {
    selection
        .indices()
        .iter()
        .map(|&index| row.get(index).cloned().unwrap_or_default())
        .collect()
}

/// Trim leading/trailing whitespace and collapse internal runs to one space
fn normalize_whitespace(cell: &str) -> String {
    let mut normalized = String::with_capacity(cell.len());
    for word in cell.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}
