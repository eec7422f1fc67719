use crate::error::{PrepError, PrepResult};

/// In-memory snapshot of one sheet: an optional header row plus data rows
/// of text cells. The loader stringifies every cell, so the rest of the
/// pipeline only ever deals with text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the table: the header width, or the widest data row when
    /// there is no header row.
    pub fn column_count(&self) -> usize {
        let widest_row = self.rows.iter().map(|row| row.len()).max().unwrap_or(0);
        self.headers.len().max(widest_row)
    }

    /// Resolve a header name to its column index (exact, case-sensitive)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Ordered list of column indices to keep, defining the output column order.
/// Validated against a concrete table width before any cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    indices: Vec<usize>,
}

impl ColumnSelection {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Selection that keeps every column in source order
    pub fn identity(column_count: usize) -> Self {
        Self {
            indices: (0..column_count).collect(),
        }
    }

    /// Resolve user-supplied column entries against a table's headers.
    /// Each entry is either an exact header name or a zero-based index;
    /// header names win over bare indices so a numeric header stays
    /// addressable by name.
    pub fn resolve(entries: &[String], table: &Table) -> PrepResult<Self> {
        let mut indices = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = entry.trim();
            if let Some(index) = table.column_index(entry) {
                indices.push(index);
            } else if let Ok(index) = entry.parse::<usize>() {
                indices.push(index);
            } else {
                return Err(PrepError::invalid_selection(format!(
                    "unknown column '{}'",
                    entry
                )));
            }
        }
        Ok(Self::new(indices))
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Check the selection invariants against a table width: at least one
    /// index, all indices in bounds, no index twice.
    pub fn validate(&self, column_count: usize) -> PrepResult<()> {
        if self.indices.is_empty() {
            return Err(PrepError::invalid_selection("no columns selected"));
        }
        let mut seen = vec![false; column_count];
        for &index in &self.indices {
            if index >= column_count {
                return Err(PrepError::invalid_selection(format!(
                    "column index {} out of range (table has {} columns)",
                    index, column_count
                )));
            }
            if seen[index] {
                return Err(PrepError::invalid_selection(format!(
                    "column index {} selected twice",
                    index
                )));
            }
            seen[index] = true;
        }
        Ok(())
    }
}

/// Minimum character count required of the first output column.
/// Built from a raw integer so a negative value from the caller surfaces
/// as `InvalidThreshold` instead of silently wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinLength(usize);

impl MinLength {
    pub fn new(value: i64) -> PrepResult<Self> {
        if value < 0 {
            return Err(PrepError::InvalidThreshold { value });
        }
        Ok(Self(value as usize))
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

/// Counts produced by one cleaning run, for user feedback only
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleaningSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    pub rows_trimmed: usize,
    pub duplicates_removed: usize,
    pub length_filtered: usize,
}

impl CleaningSummary {
    pub fn summary(&self) -> String {
        format!(
            "Cleaned {} rows into {}: {} trimmed, {} duplicates removed, {} dropped below minimum length.",
            self.input_rows,
            self.output_rows,
            self.rows_trimmed,
            self.duplicates_removed,
            self.length_filtered
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            vec!["name".to_string(), "email".to_string()],
            vec![
                vec!["John".to_string(), "john@email.com".to_string()],
                vec!["Mary".to_string(), "mary@email.com".to_string()],
            ],
        )
    }

    #[test]
    fn column_index_resolves_exact_names() {
        let table = sample_table();
        assert_eq!(table.column_index("email"), Some(1));
        assert_eq!(table.column_index("Email"), None);
    }

    #[test]
    fn column_count_uses_widest_row_without_headers() {
        let table = Table::new(
            vec![],
            vec![
                vec!["a".to_string()],
                vec!["b".to_string(), "c".to_string(), "d".to_string()],
            ],
        );
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn selection_rejects_out_of_range_index() {
        let selection = ColumnSelection::new(vec![0, 2]);
        assert!(matches!(
            selection.validate(2),
            Err(PrepError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn selection_rejects_duplicate_index() {
        let selection = ColumnSelection::new(vec![1, 0, 1]);
        assert!(matches!(
            selection.validate(2),
            Err(PrepError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn selection_rejects_empty() {
        let selection = ColumnSelection::new(vec![]);
        assert!(selection.validate(2).is_err());
    }

    #[test]
    fn identity_selection_is_valid() {
        let selection = ColumnSelection::identity(3);
        assert_eq!(selection.indices(), &[0, 1, 2]);
        assert!(selection.validate(3).is_ok());
    }

    #[test]
    fn resolve_accepts_header_names_in_output_order() {
        let table = sample_table();
        let selection =
            ColumnSelection::resolve(&["email".to_string(), "name".to_string()], &table).unwrap();
        assert_eq!(selection.indices(), &[1, 0]);
    }

    #[test]
    fn resolve_falls_back_to_bare_indices() {
        let table = sample_table();
        let selection =
            ColumnSelection::resolve(&["1".to_string(), "0".to_string()], &table).unwrap();
        assert_eq!(selection.indices(), &[1, 0]);
    }

    #[test]
    fn resolve_prefers_numeric_header_name_over_index() {
        // The header named "1" sits at index 0; the name match must win
        // over parsing "1" as an index
        let table = Table::new(
            vec!["1".to_string(), "0".to_string()],
            vec![vec!["a".to_string(), "b".to_string()]],
        );
        let selection = ColumnSelection::resolve(&["1".to_string()], &table).unwrap();
        assert_eq!(selection.indices(), &[0]);
    }

    #[test]
    fn resolve_rejects_unknown_column_name() {
        let table = sample_table();
        let result = ColumnSelection::resolve(&["address".to_string()], &table);
        assert!(matches!(result, Err(PrepError::InvalidSelection { .. })));
    }

    #[test]
    fn resolve_trims_entry_whitespace() {
        let table = sample_table();
        let selection = ColumnSelection::resolve(&[" email ".to_string()], &table).unwrap();
        assert_eq!(selection.indices(), &[1]);
    }

    #[test]
    fn min_length_rejects_negative() {
        assert!(matches!(
            MinLength::new(-1),
            Err(PrepError::InvalidThreshold { value: -1 })
        ));
        assert_eq!(MinLength::new(0).unwrap().value(), 0);
        assert_eq!(MinLength::new(6).unwrap().value(), 6);
    }
}
