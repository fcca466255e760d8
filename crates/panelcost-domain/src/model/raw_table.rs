//! Raw tabular input as handed over by an ingestion collaborator

use super::canonical::canonicalize;

/// Header row plus data rows, cells still uncanonicalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build from string slices, mostly for tests and fixtures
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    /// Canonicalized header names, in column order
    pub fn canonical_headers(&self) -> Vec<String> {
        self.headers.iter().map(|h| canonicalize(h)).collect()
    }

    /// Index of the first column whose canonical name matches
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = canonicalize(name);
        self.headers.iter().position(|h| canonicalize(h) == wanted)
    }

    /// Cell at `row`/`col`; short rows read as blank
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_is_case_and_space_insensitive() {
        let table = RawTable::from_rows(&[" maker", "Model ", "YEAR"], &[]);
        assert_eq!(table.column_index("MAKER"), Some(0));
        assert_eq!(table.column_index("model"), Some(1));
        assert_eq!(table.column_index("CITY"), None);
    }

    #[test]
    fn test_short_rows_read_blank() {
        let table = RawTable::from_rows(&["A", "B"], &[&["x"]]);
        assert_eq!(table.cell(0, 0), "x");
        assert_eq!(table.cell(0, 1), "");
        assert_eq!(table.cell(5, 0), "");
    }
}
