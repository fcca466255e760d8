//! CSV readers for rate tables, part lists and damaged-part entries
//!
//! Files exported from spreadsheets are usually UTF-8 (often with a BOM) but
//! older exports come out as Windows-1252; both are accepted.

use std::fs;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use panelcost_domain::model::{canonicalize, LineItemInput, RawTable};
use panelcost_types::{Error, EstimateError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Data file not found: {0}")]
    MissingFile(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Schema(#[from] EstimateError),
}

impl From<LoaderError> for Error {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::Schema(e) => Error::Estimate(e),
            LoaderError::MissingFile(path) => Error::FileNotFound(path),
            LoaderError::IoError(e) => Error::Io(e),
            other => Error::Loader(other.to_string()),
        }
    }
}

/// Column header of the part name in a damaged-parts file
const PART_COLUMN: &str = "PART";
/// Accepted headers for the discount column, canonical form
const DISCOUNT_COLUMNS: [&str; 3] = ["PAINT DISCOUNT (%)", "PAINT DISCOUNT", "DISCOUNT"];

/// Decode file bytes, falling back to Windows-1252 when they are not UTF-8
pub fn decode_bytes(bytes: &[u8]) -> String {
    let (decoded, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return decoded.into_owned();
    }
    warn!("file is not valid UTF-8, decoding as Windows-1252");
    let (decoded, _, _) = WINDOWS_1252.decode(bytes);
    decoded.into_owned()
}

fn read_text(path: &Path) -> Result<String, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::MissingFile(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

/// Parse CSV text with a header row into a [`RawTable`]
pub fn parse_raw_table(text: &str) -> Result<RawTable, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Read a rate table file (header row plus one row per vehicle key)
pub fn read_raw_table<P: AsRef<Path>>(path: P) -> Result<RawTable, LoaderError> {
    let path = path.as_ref();
    let table = parse_raw_table(&read_text(path)?)?;
    debug!(path = %path.display(), rows = table.len(), columns = table.headers.len(), "read rate table");
    Ok(table)
}

/// Parse a header-less single-column part list; blank cells are skipped
pub fn parse_part_list(text: &str) -> Result<Vec<String>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut parts = Vec::new();
    for result in reader.records() {
        let record = result?;
        if let Some(part) = record.get(0).filter(|p| !p.is_empty()) {
            parts.push(part.to_string());
        }
    }
    Ok(parts)
}

pub fn read_part_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoaderError> {
    parse_part_list(&read_text(path.as_ref())?)
}

/// Parse damaged-part entries.
///
/// Expected header: `Part,Paint Discount (%)`. The discount column is
/// optional; non-numeric discounts become 0.
pub fn parse_line_items(text: &str) -> Result<Vec<LineItemInput>, LoaderError> {
    let table = parse_raw_table(text)?;
    let part_col = table
        .column_index(PART_COLUMN)
        .ok_or_else(|| LoaderError::MissingColumn("Part".to_string()))?;
    let discount_col = DISCOUNT_COLUMNS
        .iter()
        .find_map(|name| table.column_index(name));

    let items = (0..table.len())
        .filter(|&row| !canonicalize(table.cell(row, part_col)).is_empty())
        .map(|row| {
            let discount = discount_col.map(|col| table.cell(row, col)).unwrap_or("");
            LineItemInput::parse(table.cell(row, part_col), discount)
        })
        .collect();
    Ok(items)
}

pub fn read_line_items<P: AsRef<Path>>(path: P) -> Result<Vec<LineItemInput>, LoaderError> {
    parse_line_items(&read_text(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_bom() {
        let bytes = b"\xEF\xBB\xBFMAKER,MODEL";
        assert_eq!(decode_bytes(bytes), "MAKER,MODEL");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is 'é' in Windows-1252 and invalid as a lone UTF-8 byte
        let bytes = b"CITR\xC9N,caf\xE9";
        assert_eq!(decode_bytes(bytes), "CITRÉN,café");
    }

    #[test]
    fn test_parse_raw_table_trims_and_keeps_short_rows() {
        let text = "MAKER , MODEL,YEAR\n honda ,civic,2020\nHONDA,CITY\n";
        let table = parse_raw_table(text).unwrap();
        assert_eq!(table.headers, vec!["MAKER", "MODEL", "YEAR"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), "honda");
        assert_eq!(table.cell(1, 2), "");
    }

    #[test]
    fn test_parse_part_list_skips_blanks() {
        let text = "Bumper\n\n , \nDoor,extra\n";
        let parts = parse_part_list(text).unwrap();
        assert_eq!(parts, vec!["Bumper", "Door"]);
    }

    #[test]
    fn test_parse_line_items() {
        let text = "Part,Paint Discount (%)\n bumper ,50\n,30\nDoor,abc\nRoof,\n";
        let items = parse_line_items(text).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], LineItemInput::new("BUMPER", 50.0));
        assert_eq!(items[1].part, "DOOR");
        assert_eq!(items[1].discount_pct, 0.0);
        assert_eq!(items[2].discount_pct, 0.0);
    }

    #[test]
    fn test_parse_line_items_without_discount_column() {
        let items = parse_line_items("part\nfender\n").unwrap();
        assert_eq!(items, vec![LineItemInput::new("FENDER", 0.0)]);
    }

    #[test]
    fn test_parse_line_items_requires_part_column() {
        let err = parse_line_items("Name,Discount\nBumper,10\n").unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(_)));
    }

    #[test]
    fn test_missing_file_reported() {
        let err = read_raw_table("/nonexistent/panelcost/paint.csv").unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(_)));
    }
}
