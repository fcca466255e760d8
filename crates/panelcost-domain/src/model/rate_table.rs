//! Keyed rate tables (painting and labour)
//!
//! A rate table is built once from a [`RawTable`]: key columns are located by
//! canonical name, every other column becomes a part whose cells are parsed
//! into an explicit part -> rate mapping per row.

use std::collections::{HashMap, HashSet};

use panelcost_types::{EstimateError, TableKind};
use serde::Serialize;
use tracing::{debug, warn};

use super::canonical::{canonicalize, canonicalize_year, parse_number};
use super::raw_table::RawTable;

pub const MAKER: &str = "MAKER";
pub const MODEL: &str = "MODEL";
pub const YEAR: &str = "YEAR";
pub const CITY: &str = "CITY";
pub const PAINT_FINISH: &str = "PAINT_FINISH";
/// Header used for the paint finish column in the source workbook
pub const PAINT_FINISH_ALIAS: &str = "W_METALLIC/SOLID";

/// Columns that never name a part, in either table
const NON_PART_COLUMNS: [&str; 6] = [MAKER, MODEL, YEAR, CITY, PAINT_FINISH, PAINT_FINISH_ALIAS];

/// Lookup key of a rate row. `paint_finish` is only set for painting rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RowKey {
    pub maker: String,
    pub model: String,
    pub year: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paint_finish: Option<String>,
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}/{}", self.maker, self.model, self.year, self.city)?;
        if let Some(ref finish) = self.paint_finish {
            write!(f, "/{}", finish)?;
        }
        Ok(())
    }
}

/// One row of a rate table
#[derive(Debug, Clone, Serialize)]
pub struct RateRecord {
    pub key: RowKey,
    rates: HashMap<String, f64>,
}

impl RateRecord {
    /// Rate for a canonical part name; absent, blank and unparseable cells are 0
    pub fn rate(&self, part: &str) -> f64 {
        self.rates.get(part).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct RateTable {
    kind: TableKind,
    records: Vec<RateRecord>,
    index: HashMap<RowKey, usize>,
    part_columns: Vec<String>,
    duplicate_keys: Vec<RowKey>,
}

/// Positions of the key columns within a raw table
struct KeyColumns {
    maker: usize,
    model: usize,
    year: usize,
    city: usize,
    paint_finish: Option<usize>,
}

impl KeyColumns {
    fn locate(kind: TableKind, raw: &RawTable) -> Result<Self, EstimateError> {
        let require = |column: &str| {
            raw.column_index(column).ok_or_else(|| EstimateError::Schema {
                table: kind,
                column: column.to_string(),
            })
        };

        let maker = require(MAKER)?;
        let model = require(MODEL)?;
        let year = require(YEAR)?;
        let city = require(CITY)?;
        let paint_finish = if kind == TableKind::Painting {
            let idx = raw
                .column_index(PAINT_FINISH)
                .or_else(|| raw.column_index(PAINT_FINISH_ALIAS))
                .ok_or_else(|| EstimateError::Schema {
                    table: kind,
                    column: PAINT_FINISH.to_string(),
                })?;
            Some(idx)
        } else {
            None
        };

        Ok(Self {
            maker,
            model,
            year,
            city,
            paint_finish,
        })
    }
}

impl RateTable {
    /// Build the painting table; requires MAKER, MODEL, YEAR, CITY and PAINT_FINISH
    pub fn painting(raw: &RawTable) -> Result<Self, EstimateError> {
        Self::build(TableKind::Painting, raw)
    }

    /// Build the labour table; requires MAKER, MODEL, YEAR and CITY
    pub fn labour(raw: &RawTable) -> Result<Self, EstimateError> {
        Self::build(TableKind::Labour, raw)
    }

    fn build(kind: TableKind, raw: &RawTable) -> Result<Self, EstimateError> {
        let columns = KeyColumns::locate(kind, raw)?;

        let mut seen = HashSet::new();
        let mut part_indices = Vec::new();
        for (col, header) in raw.canonical_headers().into_iter().enumerate() {
            if header.is_empty() || NON_PART_COLUMNS.contains(&header.as_str()) {
                continue;
            }
            // Repeated part headers: the leftmost column wins
            if seen.insert(header.clone()) {
                part_indices.push((col, header));
            }
        }

        let mut records = Vec::with_capacity(raw.len());
        let mut index = HashMap::new();
        let mut duplicate_keys = Vec::new();

        for row in 0..raw.len() {
            let row_is_blank = (0..raw.headers.len().max(raw.rows[row].len()))
                .all(|col| canonicalize(raw.cell(row, col)).is_empty());
            if row_is_blank {
                continue;
            }

            let key = RowKey {
                maker: canonicalize(raw.cell(row, columns.maker)),
                model: canonicalize(raw.cell(row, columns.model)),
                year: canonicalize_year(raw.cell(row, columns.year)),
                city: canonicalize(raw.cell(row, columns.city)),
                paint_finish: columns
                    .paint_finish
                    .map(|col| canonicalize(raw.cell(row, col))),
            };

            let mut rates = HashMap::new();
            for (col, part) in &part_indices {
                let cell = raw.cell(row, *col);
                match parse_number(cell) {
                    Some(value) => {
                        rates.insert(part.clone(), value);
                    }
                    None if !cell.trim().is_empty() => {
                        debug!(table = %kind, key = %key, part = %part, value = cell, "non-numeric rate treated as 0");
                    }
                    None => {}
                }
            }

            if index.contains_key(&key) {
                warn!(table = %kind, key = %key, "duplicate rate row ignored; first row wins");
                duplicate_keys.push(key.clone());
            } else {
                index.insert(key.clone(), records.len());
            }
            records.push(RateRecord { key, rates });
        }

        Ok(Self {
            kind,
            records,
            index,
            part_columns: part_indices.into_iter().map(|(_, part)| part).collect(),
            duplicate_keys,
        })
    }

    /// First row in source order whose key equals `key`
    pub fn find(&self, key: &RowKey) -> Option<&RateRecord> {
        self.index.get(key).map(|&idx| &self.records[idx])
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// All retained rows in source order, duplicates included
    pub fn records(&self) -> &[RateRecord] {
        &self.records
    }

    /// Canonical part names, one per part column, in column order
    pub fn part_columns(&self) -> &[String] {
        &self.part_columns
    }

    /// Keys that appeared more than once; only their first row is reachable
    pub fn duplicate_keys(&self) -> &[RowKey] {
        &self.duplicate_keys
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
