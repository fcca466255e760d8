//! Immutable snapshot of all rate data an estimate needs

use std::collections::BTreeSet;

use panelcost_types::EstimateError;

use super::canonical::canonicalize;
use super::classification::PartClassification;
use super::rate_table::{RateTable, RowKey};
use super::raw_table::RawTable;

/// Painting and labour rate tables plus both part classifications.
///
/// Built once, never mutated; a reload builds a new snapshot.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub painting: RateTable,
    pub labour: RateTable,
    pub tinkering: PartClassification,
    pub rnr: PartClassification,
}

impl RateSnapshot {
    pub fn new(
        painting: RateTable,
        labour: RateTable,
        tinkering: PartClassification,
        rnr: PartClassification,
    ) -> Self {
        Self {
            painting,
            labour,
            tinkering,
            rnr,
        }
    }

    /// Validate and build every table from raw rows
    pub fn from_raw<S: AsRef<str>>(
        painting: &RawTable,
        labour: &RawTable,
        tinkering_parts: &[S],
        rnr_parts: &[S],
    ) -> Result<Self, EstimateError> {
        Ok(Self {
            painting: RateTable::painting(painting)?,
            labour: RateTable::labour(labour)?,
            tinkering: PartClassification::tinkering(tinkering_parts),
            rnr: PartClassification::remove_refit(rnr_parts),
        })
    }

    /// Sorted union of part columns from both rate tables
    pub fn part_vocabulary(&self) -> Vec<String> {
        self.painting
            .part_columns()
            .iter()
            .chain(self.labour.part_columns())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Makers present in either table
    pub fn makers(&self) -> Vec<String> {
        self.collect_keys(|_| true, |r| r.maker.clone())
    }

    /// Models of `maker` present in either table
    pub fn models(&self, maker: &str) -> Vec<String> {
        let maker = canonicalize(maker);
        self.collect_keys(|k| k.maker == maker, |r| r.model.clone())
    }

    /// Schedule years for `maker`/`model`, newest first
    pub fn years(&self, maker: &str, model: &str) -> Vec<String> {
        let maker = canonicalize(maker);
        let model = canonicalize(model);
        let mut years = self.collect_keys(
            |k| k.maker == maker && k.model == model,
            |r| r.year.clone(),
        );
        years.reverse();
        years
    }

    /// Cities present in either table
    pub fn cities(&self) -> Vec<String> {
        self.collect_keys(|_| true, |r| r.city.clone())
    }

    /// Paint finishes offered by the painting table
    pub fn paint_finishes(&self) -> Vec<String> {
        self.painting
            .records()
            .iter()
            .filter_map(|r| r.key.paint_finish.clone())
            .filter(|f| !f.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn collect_keys<F, M>(&self, filter: F, map: M) -> Vec<String>
    where
        F: Fn(&RowKey) -> bool,
        M: Fn(&RowKey) -> String,
    {
        self.painting
            .records()
            .iter()
            .chain(self.labour.records())
            .map(|r| &r.key)
            .filter(|k| filter(*k))
            .map(map)
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
