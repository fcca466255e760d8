//! Estimate engine: row resolution, per-part cost math, aggregation

use std::sync::Arc;

use panelcost_types::{EstimateError, TableKind};
use serde::{Deserialize, Serialize};

use crate::model::{
    Estimate, EstimateOutcome, EstimateTotals, LineItemInput, LineItemResult, RateRecord,
    RateSnapshot, SelectionKey,
};

/// Conversion applied to labour units for tinkering and R&R costs
pub const DEFAULT_UNIT_RATE: f64 = 3300.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub unit_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unit_rate: DEFAULT_UNIT_RATE,
        }
    }
}

/// Resolves selections against one immutable rate snapshot
#[derive(Debug, Clone)]
pub struct EstimateEngine {
    snapshot: Arc<RateSnapshot>,
    config: EngineConfig,
}

impl EstimateEngine {
    pub fn new(snapshot: Arc<RateSnapshot>, config: EngineConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn snapshot(&self) -> &RateSnapshot {
        &self.snapshot
    }

    /// Estimate repair costs for `items` under `key`.
    ///
    /// The key and items are canonicalized here regardless of how they were
    /// built. Items with a blank part name are ignored; if none remain the
    /// outcome is [`EstimateOutcome::Empty`] and no lookup is made.
    pub fn resolve(
        &self,
        key: &SelectionKey,
        items: &[LineItemInput],
    ) -> Result<EstimateOutcome, EstimateError> {
        let key = key.canonical();
        key.validate()?;

        let items: Vec<LineItemInput> = items
            .iter()
            .map(LineItemInput::normalized)
            .filter(|i| !i.part.is_empty())
            .collect();
        if items.is_empty() {
            return Ok(EstimateOutcome::Empty);
        }

        let (paint_row, labour_row) = self.resolve_rows(&key)?;

        let results: Vec<LineItemResult> = items
            .iter()
            .map(|item| self.price_item(item, paint_row, labour_row))
            .collect();
        let totals = EstimateTotals::from_items(&results);

        Ok(EstimateOutcome::Computed(Estimate {
            garage_discount_rate: key.garage_tier.discount_rate(),
            selection: key,
            unit_rate: self.config.unit_rate,
            items: results,
            totals,
        }))
    }

    fn resolve_rows(&self, key: &SelectionKey) -> Result<(&RateRecord, &RateRecord), EstimateError> {
        let paint_row = self.snapshot.painting.find(&key.painting_key());
        let labour_row = self.snapshot.labour.find(&key.labour_key());

        match (paint_row, labour_row) {
            (Some(paint), Some(labour)) => Ok((paint, labour)),
            (paint, labour) => {
                let mut tables = Vec::new();
                if paint.is_none() {
                    tables.push(TableKind::Painting);
                }
                if labour.is_none() {
                    tables.push(TableKind::Labour);
                }
                Err(EstimateError::NoMatch { tables })
            }
        }
    }

    fn price_item(
        &self,
        item: &LineItemInput,
        paint_row: &RateRecord,
        labour_row: &RateRecord,
    ) -> LineItemResult {
        let paint_schedule = paint_row.rate(&item.part);
        let base_labour = labour_row.rate(&item.part);
        let labour_cost = base_labour * self.config.unit_rate;

        let tinkering_cost = if self.snapshot.tinkering.contains(&item.part) {
            labour_cost
        } else {
            0.0
        };
        let rnr_cost = if self.snapshot.rnr.contains(&item.part) {
            labour_cost
        } else {
            0.0
        };

        LineItemResult {
            part: item.part.clone(),
            tinkering_cost,
            rnr_cost,
            painting_cost: paint_schedule * (item.discount_pct / 100.0),
            discount_pct: item.discount_pct,
            paint_schedule,
        }
    }
}
