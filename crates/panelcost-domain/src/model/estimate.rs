//! Line items and estimate results

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::canonical::{canonicalize, parse_number};
use super::selection::SelectionKey;

/// Round a money value to 2 decimal places for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One damaged part as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LineItemFields")]
pub struct LineItemInput {
    /// Canonical part name
    pub part: String,
    /// Share of the paint schedule charged for this part, 0-100
    pub discount_pct: f64,
}

#[derive(Deserialize)]
struct LineItemFields {
    part: String,
    #[serde(default)]
    discount_pct: f64,
}

impl From<LineItemFields> for LineItemInput {
    fn from(fields: LineItemFields) -> Self {
        Self::new(&fields.part, fields.discount_pct)
    }
}

impl LineItemInput {
    /// Canonicalizes the part name and clamps the discount to 0-100.
    /// A NaN or infinite discount counts as 0, like non-numeric text.
    pub fn new(part: &str, discount_pct: f64) -> Self {
        let discount_pct = if !discount_pct.is_finite() {
            0.0
        } else {
            discount_pct.clamp(0.0, 100.0)
        };
        Self {
            part: canonicalize(part),
            discount_pct,
        }
    }

    /// Build from a free-text discount cell. Non-numeric input becomes 0.
    pub fn parse(part: &str, raw_discount: &str) -> Self {
        let discount = match parse_number(raw_discount) {
            Some(value) => value,
            None => {
                if !raw_discount.trim().is_empty() {
                    debug!(part, value = raw_discount, "non-numeric discount treated as 0");
                }
                0.0
            }
        };
        Self::new(part, discount)
    }

    /// Canonical copy; a no-op for items built with [`LineItemInput::new`]
    pub fn normalized(&self) -> Self {
        Self::new(&self.part, self.discount_pct)
    }
}

/// Costs computed for a single line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemResult {
    pub part: String,
    pub tinkering_cost: f64,
    pub rnr_cost: f64,
    pub painting_cost: f64,
    pub discount_pct: f64,
    pub paint_schedule: f64,
}

impl LineItemResult {
    fn rounded(&self) -> Self {
        Self {
            part: self.part.clone(),
            tinkering_cost: round2(self.tinkering_cost),
            rnr_cost: round2(self.rnr_cost),
            painting_cost: round2(self.painting_cost),
            discount_pct: round2(self.discount_pct),
            paint_schedule: round2(self.paint_schedule),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateTotals {
    pub tinkering: f64,
    pub rnr: f64,
    pub painting: f64,
    pub grand_total: f64,
}

impl EstimateTotals {
    /// Sum every category at full precision
    pub fn from_items(items: &[LineItemResult]) -> Self {
        let (tinkering, rnr, painting) = items.iter().fold((0.0, 0.0, 0.0), |acc, item| {
            (
                acc.0 + item.tinkering_cost,
                acc.1 + item.rnr_cost,
                acc.2 + item.painting_cost,
            )
        });
        Self {
            tinkering,
            rnr,
            painting,
            grand_total: tinkering + rnr + painting,
        }
    }

    fn rounded(&self) -> Self {
        Self {
            tinkering: round2(self.tinkering),
            rnr: round2(self.rnr),
            painting: round2(self.painting),
            grand_total: round2(self.grand_total),
        }
    }
}

/// Itemized estimate for one selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub selection: SelectionKey,
    /// Rate enumerated for the garage tier; not applied to any cost
    pub garage_discount_rate: f64,
    pub unit_rate: f64,
    pub items: Vec<LineItemResult>,
    pub totals: EstimateTotals,
}

impl Estimate {
    /// Copy with every money value rounded to 2 decimals, for display only
    pub fn rounded(&self) -> Self {
        Self {
            selection: self.selection.clone(),
            garage_discount_rate: self.garage_discount_rate,
            unit_rate: self.unit_rate,
            items: self.items.iter().map(LineItemResult::rounded).collect(),
            totals: self.totals.rounded(),
        }
    }
}

/// Result of resolving a request: either nothing to compute, or an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimateOutcome {
    Empty,
    Computed(Estimate),
}

impl EstimateOutcome {
    pub fn estimate(&self) -> Option<&Estimate> {
        match self {
            EstimateOutcome::Computed(estimate) => Some(estimate),
            EstimateOutcome::Empty => None,
        }
    }
}
