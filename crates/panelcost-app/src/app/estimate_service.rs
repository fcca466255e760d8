//! Estimate Service - core use case for repair cost estimation
//!
//! Binds a request to the snapshot current at call time, runs the engine and
//! answers the selection queries a front end needs (cascading options, part
//! vocabulary, data check).

use panelcost_domain::model::{EstimateOutcome, LineItemInput, SelectionKey};
use panelcost_domain::repository::RateSnapshotRepository;
use panelcost_domain::service::EngineConfig;
use panelcost_types::{GarageTier, Result};
use serde::Serialize;
use tracing::debug;

use crate::catalog::RateCatalog;

/// One estimate request: selection plus damaged parts in entry order
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub selection: SelectionKey,
    pub items: Vec<LineItemInput>,
}

/// Choices available for each selection field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionOptions {
    pub makers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<String>>,
    pub cities: Vec<String>,
    pub paint_finishes: Vec<String>,
    pub garage_tiers: Vec<GarageTier>,
}

/// Overview of the loaded rate data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataCheckSummary {
    pub source: String,
    pub painting_rows: usize,
    pub labour_rows: usize,
    pub painting_parts: usize,
    pub labour_parts: usize,
    pub tinkering_parts: usize,
    pub rnr_parts: usize,
    pub duplicate_keys: Vec<String>,
}

pub struct EstimateService<'a, R: RateSnapshotRepository> {
    catalog: &'a RateCatalog<R>,
    engine_config: EngineConfig,
}

impl<'a, R: RateSnapshotRepository> EstimateService<'a, R> {
    pub fn new(catalog: &'a RateCatalog<R>, engine_config: EngineConfig) -> Self {
        Self {
            catalog,
            engine_config,
        }
    }

    /// Resolve a request against the current snapshot
    pub fn estimate(&self, request: &EstimateRequest) -> Result<EstimateOutcome> {
        debug!(selection = %request.selection, items = request.items.len(), "resolving estimate");
        let engine = self.catalog.engine(self.engine_config);
        Ok(engine.resolve(&request.selection, &request.items)?)
    }

    /// Known part names for autocomplete
    pub fn part_vocabulary(&self) -> Vec<String> {
        self.catalog.snapshot().part_vocabulary()
    }

    /// Selection choices; models narrow by maker, years by maker and model
    pub fn options(&self, maker: Option<&str>, model: Option<&str>) -> SelectionOptions {
        let snapshot = self.catalog.snapshot();
        SelectionOptions {
            makers: snapshot.makers(),
            models: maker.map(|m| snapshot.models(m)),
            years: match (maker, model) {
                (Some(maker), Some(model)) => Some(snapshot.years(maker, model)),
                _ => None,
            },
            cities: snapshot.cities(),
            paint_finishes: snapshot.paint_finishes(),
            garage_tiers: GarageTier::ALL.to_vec(),
        }
    }

    pub fn check(&self) -> DataCheckSummary {
        let snapshot = self.catalog.snapshot();
        let duplicate_keys = snapshot
            .painting
            .duplicate_keys()
            .iter()
            .map(|k| format!("{}: {}", snapshot.painting.kind(), k))
            .chain(
                snapshot
                    .labour
                    .duplicate_keys()
                    .iter()
                    .map(|k| format!("{}: {}", snapshot.labour.kind(), k)),
            )
            .collect();

        DataCheckSummary {
            source: self.catalog.repository().describe(),
            painting_rows: snapshot.painting.len(),
            labour_rows: snapshot.labour.len(),
            painting_parts: snapshot.painting.part_columns().len(),
            labour_parts: snapshot.labour.part_columns().len(),
            tinkering_parts: snapshot.tinkering.len(),
            rnr_parts: snapshot.rnr.len(),
            duplicate_keys,
        }
    }
}
