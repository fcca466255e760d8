//! Shared rate catalog with copy-and-swap reloads
//!
//! Readers take an `Arc` to the current snapshot and keep it for the whole
//! request. A reload builds a complete new snapshot first and only then swaps
//! the pointer, so nobody observes a half-built table.

use std::sync::{Arc, RwLock};

use panelcost_domain::model::RateSnapshot;
use panelcost_domain::repository::RateSnapshotRepository;
use panelcost_domain::service::{EngineConfig, EstimateEngine};
use panelcost_types::Result;
use tracing::info;

pub struct RateCatalog<R: RateSnapshotRepository> {
    repository: R,
    current: RwLock<Arc<RateSnapshot>>,
}

impl<R: RateSnapshotRepository> RateCatalog<R> {
    /// Load the initial snapshot from `repository`
    pub fn open(repository: R) -> Result<Self> {
        let snapshot = repository.load_snapshot()?;
        Ok(Self {
            repository,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// The snapshot current at the time of the call
    pub fn snapshot(&self) -> Arc<RateSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Rebuild from the repository and swap it in.
    ///
    /// On failure the previous snapshot stays current.
    pub fn reload(&self) -> Result<()> {
        let fresh = Arc::new(self.repository.load_snapshot()?);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = fresh;
        info!(source = %self.repository.describe(), "rate snapshot reloaded");
        Ok(())
    }

    /// Engine bound to the current snapshot
    pub fn engine(&self, config: EngineConfig) -> EstimateEngine {
        EstimateEngine::new(self.snapshot(), config)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelcost_domain::model::RawTable;
    use panelcost_types::{Error, EstimateError, TableKind};
    use std::sync::Mutex;

    /// Serves a queue of bumper paint rates; `None` simulates a broken source
    struct QueueRepository {
        rates: Mutex<Vec<Option<&'static str>>>,
    }

    impl RateSnapshotRepository for QueueRepository {
        fn load_snapshot(&self) -> std::result::Result<RateSnapshot, Error> {
            let next = self.rates.lock().unwrap().remove(0);
            let rate = next.ok_or(EstimateError::Schema {
                table: TableKind::Painting,
                column: "MAKER".to_string(),
            })?;
            let painting = RawTable::from_rows(
                &["MAKER", "MODEL", "YEAR", "CITY", "PAINT_FINISH", "BUMPER"],
                &[&["HONDA", "CIVIC", "2020", "MUMBAI", "METALLIC", rate]],
            );
            let labour = RawTable::from_rows(&["MAKER", "MODEL", "YEAR", "CITY"], &[]);
            let empty: [&str; 0] = [];
            Ok(RateSnapshot::from_raw(&painting, &labour, &empty, &empty)?)
        }

        fn describe(&self) -> String {
            "queue".to_string()
        }
    }

    fn catalog(rates: Vec<Option<&'static str>>) -> RateCatalog<QueueRepository> {
        RateCatalog::open(QueueRepository {
            rates: Mutex::new(rates),
        })
        .unwrap()
    }

    fn bumper_rate(snapshot: &RateSnapshot) -> f64 {
        snapshot.painting.records()[0].rate("BUMPER")
    }

    #[test]
    fn test_reload_swaps_snapshot_and_keeps_old_readers() {
        let catalog = catalog(vec![Some("1000"), Some("2000")]);
        let before = catalog.snapshot();
        catalog.reload().unwrap();
        let after = catalog.snapshot();

        assert_eq!(bumper_rate(&before), 1000.0);
        assert_eq!(bumper_rate(&after), 2000.0);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_failed_reload_keeps_current_snapshot() {
        let catalog = catalog(vec![Some("1000"), None]);
        assert!(catalog.reload().is_err());
        assert_eq!(bumper_rate(&catalog.snapshot()), 1000.0);
    }

    #[test]
    fn test_engine_uses_current_snapshot() {
        let catalog = catalog(vec![Some("1000")]);
        let engine = catalog.engine(EngineConfig::default());
        assert_eq!(bumper_rate(engine.snapshot()), 1000.0);
    }
}
