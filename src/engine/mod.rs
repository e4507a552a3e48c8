//! The region risk monitoring engine: registry, classifier, scan orchestrator,
//! query reconciler, and the focus view.

mod classifier;
mod focus;
mod orchestrator;
mod reconciler;
mod region;
mod registry;

pub use classifier::{ScoreBand, classify, score_band};
pub use focus::{FocusResult, FocusState};
pub use orchestrator::ScanOrchestrator;
pub use reconciler::QueryReconciler;
pub use region::{Region, Status};
pub use registry::{FALLBACK_REGIONS, RegionRegistry};

use crate::Result;
use crate::analyzer::{Analysis, AnalyzerClient};
use std::sync::Arc;

const LOG_TARGET: &str = "   monitor";

/// Facade wiring the analyzer client, region registry, orchestrator, reconciler,
/// and focus state into one monitoring session.
///
/// The orchestrator's cycle and a user query may be in flight at the same time;
/// both paths mutate the registry only through its atomic operations, so readers
/// never observe a half-updated region.
#[derive(Debug)]
pub struct Monitor {
    client: Arc<AnalyzerClient>,
    registry: Arc<RegionRegistry>,
    focus: Arc<FocusState>,
    orchestrator: ScanOrchestrator,
    reconciler: QueryReconciler,
}

impl Monitor {
    #[must_use]
    pub fn new(client: AnalyzerClient) -> Self {
        let client = Arc::new(client);
        let registry = Arc::new(RegionRegistry::new());
        let focus = Arc::new(FocusState::new());

        Self {
            orchestrator: ScanOrchestrator::new(Arc::clone(&client), Arc::clone(&registry)),
            reconciler: QueryReconciler::new(Arc::clone(&client), Arc::clone(&registry), Arc::clone(&focus)),
            client,
            registry,
            focus,
        }
    }

    /// Populate the registry, either from a configured region list or from the
    /// analyzer's region source. When that source is unavailable the registry falls
    /// back to a fixed list of well-known regions rather than failing.
    pub async fn bootstrap(&self, configured: Option<&[String]>) {
        let names = if let Some(names) = configured {
            names.to_vec()
        } else {
            match self.client.list_regions().await {
                Ok(names) => names,
                Err(e) => {
                    log::warn!(
                        target: LOG_TARGET,
                        "Region source unavailable, monitoring fallback regions: {e:#}"
                    );
                    FALLBACK_REGIONS.iter().map(ToString::to_string).collect()
                }
            }
        };

        self.registry.initialize(names);
    }

    /// Run one sequential scan cycle over the monitored regions.
    pub async fn run_cycle(&self) {
        self.orchestrator.run_cycle().await;
    }

    /// Handle a free-form user query; see [`QueryReconciler::handle_query`].
    pub async fn handle_query(&self, text: &str) -> Result<Option<Analysis>> {
        self.reconciler.handle_query(text).await
    }

    /// Surface a region's cached scan result as the current focus without issuing a
    /// new scan. A region that has never been successfully scanned has nothing to
    /// show, so selecting it is deliberately a no-op.
    ///
    /// Returns `true` if the focus result was replaced.
    pub fn select_region(&self, name: &str) -> bool {
        let Some(region) = self.registry.region(name) else {
            return false;
        };
        let Some(risk_score) = region.risk_score() else {
            log::debug!(target: LOG_TARGET, "Region '{name}' has no cached scan result, not changing focus");
            return false;
        };

        self.focus.replace(FocusResult {
            risk_score,
            report: format!("Cached scan result for {name}."),
            suppliers: region.suppliers().map(<[_]>::to_vec).unwrap_or_default(),
        });
        true
    }

    /// Cloned snapshot of all monitored regions in display order.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        self.registry.snapshot()
    }

    /// Cloned snapshot of the live focus result.
    #[must_use]
    pub fn focus(&self) -> Option<FocusResult> {
        self.focus.current()
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<RegionRegistry> {
        &self.registry
    }
}
