use crate::analyzer::AnalyzerClient;
use crate::engine::classifier::classify;
use crate::engine::registry::RegionRegistry;
use std::sync::Arc;

const LOG_TARGET: &str = "      scan";

/// Runs one scan cycle over the monitored regions.
///
/// The cycle is strictly sequential: each region's analyzer call completes, success
/// or failure, before the next region's call is issued. This bounds load on the
/// analysis service and gives the scanning indicator a deterministic per-region
/// completion order; it must not be parallelized.
#[derive(Debug)]
pub struct ScanOrchestrator {
    client: Arc<AnalyzerClient>,
    registry: Arc<RegionRegistry>,
}

impl ScanOrchestrator {
    #[must_use]
    pub fn new(client: Arc<AnalyzerClient>, registry: Arc<RegionRegistry>) -> Self {
        Self { client, registry }
    }

    /// Scan every monitored region, one at a time, in registry order.
    ///
    /// A single region's failure never aborts the cycle; the failed region keeps its
    /// prior cached state and the cycle moves on.
    pub async fn run_cycle(&self) {
        let names = self.registry.names();
        log::info!(target: LOG_TARGET, "Starting scan cycle over {} region(s)", names.len());

        for name in &names {
            self.scan_region(name).await;
        }

        log::info!(target: LOG_TARGET, "Scan cycle complete");
    }

    async fn scan_region(&self, name: &str) {
        self.registry.mark_scanning(name, true);

        let query = format!("Check supply chain risks for {name} based on current data.");

        match self.client.analyze(&query).await {
            Ok(analysis) => {
                let status = classify(&analysis.impacted_suppliers, analysis.risk_score);
                log::info!(
                    target: LOG_TARGET,
                    "Region '{name}': {status} (score {}, {} supplier(s))",
                    analysis.risk_score,
                    analysis.impacted_suppliers.len()
                );
                self.registry
                    .apply_scan_result(name, status, analysis.risk_score, analysis.impacted_suppliers);
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Scan failed for region '{name}': {e:#}");
                self.registry.mark_scanning(name, false);
            }
        }
    }
}
