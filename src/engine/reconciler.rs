use crate::Result;
use crate::analyzer::{Analysis, AnalyzerClient, Supplier};
use crate::engine::classifier::classify;
use crate::engine::focus::{FocusResult, FocusState};
use crate::engine::registry::RegionRegistry;
use std::collections::HashMap;
use std::sync::Arc;

const LOG_TARGET: &str = "     query";

/// Folds free-form query results into the focus view and the monitored regions.
#[derive(Debug)]
pub struct QueryReconciler {
    client: Arc<AnalyzerClient>,
    registry: Arc<RegionRegistry>,
    focus: Arc<FocusState>,
}

impl QueryReconciler {
    #[must_use]
    pub fn new(client: Arc<AnalyzerClient>, registry: Arc<RegionRegistry>, focus: Arc<FocusState>) -> Self {
        Self { client, registry, focus }
    }

    /// Handle a free-form user query.
    ///
    /// Empty or whitespace-only input is absorbed without issuing a call and yields
    /// `Ok(None)`. On success the focus result is replaced wholesale and the query's
    /// findings are merged into matching regions. On failure all region and focus
    /// state is left unchanged.
    pub async fn handle_query(&self, text: &str) -> Result<Option<Analysis>> {
        let query = text.trim();
        if query.is_empty() {
            log::debug!(target: LOG_TARGET, "Absorbing empty query");
            return Ok(None);
        }

        let analysis = self.client.analyze(query).await?;

        self.focus.replace(FocusResult {
            risk_score: analysis.risk_score,
            report: analysis.report.clone(),
            suppliers: analysis.impacted_suppliers.clone(),
        });

        self.merge_into_regions(&analysis);

        Ok(Some(analysis))
    }

    /// Group the returned suppliers by country and, for each country naming a known
    /// region, classify that subgroup against the query's global score and raise the
    /// region's status accordingly. Regions with no matching suppliers are untouched,
    /// and a query can never downgrade a region.
    fn merge_into_regions(&self, analysis: &Analysis) {
        if analysis.impacted_suppliers.is_empty() {
            return;
        }

        let mut by_country: HashMap<&str, Vec<&Supplier>> = HashMap::new();
        for supplier in &analysis.impacted_suppliers {
            by_country.entry(supplier.country.as_str()).or_default().push(supplier);
        }

        for (country, group) in by_country {
            let status = classify(group.iter().copied(), analysis.risk_score);
            log::debug!(
                target: LOG_TARGET,
                "Query named {} supplier(s) in '{country}', merging as {status}",
                group.len()
            );
            self.registry.raise_status(country, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::RiskLevel;
    use crate::engine::region::Status;

    fn supplier(country: &str, risk_level: Option<RiskLevel>) -> Supplier {
        Supplier {
            name: format!("{country} Co"),
            country: country.to_string(),
            category: "Components".to_string(),
            risk_level,
            trend: None,
        }
    }

    fn reconciler_over(names: &[&str]) -> (QueryReconciler, Arc<RegionRegistry>, Arc<FocusState>) {
        let client = Arc::new(
            AnalyzerClient::new(url::Url::parse("http://localhost:1").unwrap(), core::time::Duration::from_secs(1)).unwrap(),
        );
        let registry = Arc::new(RegionRegistry::new());
        registry.initialize(names.iter().map(ToString::to_string));
        let focus = Arc::new(FocusState::new());
        let reconciler = QueryReconciler::new(client, Arc::clone(&registry), Arc::clone(&focus));
        (reconciler, registry, focus)
    }

    #[test]
    fn test_merge_raises_only_matching_regions() {
        let (reconciler, registry, _) = reconciler_over(&["Taiwan", "Japan", "USA"]);

        let analysis = Analysis {
            risk_score: 10,
            report: "r".to_string(),
            impacted_suppliers: vec![supplier("Japan", Some(RiskLevel::Medium))],
        };
        reconciler.merge_into_regions(&analysis);

        assert_eq!(registry.region("Japan").unwrap().status(), Status::Warning);
        assert_eq!(registry.region("Taiwan").unwrap().status(), Status::Safe);
        assert_eq!(registry.region("USA").unwrap().status(), Status::Safe);
    }

    #[test]
    fn test_merge_classifies_each_country_subgroup_separately() {
        let (reconciler, registry, _) = reconciler_over(&["Taiwan", "Japan"]);

        let analysis = Analysis {
            risk_score: 10,
            report: "r".to_string(),
            impacted_suppliers: vec![
                supplier("Taiwan", Some(RiskLevel::High)),
                supplier("Japan", Some(RiskLevel::Medium)),
            ],
        };
        reconciler.merge_into_regions(&analysis);

        assert_eq!(registry.region("Taiwan").unwrap().status(), Status::Critical);
        assert_eq!(registry.region("Japan").unwrap().status(), Status::Warning);
    }

    #[test]
    fn test_merge_uses_global_score_for_unrated_subgroups() {
        let (reconciler, registry, _) = reconciler_over(&["USA"]);

        let analysis = Analysis {
            risk_score: 60,
            report: "r".to_string(),
            impacted_suppliers: vec![supplier("USA", None)],
        };
        reconciler.merge_into_regions(&analysis);

        assert_eq!(registry.region("USA").unwrap().status(), Status::Warning);
    }

    #[test]
    fn test_merge_never_downgrades() {
        let (reconciler, registry, _) = reconciler_over(&["Taiwan"]);
        registry.apply_scan_result("Taiwan", Status::Critical, 90, Vec::new());

        let analysis = Analysis {
            risk_score: 5,
            report: "r".to_string(),
            impacted_suppliers: vec![supplier("Taiwan", Some(RiskLevel::Low))],
        };
        reconciler.merge_into_regions(&analysis);

        assert_eq!(registry.region("Taiwan").unwrap().status(), Status::Critical);
    }

    #[test]
    fn test_merge_ignores_unknown_countries() {
        let (reconciler, registry, _) = reconciler_over(&["Taiwan"]);

        let analysis = Analysis {
            risk_score: 95,
            report: "r".to_string(),
            impacted_suppliers: vec![supplier("Atlantis", Some(RiskLevel::High))],
        };
        reconciler.merge_into_regions(&analysis);

        assert_eq!(registry.region("Taiwan").unwrap().status(), Status::Safe);
    }

    #[tokio::test]
    async fn test_empty_query_is_absorbed_without_a_call() {
        // The client points at an unroutable port; reaching it would error
        let (reconciler, _, focus) = reconciler_over(&["Taiwan"]);

        let outcome = reconciler.handle_query("   ").await.unwrap();

        assert_eq!(outcome, None);
        assert_eq!(focus.current(), None);
    }
}
