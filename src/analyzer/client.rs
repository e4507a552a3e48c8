use crate::Result;
use crate::analyzer::Supplier;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const LOG_TARGET: &str = "  analyzer";

/// Report text used when the service omits a report or returns an empty one.
const DEFAULT_REPORT: &str = "Analysis complete. No specific report generated.";

/// Structured outcome of one risk analysis exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Aggregate risk score, clamped to 0..=100.
    pub risk_score: u8,
    pub report: String,
    pub impacted_suppliers: Vec<Supplier>,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    query: &'a str,
}

/// Wire shape of `POST /analyze_risk`. Every field may be missing; the service's
/// score arrives as a JSON number, possibly fractional.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    risk_score: f64,

    #[serde(default)]
    report: Option<String>,

    #[serde(default)]
    impacted_suppliers: Vec<Supplier>,
}

/// Wire shape of `GET /regions`.
#[derive(Debug, Deserialize)]
struct RegionsResponse {
    #[serde(default)]
    regions: Vec<String>,
}

/// HTTP client for the external risk-analysis service.
///
/// The client performs no retries; retry policy belongs to callers.
#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    client: Client,
    base_url: Url,
}

impl AnalyzerClient {
    /// Create a client against the given service base URL.
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent("chain-sentinel")
            .timeout(timeout)
            .build()
            .into_app_err("unable to build HTTP client for the analysis service")?;

        Ok(Self { client, base_url })
    }

    /// Send a free-form risk query and return the structured analysis.
    ///
    /// # Errors
    ///
    /// Returns an error for empty query text, and for any transport or protocol
    /// failure, carrying the offending query in the error context.
    pub async fn analyze(&self, query: &str) -> Result<Analysis> {
        if query.trim().is_empty() {
            bail!("query text must not be empty");
        }

        let url = self.endpoint("analyze_risk")?;
        log::debug!(target: LOG_TARGET, "Sending risk query to '{url}'");

        let response = self
            .client
            .post(url)
            .json(&AnalyzeRequest { query })
            .send()
            .await
            .into_app_err_with(|| format!("analysis request failed for query '{query}'"))?
            .error_for_status()
            .into_app_err_with(|| format!("analysis service rejected query '{query}'"))?;

        let body: AnalyzeResponse = response
            .json()
            .await
            .into_app_err_with(|| format!("malformed analysis response for query '{query}'"))?;

        log::debug!(
            target: LOG_TARGET,
            "Analysis complete: score={}, {} supplier(s)",
            body.risk_score,
            body.impacted_suppliers.len()
        );

        Ok(Analysis {
            risk_score: clamp_score(body.risk_score),
            report: body.report.filter(|report| !report.is_empty()).unwrap_or_else(|| DEFAULT_REPORT.to_string()),
            impacted_suppliers: body.impacted_suppliers,
        })
    }

    /// Fetch the list of monitored region names from the service.
    pub async fn list_regions(&self) -> Result<Vec<String>> {
        let url = self.endpoint("regions")?;
        log::debug!(target: LOG_TARGET, "Fetching region list from '{url}'");

        let body: RegionsResponse = self
            .client
            .get(url)
            .send()
            .await
            .into_app_err("region list request failed")?
            .error_for_status()
            .into_app_err("region list request was rejected")?
            .json()
            .await
            .into_app_err("malformed region list response")?;

        Ok(body.regions)
    }

    /// Probe the service's health endpoint.
    pub async fn health(&self) -> Result<()> {
        let url = self.endpoint("health")?;

        let _ = self
            .client
            .get(url)
            .send()
            .await
            .into_app_err("health check request failed")?
            .error_for_status()
            .into_app_err("analysis service reported unhealthy")?;

        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .into_app_err_with(|| format!("invalid analyzer endpoint path '{path}'"))
    }
}

/// Clamp a wire score to the 0..=100 integer range.
#[expect(clippy::cast_possible_truncation, reason = "value is clamped to 0..=100 before the cast")]
#[expect(clippy::cast_sign_loss, reason = "value is clamped to non-negative before the cast")]
fn clamp_score(raw: f64) -> u8 {
    if raw.is_finite() { raw.clamp(0.0, 100.0).round() as u8 } else { 0 }
}
