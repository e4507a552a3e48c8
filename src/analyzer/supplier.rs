use serde::{Deserialize, Deserializer, Serialize};

/// Explicit risk level the analysis service attaches to a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// A supplier flagged by the analysis service.
///
/// Suppliers are owned by whichever result set produced them and are immutable once received.
/// They have no identity beyond structural equality; duplicate names across result sets are
/// not merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,

    /// Join key to a monitored region.
    pub country: String,

    #[serde(default)]
    pub category: String,

    /// Absent when the service did not assign an explicit level. Unrecognized
    /// labels on the wire are treated as absent rather than failing the whole
    /// response.
    #[serde(default, deserialize_with = "deserialize_risk_level", skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,

    /// Free-text trend, e.g. "Stable", "Worsening".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

/// Deserialize a risk level leniently: anything other than the three known labels maps to `None`.
fn deserialize_risk_level<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(|label| match label {
        "High" => Some(RiskLevel::High),
        "Medium" => Some(RiskLevel::Medium),
        "Low" => Some(RiskLevel::Low),
        _ => None,
    }))
}
