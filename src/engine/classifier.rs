use crate::analyzer::{RiskLevel, Supplier};
use crate::engine::region::Status;
use strum::Display;

/// Aggregate score above which a region is flagged when no supplier carries an
/// explicit High or Medium risk level.
const SCORE_WARNING_THRESHOLD: u8 = 50;

/// Derive a health classification from supplier-level signals plus an aggregate score.
///
/// Strict priority chain: any High supplier wins, then any Medium, and only when all
/// suppliers are Low or unrated is the aggregate score consulted.
#[must_use = "classification has no side effects"]
pub fn classify<'a, I>(suppliers: I, aggregate_score: u8) -> Status
where
    I: IntoIterator<Item = &'a Supplier>,
{
    let mut has_medium = false;

    for supplier in suppliers {
        match supplier.risk_level {
            Some(RiskLevel::High) => return Status::Critical,
            Some(RiskLevel::Medium) => has_medium = true,
            Some(RiskLevel::Low) | None => {}
        }
    }

    if has_medium || aggregate_score > SCORE_WARNING_THRESHOLD {
        Status::Warning
    } else {
        Status::Safe
    }
}

/// Display band for a 0..=100 risk score.
///
/// The banding threshold (>30) intentionally differs from the classifier's warning
/// threshold (>50); the two are distinct signals in the product and both literals
/// are preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScoreBand {
    #[strum(serialize = "Stable Operations")]
    Stable,

    #[strum(serialize = "Moderate Warning")]
    Moderate,

    #[strum(serialize = "Critical Alert")]
    Critical,
}

/// Map a score to its display band.
#[must_use]
pub const fn score_band(score: u8) -> ScoreBand {
    if score > 70 {
        ScoreBand::Critical
    } else if score > 30 {
        ScoreBand::Moderate
    } else {
        ScoreBand::Stable
    }
}
