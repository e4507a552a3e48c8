use crate::analyzer::Supplier;
use strum::Display;

/// Tri-state health classification for a monitored region.
///
/// The derived ordering is the severity rank used by monotonic merges:
/// `Safe < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Safe,
    Warning,
    Critical,
}

/// A monitored region and its last known scan state.
///
/// Regions are created when the registry is first populated and never destroyed
/// during a session. At most one scan is in flight per region at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub(crate) name: String,
    pub(crate) status: Status,
    pub(crate) scanning: bool,
    pub(crate) risk_score: Option<u8>,
    pub(crate) suppliers: Option<Vec<Supplier>>,
}

impl Region {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            status: Status::Safe,
            scanning: false,
            risk_score: None,
            suppliers: None,
        }
    }

    /// Unique, case-sensitive, stable key for this region.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// True only while an in-flight scan for this region is unresolved.
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Cached aggregate score; absent until the first successful scan.
    #[must_use]
    pub const fn risk_score(&self) -> Option<u8> {
        self.risk_score
    }

    /// Cached supplier list; absent until the first successful scan.
    #[must_use]
    pub fn suppliers(&self) -> Option<&[Supplier]> {
        self.suppliers.as_deref()
    }
}
