use crate::analyzer::Supplier;
use std::sync::{PoisonError, RwLock};

/// The single currently-displayed score/report/supplier triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusResult {
    pub risk_score: u8,
    pub report: String,
    pub suppliers: Vec<Supplier>,
}

/// Holder for the live focus result.
///
/// Exactly one focus result is live at a time; it is replaced wholesale by a
/// completed user query or a region selection, never partially updated.
#[derive(Debug, Default)]
pub struct FocusState {
    current: RwLock<Option<FocusResult>>,
}

impl FocusState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the live focus result.
    pub fn replace(&self, result: FocusResult) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(result);
    }

    /// Cloned snapshot of the live focus result, if any analysis has completed.
    #[must_use]
    pub fn current(&self) -> Option<FocusResult> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
