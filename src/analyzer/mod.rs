//! Client for the external risk-analysis service.

mod client;
mod supplier;

pub use client::{Analysis, AnalyzerClient};
pub use supplier::{RiskLevel, Supplier};
