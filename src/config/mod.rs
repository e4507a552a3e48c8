//! Tool configuration.

mod config;

pub use config::{Config, DEFAULT_ANALYZER_URL};
