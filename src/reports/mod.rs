//! Console rendering of analysis results and region state.

mod console;

pub use console::{ColorMode, render_focus, render_regions};
