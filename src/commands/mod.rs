mod common;
mod console;
mod query;
mod scan;

pub use common::CommonArgs;
pub use console::{ConsoleArgs, run_console};
pub use query::{QueryArgs, run_query};
pub use scan::{ScanArgs, run_scan};
