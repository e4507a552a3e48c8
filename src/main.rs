//! A tool that monitors supply-chain risk across a set of regions.
//!
//! # Overview
//!
//! `chain-sentinel` talks to an external risk-analysis service, scans each monitored
//! region in turn, classifies regions as safe, warning, or critical from the
//! suppliers the service flags, and reconciles free-form risk queries back into the
//! region view.
//!
//! # Quick Start
//!
//! Scan the monitored regions and print their status:
//!
//! ```bash
//! chain-sentinel scan
//! ```
//!
//! Ask a free-form question (runs the automatic scan first):
//!
//! ```bash
//! chain-sentinel query "impact of the chip shortage"
//! chain-sentinel query --no-scan "impact of the chip shortage"
//! ```
//!
//! Start an interactive session where the scan runs in the background while you type:
//!
//! ```bash
//! chain-sentinel console
//! ```
//!
//! # Configuration
//!
//! An optional `sentinel.toml` in the working directory (or `--config PATH`):
//!
//! ```toml
//! analyzer_url = "http://localhost:8000"
//! request_timeout = 30                     # seconds
//! regions = ["Taiwan", "Japan"]            # skip the service's region list
//! ```
//!
//! The service endpoint can also be set with `--endpoint` or the
//! `SENTINEL_ENDPOINT` environment variable. When the service's `/regions` source
//! is unavailable, monitoring falls back to a fixed set of well-known regions.

use chain_sentinel::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

mod commands;

use crate::commands::{ConsoleArgs, QueryArgs, ScanArgs, run_console, run_query, run_scan};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "chain-sentinel", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: SentinelSubcommand,
}

#[derive(Subcommand, Debug)]
enum SentinelSubcommand {
    /// Scan all monitored regions and print their status
    Scan(ScanArgs),
    /// Send a free-form risk query and print the analysis
    Query(Box<QueryArgs>),
    /// Interactive monitoring session
    Console(ConsoleArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        SentinelSubcommand::Scan(scan_args) => run_scan(scan_args).await,
        SentinelSubcommand::Query(query_args) => run_query(query_args).await,
        SentinelSubcommand::Console(console_args) => run_console(console_args).await,
    }
}
