//! Shared setup for the scan, query, and console commands.

use chain_sentinel::Result;
use chain_sentinel::analyzer::AnalyzerClient;
use chain_sentinel::config::Config;
use chain_sentinel::engine::Monitor;
use chain_sentinel::reports::ColorMode;
use clap::Args;
use clap::ValueEnum;
use std::path::PathBuf;
use url::Url;

const LOG_TARGET: &str = "     setup";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Arguments shared by every subcommand
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Base URL of the analysis service
    #[arg(long, value_name = "URL", env = "SENTINEL_ENDPOINT")]
    pub endpoint: Option<Url>,

    /// Path to configuration file [default: sentinel.toml if present]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common {
    pub monitor: Monitor,
    pub configured_regions: Option<Vec<String>>,
    colors: bool,
}

impl Common {
    /// Create the monitoring session: logger, config, analyzer client, engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the HTTP client cannot
    /// be built. An unreachable analysis service only logs a warning here; the
    /// engine degrades per-region instead of failing at startup.
    pub async fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let mut config = Config::load(args.config.as_deref())?;
        if let Some(endpoint) = &args.endpoint {
            config.analyzer_url = endpoint.clone();
        }

        let client = AnalyzerClient::new(config.analyzer_url.clone(), config.timeout())?;

        if let Err(e) = client.health().await {
            log::warn!(target: LOG_TARGET, "Analysis service health check failed: {e:#}");
        }

        Ok(Self {
            monitor: Monitor::new(client),
            configured_regions: config.regions,
            colors: args.color.enabled(),
        })
    }

    /// Whether report output should be colorized.
    #[must_use]
    pub const fn colors(&self) -> bool {
        self.colors
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        if log_level == LogLevel::None {
            return;
        }

        let level = match log_level {
            LogLevel::None => return, // Already checked above, but being explicit
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
            .init();
    }
}
