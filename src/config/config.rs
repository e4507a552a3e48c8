use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

/// Base URL of the analysis service when none is configured.
pub const DEFAULT_ANALYZER_URL: &str = "http://localhost:8000";

/// Config file looked up in the working directory when no path is given.
const DEFAULT_CONFIG_FILE: &str = "sentinel.toml";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn default_analyzer_url() -> Url {
    Url::parse(DEFAULT_ANALYZER_URL).unwrap_or_else(|_| unreachable!("default analyzer URL is valid"))
}

const fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the external analysis service.
    #[serde(default = "default_analyzer_url")]
    pub analyzer_url: Url,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Optional fixed list of monitored regions. When set, the analyzer's region
    /// source is not consulted.
    #[serde(default)]
    pub regions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzer_url: default_analyzer_url(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            regions: None,
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from `sentinel.toml` in the
    /// working directory when present, or built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("unable to read config file '{}'", path.display()))?;
        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("unable to parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout == 0 {
            bail!("request_timeout must be greater than zero");
        }

        if let Some(regions) = &self.regions {
            if regions.iter().any(|name| name.trim().is_empty()) {
                bail!("regions must not contain blank names");
            }
        }

        Ok(())
    }

    /// Per-request timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
