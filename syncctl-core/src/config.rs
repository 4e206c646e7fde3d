//! Optional YAML defaults file.
//!
//! # Storage layout
//!
//! ```text
//! ~/.syncctl/
//!   config.yaml   (mode 0600 recommended; holds the API secret)
//! ```
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Every field is optional. Command-line flags and environment variables
//! take precedence over anything loaded here.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Contents of `~/.syncctl/config.yaml`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub dashboard_base: Option<String>,
    #[serde(default)]
    pub poll_status_every_n_seconds: Option<u64>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("dashboard_base", &self.dashboard_base)
            .field(
                "poll_status_every_n_seconds",
                &self.poll_status_every_n_seconds,
            )
            .finish()
    }
}

/// `<home>/.syncctl/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".syncctl").join("config.yaml")
}

/// Load the config file under `home`.
///
/// A missing file yields [`Config::default`]; malformed YAML yields
/// `ConfigError::Parse` with the file path.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}
