//! Error types for syncctl-core.

use std::path::PathBuf;

use thiserror::Error;

/// Input rejected before any remote call is made.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// Connector ids are opaque but must not be blank.
    #[error("value for `connector_id` must be provided")]
    EmptyConnectorId,

    /// Schedule type outside of `manual` / `auto`.
    #[error("schedule_type must be either \"manual\" or \"auto\", got {0:?}")]
    InvalidScheduleType(String),

    /// Poll interval of zero seconds.
    #[error("poll_status_every_n_seconds must be positive")]
    NonPositiveInterval,

    /// A required credential field was empty.
    #[error("value for `{0}` must be provided")]
    MissingCredential(&'static str),

    /// Timestamp that is present but not RFC 3339.
    #[error("malformed timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// All errors that can arise while loading the optional config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error, with the offending file for context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
