use thiserror::Error;

use syncctl_core::ArgumentError;

/// Error surface for remote connector requests.
///
/// Every variant except [`ClientError::Argument`] and
/// [`ClientError::Encode`] is a remote failure and may be retried by the
/// caller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{method} {url} returned HTTP {code}: {body}")]
    Status {
        method: &'static str,
        url: String,
        code: u16,
        body: String,
    },

    #[error("transport error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("I/O error reading response from {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode request body for {url}: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl ClientError {
    /// True when the failure came from the remote side or the transport.
    pub fn is_remote(&self) -> bool {
        !matches!(self, ClientError::Argument(_) | ClientError::Encode { .. })
    }
}
