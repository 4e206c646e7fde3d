//! Error types for syncctl-flow.

use chrono::{DateTime, Utc};
use thiserror::Error;

use syncctl_client::ClientError;
use syncctl_core::{ArgumentError, ConnectorId, SetupState};

/// All errors that can abort a sync workflow.
///
/// Only [`FlowError::Remote`] is worth retrying; the rest describe a state
/// that another attempt will not change.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Bad input, rejected before any remote call.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// Any failure talking to the remote API. Only the ones the client
    /// marks as remote are retried.
    #[error("remote request failed: {0}")]
    Remote(#[source] ClientError),

    /// The connector exists but its setup is not complete.
    #[error(
        "connector \"{connector_id}\" not correctly configured, status: {setup_state}; \
         please complete setup at {url}"
    )]
    Configuration {
        connector_id: ConnectorId,
        setup_state: SetupState,
        url: String,
    },

    /// A failure newer than the pre-trigger baseline was observed.
    #[error("sync for connector \"{connector_id}\" failed at {failed_at}; please see logs at {url}")]
    SyncFailed {
        connector_id: ConnectorId,
        failed_at: DateTime<Utc>,
        url: String,
    },

    #[error("wait for connector \"{connector_id}\" was cancelled")]
    Cancelled { connector_id: ConnectorId },

    #[error("connector \"{connector_id}\" did not finish syncing before the deadline")]
    DeadlineExceeded { connector_id: ConnectorId },
}

impl From<ClientError> for FlowError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Argument(arg) => FlowError::InvalidArgument(arg),
            other => FlowError::Remote(other),
        }
    }
}

impl FlowError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, FlowError::Remote(err) if err.is_remote())
    }
}
