//! The narrow interface the sync controller consumes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use syncctl_core::timestamp;
use syncctl_core::{ConnectorDetails, ConnectorId, ConnectorPatch, ForceAck};

use crate::error::ClientError;

/// Typed access to one remote connector resource.
///
/// Every call is a round-trip; implementations keep no connector state
/// between calls. [`crate::HttpConnectorClient`] is the production
/// implementation, tests substitute scripted fakes.
#[async_trait]
pub trait ConnectorApi: Send + Sync {
    /// Fetch the connector's current state.
    async fn get(&self, id: &ConnectorId) -> Result<ConnectorDetails, ClientError>;

    /// Apply a partial update and return the updated state.
    async fn patch(
        &self,
        id: &ConnectorId,
        fields: &ConnectorPatch,
    ) -> Result<ConnectorDetails, ClientError>;

    /// Request an immediate sync. Returns as soon as the request is accepted.
    async fn force_sync(&self, id: &ConnectorId) -> Result<ForceAck, ClientError>;

    /// Parse an RFC 3339 value, or the never-sentinel when absent.
    fn parse_timestamp(&self, value: Option<&str>) -> Result<DateTime<Utc>, ClientError> {
        Ok(timestamp::parse_timestamp(value)?)
    }
}
