//! Domain types for remote connectors.
//!
//! Remote payloads are decoded into these records directly; unexpected
//! shapes fail the decode instead of travelling further as untyped JSON.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ArgumentError;
use crate::timestamp;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque identifier of a remote connector. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(String);

impl ConnectorId {
    pub fn new(id: impl Into<String>) -> Result<Self, ArgumentError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ArgumentError::EmptyConnectorId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ConnectorId {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Who drives sync timing: the remote scheduler (`auto`) or the caller (`manual`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    #[default]
    Manual,
    Auto,
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleType::Manual => write!(f, "manual"),
            ScheduleType::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ScheduleType {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            other => Err(ArgumentError::InvalidScheduleType(other.to_owned())),
        }
    }
}

/// Configuration completeness of a connector. Only `connected` may sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SetupState {
    Connected,
    Incomplete,
    Broken,
    Other(String),
}

impl From<String> for SetupState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "connected" => Self::Connected,
            "incomplete" => Self::Incomplete,
            "broken" => Self::Broken,
            _ => Self::Other(s),
        }
    }
}

impl From<SetupState> for String {
    fn from(s: SetupState) -> Self {
        s.to_string()
    }
}

impl fmt::Display for SetupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupState::Connected => write!(f, "connected"),
            SetupState::Incomplete => write!(f, "incomplete"),
            SetupState::Broken => write!(f, "broken"),
            SetupState::Other(other) => write!(f, "{other}"),
        }
    }
}

/// Current phase of the connector's sync job. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SyncState {
    Scheduled,
    Syncing,
    Paused,
    Rescheduled,
    Other(String),
}

impl From<String> for SyncState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "scheduled" => Self::Scheduled,
            "syncing" => Self::Syncing,
            "paused" => Self::Paused,
            "rescheduled" => Self::Rescheduled,
            _ => Self::Other(s),
        }
    }
}

impl From<SyncState> for String {
    fn from(s: SyncState) -> Self {
        s.to_string()
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Scheduled => write!(f, "scheduled"),
            SyncState::Syncing => write!(f, "syncing"),
            SyncState::Paused => write!(f, "paused"),
            SyncState::Rescheduled => write!(f, "rescheduled"),
            SyncState::Other(other) => write!(f, "{other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Remote records
// ---------------------------------------------------------------------------

/// Nested `status` object of a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorStatus {
    pub setup_state: SetupState,
    pub sync_state: SyncState,
}

/// Snapshot of remote connector state. Fetched fresh on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ConnectorId>,
    pub service: String,
    pub schema: String,
    pub paused: bool,
    /// Absent from some update responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<ScheduleType>,
    #[serde(default)]
    pub succeeded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    pub status: ConnectorStatus,
}

impl ConnectorDetails {
    /// `max(succeeded_at, failed_at)`, with a missing value losing to any real one.
    pub fn last_completed_at(&self) -> DateTime<Utc> {
        timestamp::latest(self.succeeded_at, self.failed_at)
    }

    /// `failed_at`, or the never-sentinel when the connector has not failed.
    pub fn last_failed_at(&self) -> DateTime<Utc> {
        timestamp::or_never(self.failed_at)
    }

    /// True when neither a success nor a failure has ever been recorded.
    pub fn never_completed(&self) -> bool {
        self.succeeded_at.is_none() && self.failed_at.is_none()
    }
}

/// Fields accepted by a partial update. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<ScheduleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}

impl ConnectorPatch {
    pub fn schedule_type(schedule_type: ScheduleType) -> Self {
        Self {
            schedule_type: Some(schedule_type),
            ..Self::default()
        }
    }

    pub fn paused(paused: bool) -> Self {
        Self {
            paused: Some(paused),
            ..Self::default()
        }
    }
}

/// Response wrapper used by the connector endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

/// Acknowledgement of a force-sync request. Carries no run handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceAck {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Terminal value of a successfully completed sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub connector_id: ConnectorId,
    pub succeeded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
