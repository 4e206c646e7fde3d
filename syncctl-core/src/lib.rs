//! syncctl core library — connector domain types, timestamp rules, errors.
//!
//! - [`types`] — newtypes, remote records and the final [`SyncResult`]
//! - [`timestamp`] — nullable completion timestamps and the never-sentinel
//! - [`dashboard`] — setup / logs links carried by errors
//! - [`config`] — optional `~/.syncctl/config.yaml`
//! - [`error`] — [`ArgumentError`], [`ConfigError`]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod timestamp;
pub mod types;

pub use dashboard::Dashboard;
pub use error::{ArgumentError, ConfigError};
pub use types::{
    ConnectorDetails, ConnectorId, ConnectorPatch, ConnectorStatus, Envelope, ForceAck,
    ScheduleType, SetupState, SyncResult, SyncState,
};
