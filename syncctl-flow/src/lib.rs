//! # syncctl-flow
//!
//! Sync controller and workflow wrapper.
//!
//! Call [`trigger_sync_and_wait`] to run the whole verify → schedule →
//! trigger → wait sequence for one connector, or drive the individual
//! steps through [`Workflow`] / [`Controller`].

pub mod controller;
pub mod error;
pub mod retry;
pub mod workflow;

pub use controller::{evaluate, Completion, Controller, WaitOptions};
pub use error::FlowError;
pub use retry::RetryPolicy;
pub use workflow::{trigger_sync_and_wait, SyncRequest, Workflow};

/// Cancels an in-flight wait or retry pause.
pub use tokio_util::sync::CancellationToken;
