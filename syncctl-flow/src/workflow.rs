//! Workflow entrypoints shared by the CLI and library callers.
//!
//! Each step runs as its own retryable unit and feeds its output into the
//! next. Verification is never retried: a connector that is not set up will
//! not fix itself between attempts. Partial progress (schedule flipped,
//! connector unpaused) is not rolled back on failure.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use syncctl_client::ConnectorApi;
use syncctl_core::{
    ArgumentError, ConnectorDetails, ConnectorId, Dashboard, ScheduleType, SyncResult,
};

use crate::controller::{Controller, WaitOptions};
use crate::error::FlowError;
use crate::retry::{run_step, RetryPolicy};

/// Poll interval used when triggering and waiting in one go.
pub const DEFAULT_POLL_EVERY_SECS: u64 = 30;

/// Poll interval used when resuming a wait from a recorded baseline.
pub const DEFAULT_WAIT_POLL_EVERY_SECS: u64 = 15;

/// Validated parameters for one workflow invocation.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub connector_id: ConnectorId,
    pub schedule_type: ScheduleType,
    pub poll_every: Duration,
    pub deadline: Option<Instant>,
    pub cancel: Option<CancellationToken>,
}

impl SyncRequest {
    /// Validate raw parameters. Nothing touches the network here.
    pub fn new(
        connector_id: &str,
        schedule_type: &str,
        poll_status_every_n_seconds: u64,
    ) -> Result<Self, ArgumentError> {
        let connector_id = ConnectorId::new(connector_id)?;
        let schedule_type: ScheduleType = schedule_type.parse()?;
        if poll_status_every_n_seconds == 0 {
            return Err(ArgumentError::NonPositiveInterval);
        }
        Ok(Self {
            connector_id,
            schedule_type,
            poll_every: Duration::from_secs(poll_status_every_n_seconds),
            deadline: None,
            cancel: None,
        })
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            poll_every: self.poll_every,
            deadline: self.deadline,
            cancel: self.cancel.clone(),
        }
    }
}

/// Sequences controller steps with per-step retry policies.
pub struct Workflow<'a, C: ConnectorApi + ?Sized> {
    client: &'a C,
    dashboard: Dashboard,
    retry: RetryPolicy,
}

impl<'a, C: ConnectorApi + ?Sized> Workflow<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            dashboard: Dashboard::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_dashboard(mut self, dashboard: Dashboard) -> Self {
        self.dashboard = dashboard;
        self
    }

    /// Policy for schedule, trigger and poll. Verify always runs once. The
    /// request's deadline and cancellation also bound the pauses between
    /// attempts.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn controller(&self, request: &SyncRequest) -> Controller<'a, C> {
        Controller::new(self.client, request.connector_id.clone())
            .with_dashboard(self.dashboard.clone())
    }

    /// Verify setup only.
    pub async fn verify(&self, request: &SyncRequest) -> Result<ConnectorDetails, FlowError> {
        self.controller(request).verify().await
    }

    /// Set the schedule type only.
    pub async fn schedule(
        &self,
        request: &SyncRequest,
    ) -> Result<Option<ConnectorDetails>, FlowError> {
        let controller = self.controller(request);
        let bounds = request.wait_options();
        run_step("schedule", self.retry, &request.connector_id, &bounds, || {
            controller.set_schedule(request.schedule_type)
        })
        .await
    }

    /// Verify → schedule → trigger. Returns the baseline for a later wait.
    pub async fn verify_and_start(
        &self,
        request: &SyncRequest,
    ) -> Result<DateTime<Utc>, FlowError> {
        let controller = self.controller(request);
        let bounds = request.wait_options();
        controller.verify().await?;
        run_step("schedule", self.retry, &request.connector_id, &bounds, || {
            controller.set_schedule(request.schedule_type)
        })
        .await?;
        run_step("trigger", self.retry, &request.connector_id, &bounds, || {
            controller.trigger()
        })
        .await
    }

    /// Wait for a sync started elsewhere, given its recorded baseline.
    ///
    /// Pass `None` only for a connector that has never run. The baseline is
    /// then "never", so any `failed_at` at all, even one from an older run,
    /// is reported as [`FlowError::SyncFailed`].
    pub async fn wait_for_sync(
        &self,
        request: &SyncRequest,
        previous_completed_at: Option<&str>,
    ) -> Result<SyncResult, FlowError> {
        let baseline = self.client.parse_timestamp(previous_completed_at)?;
        self.wait_from(request, baseline).await
    }

    /// Verify → schedule → trigger → wait.
    pub async fn trigger_sync_and_wait(
        &self,
        request: &SyncRequest,
    ) -> Result<SyncResult, FlowError> {
        let baseline = self.verify_and_start(request).await?;
        self.wait_from(request, baseline).await
    }

    async fn wait_from(
        &self,
        request: &SyncRequest,
        baseline: DateTime<Utc>,
    ) -> Result<SyncResult, FlowError> {
        let controller = self.controller(request);
        let options = request.wait_options();
        run_step("wait", self.retry, &request.connector_id, &options, || {
            controller.wait_for_completion(baseline, &options)
        })
        .await
    }
}

/// Validate raw parameters, then trigger a sync and wait for it with the
/// default retry policy.
pub async fn trigger_sync_and_wait<C: ConnectorApi + ?Sized>(
    client: &C,
    connector_id: &str,
    schedule_type: &str,
    poll_status_every_n_seconds: u64,
) -> Result<SyncResult, FlowError> {
    let request = SyncRequest::new(connector_id, schedule_type, poll_status_every_n_seconds)?;
    Workflow::new(client).trigger_sync_and_wait(&request).await
}
