//! Verify → schedule → trigger → poll, for a single connector.
//!
//! Completion is inferred only from timestamps. The remote keeps its last
//! `failed_at` indefinitely, so a failure counts only when it is strictly
//! newer than the baseline captured just before the sync was forced; the
//! same rule applies to success.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use syncctl_client::ConnectorApi;
use syncctl_core::{
    ConnectorDetails, ConnectorId, ConnectorPatch, Dashboard, ScheduleType, SetupState,
    SyncResult,
};

use crate::error::FlowError;

/// Result of comparing one snapshot against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Pending,
    Succeeded(DateTime<Utc>),
    Failed(DateTime<Utc>),
}

/// Classify a snapshot against the pre-trigger baseline.
///
/// A failure newer than `baseline` wins over everything else.
pub fn evaluate(details: &ConnectorDetails, baseline: DateTime<Utc>) -> Completion {
    let failed_at = details.last_failed_at();
    if failed_at > baseline {
        return Completion::Failed(failed_at);
    }
    let completed_at = details.last_completed_at();
    if completed_at > baseline {
        Completion::Succeeded(completed_at)
    } else {
        Completion::Pending
    }
}

/// Polling parameters and exit conditions for [`Controller::wait_for_completion`].
#[derive(Debug, Clone)]
pub struct WaitOptions {
    pub poll_every: Duration,
    /// Give up once the next poll would land after this instant.
    pub deadline: Option<Instant>,
    pub cancel: Option<CancellationToken>,
}

impl WaitOptions {
    pub fn every(poll_every: Duration) -> Self {
        Self {
            poll_every,
            deadline: None,
            cancel: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub(crate) fn check_cancelled(&self, connector_id: &ConnectorId) -> Result<(), FlowError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(cancelled(connector_id)),
            _ => Ok(()),
        }
    }

    /// Sleep for `delay` unless cancelled first. Fails up front when waking
    /// would land past the deadline. A delay too large to represent as an
    /// instant never wakes before a deadline or a cancellation.
    pub(crate) async fn pause(
        &self,
        connector_id: &ConnectorId,
        delay: Duration,
    ) -> Result<(), FlowError> {
        let wake = Instant::now().checked_add(delay);
        if let Some(deadline) = self.deadline {
            if wake.map_or(true, |wake| wake > deadline) {
                return Err(FlowError::DeadlineExceeded {
                    connector_id: connector_id.clone(),
                });
            }
        }

        let sleep = match wake {
            Some(wake) => tokio::time::sleep_until(wake),
            None => tokio::time::sleep(delay),
        };
        match &self.cancel {
            Some(token) => tokio::select! {
                _ = sleep => Ok(()),
                _ = token.cancelled() => Err(cancelled(connector_id)),
            },
            None => {
                sleep.await;
                Ok(())
            }
        }
    }
}

fn cancelled(connector_id: &ConnectorId) -> FlowError {
    tracing::info!(%connector_id, "wait cancelled");
    FlowError::Cancelled {
        connector_id: connector_id.clone(),
    }
}

/// Drives one connector through a sync. Holds no connector state of its
/// own; every decision is made on a freshly fetched snapshot.
pub struct Controller<'a, C: ConnectorApi + ?Sized> {
    client: &'a C,
    connector_id: ConnectorId,
    dashboard: Dashboard,
}

impl<'a, C: ConnectorApi + ?Sized> Controller<'a, C> {
    pub fn new(client: &'a C, connector_id: ConnectorId) -> Self {
        Self {
            client,
            connector_id,
            dashboard: Dashboard::default(),
        }
    }

    pub fn with_dashboard(mut self, dashboard: Dashboard) -> Self {
        self.dashboard = dashboard;
        self
    }

    pub fn connector_id(&self) -> &ConnectorId {
        &self.connector_id
    }

    /// Fail with [`FlowError::Configuration`] unless setup is `connected`.
    pub async fn verify(&self) -> Result<ConnectorDetails, FlowError> {
        let details = self.client.get(&self.connector_id).await?;
        if details.status.setup_state != SetupState::Connected {
            return Err(FlowError::Configuration {
                connector_id: self.connector_id.clone(),
                setup_state: details.status.setup_state.clone(),
                url: self.dashboard.setup_url(&details),
            });
        }
        tracing::info!(
            connector_id = %self.connector_id,
            service = %details.service,
            "connector setup verified"
        );
        Ok(details)
    }

    /// Patch `schedule_type` if it differs. Returns the updated details, or
    /// `None` when nothing had to change.
    pub async fn set_schedule(
        &self,
        schedule_type: ScheduleType,
    ) -> Result<Option<ConnectorDetails>, FlowError> {
        let details = self.client.get(&self.connector_id).await?;
        if details.schedule_type == Some(schedule_type) {
            tracing::debug!(
                connector_id = %self.connector_id,
                %schedule_type,
                "schedule already set"
            );
            return Ok(None);
        }
        let updated = self
            .client
            .patch(&self.connector_id, &ConnectorPatch::schedule_type(schedule_type))
            .await?;
        tracing::info!(connector_id = %self.connector_id, %schedule_type, "schedule updated");
        Ok(Some(updated))
    }

    /// Unpause if needed, force a sync and return the baseline to poll against.
    ///
    /// A connector that has never completed gets `now` as its baseline, so
    /// its first-ever completion is still detected.
    pub async fn trigger(&self) -> Result<DateTime<Utc>, FlowError> {
        let details = self.client.get(&self.connector_id).await?;
        let baseline = if details.never_completed() {
            Utc::now()
        } else {
            details.last_completed_at()
        };

        if details.paused {
            tracing::info!(connector_id = %self.connector_id, "unpausing connector");
            self.client
                .patch(&self.connector_id, &ConnectorPatch::paused(false))
                .await?;
        }

        let ack = self.client.force_sync(&self.connector_id).await?;
        tracing::info!(
            connector_id = %self.connector_id,
            %baseline,
            code = %ack.code,
            "sync triggered"
        );
        Ok(baseline)
    }

    /// Poll until a completion newer than `baseline` shows up.
    ///
    /// Exits with the [`SyncResult`], [`FlowError::SyncFailed`],
    /// [`FlowError::Cancelled`], [`FlowError::DeadlineExceeded`], or the
    /// first remote error.
    pub async fn wait_for_completion(
        &self,
        baseline: DateTime<Utc>,
        options: &WaitOptions,
    ) -> Result<SyncResult, FlowError> {
        let mut poll = 0u64;

        loop {
            options.check_cancelled(&self.connector_id)?;

            poll += 1;
            let details = self.client.get(&self.connector_id).await?;
            tracing::info!(
                connector_id = %self.connector_id,
                sync_state = %details.status.sync_state,
                poll,
                "polled connector"
            );

            match evaluate(&details, baseline) {
                Completion::Failed(failed_at) => {
                    return Err(FlowError::SyncFailed {
                        connector_id: self.connector_id.clone(),
                        failed_at,
                        url: self.dashboard.logs_url(&details),
                    });
                }
                Completion::Succeeded(succeeded_at) => {
                    tracing::info!(connector_id = %self.connector_id, %succeeded_at, "sync completed");
                    return Ok(SyncResult {
                        connector_id: self.connector_id.clone(),
                        succeeded_at,
                    });
                }
                Completion::Pending => {}
            }

            options.pause(&self.connector_id, options.poll_every).await?;
        }
    }
}
