//! Scripted in-memory `ConnectorApi` shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use syncctl_client::{ClientError, ConnectorApi};
use syncctl_core::{
    ConnectorDetails, ConnectorId, ConnectorPatch, ConnectorStatus, ForceAck, ScheduleType,
    SetupState, SyncState,
};

/// One recorded call against the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get,
    Patch(ConnectorPatch),
    Force,
}

/// Scripted reply to a `get`.
pub enum Reply {
    Details(ConnectorDetails),
    Status(u16),
}

/// Replays scripted `get` replies in order. Once the script runs out the
/// last details are repeated, so an unfinished sync stays unfinished.
#[derive(Default)]
pub struct FakeConnector {
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<ConnectorDetails>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, details: ConnectorDetails) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Reply::Details(details));
        self
    }

    pub fn then_status(self, code: u16) -> Self {
        self.script.lock().unwrap().push_back(Reply::Status(code));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn gets(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Get).count()
    }

    pub fn patches(&self) -> Vec<ConnectorPatch> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Patch(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn status_error(code: u16) -> ClientError {
        ClientError::Status {
            method: "GET",
            url: "http://fake/v1/connectors".to_string(),
            code,
            body: String::new(),
        }
    }
}

#[async_trait]
impl ConnectorApi for FakeConnector {
    async fn get(&self, _id: &ConnectorId) -> Result<ConnectorDetails, ClientError> {
        self.record(Call::Get);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Reply::Details(details)) => {
                *self.last.lock().unwrap() = Some(details.clone());
                Ok(details)
            }
            Some(Reply::Status(code)) => Err(Self::status_error(code)),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| Self::status_error(404)),
        }
    }

    async fn patch(
        &self,
        _id: &ConnectorId,
        fields: &ConnectorPatch,
    ) -> Result<ConnectorDetails, ClientError> {
        self.record(Call::Patch(fields.clone()));
        let mut details = self
            .last
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::status_error(404))?;
        if let Some(schedule_type) = fields.schedule_type {
            details.schedule_type = Some(schedule_type);
        }
        if let Some(paused) = fields.paused {
            details.paused = paused;
        }
        Ok(details)
    }

    async fn force_sync(&self, _id: &ConnectorId) -> Result<ForceAck, ClientError> {
        self.record(Call::Force);
        Ok(ForceAck {
            code: "Success".to_string(),
            message: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Snapshot builders
// ---------------------------------------------------------------------------

/// Fixed reference instant plus `secs`.
pub fn t(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn connected() -> ConnectorDetails {
    ConnectorDetails {
        id: Some(ConnectorId::new("12345").unwrap()),
        service: "adwords".to_string(),
        schema: "adwords.schema".to_string(),
        paused: false,
        schedule_type: Some(ScheduleType::Manual),
        succeeded_at: None,
        failed_at: None,
        status: ConnectorStatus {
            setup_state: SetupState::Connected,
            sync_state: SyncState::Scheduled,
        },
    }
}

pub fn with_times(
    details: ConnectorDetails,
    succeeded_at: Option<DateTime<Utc>>,
    failed_at: Option<DateTime<Utc>>,
) -> ConnectorDetails {
    ConnectorDetails {
        succeeded_at,
        failed_at,
        ..details
    }
}

pub fn syncing(details: ConnectorDetails) -> ConnectorDetails {
    ConnectorDetails {
        status: ConnectorStatus {
            sync_state: SyncState::Syncing,
            ..details.status
        },
        ..details
    }
}

pub fn connector_id() -> ConnectorId {
    ConnectorId::new("12345").unwrap()
}
