//! `syncctl schedule` — set who drives sync timing.

use anyhow::Result;
use clap::Args;

use syncctl_flow::workflow::DEFAULT_POLL_EVERY_SECS;
use syncctl_flow::{SyncRequest, Workflow};

use super::connection::ConnectionArgs;

/// Arguments for `syncctl schedule`.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Connector to update.
    pub connector_id: String,

    /// `manual` (caller triggers syncs) or `auto` (remote scheduler does).
    #[arg(long, default_value = "manual")]
    pub schedule_type: String,
}

impl ScheduleArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result<()> {
        let request = SyncRequest::new(
            &self.connector_id,
            &self.schedule_type,
            DEFAULT_POLL_EVERY_SECS,
        )?;
        let config = connection.load_config()?;
        let conn = connection.connect(&config)?;

        let updated = Workflow::new(&conn.client)
            .with_dashboard(conn.dashboard)
            .schedule(&request)
            .await?;
        match updated {
            Some(_) => println!(
                "✓ '{}' schedule set to {}",
                request.connector_id, request.schedule_type
            ),
            None => println!(
                "✓ '{}' schedule already {} — nothing to do",
                request.connector_id, request.schedule_type
            ),
        }
        Ok(())
    }
}
