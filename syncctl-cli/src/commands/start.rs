//! `syncctl start` — verify, schedule and force a sync without waiting.

use anyhow::Result;
use clap::Args;

use syncctl_flow::workflow::DEFAULT_POLL_EVERY_SECS;
use syncctl_flow::{SyncRequest, Workflow};

use super::connection::ConnectionArgs;

/// Arguments for `syncctl start`.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Connector to trigger.
    pub connector_id: String,

    /// `manual` or `auto`.
    #[arg(long, default_value = "manual")]
    pub schedule_type: String,
}

impl StartArgs {
    /// Prints the baseline; pass it to `syncctl wait --since` later.
    pub async fn run(self, connection: &ConnectionArgs) -> Result<()> {
        let request = SyncRequest::new(
            &self.connector_id,
            &self.schedule_type,
            DEFAULT_POLL_EVERY_SECS,
        )?;
        let config = connection.load_config()?;
        let conn = connection.connect(&config)?;

        let baseline = Workflow::new(&conn.client)
            .with_dashboard(conn.dashboard)
            .verify_and_start(&request)
            .await?;
        println!("{}", baseline.to_rfc3339());
        Ok(())
    }
}
