//! `syncctl wait` — wait for a sync started earlier.

use anyhow::Result;
use clap::Args;

use syncctl_flow::workflow::DEFAULT_WAIT_POLL_EVERY_SECS;
use syncctl_flow::{SyncRequest, Workflow};

use super::connection::ConnectionArgs;
use super::{bounded, print_json};

/// Arguments for `syncctl wait`.
#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Connector to watch.
    pub connector_id: String,

    /// Baseline printed by `syncctl start`. Omit if the connector never ran.
    #[arg(long, value_name = "RFC3339")]
    pub since: Option<String>,

    /// Seconds between status polls.
    #[arg(long, value_name = "SECS")]
    pub poll_every: Option<u64>,

    /// Give up after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl WaitArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result<()> {
        let config = connection.load_config()?;
        let poll_every = self
            .poll_every
            .or(config.poll_status_every_n_seconds)
            .unwrap_or(DEFAULT_WAIT_POLL_EVERY_SECS);
        let request = SyncRequest::new(&self.connector_id, "manual", poll_every)?;
        let conn = connection.connect(&config)?;

        let result = Workflow::new(&conn.client)
            .with_dashboard(conn.dashboard)
            .wait_for_sync(&bounded(request, self.timeout), self.since.as_deref())
            .await?;
        print_json(&result)
    }
}
