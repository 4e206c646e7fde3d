//! `syncctl run` — trigger a sync and wait for it to finish.

use anyhow::Result;
use clap::Args;

use syncctl_flow::workflow::DEFAULT_POLL_EVERY_SECS;
use syncctl_flow::{SyncRequest, Workflow};

use super::connection::ConnectionArgs;
use super::{bounded, print_json};

/// Arguments for `syncctl run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Connector to sync.
    pub connector_id: String,

    /// `manual` or `auto`.
    #[arg(long, default_value = "manual")]
    pub schedule_type: String,

    /// Seconds between status polls.
    #[arg(long, value_name = "SECS")]
    pub poll_every: Option<u64>,

    /// Give up waiting after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl RunArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result<()> {
        let config = connection.load_config()?;
        let poll_every = self
            .poll_every
            .or(config.poll_status_every_n_seconds)
            .unwrap_or(DEFAULT_POLL_EVERY_SECS);
        let request = SyncRequest::new(&self.connector_id, &self.schedule_type, poll_every)?;
        let conn = connection.connect(&config)?;

        let result = Workflow::new(&conn.client)
            .with_dashboard(conn.dashboard)
            .trigger_sync_and_wait(&bounded(request, self.timeout))
            .await?;
        print_json(&result)
    }
}
