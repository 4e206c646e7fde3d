//! `syncctl verify` — check that a connector's setup is complete.

use anyhow::Result;
use clap::Args;

use syncctl_flow::workflow::DEFAULT_POLL_EVERY_SECS;
use syncctl_flow::{SyncRequest, Workflow};

use super::connection::ConnectionArgs;

/// Arguments for `syncctl verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Connector to check.
    pub connector_id: String,
}

impl VerifyArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result<()> {
        let request = SyncRequest::new(&self.connector_id, "manual", DEFAULT_POLL_EVERY_SECS)?;
        let config = connection.load_config()?;
        let conn = connection.connect(&config)?;

        let details = Workflow::new(&conn.client)
            .with_dashboard(conn.dashboard)
            .verify(&request)
            .await?;
        println!(
            "✓ '{}' is {} ({} / {})",
            request.connector_id, details.status.setup_state, details.service, details.schema
        );
        Ok(())
    }
}
