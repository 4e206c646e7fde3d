//! `syncctl details` — show a connector snapshot.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use syncctl_client::ConnectorApi;
use syncctl_core::{ConnectorDetails, ConnectorId, SetupState};

use super::connection::ConnectionArgs;
use super::print_json;

/// Arguments for `syncctl details`.
#[derive(Args, Debug)]
pub struct DetailsArgs {
    /// Connector to inspect.
    pub connector_id: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "field")]
    field: &'static str,
    #[tabled(rename = "value")]
    value: String,
}

impl DetailsArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result<()> {
        let connector_id = ConnectorId::new(self.connector_id)?;
        let config = connection.load_config()?;
        let conn = connection.connect(&config)?;

        let details = conn
            .client
            .get(&connector_id)
            .await
            .with_context(|| format!("failed to fetch connector '{connector_id}'"))?;

        if self.json {
            return print_json(&details);
        }
        print_table(&connector_id, &details);
        Ok(())
    }
}

fn print_table(connector_id: &ConnectorId, details: &ConnectorDetails) {
    let setup_state = match details.status.setup_state {
        SetupState::Connected => details.status.setup_state.to_string().green().to_string(),
        _ => details.status.setup_state.to_string().red().bold().to_string(),
    };
    let rows = vec![
        DetailRow {
            field: "connector",
            value: connector_id.to_string(),
        },
        DetailRow {
            field: "service",
            value: details.service.clone(),
        },
        DetailRow {
            field: "schema",
            value: details.schema.clone(),
        },
        DetailRow {
            field: "setup state",
            value: setup_state,
        },
        DetailRow {
            field: "sync state",
            value: details.status.sync_state.to_string(),
        },
        DetailRow {
            field: "schedule",
            value: details
                .schedule_type
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        },
        DetailRow {
            field: "paused",
            value: details.paused.to_string(),
        },
        DetailRow {
            field: "succeeded at",
            value: format_time(details.succeeded_at),
        },
        DetailRow {
            field: "failed at",
            value: format_time(details.failed_at),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn format_time(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string())
}
