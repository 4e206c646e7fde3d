//! syncctl — trigger and monitor connector syncs from the command line.
//!
//! # Usage
//!
//! ```text
//! syncctl details <connector-id> [--json]
//! syncctl verify <connector-id>
//! syncctl schedule <connector-id> [--schedule-type manual|auto]
//! syncctl start <connector-id> [--schedule-type manual|auto]
//! syncctl wait <connector-id> [--since <rfc3339>] [--poll-every <secs>] [--timeout <secs>]
//! syncctl run <connector-id> [--schedule-type manual|auto] [--poll-every <secs>] [--timeout <secs>]
//! ```
//!
//! Credentials come from `--api-key` / `--api-secret`, the `SYNCCTL_API_KEY`
//! / `SYNCCTL_API_SECRET` environment variables, or `~/.syncctl/config.yaml`.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{
    connection::ConnectionArgs, details::DetailsArgs, run::RunArgs, schedule::ScheduleArgs,
    start::StartArgs, verify::VerifyArgs, wait::WaitArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "syncctl",
    version,
    about = "Trigger connector syncs and wait for them to finish",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the connector's current state.
    Details(DetailsArgs),

    /// Check that the connector's setup is complete.
    Verify(VerifyArgs),

    /// Hand sync timing to the caller (manual) or back to the remote scheduler (auto).
    Schedule(ScheduleArgs),

    /// Verify, set the schedule and force a sync without waiting. Prints the baseline.
    Start(StartArgs),

    /// Wait for a previously started sync to finish.
    Wait(WaitArgs),

    /// Verify, schedule, force a sync and wait for it to finish.
    Run(RunArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let connection = cli.connection;
    runtime.block_on(async move {
        match cli.command {
            Commands::Details(args) => args.run(&connection).await,
            Commands::Verify(args) => args.run(&connection).await,
            Commands::Schedule(args) => args.run(&connection).await,
            Commands::Start(args) => args.run(&connection).await,
            Commands::Wait(args) => args.run(&connection).await,
            Commands::Run(args) => args.run(&connection).await,
        }
    })
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
