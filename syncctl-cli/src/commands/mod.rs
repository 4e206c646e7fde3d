pub mod connection;
pub mod details;
pub mod run;
pub mod schedule;
pub mod start;
pub mod verify;
pub mod wait;

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::time::Instant;

use syncctl_flow::{CancellationToken, SyncRequest};

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize JSON output")?
    );
    Ok(())
}

/// Cancel the returned token on ctrl-c.
pub(crate) fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let on_signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received ctrl-c, cancelling wait");
            on_signal.cancel();
        }
    });
    token
}

/// Attach ctrl-c cancellation and an optional timeout to a request. A
/// timeout too far out to represent leaves the wait unbounded.
pub(crate) fn bounded(request: SyncRequest, timeout_secs: Option<u64>) -> SyncRequest {
    let request = request.with_cancel(cancel_on_ctrl_c());
    let deadline =
        timeout_secs.and_then(|secs| Instant::now().checked_add(Duration::from_secs(secs)));
    match deadline {
        Some(deadline) => request.with_deadline(deadline),
        None => request,
    }
}
