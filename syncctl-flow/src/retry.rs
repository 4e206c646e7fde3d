//! Fixed-delay retries for transient workflow steps.

use std::future::Future;
use std::time::Duration;

use syncctl_core::ConnectorId;

use crate::controller::WaitOptions;
use crate::error::FlowError;

/// Bounded retries with a fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy {
        retries: 0,
        delay: Duration::ZERO,
    };
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            delay: Duration::from_secs(10),
        }
    }
}

/// Run `op`, retrying retryable failures according to `policy`.
///
/// The pause between attempts honours the deadline and cancellation in
/// `bounds`; its `poll_every` is ignored.
pub async fn run_step<T, F, Fut>(
    step: &'static str,
    policy: RetryPolicy,
    connector_id: &ConnectorId,
    bounds: &WaitOptions,
    mut op: F,
) -> Result<T, FlowError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FlowError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.retries => {
                attempt += 1;
                tracing::warn!(
                    step,
                    attempt,
                    retries = policy.retries,
                    error = %err,
                    "step failed; retrying"
                );
                bounds.pause(connector_id, policy.delay).await?;
            }
            Err(err) => return Err(err),
        }
    }
}
