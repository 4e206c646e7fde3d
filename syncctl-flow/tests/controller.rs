//! Controller step tests against the scripted fake.
//!
//! Poll-loop tests run with tokio's clock paused, so every poll interval
//! auto-advances instead of sleeping.

mod support;

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use syncctl_core::{ConnectorPatch, Dashboard, ScheduleType, SetupState};
use syncctl_flow::{CancellationToken, Controller, FlowError, WaitOptions};

use support::{connected, connector_id, syncing, t, with_times, Call, FakeConnector};

fn every_15s() -> WaitOptions {
    WaitOptions::every(Duration::from_secs(15))
}

// ---------------------------------------------------------------------------
// Verify
// ---------------------------------------------------------------------------

#[tokio::test]
async fn verify_passes_connected_connector() {
    let fake = FakeConnector::new().then(connected());
    let details = Controller::new(&fake, connector_id()).verify().await.unwrap();
    assert_eq!(details.status.setup_state, SetupState::Connected);
    assert_eq!(fake.calls(), vec![Call::Get]);
}

#[tokio::test]
async fn verify_rejects_incomplete_setup_with_setup_url() {
    let mut details = connected();
    details.service = "criteo".to_string();
    details.schema = "criteo_reports".to_string();
    details.status.setup_state = SetupState::Incomplete;
    let fake = FakeConnector::new().then(details);

    let err = Controller::new(&fake, connector_id())
        .verify()
        .await
        .unwrap_err();
    match err {
        FlowError::Configuration {
            setup_state, url, ..
        } => {
            assert_eq!(setup_state, SetupState::Incomplete);
            assert_eq!(
                url,
                "https://fivetran.com/dashboard/connectors/criteo/criteo_reports/setup"
            );
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
    assert_eq!(fake.calls(), vec![Call::Get], "verify must not loop");
}

#[tokio::test]
async fn verify_uses_configured_dashboard() {
    let mut details = connected();
    details.status.setup_state = SetupState::Broken;
    let fake = FakeConnector::new().then(details);

    let err = Controller::new(&fake, connector_id())
        .with_dashboard(Dashboard::new("http://dash.local"))
        .verify()
        .await
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("http://dash.local/connectors/adwords/adwords.schema/setup"));
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[tokio::test]
async fn schedule_patches_when_different() {
    let mut details = connected();
    details.schedule_type = Some(ScheduleType::Auto);
    let fake = FakeConnector::new().then(details);

    let updated = Controller::new(&fake, connector_id())
        .set_schedule(ScheduleType::Manual)
        .await
        .unwrap()
        .expect("patched details");
    assert_eq!(updated.schedule_type, Some(ScheduleType::Manual));
    assert_eq!(
        fake.patches(),
        vec![ConnectorPatch::schedule_type(ScheduleType::Manual)]
    );
}

#[tokio::test]
async fn schedule_is_noop_when_already_set() {
    let fake = FakeConnector::new().then(connected());
    let updated = Controller::new(&fake, connector_id())
        .set_schedule(ScheduleType::Manual)
        .await
        .unwrap();
    assert!(updated.is_none());
    assert_eq!(fake.calls(), vec![Call::Get]);
}

#[tokio::test]
async fn schedule_back_to_auto() {
    let fake = FakeConnector::new().then(connected());
    Controller::new(&fake, connector_id())
        .set_schedule(ScheduleType::Auto)
        .await
        .unwrap();
    assert_eq!(
        fake.patches(),
        vec![ConnectorPatch::schedule_type(ScheduleType::Auto)]
    );
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

#[tokio::test]
async fn never_run_connector_gets_now_as_baseline() {
    let fake = FakeConnector::new().then(connected());
    let before = Utc::now();
    let baseline = Controller::new(&fake, connector_id())
        .trigger()
        .await
        .unwrap();
    let after = Utc::now();

    assert!(baseline >= before && baseline <= after, "baseline {baseline} not now");
    assert_eq!(fake.calls(), vec![Call::Get, Call::Force]);
}

#[tokio::test]
async fn baseline_is_latest_of_success_and_failure() {
    let fake = FakeConnector::new().then(with_times(connected(), Some(t(-100)), Some(t(-50))));
    let baseline = Controller::new(&fake, connector_id())
        .trigger()
        .await
        .unwrap();
    assert_eq!(baseline, t(-50));

    let fake = FakeConnector::new().then(with_times(connected(), Some(t(-10)), None));
    let baseline = Controller::new(&fake, connector_id())
        .trigger()
        .await
        .unwrap();
    assert_eq!(baseline, t(-10));
}

#[tokio::test]
async fn paused_connector_is_unpaused_before_force() {
    let mut details = with_times(connected(), Some(t(-10)), None);
    details.paused = true;
    let fake = FakeConnector::new().then(details);

    Controller::new(&fake, connector_id())
        .trigger()
        .await
        .unwrap();
    assert_eq!(
        fake.calls(),
        vec![
            Call::Get,
            Call::Patch(ConnectorPatch::paused(false)),
            Call::Force
        ]
    );
}

// ---------------------------------------------------------------------------
// Poll to completion
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn stale_failure_never_reported_while_success_arrives() {
    let stale = with_times(connected(), Some(t(-200)), Some(t(-100)));
    let fake = FakeConnector::new()
        .then(syncing(stale.clone()))
        .then(syncing(stale.clone()))
        .then(with_times(connected(), Some(t(30)), Some(t(-100))));

    let started = Instant::now();
    let result = Controller::new(&fake, connector_id())
        .wait_for_completion(t(-100), &every_15s())
        .await
        .unwrap();

    assert_eq!(result.connector_id, connector_id());
    assert_eq!(result.succeeded_at, t(30));
    assert_eq!(fake.gets(), 3);
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn new_failure_raised_exactly_at_the_poll_it_appears() {
    let pending = syncing(with_times(connected(), Some(t(-200)), Some(t(-100))));
    let fake = FakeConnector::new()
        .then(pending.clone())
        .then(pending.clone())
        .then(pending.clone())
        .then(with_times(connected(), Some(t(-200)), Some(t(45))))
        .then(with_times(connected(), Some(t(90)), Some(t(45))));

    let err = Controller::new(&fake, connector_id())
        .wait_for_completion(t(-100), &every_15s())
        .await
        .unwrap_err();

    match err {
        FlowError::SyncFailed { failed_at, url, .. } => {
            assert_eq!(failed_at, t(45));
            assert!(url.ends_with("/connectors/adwords/adwords.schema/logs"));
        }
        other => panic!("expected sync failure, got {other:?}"),
    }
    assert_eq!(fake.gets(), 4, "failure must surface at poll 4, not before or after");
}

#[tokio::test(start_paused = true)]
async fn first_ever_completion_detected_against_now_baseline() {
    let baseline = Utc::now();
    let fake = FakeConnector::new()
        .then(syncing(connected()))
        .then(with_times(
            connected(),
            Some(baseline + chrono::Duration::seconds(1)),
            None,
        ));

    let result = Controller::new(&fake, connector_id())
        .wait_for_completion(baseline, &every_15s())
        .await
        .unwrap();
    assert_eq!(result.succeeded_at, baseline + chrono::Duration::seconds(1));
}

#[tokio::test(start_paused = true)]
async fn remote_error_during_poll_aborts_the_wait() {
    let fake = FakeConnector::new()
        .then(syncing(connected()))
        .then_status(503);

    let err = Controller::new(&fake, connector_id())
        .wait_for_completion(t(0), &every_15s())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(fake.gets(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_polling() {
    let fake = FakeConnector::new().then(syncing(with_times(connected(), Some(t(-10)), None)));
    let token = CancellationToken::new();
    let options = every_15s().with_cancel(token.clone());
    let controller = Controller::new(&fake, connector_id());

    let canceller = async {
        tokio::time::sleep(Duration::from_secs(40)).await;
        token.cancel();
    };
    let (result, ()) = tokio::join!(controller.wait_for_completion(t(-10), &options), canceller);

    assert!(matches!(result, Err(FlowError::Cancelled { .. })));
    // Polls at 0s, 15s, 30s; cancelled while sleeping towards 45s.
    assert_eq!(fake.gets(), 3);
}

#[tokio::test(start_paused = true)]
async fn already_cancelled_makes_no_calls() {
    let fake = FakeConnector::new().then(connected());
    let token = CancellationToken::new();
    token.cancel();

    let err = Controller::new(&fake, connector_id())
        .wait_for_completion(t(0), &every_15s().with_cancel(token))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Cancelled { .. }));
    assert!(fake.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn deadline_bounds_the_wait() {
    let fake = FakeConnector::new().then(syncing(with_times(connected(), Some(t(-10)), None)));
    let options = every_15s().with_deadline(Instant::now() + Duration::from_secs(40));

    let err = Controller::new(&fake, connector_id())
        .wait_for_completion(t(-10), &options)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::DeadlineExceeded { .. }));
    assert!(!err.is_retryable());
    assert_eq!(fake.gets(), 3);
}
