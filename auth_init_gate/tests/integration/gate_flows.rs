use auth_init_gate::{InitGate, LoginStatusHandlers, SdkConfig};
use tokio::sync::mpsc;

use crate::common::{Events, ScriptedSdk, TEST_APP_ID};

fn recording_status_handlers(
    events: &Events,
    tx: mpsc::UnboundedSender<&'static str>,
) -> LoginStatusHandlers {
    let (e1, e2, e3) = (events.clone(), events.clone(), events.clone());
    let (t1, t2, t3) = (tx.clone(), tx.clone(), tx);
    LoginStatusHandlers::new()
        .with_logged_in(move |response| {
            let user = response.auth_response.map(|a| a.user_id).unwrap_or_default();
            e1.push(format!("logged_in:{user}"));
            let _ = t1.send("logged_in");
        })
        .with_logged_out(move |_| {
            e2.push("logged_out");
            let _ = t2.send("logged_out");
        })
        .with_not_authorized(move |_| {
            e3.push("not_authorized");
            let _ = t3.send("not_authorized");
        })
}

async fn collect(mut rx: mpsc::UnboundedReceiver<&'static str>) -> Vec<&'static str> {
    let mut fired = Vec::new();
    while let Some(name) = rx.recv().await {
        fired.push(name);
    }
    fired
}

/// Test callbacks registered while the SDK loads
/// This test verifies that:
/// 1. Nothing runs while `bootstrap` is waiting for the SDK
/// 2. Every queued callback runs exactly once, in registration order, after loading
/// 3. `ready()` resolves once the gate opens
#[tokio::test]
async fn test_callbacks_wait_for_sdk_bootstrap() {
    let events = Events::default();
    let gate = InitGate::new(ScriptedSdk::new(events.clone()));

    let bootstrapper = gate.clone();
    let bootstrap = tokio::spawn(async move {
        bootstrapper
            .bootstrap(&SdkConfig::new(TEST_APP_ID))
            .await
            .map(|_| ())
    });

    for name in ["first", "second", "third"] {
        let events = events.clone();
        assert!(!gate.run_when_initialized(move || events.push(name)));
    }
    let ready = gate.ready();

    tokio::task::yield_now().await;
    assert!(!gate.is_initialized());
    assert_eq!(events.snapshot(), vec!["init:integration-app"]);

    gate.sdk().finish_loading();
    assert!(ready.await);
    bootstrap.await.unwrap().unwrap();

    assert!(gate.is_initialized());
    assert_eq!(
        events.snapshot(),
        vec!["init:integration-app", "loaded", "first", "second", "third"]
    );
    assert_eq!(gate.pending_len(), 0);
}

/// Test status dispatch across the three status values reported as JSON
#[tokio::test]
async fn test_status_dispatch_from_sdk_json() {
    let cases = [
        (
            r#"{"status":"connected","authResponse":{"accessToken":"t","expiresIn":10,"userID":"42"}}"#,
            "logged_in",
        ),
        (r#"{"status":"not_authorized"}"#, "not_authorized"),
        (r#"{"status":"unknown"}"#, "logged_out"),
        (r#"{"status":"something_else"}"#, "logged_out"),
    ];

    for (json, expected) in cases {
        let events = Events::default();
        let sdk = ScriptedSdk::new(events.clone());
        sdk.set_status_json(json);
        let gate = InitGate::new(sdk);
        let (tx, rx) = mpsc::unbounded_channel();

        gate.dispatch_login_status(recording_status_handlers(&events, tx), false);
        assert!(events.snapshot().is_empty());

        gate.mark_initialized();

        assert_eq!(collect(rx).await, vec![expected], "status json {json}");
        assert_eq!(events.count("status_check:false"), 1);
    }
}

/// Test that a connected user's auth payload reaches the logged-in handler
#[tokio::test]
async fn test_logged_in_handler_receives_auth_payload() {
    let events = Events::default();
    let sdk = ScriptedSdk::new(events.clone());
    sdk.set_status_json(
        r#"{"status":"connected","authResponse":{"accessToken":"t","expiresIn":10,"userID":"42"}}"#,
    );
    let gate = InitGate::new(sdk);
    let (tx, rx) = mpsc::unbounded_channel();

    gate.mark_initialized()
        .dispatch_login_status(recording_status_handlers(&events, tx), true);

    assert_eq!(collect(rx).await, vec!["logged_in"]);
    assert_eq!(events.snapshot(), vec!["status_check:true", "logged_in:42"]);
}

/// Test that skipped callbacks never run, even after the SDK loads
#[tokio::test]
async fn test_skipped_callbacks_are_forgotten() {
    let events = Events::default();
    let gate = InitGate::new(ScriptedSdk::new(events.clone()));

    let skipped = events.clone();
    assert!(!gate.run_when_initialized_or_skip(move || skipped.push("skipped"), true));
    let kept = events.clone();
    assert!(!gate.run_when_initialized_or_skip(move || kept.push("kept"), false));
    assert_eq!(gate.pending_len(), 1);

    gate.mark_initialized();

    assert_eq!(events.snapshot(), vec!["kept"]);
}

/// Test a gate shared between threads
/// Callbacks queued from several tasks all run once the gate opens.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_gate_shared_across_tasks() {
    let events = Events::default();
    let gate = InitGate::new(ScriptedSdk::new(events.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let gate = gate.clone();
        let events = events.clone();
        handles.push(tokio::spawn(async move {
            gate.run_when_initialized(move || events.push(format!("task{i}")));
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(gate.pending_len(), 8);
    gate.mark_initialized();

    let snapshot = events.snapshot();
    assert_eq!(snapshot.len(), 8);
    for i in 0..8 {
        assert_eq!(events.count(&format!("task{i}")), 1);
    }
}
