//! Integration tests for audit trail attribution and best-effort append.

mod common;

use common::*;

use vigil::{actions, AuditStore};

#[tokio::test]
async fn sign_in_is_recorded_against_the_resolved_identity() {
    let backends = backends();
    register_user(&backends, "a@b.com", "secret", "p1", "patient");
    let runtime = start_runtime(&backends);

    runtime.sign_in("a@b.com", "secret").await.unwrap();
    wait_until(|| backends.audit.len() == 1).await;

    let entry = &backends.audit.entries()[0];
    assert_eq!(entry.action, actions::SIGN_IN);
    assert_eq!(entry.actor_id, "p1");
    assert_eq!(entry.details["email"], "a@b.com");
}

#[tokio::test]
async fn unauthenticated_actions_write_nothing() {
    let backends = backends();
    let runtime = start_runtime(&backends);

    // No session resolved: the record call returns without any store
    // write and without error.
    runtime.audit().record_data_access("alerts");
    runtime.audit().record_error("boot", "probe");
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    assert!(backends.audit.is_empty());
}

#[tokio::test]
async fn append_failures_never_reach_the_caller() {
    let backends = backends();
    register_user(&backends, "a@b.com", "secret", "p1", "patient");
    let runtime = start_runtime(&backends);

    backends.audit.set_failing(true);
    runtime.sign_in("a@b.com", "secret").await.unwrap();
    wait_for_state(&runtime, |s| s.resolved().is_some()).await;

    // The triggering actions proceed while every append fails.
    runtime.audit().record_data_access("alerts");
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    assert!(backends.audit.is_empty());

    // Once the store recovers, later actions land; failed appends are
    // never retried.
    backends.audit.set_failing(false);
    runtime.audit().record_data_access("alerts");
    wait_until(|| backends.audit.len() == 1).await;
    assert_eq!(backends.audit.entries()[0].action, actions::DATA_ACCESS);
}

#[tokio::test]
async fn wrapper_actions_share_one_trail() {
    let backends = backends();
    register_user(&backends, "m@b.com", "secret", "m1", "medical");
    let runtime = start_runtime(&backends);

    runtime.sign_in("m@b.com", "secret").await.unwrap();
    wait_until(|| backends.audit.len() == 1).await;

    runtime
        .audit()
        .record_device_action(actions::DEVICE_PAIRED, "bp-monitor-1");
    runtime.audit().record_data_access("patients/p2/alerts");
    runtime.audit().record_error("alert_feed", "push decode failed");
    wait_until(|| backends.audit.len() == 4).await;

    // Newest first, capped by the query limit.
    let recent = backends.audit.recent_for_actor("m1", 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].action, actions::CLIENT_ERROR);
    assert_eq!(recent[1].action, actions::DATA_ACCESS);

    // Every entry carries the actor's email.
    for entry in backends.audit.entries() {
        assert_eq!(entry.details["email"], "m@b.com");
        assert_eq!(entry.actor_id, "m1");
    }
}

#[tokio::test]
async fn sign_out_is_recorded_while_still_resolved() {
    let backends = backends();
    register_user(&backends, "c@b.com", "secret", "c1", "caretaker");
    let runtime = start_runtime(&backends);

    runtime.sign_in("c@b.com", "secret").await.unwrap();
    wait_until(|| backends.audit.len() == 1).await;

    runtime.sign_out().await;
    wait_until(|| backends.audit.len() == 2).await;

    let entries = backends.audit.entries();
    assert_eq!(entries[1].action, actions::SIGN_OUT);
    assert_eq!(entries[1].actor_id, "c1");
}
