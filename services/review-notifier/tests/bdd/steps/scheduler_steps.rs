//! BDD step definitions for the notification dedup feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use review_notifier::api::PracticumClient;
use review_notifier::engine::Engine;
use review_notifier::gate::NotificationGate;
use review_notifier::state::PollerState;

use super::cycle_steps::test_api_config;
use crate::world::doubles::SwitchableNotifier;
use crate::world::ReviewWorld;

fn build_engine(world: &mut ReviewWorld) -> Engine {
    let api = Arc::new(PracticumClient::new(&test_api_config(), world.http()));
    let notifier = Arc::clone(world.notifier.as_ref().expect("notifier not set"));
    Engine::new(
        api,
        NotificationGate::new(notifier, "42"),
        Duration::from_millis(10),
        CancellationToken::new(),
    )
}

fn attempts(world: &ReviewWorld) -> Vec<String> {
    world
        .notifier
        .as_ref()
        .expect("notifier not set")
        .attempts()
}

#[given(expr = "the scheduler starts at from_date {int}")]
fn scheduler_starts(world: &mut ReviewWorld, from_date: i64) {
    world.poller_state = Some(PollerState::new(from_date));
}

#[given("a chat notifier that succeeds")]
fn notifier_succeeds(world: &mut ReviewWorld) {
    world.notifier = Some(Arc::new(SwitchableNotifier::default()));
}

#[given("a chat notifier that fails")]
fn notifier_fails(world: &mut ReviewWorld) {
    let notifier = SwitchableNotifier::default();
    notifier.set_failing(true);
    world.notifier = Some(Arc::new(notifier));
}

#[when("the chat notifier recovers")]
fn notifier_recovers(world: &mut ReviewWorld) {
    world
        .notifier
        .as_ref()
        .expect("notifier not set")
        .set_failing(false);
}

#[when(expr = "the scheduler runs {int} cycle(s)")]
async fn scheduler_runs(world: &mut ReviewWorld, cycles: u32) {
    let engine = build_engine(world);
    let mut state = world
        .poller_state
        .take()
        .expect("scheduler start not set");
    for _ in 0..cycles {
        engine.tick(&mut state).await;
    }
    world.poller_state = Some(state);
}

#[then(expr = "the notifier should have been called {int} time(s)")]
fn notifier_called(world: &mut ReviewWorld, expected: usize) {
    let attempts = attempts(world);
    assert_eq!(attempts.len(), expected, "attempts: {:?}", attempts);
}

#[then(expr = "the last notification should contain {string}")]
fn last_notification_contains(world: &mut ReviewWorld, expected: String) {
    let attempts = attempts(world);
    let last = attempts.last().expect("nothing was sent");
    assert!(
        last.contains(&expected),
        "'{}' does not contain '{}'",
        last,
        expected
    );
}

#[then(expr = "the checkpoint should be {int}")]
fn checkpoint_is(world: &mut ReviewWorld, expected: i64) {
    let state = world.poller_state.as_ref().expect("scheduler start not set");
    assert_eq!(state.checkpoint, expected);
}

#[then(expr = "every request should have used from_date {int}")]
fn every_request_used(world: &mut ReviewWorld, expected: i64) {
    let requested = world.http().requested_from_dates();
    assert!(!requested.is_empty());
    assert!(
        requested.iter().all(|d| *d == expected.to_string()),
        "requested: {:?}",
        requested
    );
}

#[then(expr = "the requested from_dates should be {string}")]
fn requested_from_dates(world: &mut ReviewWorld, expected: String) {
    assert_eq!(world.http().requested_from_dates().join(","), expected);
}
