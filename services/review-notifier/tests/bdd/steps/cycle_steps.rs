//! BDD step definitions for the poll cycle feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use review_notifier::api::PracticumClient;
use review_notifier::config::ApiConfig;
use review_notifier::cycle::{run_cycle, NO_VERDICTS};
use review_notifier::verdict::HomeworkStatus;

use crate::world::ReviewWorld;

fn docstring(step: &Step) -> String {
    step.docstring
        .as_ref()
        .expect("step requires a doc string")
        .trim()
        .to_string()
}

pub fn test_api_config() -> ApiConfig {
    ApiConfig {
        endpoint: "http://review.test/api/user_api/homework_statuses/".to_string(),
        token: "test-token".to_string(),
        request_timeout_seconds: 5,
    }
}

#[given(expr = "the review API responds with status {int} and body:")]
fn api_responds(world: &mut ReviewWorld, status: u16, step: &Step) {
    world.http().respond_with(status, &docstring(step));
}

#[when(expr = "the review API now responds with status {int} and body:")]
fn api_now_responds(world: &mut ReviewWorld, status: u16, step: &Step) {
    world.http().respond_with(status, &docstring(step));
}

#[when(expr = "a poll cycle runs with from_date {int}")]
async fn cycle_runs(world: &mut ReviewWorld, since: i64) {
    let client = PracticumClient::new(&test_api_config(), world.http());
    world.cycle_result = Some(run_cycle(&client, since).await);
}

#[then("the cycle should succeed with the no new verdicts message")]
fn cycle_no_verdicts(world: &mut ReviewWorld) {
    let report = world
        .cycle_result
        .as_ref()
        .expect("no cycle result")
        .as_ref()
        .expect("cycle failed");
    assert_eq!(report.message, NO_VERDICTS);
}

#[then(expr = "the cycle should succeed with a message containing {string}")]
fn cycle_message_contains(world: &mut ReviewWorld, expected: String) {
    let report = world
        .cycle_result
        .as_ref()
        .expect("no cycle result")
        .as_ref()
        .expect("cycle failed");
    assert!(
        report.message.contains(&expected),
        "'{}' does not contain '{}'",
        report.message,
        expected
    );
}

#[then("the cycle message should contain the approved verdict text")]
fn cycle_message_approved(world: &mut ReviewWorld) {
    let report = world
        .cycle_result
        .as_ref()
        .expect("no cycle result")
        .as_ref()
        .expect("cycle failed");
    assert!(report
        .message
        .contains(HomeworkStatus::Approved.verdict_text()));
}

#[then(expr = "the reported current_date should be {int}")]
fn reported_current_date(world: &mut ReviewWorld, expected: i64) {
    let report = world
        .cycle_result
        .as_ref()
        .expect("no cycle result")
        .as_ref()
        .expect("cycle failed");
    assert_eq!(report.current_date, Some(expected));
}

#[then(expr = "the API should have been asked for from_date {int}")]
fn api_asked_for(world: &mut ReviewWorld, expected: i64) {
    assert_eq!(
        world.http().requested_from_dates(),
        vec![expected.to_string()]
    );
}

#[then(expr = "the cycle should fail with kind {string}")]
fn cycle_fails_with(world: &mut ReviewWorld, kind: String) {
    let result = world.cycle_result.as_ref().expect("no cycle result");
    match result {
        Ok(report) => panic!("expected failure '{}', got {:?}", kind, report),
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {}", e),
    }
}

#[then(expr = "the failure message should contain {string}")]
fn failure_message_contains(world: &mut ReviewWorld, expected: String) {
    let result = world.cycle_result.as_ref().expect("no cycle result");
    let err = result.as_ref().expect_err("cycle succeeded");
    assert!(
        err.to_string().contains(&expected),
        "'{}' does not contain '{}'",
        err,
        expected
    );
}
