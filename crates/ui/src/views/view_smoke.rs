use api::{InMemoryBackend, ScriptedQuestion};
use dioxus::prelude::ReadableExt;

use super::test_harness::{
    ViewKind, demo_candidate, demo_recruiter, setup_view_harness, setup_view_harness_with_backend,
};
use crate::vm::AttemptIntent;

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_role_entrances() {
    let mut harness = setup_view_harness(ViewKind::Home, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Candidate login"), "missing candidate entrance in {html}");
    assert!(html.contains("Recruiter login"), "missing recruiter entrance in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_the_form() {
    let mut harness = setup_view_harness(ViewKind::Login("candidate".to_string()), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Candidate login"), "missing heading in {html}");
    assert!(html.contains("Sign in"), "missing submit in {html}");
    assert!(html.contains("Create an account"), "missing signup link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn candidate_dashboard_smoke_requires_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Candidate, None);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Please sign in first."), "missing gate in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn candidate_dashboard_smoke_lists_matching_assessments() {
    let mut harness = setup_view_harness(ViewKind::Candidate, Some(demo_candidate()));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Backend Engineer Screen"), "missing posting in {html}");
    assert!(html.contains("Start assessment"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn recruiter_dashboard_smoke_splits_the_board() {
    let mut harness = setup_view_harness(ViewKind::Recruiter, Some(demo_recruiter()));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Upcoming"), "missing upcoming section in {html}");
    assert!(html.contains("Past"), "missing past section in {html}");
    assert!(html.contains("Backend Engineer Screen"), "missing posting in {html}");
    assert!(html.contains("Publish"), "missing create form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn ranking_view_smoke_renders_the_leaderboard() {
    let mut harness = setup_view_harness(ViewKind::Ranking(4), Some(demo_recruiter()));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Ranked candidates"), "missing heading in {html}");
    assert!(html.contains("Vikram Shah"), "missing finished candidate in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn attempt_screen_smoke_runs_to_the_report() {
    let backend = InMemoryBackend::with_demo_data();
    let attempt_id = backend
        .stage_attempt(
            300,
            vec![ScriptedQuestion {
                skill: "sql".to_string(),
                text: "Which clause filters rows?".to_string(),
                options: vec!["WHERE".to_string(), "ORDER BY".to_string()],
                correct_option: 1,
            }],
        )
        .unwrap();

    let mut harness = setup_view_harness_with_backend(
        ViewKind::Attempt(attempt_id.value()),
        Some(demo_candidate()),
        backend,
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Which clause filters rows?"),
        "missing question in {html}"
    );
    assert!(html.contains("Time left: 5:00"), "missing countdown in {html}");

    let handles = harness.attempt_handles.clone().expect("attempt handles");
    let dispatch = handles.dispatch();
    dispatch.call(AttemptIntent::Select(1));
    harness.drive_async().await;
    dispatch.call(AttemptIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Your report"), "missing report in {html}");
    assert!(html.contains("Overall"), "missing overall row in {html}");

    let snapshot = handles.snapshot();
    let view = snapshot.read().clone().expect("snapshot recorded");
    let report = view.report.expect("report recorded");
    let sql = report.get("sql").expect("sql tallied");
    assert_eq!(sql.questions_attempted, 1);
    assert_eq!(sql.correct_answers, 1);
}
