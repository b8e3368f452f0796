use alphatest_core::model::{AttemptId, AttemptRecord, Session, TestId};
use alphatest_core::time::fixed_now;
use chrono::Duration;
use services::GatewayError;

use super::test_harness::{
    ViewKind, setup_app_harness, setup_routed_harness, setup_view_harness, signed_in,
};

fn attempt(id: &str, test: &str, score: u32, percentage: f64, hours_ago: i64) -> AttemptRecord {
    AttemptRecord::new(
        AttemptId::new(id),
        TestId::new(test),
        score,
        20,
        percentage,
        fixed_now() - Duration::hours(hours_ago),
    )
    .unwrap()
}

fn sample_attempts() -> Vec<AttemptRecord> {
    vec![
        attempt("a1", "0f3c9a2e-77b1-4d0a", 16, 80.0, 1),
        attempt("a2", "5b7d1e44-0c2f-4e19", 12, 60.0, 2),
        attempt("a3", "0f3c9a2e-77b1-4d0a", 20, 100.0, 3),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_stats_and_recent_attempts() {
    let mut harness =
        setup_view_harness(ViewKind::Dashboard, signed_in(false), Ok(sample_attempts())).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("E-mail: cadet@example.es"), "missing email in {html}");
    assert!(html.contains("80.0%"), "missing average in {html}");
    assert!(html.contains("100.0%"), "missing best in {html}");
    assert!(html.contains("Test ID: 0f3c9a2e..."), "missing short id in {html}");
    assert!(html.contains("16/20"), "missing score in {html}");
    assert!(!html.contains("Admin"), "non-admin sees admin link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_shows_admin_link_for_admins() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, signed_in(true), Ok(vec![])).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Admin"), "missing admin link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, signed_in(false), Ok(vec![])).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Start your first test"), "missing empty state in {html}");
    assert!(html.contains("0.0%"), "missing zero stats in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness(
        ViewKind::Dashboard,
        signed_in(false),
        Err(GatewayError::Network("offline".into())),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Could not load attempts."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(harness.session.snapshot().is_authenticated());
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_expired_session_clears_store() {
    let mut harness = setup_view_harness(
        ViewKind::Dashboard,
        signed_in(false),
        Err(GatewayError::Http {
            status: 401,
            detail: None,
        }),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Your session has expired"), "missing message in {html}");
    assert!(!html.contains("Retry"), "expired session offers retry in {html}");
    assert!(!harness.session.snapshot().is_authenticated());
}

#[tokio::test(flavor = "current_thread")]
async fn tests_view_smoke_groups_attempts_by_test() {
    let mut harness =
        setup_view_harness(ViewKind::Tests, signed_in(false), Ok(sample_attempts())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Attempts: 2 | Best: 100.0%"), "missing grouping in {html}");
    assert!(html.contains("Attempts: 1 | Best: 60.0%"), "missing grouping in {html}");
    assert!(html.contains("Take again"), "missing take link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_filters_to_one_test() {
    let mut harness = setup_view_harness(
        ViewKind::Results("5b7d1e44-0c2f-4e19".into()),
        signed_in(false),
        Ok(sample_attempts()),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Results for test 5b7d1e44..."), "missing title in {html}");
    assert!(html.contains("12/20"), "missing attempt in {html}");
    assert!(!html.contains("16/20"), "foreign attempt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_sign_in_form() {
    let mut harness = setup_view_harness(ViewKind::Login, Session::anonymous(), Ok(vec![])).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing title in {html}");
    assert!(html.contains("No account yet? Register"), "missing toggle in {html}");
    assert!(!html.contains("Confirm password"), "confirm shown in sign-in mode: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_adapts_to_session() {
    let mut anonymous =
        setup_view_harness(ViewKind::Landing, Session::anonymous(), Ok(vec![])).await;
    anonymous.rebuild();
    let html = anonymous.render();
    assert!(html.contains("Get started"), "missing cta in {html}");

    let mut member = setup_view_harness(ViewKind::Landing, signed_in(false), Ok(vec![])).await;
    member.rebuild();
    let html = member.render();
    assert!(html.contains("Go to dashboard"), "missing dashboard cta in {html}");
    assert!(html.contains("Sign out"), "missing logout in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_shows_operator() {
    let mut harness = setup_view_harness(ViewKind::Admin, signed_in(true), Ok(vec![])).await;
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Signed in as administrator: cadet@example.es"),
        "missing operator in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn static_pages_smoke_render() {
    let mut verify = setup_view_harness(ViewKind::Verify, Session::anonymous(), Ok(vec![])).await;
    verify.rebuild();
    assert!(verify.render().contains("Verify your e-mail"));

    let mut take = setup_view_harness(
        ViewKind::TakeTest("0f3c9a2e-77b1".into()),
        signed_in(false),
        Ok(vec![]),
    )
    .await;
    take.rebuild();
    assert!(take.render().contains("Test 0f3c9a2e..."));
}

#[tokio::test(flavor = "current_thread")]
async fn guard_sends_anonymous_visitor_from_dashboard_to_sign_in() {
    let mut harness = setup_routed_harness("/dashboard", Session::anonymous(), Ok(vec![])).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No account yet? Register"), "not on sign-in page: {html}");
    assert!(!html.contains("Welcome back"), "dashboard rendered for anonymous: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_sends_non_admin_from_admin_to_dashboard() {
    let mut harness = setup_routed_harness("/admin", signed_in(false), Ok(vec![])).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back"), "not on dashboard: {html}");
    assert!(
        !html.contains("Signed in as administrator"),
        "admin page rendered for non-admin: {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn guard_sends_signed_in_user_from_sign_in_to_dashboard() {
    let mut harness = setup_routed_harness("/login", signed_in(false), Ok(vec![])).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("E-mail: cadet@example.es"), "not on dashboard: {html}");
    assert!(!html.contains("No account yet? Register"), "sign-in form rendered: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn app_shows_loading_until_session_restored() {
    let mut harness = setup_app_harness(Session::anonymous()).await;
    harness.dom.rebuild_in_place();
    let html = harness.render();
    assert!(html.contains("Loading..."), "missing splash in {html}");
    assert!(!html.contains("Get started"), "landing rendered before restore: {html}");

    for _ in 0..3 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("Get started"), "landing missing after restore: {html}");
    assert!(!harness.session.snapshot().is_authenticated());
}

#[tokio::test(flavor = "current_thread")]
async fn tests_and_results_views_raise_notice_on_load_failure() {
    let mut tests = setup_view_harness(
        ViewKind::Tests,
        signed_in(false),
        Err(GatewayError::Network("offline".into())),
    )
    .await;
    tests.settle().await;
    let html = tests.render();
    assert!(html.contains("notice notice-error"), "missing notice in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");

    let mut results = setup_view_harness(
        ViewKind::Results("5b7d1e44-0c2f-4e19".into()),
        signed_in(false),
        Err(GatewayError::Http {
            status: 500,
            detail: None,
        }),
    )
    .await;
    results.settle().await;
    let html = results.render();
    assert!(html.contains("notice notice-error"), "missing notice in {html}");
}
