use lingua_core::model::{ResourceDraft, ResourceKind, ResourceStatus, Skill, SkillMap};
use lingua_core::time::{clock_at, fixed_clock};

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_month_summary() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, fixed_clock());
    let today = harness.clock.today();
    harness
        .services
        .tracker()
        .set_day(&harness.profile, today, Skill::Reading, true)
        .expect("set day");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Dashboard"), "missing heading in {html}");
    assert!(html.contains("Active days: 1"), "missing stats in {html}");
    assert!(html.contains("Current streak: 1"), "missing streak in {html}");
    assert!(html.contains("0 of 3 completed"), "missing goals in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tracker_smoke_renders_calendar_and_stats() {
    let mut harness = setup_view_harness(ViewKind::Tracker, fixed_clock());
    let today = harness.clock.today();
    harness
        .services
        .tracker()
        .set_day(&harness.profile, today, Skill::Listening, true)
        .expect("set day");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    // Fixed clock sits in November 2023.
    assert!(html.contains("November 2023"), "missing month in {html}");
    assert!(html.contains("Longest streak: 1 days"), "missing streak in {html}");
    assert!(html.contains("Mon"), "missing weekday header in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn goals_smoke_renders_slots_and_archive_banner() {
    let mut harness = setup_view_harness(ViewKind::Goals, fixed_clock());
    let month = harness.clock.current_month();
    harness
        .services
        .goals()
        .set_title(&harness.profile, month, 0, "Read one graded reader")
        .expect("set title");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Monthly Goals"), "missing heading in {html}");
    assert!(
        html.contains("Read one graded reader"),
        "missing goal title in {html}"
    );
    // The current month is editable, so no archive banner.
    assert!(!html.contains("read-only"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn resources_smoke_renders_library_rows() {
    let mut harness = setup_view_harness(ViewKind::Resources, fixed_clock());
    harness
        .services
        .resources()
        .add(
            &harness.profile,
            ResourceDraft {
                title: "Nihongo con Teppei".into(),
                kind: ResourceKind::Podcast,
                url: "https://nihongoconteppei.com".into(),
                status: ResourceStatus::InProgress,
                notes: String::new(),
                tags: vec!["listening".into()],
            },
        )
        .expect("add resource");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Nihongo con Teppei"), "missing title in {html}");
    assert!(html.contains("Podcast"), "missing kind in {html}");
    assert!(html.contains("In progress"), "missing status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn radar_smoke_renders_balance_and_chart() {
    let mut harness = setup_view_harness(ViewKind::Radar, fixed_clock());
    let month = harness.clock.current_month();
    harness
        .services
        .radar()
        .save(&harness.profile, month, SkillMap::splat(5))
        .expect("save snapshot");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Balance index: 100"), "missing balance in {html}");
    assert!(html.contains("radar-value"), "missing chart polygon in {html}");
    assert!(html.contains("Speaking"), "missing axis label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plan_smoke_renders_saved_tasks() {
    let mut harness = setup_view_harness(ViewKind::Plan, fixed_clock());
    harness
        .services
        .daily_plan()
        .set_task(&harness.profile, 0, "10 minutes of shadowing")
        .expect("set task");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("10 minutes of shadowing"),
        "missing task in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn settings_smoke_lists_profiles() {
    let mut harness = setup_view_harness(ViewKind::Settings, fixed_clock());
    harness
        .services
        .profiles()
        .create("Spanish")
        .expect("create profile");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Default"), "missing default profile in {html}");
    assert!(html.contains("Spanish"), "missing created profile in {html}");
    assert!(html.contains("Match system"), "missing theme option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_handles_empty_profile() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, clock_at(
        chrono::NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
    ));

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("April 2024"), "missing month in {html}");
    assert!(html.contains("Active days: 0"), "missing stats in {html}");
    assert!(
        html.contains("No self-assessment yet this month."),
        "missing radar placeholder in {html}"
    );
    assert!(html.contains("No tasks planned."), "missing plan placeholder in {html}");
}
