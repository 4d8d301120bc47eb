// Integration tests for the suite runner
//
// The full scenario catalog runs against fresh fake shop sessions, one per
// scenario, with failures injected through `ShopOptions`.
//
// Tests cover:
// - Every scenario passes against a well-behaved shop
// - A failing step is named, screenshotted, and does not stop the suite
// - Session recordings are kept for failures and deleted for passes
// - Scenario time budget cuts off a hung step
// - Sessions that cannot be opened or navigated are reported, not raised
// - Reports written to disk carry the failure

mod common;

use fake_shop::{FakeSessions, ShopOptions};
use saucedemo_e2e::locator::slug;
use saucedemo_e2e::scenario::{FAILURE_SCREENSHOT, VIDEO_EXTENSION};
use saucedemo_e2e::scenarios::{self, CompletePurchaseJourney, LoginOnly};
use saucedemo_e2e::{Scenario, Status, SuiteRunner, select};
use std::time::Duration;
use tempfile::TempDir;

const JOURNEY: &str = "Complete SauceDemo e-commerce workflow - Login to Order Completion";

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_full_suite_passes_against_fake_shop() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::new();

    let suite = scenarios::all();
    let selected = select(&suite, None);
    let report = SuiteRunner::new(&config, &sessions).run(&selected).await;

    for outcome in &report.scenarios {
        assert_eq!(
            outcome.status,
            Status::Passed,
            "{} failed: {:?}",
            outcome.name,
            outcome.error
        );
        assert!(outcome.screenshot.is_none());
    }
    assert!(report.all_passed());
    assert_eq!(report.passed_count(), 9);

    // One fresh session per scenario, each closed afterwards
    assert_eq!(sessions.count(), 9);
    for i in 0..sessions.count() {
        assert!(sessions.session(i).inspect(|s| s.closed));
    }

    // Only the journey places an order
    let orders: usize = (0..sessions.count())
        .map(|i| sessions.session(i).inspect(|s| s.orders_placed))
        .sum();
    assert_eq!(orders, 1);
}

#[tokio::test]
async fn test_journey_records_every_step_in_order() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::new();

    let journey = CompletePurchaseJourney;
    let outcome = SuiteRunner::new(&config, &sessions).run_one(&journey).await;

    assert_eq!(outcome.status, Status::Passed);
    let labels: Vec<&str> = outcome.steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Navigate to SauceDemo website",
            "Login with valid credentials",
            "Add Sauce Labs Backpack to cart",
            "Navigate to shopping cart",
            "Proceed to checkout",
            "Fill customer information with random data",
            "Continue to order review",
            "Complete the order",
            "Verify order completion success message",
            "Return to products page",
        ]
    );

    // The journey ends back on the catalog with an empty cart
    let shop = sessions.session(0);
    assert_eq!(shop.inspect(|s| s.screen), fake_shop::Screen::Inventory);
    assert!(shop.inspect(|s| s.cart.is_empty()));
}

// ============================================================================
// Failure attribution
// ============================================================================

#[tokio::test]
async fn test_failing_step_is_named_and_screenshotted() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::with_options(ShopOptions {
        broken_finish: true,
        ..Default::default()
    });

    let suite = scenarios::all();
    let selected = select(&suite, None);
    let report = SuiteRunner::new(&config, &sessions).run(&selected).await;

    // The broken button only affects the journey; the rest still run
    assert_eq!(report.scenarios.len(), 9);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.passed_count(), 8);

    let journey = report
        .scenarios
        .iter()
        .find(|s| s.name == JOURNEY)
        .expect("Journey in report");
    assert_eq!(journey.status, Status::Failed);
    assert_eq!(journey.failed_step.as_deref(), Some("Complete the order"));

    // Steps before the failure passed; nothing after it ran
    assert_eq!(journey.steps.len(), 8);
    assert!(journey.steps[..7].iter().all(|s| s.status == Status::Passed));
    assert_eq!(journey.steps[7].status, Status::Failed);

    let error = journey.error.as_deref().expect("Error recorded");
    assert!(error.contains("Complete the order"), "{error}");

    let screenshot = journey.screenshot.as_ref().expect("Screenshot taken");
    assert!(screenshot.ends_with(FAILURE_SCREENSHOT));
    assert!(screenshot.starts_with(dir.path()));
    assert!(screenshot.exists());

    // The session was still closed after the failure
    assert!(sessions.session(0).inspect(|s| s.closed));
}

#[tokio::test]
async fn test_recording_kept_only_for_failed_scenario() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::with_options(ShopOptions {
        broken_finish: true,
        record_video: true,
        ..Default::default()
    });

    let picked: [&dyn Scenario; 2] = [&LoginOnly, &CompletePurchaseJourney];
    let report = SuiteRunner::new(&config, &sessions).run(&picked).await;
    assert_eq!(report.passed_count(), 1);
    assert_eq!(report.failed_count(), 1);

    // The failed journey keeps its recording next to the screenshot
    let journey = &report.scenarios[1];
    assert_eq!(journey.status, Status::Failed);
    let video = journey.video.as_ref().expect("Recording attached");
    assert!(video.exists());
    assert_eq!(video.parent(), Some(dir.path().join(slug(JOURNEY)).as_path()));
    assert!(video.extension().is_some_and(|ext| ext == VIDEO_EXTENSION));
    let attached: Vec<_> = journey.attachments().collect();
    assert_eq!(attached.len(), 2);

    // The passing scenario leaves nothing behind
    let login = &report.scenarios[0];
    assert_eq!(login.status, Status::Passed);
    assert!(login.video.is_none());
    assert!(!dir.path().join(slug(&login.name)).exists());

    report.write_all(dir.path()).expect("Failed to write reports");
    let junit = std::fs::read_to_string(dir.path().join("junit.xml")).expect("junit.xml");
    assert!(junit.contains(&format!("[[ATTACHMENT|{}]]", video.display())));
}

#[tokio::test]
async fn test_recording_off_attaches_nothing() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::with_options(ShopOptions {
        broken_finish: true,
        ..Default::default()
    });

    let outcome = SuiteRunner::new(&config, &sessions)
        .run_one(&CompletePurchaseJourney)
        .await;

    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.video.is_none());
    assert!(outcome.screenshot.is_some());
}

#[tokio::test]
async fn test_missing_screenshot_does_not_hide_failure() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::with_options(ShopOptions {
        broken_finish: true,
        broken_screenshots: true,
        ..Default::default()
    });

    let outcome = SuiteRunner::new(&config, &sessions)
        .run_one(&CompletePurchaseJourney)
        .await;

    assert_eq!(outcome.status, Status::Failed);
    assert_eq!(outcome.failed_step.as_deref(), Some("Complete the order"));
    assert!(outcome.screenshot.is_none());
}

#[tokio::test]
async fn test_scenario_timeout_interrupts_hung_step() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = common::fast_config(fake_shop::BASE_URL, dir.path());
    config.timeouts.scenario = Duration::from_millis(300);
    let sessions = FakeSessions::with_options(ShopOptions {
        stall_navigation: Some(Duration::from_secs(5)),
        ..Default::default()
    });

    let outcome = SuiteRunner::new(&config, &sessions)
        .run_one(&CompletePurchaseJourney)
        .await;

    assert_eq!(outcome.status, Status::Failed);
    assert_eq!(
        outcome.failed_step.as_deref(),
        Some("Navigate to SauceDemo website")
    );
    let error = outcome.error.as_deref().expect("Error recorded");
    assert!(error.contains("timed out after 300ms"), "{error}");
    assert!(outcome.duration < Duration::from_secs(5));
}

// ============================================================================
// Session problems
// ============================================================================

#[tokio::test]
async fn test_session_open_failure_is_reported_per_scenario() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::refusing();

    let picked: [&dyn Scenario; 2] = [&LoginOnly, &CompletePurchaseJourney];
    let report = SuiteRunner::new(&config, &sessions).run(&picked).await;

    assert_eq!(report.failed_count(), 2);
    for outcome in &report.scenarios {
        assert!(outcome.steps.is_empty());
        assert!(outcome.failed_step.is_none());
        let error = outcome.error.as_deref().expect("Error recorded");
        assert!(error.contains("opening browser session"), "{error}");
        assert!(error.contains("browser refused to start"), "{error}");
        assert!(!dir.path().join(slug(&outcome.name)).exists());
    }
}

#[tokio::test]
async fn test_unreachable_site_fails_first_step() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::with_options(ShopOptions {
        unreachable: true,
        ..Default::default()
    });

    let outcome = SuiteRunner::new(&config, &sessions)
        .run_one(&LoginOnly)
        .await;

    assert_eq!(outcome.status, Status::Failed);
    assert_eq!(outcome.steps.len(), 1);
    let error = outcome.error.as_deref().expect("Error recorded");
    assert!(error.contains("http://fake.shop/"), "{error}");
    assert!(error.contains("ERR_NAME_NOT_RESOLVED"), "{error}");
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_reports_written_for_filtered_run() {
    common::init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = common::fast_config(fake_shop::BASE_URL, dir.path());
    let sessions = FakeSessions::with_options(ShopOptions {
        broken_finish: true,
        ..Default::default()
    });

    let suite = scenarios::all();
    let selected = select(&suite, Some("e-commerce workflow"));
    assert_eq!(selected.len(), 1);

    let report = SuiteRunner::new(&config, &sessions)
        .with_suite_name("Checkout smoke")
        .run(&selected)
        .await;
    report.write_all(dir.path()).expect("Failed to write reports");

    let junit = std::fs::read_to_string(dir.path().join("junit.xml")).expect("junit.xml");
    assert!(junit.contains(r#"<testsuite name="Checkout smoke" tests="1" failures="1""#));
    assert!(junit.contains("Complete the order: "));
    assert!(junit.contains("[[ATTACHMENT|"));

    let json = std::fs::read_to_string(dir.path().join("results.json")).expect("results.json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["suite"], "Checkout smoke");
    assert_eq!(value["scenarios"][0]["status"], "failed");
    assert_eq!(value["scenarios"][0]["failedStep"], "Complete the order");

    assert!(dir.path().join("index.html").exists());

    let listing = report.render_list();
    assert!(listing.contains("step: Complete the order"));
    assert!(listing.contains("0 passed, 1 failed"));
}
