// Shared test helpers
//
// Note: Items appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use saucedemo_e2e::SuiteConfig;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Routes tracing output through the test harness; honours RUST_LOG
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Configuration for `base_url` with timeouts short enough that failing
/// assertions give up quickly
pub fn fast_config(base_url: &str, output_dir: &Path) -> SuiteConfig {
    let mut config = SuiteConfig::default();
    config.set_base_url(base_url).expect("base URL is valid");

    config.timeouts.element = Duration::from_millis(200);
    config.timeouts.assertion = Duration::from_millis(200);
    config.timeouts.action = Duration::from_millis(200);
    config.timeouts.navigation = Duration::from_millis(200);
    config.timeouts.settle = Duration::ZERO;
    config.timeouts.poll_interval = Duration::from_millis(10);
    config.timeouts.network_quiet = Duration::from_millis(10);
    config.timeouts.scenario = Duration::from_secs(5);
    config.output_dir = output_dir.to_path_buf();
    config
}
