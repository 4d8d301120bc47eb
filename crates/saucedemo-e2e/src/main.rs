//! SauceDemo E2E suite runner
//!
//! Run with: cargo run --package saucedemo-e2e -- [--headless] [--filter <text>]
//!
//! Exit codes: 0 when every selected scenario passed, 1 when any failed,
//! 2 when the suite could not be set up.

use anyhow::Context;
use clap::Parser;
use saucedemo_e2e::{PlaywrightSessions, SessionFactory, SuiteConfig, SuiteRunner, scenarios};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "saucedemo-e2e")]
#[command(about = "Page-object E2E suite for the SauceDemo purchase workflow")]
struct Args {
    /// List the scenarios and exit
    #[arg(long)]
    list: bool,

    /// Run only scenarios whose name contains this text (case-insensitive)
    #[arg(short, long)]
    filter: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// JSON configuration file
    #[arg(short, long, env = "SAUCEDEMO_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for reports, failure screenshots and recordings
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not record sessions
    #[arg(long)]
    no_video: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Runs the selected scenarios; `Ok(false)` means at least one failed
async fn run(args: Args) -> anyhow::Result<bool> {
    let mut config = SuiteConfig::load(args.config.as_deref()).context("loading configuration")?;
    if args.headless {
        config.browser.headless = true;
    }
    if args.no_video {
        config.browser.record_video = false;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }

    let suite = scenarios::all();
    let selected = saucedemo_e2e::select(&suite, args.filter.as_deref());

    if args.list {
        println!("{}", scenarios::describe(&config.reference));
        for scenario in &selected {
            println!("  {}", scenario.name());
        }
        return Ok(true);
    }
    if selected.is_empty() {
        anyhow::bail!(
            "no scenario matches filter '{}'",
            args.filter.unwrap_or_default()
        );
    }

    info!(
        scenarios = selected.len(),
        base_url = %config.reference.urls.base,
        headless = config.browser.headless,
        "starting suite"
    );

    let sessions = PlaywrightSessions::launch(&config.browser, &config.timeouts)
        .await
        .context("launching browser")?;

    let report = SuiteRunner::new(&config, &sessions).run(&selected).await;

    if let Err(e) = sessions.shutdown().await {
        error!("browser shutdown failed: {e}");
    }

    print!("{}", report.render_list());
    report
        .write_all(&config.output_dir)
        .with_context(|| format!("writing reports to {}", config.output_dir.display()))?;
    info!(dir = %config.output_dir.display(), "reports written");

    Ok(report.all_passed())
}
