use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use tezpulse::application::{DashboardMonitor, DashboardMonitorConfig};
use tezpulse::config::Config;
use tezpulse::infrastructure::indexer::HttpIndexerClient;
use tezpulse::report::DashboardReport;

#[derive(Parser, Debug)]
#[command(version, about = "Analytics dashboard for Tezos Domains, polling a TzKT indexer")]
struct Args {
    /// Base URL of the TzKT-style indexer API
    #[arg(long)]
    indexer_url: Option<String>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Refresh interval in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Trailing window for the growth series, in days
    #[arg(long)]
    window_days: Option<u32>,

    /// Number of leaderboard entries
    #[arg(long)]
    top: Option<usize>,

    /// Run a single refresh cycle and exit
    #[arg(long)]
    once: bool,

    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Configuration priority: CLI args > config file > defaults
    let mut config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else {
        Config::default()
    };
    if let Some(url) = args.indexer_url {
        config.indexer.base_url = url;
    }
    if let Some(interval) = args.interval {
        config.poll.refresh_interval_secs = interval;
    }
    if let Some(window_days) = args.window_days {
        config.poll.growth_window_days = window_days;
    }
    if let Some(top) = args.top {
        config.poll.top_holders = top;
    }
    config.validate()?;

    info!("Polling {} every {}s", config.indexer.base_url, config.poll.refresh_interval_secs);

    let indexer = Arc::new(HttpIndexerClient::new(
        config.indexer.base_url.clone(),
        config.indexer.timeout_ms,
    )?);
    let monitor = Arc::new(DashboardMonitor::new(
        indexer,
        config.contracts.clone(),
        DashboardMonitorConfig::from(config.poll.clone()),
    ));

    if args.once {
        let snapshot = monitor.refresh().await;
        print_report(DashboardReport::new(snapshot), args.json)?;
        return Ok(());
    }

    // The refresh loop runs as an owned task; dropping out of this scope
    // (ctrl-c) aborts it along with any in-flight cycle.
    let handle = monitor.spawn();
    let period = Duration::from_secs(config.poll.refresh_interval_secs);
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await; // align with the monitor's first cycle

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = monitor.snapshot().await;
                print_report(DashboardReport::new(snapshot), args.json)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                handle.abort();
                return Ok(());
            }
        }
    }
}

fn print_report(report: DashboardReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}
