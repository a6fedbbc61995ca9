//! Orderbook Cockpit - live depth ladder for one QX asset
//!
//! Polls asks and bids for the configured asset and logs the book summary
//! and depth on every applied snapshot.
//!
//! Usage:
//!   ./orderbook-cockpit            # chart change over the last hour
//!   ./orderbook-cockpit 4h         # chart change over 5m|15m|1h|4h|1d|1w
//!
//! Config: DASHBOARD_CONFIG_PATH (default config/dashboard.yaml)

use anyhow::{anyhow, Result};
use qdoge_dashboard::bin_common::{load_config_from_env, parse_args, ConfigType};
use qdoge_dashboard::qx::domain::chart::{self, PricePoint, TimeFrame};
use qdoge_dashboard::qx::utils::format::abbreviate;
use qdoge_dashboard::qx::{
    init_tracing_with_level, DashboardConfig, FeedState, Heartbeat, OrderbookFeed, QxApiClient,
    ShutdownManager,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const HEARTBEAT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let config_path = load_config_from_env(ConfigType::Dashboard);
    let config = DashboardConfig::load_or_default(&config_path)?;

    // Initialize logging
    init_tracing_with_level(&config.log_level);
    config.log();

    let args = parse_args();
    let frame: TimeFrame = match args.first() {
        Some(arg) => arg.parse().map_err(|e: String| anyhow!(e))?,
        None => TimeFrame::default(),
    };

    let issuer = config.require_issuer()?.to_string();
    let client = Arc::new(QxApiClient::with_base_url(
        config.qx_api_url.clone(),
        config.request_timeout(),
    )?);

    print_banner(&config.asset);
    log_chart(&client, &issuer, &config.asset, frame).await;

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();

    let feed = Arc::new(OrderbookFeed::new(
        Arc::clone(&client),
        issuer,
        config.asset.clone(),
        config.poll_interval(),
        config.levels_per_side,
    ));
    let mut updates = feed.subscribe();
    let feed_task = tokio::spawn(Arc::clone(&feed).run(shutdown.clone()));

    let mut heartbeat = Heartbeat::new(HEARTBEAT_SECS);

    while shutdown.is_running() {
        match tokio::time::timeout(Duration::from_secs(1), updates.changed()).await {
            Ok(Ok(())) => {
                let state = updates.borrow_and_update().clone();
                log_state(&state, config.levels_per_side);
            }
            Ok(Err(_)) => break,
            Err(_) => {}
        }

        if heartbeat.should_beat() {
            let stats = feed.stats();
            info!(
                "Heartbeat: {} requests, {} applied, {} stale, {} failed",
                stats.dispatched, stats.applied, stats.stale, stats.failed
            );
            heartbeat.beat();
        }
    }

    if let Err(e) = feed_task.await {
        warn!("Feed task ended abnormally: {}", e);
    }

    print_shutdown(&feed.stats());
    Ok(())
}

fn log_state(state: &FeedState, levels: usize) {
    if let Some(error) = &state.last_error {
        warn!("#{} fetch failed: {}", state.sequence, error);
        return;
    }

    info!("#{} {}", state.sequence, state.ladder.format_summary());
    debug!("\n{}", state.ladder.format_depth(levels));
}

/// One-off chart summary; failures only warn
async fn log_chart(client: &QxApiClient, issuer: &str, asset: &str, frame: TimeFrame) {
    let buckets = match client.get_asset_chart_average_price(issuer, asset).await {
        Ok(buckets) => buckets,
        Err(e) => {
            warn!("Chart unavailable: {}", e);
            return;
        }
    };

    let points: Vec<PricePoint> = chart::price_series(chart::window(&buckets, frame))
        .into_iter()
        .map(PricePoint::Single)
        .collect();

    match (chart::latest_price(&points), chart::price_change(&points)) {
        (Some(price), Some(change)) => info!(
            "Last price {} ({:+.2}% over {}, {} buckets)",
            abbreviate(price),
            change.percent,
            frame,
            points.len()
        ),
        (Some(price), None) => info!("Last price {} (no change over {})", abbreviate(price), frame),
        _ => info!("No chart data for {}", asset),
    }
}

fn print_banner(asset: &str) {
    info!("");
    info!("========================================");
    info!("Orderbook cockpit: {}", asset);
    info!("Press Ctrl+C to stop");
    info!("========================================");
    info!("");
}

fn print_shutdown(stats: &qdoge_dashboard::qx::application::FeedStats) {
    info!("");
    info!("========================================");
    info!("Orderbook cockpit stopped gracefully");
    info!(
        "{} requests, {} applied, {} stale, {} failed",
        stats.dispatched, stats.applied, stats.stale, stats.failed
    );
    info!("========================================");
}
