//! Epoch Activity - wallet roll-ups and the airdrop leaderboard
//!
//! Usage:
//!   ./epoch-activity                 # current epoch, all wallets
//!   ./epoch-activity 12              # epoch 12
//!   ./epoch-activity current ABCD    # current epoch, wallets containing "ABCD"
//!
//! The configured wallet (QX_WALLET / `wallet:`) is marked in every table.

use anyhow::{anyhow, Result};
use qdoge_dashboard::bin_common::{load_config_from_env, parse_args, ConfigType, EpochArg};
use qdoge_dashboard::qx::domain::airdrop::medal;
use qdoge_dashboard::qx::domain::{AirdropBoard, WalletSideTotal};
use qdoge_dashboard::qx::utils::format::{abbreviate, group_thousands, short_id};
use qdoge_dashboard::qx::{
    init_tracing_with_level, BackendClient, DashboardConfig, DashboardContext,
    EpochActivityService, TradeActivity, TransferActivity,
};
use std::sync::Arc;
use tracing::info;

const TOP_ROWS: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let config_path = load_config_from_env(ConfigType::Dashboard);
    let config = DashboardConfig::load_or_default(&config_path)?;

    // Initialize logging
    init_tracing_with_level(&config.log_level);
    config.log();

    let args = parse_args();
    let epoch_arg = EpochArg::parse(args.first().map(String::as_str)).map_err(|e| anyhow!(e))?;
    let term = args.get(1).map(String::as_str).unwrap_or("");

    let ctx = Arc::new(DashboardContext::default());
    if let Some(wallet) = &config.wallet {
        ctx.connect_wallet(wallet);
    }

    let backend = Arc::new(BackendClient::with_base_url(
        config.backend_api_url.clone(),
        config.request_timeout(),
    )?);
    let service = EpochActivityService::new(backend);

    let epoch = service.resolve_epoch(epoch_arg.as_option()).await?;
    info!("========================================");
    info!("Epoch {} activity", epoch);
    if !term.trim().is_empty() {
        info!("Search: \"{}\"", term);
    }
    info!("========================================");

    let trades = service.trade_activity(epoch, term).await?;
    log_trades(&trades, &ctx);

    let transfers = service.transfer_activity(epoch, term).await?;
    log_transfers(&transfers, &ctx);

    let board = service.airdrop_board(epoch).await?;
    log_board(&board, &ctx);

    Ok(())
}

fn marker(ctx: &DashboardContext, wallet: &str) -> &'static str {
    if ctx.is_own_wallet(wallet) {
        " (you)"
    } else {
        ""
    }
}

fn log_side(title: &str, rows: &[WalletSideTotal], ctx: &DashboardContext) {
    info!("");
    info!("{} ({} wallets)", title, rows.len());
    for (i, row) in rows.iter().take(TOP_ROWS).enumerate() {
        info!(
            "  {:>2}. {}{}  {}  ({} tokens, {} tx){}",
            i + 1,
            short_id(&row.wallet),
            marker(ctx, &row.wallet),
            abbreviate(row.amount),
            abbreviate(row.tokens),
            row.count,
            if row.registered { " [registered]" } else { "" }
        );
    }
}

fn log_trades(activity: &TradeActivity, ctx: &DashboardContext) {
    info!("");
    info!(
        "Trades: {} of {} records",
        activity.filtered_records, activity.total_records
    );
    if activity.rollup.is_empty() {
        info!("  No trades");
        return;
    }

    log_side("Top buyers", &activity.rollup.buyers, ctx);
    log_side("Top sellers", &activity.rollup.sellers, ctx);

    info!("");
    info!("Net positions");
    for row in activity.rollup.totals.iter().take(TOP_ROWS) {
        info!(
            "  {}{}  bought {}  sold {}  net {}",
            short_id(&row.wallet),
            marker(ctx, &row.wallet),
            abbreviate(row.total_bought),
            abbreviate(row.total_sold),
            abbreviate(row.net)
        );
    }
}

fn log_transfers(activity: &TransferActivity, ctx: &DashboardContext) {
    info!("");
    info!(
        "Transfers: {} of {} records",
        activity.filtered_records, activity.total_records
    );
    if activity.rollup.is_empty() {
        info!("  No transfers");
        return;
    }

    log_side("Top senders", &activity.rollup.senders, ctx);
    log_side("Top receivers", &activity.rollup.receivers, ctx);

    info!("");
    info!("Net flows");
    for row in activity.rollup.totals.iter().take(TOP_ROWS) {
        info!(
            "  {}{}  sent {}  received {}  net {}  ({} tx)",
            short_id(&row.wallet),
            marker(ctx, &row.wallet),
            abbreviate(row.sent),
            abbreviate(row.received),
            abbreviate(row.net),
            row.total_count()
        );
    }
}

fn log_board(board: &AirdropBoard, ctx: &DashboardContext) {
    info!("");
    info!(
        "Airdrop leaderboard{}",
        if board.is_preview { " (preview)" } else { "" }
    );
    if let Some(total) = board.total_airdrop {
        info!("  Pool: {}", group_thousands(total));
    }
    if board.is_empty() {
        info!("  No results yet");
        return;
    }

    for row in board.results.iter().take(TOP_ROWS) {
        info!(
            "  #{:<3} {}{}  bought {}  airdrop {}{}",
            row.rank,
            short_id(&row.wallet_id),
            marker(ctx, &row.wallet_id),
            abbreviate(row.buy_amount),
            group_thousands(row.airdrop_amount),
            medal(row.rank).map(|m| format!(" [{}]", m)).unwrap_or_default()
        );
    }

    let snapshot = ctx.snapshot();
    if let Some(wallet) = snapshot.wallet.as_deref() {
        match board.find_wallet(wallet) {
            Some(row) if row.rank as usize > TOP_ROWS => info!(
                "  ...\n  #{:<3} {} (you)  airdrop {}",
                row.rank,
                short_id(wallet),
                group_thousands(row.airdrop_amount)
            ),
            Some(_) => {}
            None => info!("  Your wallet is not on the board"),
        }
    }
}
