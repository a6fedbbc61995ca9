//! Polling orderbook feed
//!
//! Every tick dispatches a fresh asks+bids fetch as its own task, so slow
//! responses can overlap with newer ones. Each dispatch takes a request
//! token; a response only lands if its token is newer than the one already
//! applied, which keeps a late answer from overwriting fresher depth.

use crate::domain::{Order, OrderbookLadder};
use crate::infrastructure::client::{ApiError, QxApiClient};
use crate::utils::ShutdownManager;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::try_join;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Default refresh cadence for the cockpit
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

// =============================================================================
// OrderSource - where raw orders come from
// =============================================================================

/// Source of raw ask/bid snapshots for one (issuer, asset) pair
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_asks(&self, issuer: &str, asset: &str) -> Result<Vec<Order>, ApiError>;
    async fn fetch_bids(&self, issuer: &str, asset: &str) -> Result<Vec<Order>, ApiError>;
}

#[async_trait]
impl OrderSource for QxApiClient {
    async fn fetch_asks(&self, issuer: &str, asset: &str) -> Result<Vec<Order>, ApiError> {
        self.get_asset_asks(issuer, asset).await
    }

    async fn fetch_bids(&self, issuer: &str, asset: &str) -> Result<Vec<Order>, ApiError> {
        self.get_asset_bids(issuer, asset).await
    }
}

// =============================================================================
// FeedState - what subscribers see
// =============================================================================

/// Latest applied snapshot
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    /// Token of the most recent applied response; 0 before the first one
    pub sequence: u64,
    pub fetched_at: Option<DateTime<Utc>>,
    pub ladder: OrderbookLadder,
    /// A request is in flight and nothing newer has landed since
    pub loading: bool,
    /// Error of the most recent applied response, if it failed
    pub last_error: Option<String>,
}

impl FeedState {
    pub fn has_data(&self) -> bool {
        self.fetched_at.is_some()
    }
}

/// Counters for the feed loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub dispatched: u64,
    pub applied: u64,
    pub stale: u64,
    pub failed: u64,
}

// =============================================================================
// OrderbookFeed
// =============================================================================

pub struct OrderbookFeed<S: OrderSource> {
    source: Arc<S>,
    issuer: String,
    asset: String,
    interval: Duration,
    levels: usize,
    next_token: AtomicU64,
    state: watch::Sender<FeedState>,
    stats: Mutex<FeedStats>,
}

impl<S: OrderSource + 'static> OrderbookFeed<S> {
    pub fn new(
        source: Arc<S>,
        issuer: impl Into<String>,
        asset: impl Into<String>,
        interval: Duration,
        levels: usize,
    ) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            source,
            issuer: issuer.into(),
            asset: asset.into(),
            interval,
            levels,
            next_token: AtomicU64::new(0),
            state,
            stats: Mutex::new(FeedStats::default()),
        }
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Receiver that wakes on every applied snapshot
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn current(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn stats(&self) -> FeedStats {
        self.stats.lock().clone()
    }

    /// Fetch once and apply the result if it is still the newest.
    ///
    /// Returns whether the response was applied. A failed fetch is recorded
    /// in the state and also returned to the caller.
    pub async fn poll_once(&self) -> Result<bool, ApiError> {
        let token = self.dispatch();
        let result = self.fetch().await;
        let applied = self.apply(token, &result);
        result.map(|_| applied)
    }

    /// Poll every `interval` until shutdown. Each fetch runs as its own task.
    pub async fn run(self: Arc<Self>, shutdown: ShutdownManager) {
        info!(
            "Starting orderbook feed for {} (issuer {}, every {}ms, {} levels)",
            self.asset,
            self.issuer,
            self.interval.as_millis(),
            self.levels
        );

        while shutdown.is_running() {
            let token = self.dispatch();
            let feed = Arc::clone(&self);
            let guard = shutdown.clone();

            tokio::spawn(async move {
                let result = feed.fetch().await;
                if !guard.is_running() {
                    debug!(token, "Dropping orderbook response after shutdown");
                    return;
                }
                if let Err(e) = &result {
                    warn!("Orderbook fetch #{} failed: {}", token, e);
                }
                feed.apply(token, &result);
            });

            shutdown.interruptible_sleep(self.interval).await;
        }

        info!("Orderbook feed for {} stopped", self.asset);
    }

    /// Take a new request token and mark the state as loading
    fn dispatch(&self) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.lock().dispatched += 1;

        // Loading alone does not wake subscribers
        self.state.send_if_modified(|state| {
            state.loading = true;
            false
        });
        token
    }

    async fn fetch(&self) -> Result<OrderbookLadder, ApiError> {
        let (asks, bids) = try_join(
            self.source.fetch_asks(&self.issuer, &self.asset),
            self.source.fetch_bids(&self.issuer, &self.asset),
        )
        .await?;

        Ok(OrderbookLadder::build(&asks, &bids, self.levels))
    }

    /// Apply a response unless a newer one already landed.
    ///
    /// The token check and the store happen under the channel's write lock.
    fn apply(&self, token: u64, result: &Result<OrderbookLadder, ApiError>) -> bool {
        let latest = self.next_token.load(Ordering::SeqCst);

        let applied = self.state.send_if_modified(|state| {
            if token <= state.sequence {
                return false;
            }

            state.sequence = token;
            state.loading = token < latest;
            match result {
                Ok(ladder) => {
                    state.ladder = ladder.clone();
                    state.fetched_at = Some(Utc::now());
                    state.last_error = None;
                }
                Err(e) => {
                    state.last_error = Some(e.to_string());
                }
            }
            true
        });

        let mut stats = self.stats.lock();
        if !applied {
            stats.stale += 1;
            debug!(token, "Discarding stale orderbook response");
        } else if result.is_err() {
            stats.failed += 1;
        } else {
            stats.applied += 1;
        }
        applied
    }
}
