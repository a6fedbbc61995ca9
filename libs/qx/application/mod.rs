//! Application layer: polling feed, epoch activity and the shared context

pub mod activity;
pub mod context;
pub mod orderbook_feed;

pub use activity::{
    ActivityError, EpochActivityService, EpochDataSource, TradeActivity, TransferActivity,
};
pub use context::{DashboardContext, Theme, TickInfo, UiSettings};
pub use orderbook_feed::{
    FeedState, FeedStats, OrderSource, OrderbookFeed, DEFAULT_POLL_INTERVAL,
};
