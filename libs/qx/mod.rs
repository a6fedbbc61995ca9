//! QX Dashboard Core
//!
//! Data layer for the QDOGE trading dashboard on the QX exchange: typed REST
//! clients, order-book depth ladders, wallet roll-ups over trades and
//! transfers, and the polling feed that keeps the cockpit current.
//!
//! ## Layout
//!
//! - **domain**: plain records and pure aggregation (no I/O)
//! - **infrastructure**: HTTP clients and configuration
//! - **application**: polling feed, epoch activity service, shared context
//! - **utils**: logging, shutdown, heartbeat, display formatting

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

// Re-export commonly used items
pub use application::{
    ActivityError, DashboardContext, EpochActivityService, EpochDataSource, FeedState,
    OrderSource, OrderbookFeed, Theme, TradeActivity, TransferActivity,
};
pub use domain::{
    AirdropBoard, BookSummary, Order, OrderbookLadder, PriceLevel, Side, Trade, TradeRollup,
    TradeSide, Transfer, TransferRollup, WalletRollup, DEFAULT_LEVELS_PER_SIDE,
};
pub use infrastructure::{ApiError, BackendClient, ConfigError, DashboardConfig, QxApiClient};
pub use utils::{init_tracing, init_tracing_with_level, Heartbeat, ShutdownManager};
