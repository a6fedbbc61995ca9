//! Domain layer: exchange records and the pure aggregations built on them.
//!
//! Nothing in here performs I/O. Every derived structure is rebuilt from
//! scratch out of the latest fetched snapshot.

pub mod airdrop;
pub mod chart;
pub mod filter;
pub mod numeric;
pub mod orderbook;
pub mod rollup;
pub mod trade;
pub mod transfer;

pub use airdrop::{AirdropBoard, AirdropPreview, AirdropResult, Epoch};
pub use chart::{AveragePrice, Candle, PriceChange, PricePoint, SeriesPoint, TimeFrame};
pub use filter::{filter_by_wallet, Counterparties};
pub use orderbook::{
    group_to_levels, BookSummary, Order, OrderbookLadder, PriceLevel, Side,
    DEFAULT_LEVELS_PER_SIDE,
};
pub use rollup::{TradeRollup, TransferRollup, TransferWalletRollup, WalletRollup, WalletSideTotal};
pub use trade::{Trade, TradeSide};
pub use transfer::Transfer;
