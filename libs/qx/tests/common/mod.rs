//! Common test utilities for qx integration tests
//!
//! Shared fixtures and helpers; not every test binary uses all of them.

#![allow(dead_code)]

use qx::{Order, Trade, TradeSide, Transfer};

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Live API tests only run when explicitly requested
pub fn live_api_enabled() -> bool {
    std::env::var("QX_LIVE_TESTS").is_ok()
}

/// Skip test unless QX_LIVE_TESTS is set
#[macro_export]
macro_rules! skip_unless_live {
    () => {
        if !$crate::common::live_api_enabled() {
            println!("Skipping test: set QX_LIVE_TESTS to hit the real APIs");
            return;
        }
    };
}

pub mod fixtures {
    //! Test fixtures for common data types

    use super::*;

    pub fn order(price: f64, shares: f64) -> Order {
        Order::new(price, shares)
    }

    pub fn trade(taker: &str, maker: &str, side: TradeSide, price: f64, quantity: f64) -> Trade {
        Trade {
            id: format!("{}:{}:{}", taker, maker, price),
            tx_hash: String::new(),
            taker_wallet: taker.to_string(),
            maker_wallet: maker.to_string(),
            timestamp: "2025-03-01T12:00:00Z".to_string(),
            price,
            quantity,
            side,
            total: price * quantity,
            taker_registered: false,
            maker_registered: false,
        }
    }

    pub fn transfer(source: &str, destination: &str, amount: f64) -> Transfer {
        Transfer {
            id: format!("{}:{}:{}", source, destination, amount),
            tx_hash: String::new(),
            source: source.to_string(),
            destination: destination.to_string(),
            asset: "QDOGE".to_string(),
            amount,
            tick: 0,
            timestamp: "2025-03-01T12:00:00Z".to_string(),
        }
    }

    /// A small, realistic epoch: W1 buys twice, W2 sells and buys once
    pub fn epoch_trades() -> Vec<Trade> {
        vec![
            trade("W1", "W2", TradeSide::Buy, 10.0, 100.0),
            trade("W2", "W1", TradeSide::Sell, 11.0, 50.0),
            trade("W2", "W3", TradeSide::Buy, 9.0, 20.0),
        ]
    }
}
