//! Orderbook domain entities
//!
//! Turns the flat resting-order lists returned by the QX API into a bounded
//! depth ladder per side. The ladder is rebuilt in full on every fetch; there
//! is no incremental patching.

use super::numeric::{deserialize_f64, finite_or_zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of price levels shown per side in the cockpit
pub const DEFAULT_LEVELS_PER_SIDE: usize = 24;

// =============================================================================
// Side / Order - raw API input
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Bid => "BID",
            Side::Ask => "ASK",
        }
    }
}

/// One resting limit order as returned by the asks/bids endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "deserialize_f64")]
    pub price: f64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub number_of_shares: f64,
}

impl Order {
    pub fn new(price: f64, number_of_shares: f64) -> Self {
        Self {
            price,
            number_of_shares,
        }
    }
}

// =============================================================================
// PriceLevel - one row of the depth ladder
// =============================================================================

/// Aggregated price level with running depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevel {
    pub side: Side,
    pub price: f64,
    /// Sum of shares resting at this price
    pub size: f64,
    /// price * size
    pub total: f64,
    /// Running size from the best price down to this level
    pub cumulative_size: f64,
    /// cumulative_size / largest cumulative_size on this side, in [0, 1]
    pub depth_fraction: f64,
}

/// Group orders by exact price into a sorted, truncated, cumulative ladder.
///
/// Asks come back ascending (best ask first), bids descending (best bid
/// first). Only the `max_levels` prices closest to the spread are kept.
/// Orders with a non-finite price are skipped; non-finite or negative share
/// counts count as zero.
pub fn group_to_levels(side: Side, orders: &[Order], max_levels: usize) -> Vec<PriceLevel> {
    // Keyed by bit pattern: exact equality, no bucketing. `+ 0.0` folds -0.0 into 0.0.
    let mut index: HashMap<u64, usize> = HashMap::with_capacity(orders.len());
    let mut grouped: Vec<(f64, f64)> = Vec::with_capacity(orders.len());

    for order in orders {
        if !order.price.is_finite() {
            continue;
        }
        let price = order.price + 0.0;
        let shares = finite_or_zero(order.number_of_shares).max(0.0);

        match index.get(&price.to_bits()) {
            Some(&idx) => grouped[idx].1 += shares,
            None => {
                index.insert(price.to_bits(), grouped.len());
                grouped.push((price, shares));
            }
        }
    }

    match side {
        Side::Ask => grouped.sort_by(|a, b| a.0.total_cmp(&b.0)),
        Side::Bid => grouped.sort_by(|a, b| b.0.total_cmp(&a.0)),
    }
    grouped.truncate(max_levels);

    let mut cumulative = 0.0;
    let with_cum: Vec<(f64, f64, f64)> = grouped
        .into_iter()
        .map(|(price, size)| {
            cumulative += size;
            (price, size, cumulative)
        })
        .collect();

    let max_cumulative = with_cum.last().map(|(_, _, cum)| *cum).unwrap_or(0.0);

    with_cum
        .into_iter()
        .map(|(price, size, cumulative_size)| PriceLevel {
            side,
            price,
            size,
            total: price * size,
            cumulative_size,
            depth_fraction: if max_cumulative > 0.0 {
                cumulative_size / max_cumulative
            } else {
                0.0
            },
        })
        .collect()
}

// =============================================================================
// OrderbookLadder - both sides plus derived book metrics
// =============================================================================

/// Best prices and spread derived from a ladder. Missing values are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub best_bid: Option<f64>,
    pub best_ask: Option<f64>,
    pub mid: Option<f64>,
    pub spread: Option<f64>,
}

/// Depth ladder for one asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderbookLadder {
    /// Ascending by price, best ask first
    pub asks: Vec<PriceLevel>,
    /// Descending by price, best bid first
    pub bids: Vec<PriceLevel>,
}

impl OrderbookLadder {
    /// Build both sides from raw order snapshots
    pub fn build(asks: &[Order], bids: &[Order], max_levels: usize) -> Self {
        Self {
            asks: group_to_levels(Side::Ask, asks, max_levels),
            bids: group_to_levels(Side::Bid, bids, max_levels),
        }
    }

    /// Lowest ask price
    #[inline]
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|level| level.price)
    }

    /// Highest bid price
    #[inline]
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|level| level.price)
    }

    /// Average of best bid and best ask
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// best_ask - best_bid
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            mid: self.mid_price(),
            spread: self.spread(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// Levels for one side
    pub fn side(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }

    /// Format ladder for logging
    pub fn format_summary(&self) -> String {
        let fmt = |value: Option<f64>| {
            value
                .map(|v| format!("{}", v))
                .unwrap_or_else(|| "---".to_string())
        };

        format!(
            "Bid: {} | Ask: {} | Mid: {} | Spread: {}",
            fmt(self.best_bid()),
            fmt(self.best_ask()),
            self.mid_price()
                .map(|m| format!("{:.1}", m))
                .unwrap_or_else(|| "---".to_string()),
            fmt(self.spread()),
        )
    }

    /// Format top N levels per side for logging
    pub fn format_depth(&self, max_levels: usize) -> String {
        let render = |levels: &[PriceLevel]| -> String {
            levels
                .iter()
                .take(max_levels)
                .map(|l| format!("{}({}|{:.0}%)", l.price, l.size, l.depth_fraction * 100.0))
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!("  Asks: {}\n  Bids: {}", render(&self.asks), render(&self.bids))
    }
}
