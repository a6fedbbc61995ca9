//! Trade records
//!
//! Normalized shape shared by the epoch backend (`/epochs/{n}/trades`) and
//! the QX API trade listings. Wire-specific shapes convert into [`Trade`] in
//! the client layer.

use super::numeric::{deserialize_f64, deserialize_id};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn label(&self) -> &'static str {
        match self {
            TradeSide::Buy => "Buy",
            TradeSide::Sell => "Sell",
        }
    }
}

/// One executed trade
///
/// `side` is the taker's side: on a `buy` the taker is the buyer and the
/// maker the seller, on a `sell` the roles swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "trade_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub tx_hash: String,
    pub taker_wallet: String,
    pub maker_wallet: String,
    #[serde(rename = "tickdate")]
    pub timestamp: String,
    #[serde(deserialize_with = "deserialize_f64")]
    pub price: f64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub quantity: f64,
    #[serde(rename = "type")]
    pub side: TradeSide,
    #[serde(default, deserialize_with = "deserialize_f64")]
    pub total: f64,
    #[serde(default)]
    pub taker_registered: bool,
    #[serde(default)]
    pub maker_registered: bool,
}

impl Trade {
    /// Wallet that received tokens
    pub fn buyer(&self) -> &str {
        match self.side {
            TradeSide::Buy => &self.taker_wallet,
            TradeSide::Sell => &self.maker_wallet,
        }
    }

    /// Wallet that gave up tokens
    pub fn seller(&self) -> &str {
        match self.side {
            TradeSide::Buy => &self.maker_wallet,
            TradeSide::Sell => &self.taker_wallet,
        }
    }

    pub fn buyer_registered(&self) -> bool {
        match self.side {
            TradeSide::Buy => self.taker_registered,
            TradeSide::Sell => self.maker_registered,
        }
    }

    pub fn seller_registered(&self) -> bool {
        match self.side {
            TradeSide::Buy => self.maker_registered,
            TradeSide::Sell => self.taker_registered,
        }
    }

    /// Traded value in the quote currency
    #[inline]
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }

    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Parse an API timestamp: RFC 3339, or a naive ISO string taken as UTC
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
