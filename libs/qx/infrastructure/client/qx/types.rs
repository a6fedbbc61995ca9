//! QX API wire types
//!
//! The QX API speaks camelCase. Numbers are decoded leniently. Trades and
//! transfers convert into the shared domain records.

use crate::domain::numeric::{deserialize_f64, deserialize_opt_f64};
use crate::domain::{Trade, TradeSide, Transfer};
use serde::{Deserialize, Serialize};

/// Listed asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub issuer: String,
    pub name: String,
}

/// Resting order belonging to an entity (any asset)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityOrder {
    pub issuer_id: String,
    pub asset_name: String,
    #[serde(deserialize_with = "deserialize_f64")]
    pub price: f64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub number_of_shares: f64,
}

impl EntityOrder {
    pub fn total(&self) -> f64 {
        self.price * self.number_of_shares
    }
}

/// Executed trade as listed by the QX API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QxTrade {
    #[serde(default)]
    pub issuer: String,
    pub asset_name: String,
    /// True when the taker bought
    pub bid: bool,
    #[serde(deserialize_with = "deserialize_f64")]
    pub price: f64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub number_of_shares: f64,
    pub transaction_hash: String,
    pub taker: String,
    pub maker: String,
    pub tick_time: String,
}

impl From<QxTrade> for Trade {
    fn from(t: QxTrade) -> Self {
        Trade {
            id: t.transaction_hash.clone(),
            tx_hash: t.transaction_hash,
            taker_wallet: t.taker,
            maker_wallet: t.maker,
            timestamp: t.tick_time,
            price: t.price,
            quantity: t.number_of_shares,
            side: if t.bid { TradeSide::Buy } else { TradeSide::Sell },
            total: t.price * t.number_of_shares,
            taker_registered: false,
            maker_registered: false,
        }
    }
}

/// Asset-transfer payload carried in `extraData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferExtraData {
    #[serde(default)]
    pub issuer: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_f64")]
    pub number_of_shares: f64,
    #[serde(default)]
    pub new_owner: String,
}

/// Transfer (or asset issuance) as listed by the QX API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QxTransfer {
    pub hash: String,
    pub source: String,
    /// Share count used when `extraData.numberOfShares` is unusable
    #[serde(default, deserialize_with = "deserialize_opt_f64")]
    pub amount: Option<f64>,
    pub tick: u64,
    pub tick_time: String,
    pub extra_data: TransferExtraData,
}

impl From<QxTransfer> for Transfer {
    fn from(t: QxTransfer) -> Self {
        let amount = if t.extra_data.number_of_shares.is_finite() {
            t.extra_data.number_of_shares
        } else {
            t.amount.filter(|a| a.is_finite()).unwrap_or(f64::NAN)
        };
        Transfer {
            id: t.hash.clone(),
            tx_hash: t.hash,
            source: t.source,
            destination: t.extra_data.new_owner,
            asset: t.extra_data.name,
            amount,
            tick: t.tick,
            timestamp: t.tick_time,
        }
    }
}
