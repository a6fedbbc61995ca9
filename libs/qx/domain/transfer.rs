//! Asset transfer records

use super::numeric::{deserialize_f64, deserialize_id};
use super::trade::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One asset transfer between two wallets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    #[serde(rename = "transfer_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub tx_hash: String,
    pub source: String,
    pub destination: String,
    #[serde(rename = "asset_name")]
    pub asset: String,
    #[serde(deserialize_with = "deserialize_f64")]
    pub amount: f64,
    #[serde(default)]
    pub tick: u64,
    #[serde(rename = "tickdate")]
    pub timestamp: String,
}

impl Transfer {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}
