//! Epochs and the airdrop leaderboard

use super::numeric::deserialize_f64;
use serde::{Deserialize, Serialize};

/// Trading epoch as tracked by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epoch {
    pub epoch_num: u64,
    pub start_tick: String,
    #[serde(default)]
    pub end_tick: Option<String>,
    #[serde(deserialize_with = "deserialize_f64")]
    pub total_airdrop: f64,
    pub is_ongoing: bool,
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropResult {
    pub rank: u32,
    pub wallet_id: String,
    #[serde(deserialize_with = "deserialize_f64")]
    pub buy_amount: f64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub airdrop_amount: f64,
}

/// Live calculation for an epoch without stored results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropPreview {
    pub epoch_num: u64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub total_airdrop: f64,
    #[serde(default, deserialize_with = "deserialize_f64")]
    pub distributed: f64,
    #[serde(default)]
    pub is_ongoing: bool,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub results: Vec<AirdropResult>,
}

/// Leaderboard as shown to the user: stored results, or the preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropBoard {
    pub epoch_num: u64,
    pub results: Vec<AirdropResult>,
    pub is_preview: bool,
    /// Only known when the board came from a preview
    pub total_airdrop: Option<f64>,
}

impl AirdropBoard {
    pub fn from_stored(epoch_num: u64, results: Vec<AirdropResult>) -> Self {
        Self {
            epoch_num,
            results,
            is_preview: false,
            total_airdrop: None,
        }
    }

    pub fn from_preview(preview: AirdropPreview) -> Self {
        Self {
            epoch_num: preview.epoch_num,
            results: preview.results,
            is_preview: preview.preview,
            total_airdrop: Some(preview.total_airdrop).filter(|t| *t != 0.0 && t.is_finite()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Top three rows
    pub fn podium(&self) -> impl Iterator<Item = &AirdropResult> {
        self.results.iter().filter(|r| medal(r.rank).is_some())
    }

    pub fn find_wallet(&self, wallet: &str) -> Option<&AirdropResult> {
        self.results.iter().find(|r| r.wallet_id == wallet)
    }
}

/// Medal label for ranks 1-3
pub fn medal(rank: u32) -> Option<&'static str> {
    match rank {
        1 => Some("gold"),
        2 => Some("silver"),
        3 => Some("bronze"),
        _ => None,
    }
}
