//! Epoch backend response envelopes

use crate::domain::{AirdropResult, Epoch, Trade, Transfer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochsResponse {
    pub epochs: Vec<Epoch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochTradesResponse {
    pub epoch_num: u64,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochTransfersResponse {
    pub epoch_num: u64,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropResultsResponse {
    pub epoch_num: u64,
    #[serde(default)]
    pub results: Vec<AirdropResult>,
}

/// `GET /` service banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
}
