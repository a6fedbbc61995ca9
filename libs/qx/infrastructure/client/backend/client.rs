//! Epoch backend client
//!
//! The backend groups exchange activity by epoch and computes the airdrop
//! leaderboard. Responses are wrapped in small envelopes that this client
//! unwraps.

use super::types::{
    AirdropResultsResponse, EpochTradesResponse, EpochTransfersResponse, EpochsResponse,
    ServiceInfo,
};
use crate::domain::{AirdropPreview, AirdropResult, Epoch, Trade, Transfer};
use crate::infrastructure::client::error::{ApiError, Result};
use crate::infrastructure::client::http::{self, build_client, get_json};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Default backend base URL (local development server)
pub const BACKEND_API_BASE_URL: &str = "http://localhost:8000";

/// Epoch backend REST client
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Create client against the default backend URL
    pub fn new() -> Result<Self> {
        Self::with_base_url(BACKEND_API_BASE_URL, http::DEFAULT_TIMEOUT)
    }

    /// Create client with a custom base URL and request timeout
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        http::join_url(&self.base_url, path)
    }

    /// All epochs, oldest first as returned by the backend
    pub async fn get_epochs(&self) -> Result<Vec<Epoch>> {
        let response: EpochsResponse = get_json(&self.client, &self.url("epochs")).await?;
        debug!("Fetched {} epochs", response.epochs.len());
        Ok(response.epochs)
    }

    pub async fn get_epoch(&self, epoch_num: u64) -> Result<Epoch> {
        get_json(&self.client, &self.url(&format!("epochs/{}", epoch_num))).await
    }

    pub async fn get_current_epoch(&self) -> Result<Epoch> {
        get_json(&self.client, &self.url("epochs/current")).await
    }

    pub async fn get_epoch_trades(&self, epoch_num: u64) -> Result<Vec<Trade>> {
        let response: EpochTradesResponse =
            get_json(&self.client, &self.url(&format!("epochs/{}/trades", epoch_num))).await?;
        debug!(
            "Fetched {} trades for epoch {}",
            response.trades.len(),
            response.epoch_num
        );
        Ok(response.trades)
    }

    pub async fn get_epoch_transfers(&self, epoch_num: u64) -> Result<Vec<Transfer>> {
        let response: EpochTransfersResponse = get_json(
            &self.client,
            &self.url(&format!("epochs/{}/transfers", epoch_num)),
        )
        .await?;
        debug!(
            "Fetched {} transfers for epoch {}",
            response.transfers.len(),
            response.epoch_num
        );
        Ok(response.transfers)
    }

    /// Stored (final) airdrop results; empty until the epoch is settled
    pub async fn get_airdrop_results(&self, epoch_num: u64) -> Result<Vec<AirdropResult>> {
        let response: AirdropResultsResponse = get_json(
            &self.client,
            &self.url(&format!("epochs/{}/airdrop-results", epoch_num)),
        )
        .await?;
        Ok(response.results)
    }

    /// Real-time airdrop calculation
    pub async fn get_airdrop_preview(&self, epoch_num: u64) -> Result<AirdropPreview> {
        get_json(
            &self.client,
            &self.url(&format!("epochs/{}/airdrop-preview", epoch_num)),
        )
        .await
    }

    /// Health check against the service banner
    pub async fn health_check(&self) -> Result<ServiceInfo> {
        let url = self.url("");
        debug!("Checking backend connectivity: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::ApiError(format!("Health check failed: {}", status)));
        }

        let info: ServiceInfo = http::decode(&response.text().await?)?;
        info!("Backend up: {} {}", info.service, info.version);
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new().unwrap();
        assert_eq!(client.base_url(), BACKEND_API_BASE_URL);
    }

    #[test]
    fn test_endpoint_urls() {
        let client =
            BackendClient::with_base_url("https://backend.example/api/", Duration::from_secs(1))
                .unwrap();

        assert_eq!(client.url("epochs"), "https://backend.example/api/epochs");
        assert_eq!(
            client.url(&format!("epochs/{}/airdrop-preview", 4)),
            "https://backend.example/api/epochs/4/airdrop-preview"
        );
        assert_eq!(client.url(""), "https://backend.example/api/");
    }

    #[test]
    fn test_trades_envelope() {
        let body = r#"{
            "epoch_num": 2,
            "trades": [{
                "trade_id": 1,
                "tx_hash": "tx",
                "taker_wallet": "A",
                "maker_wallet": "B",
                "tickdate": "2025-01-01T00:00:00",
                "price": "2",
                "quantity": "3",
                "type": "buy",
                "total": "6"
            }]
        }"#;
        let response: EpochTradesResponse = http::decode(body).unwrap();
        assert_eq!(response.epoch_num, 2);
        assert_eq!(response.trades.len(), 1);
        assert_eq!(response.trades[0].notional(), 6.0);
    }

    #[test]
    fn test_transfers_envelope_without_rows() {
        let response: EpochTransfersResponse = http::decode(r#"{"epoch_num": 5}"#).unwrap();
        assert!(response.transfers.is_empty());
    }
}
