//! QX API client
//!
//! Read-only access to the exchange: assets, order books, trades, transfers
//! and the average-price chart. Every endpoint returns a bare JSON array.

use super::types::{Asset, EntityOrder, QxTrade, QxTransfer};
use crate::domain::{AveragePrice, Order, Trade, Transfer};
use crate::infrastructure::client::error::Result;
use crate::infrastructure::client::http::{self, build_client, get_json, path_segment};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default QX API base URL
pub const QX_API_BASE_URL: &str = "https://api.quhub.app/service";

/// QX exchange REST client
#[derive(Debug, Clone)]
pub struct QxApiClient {
    base_url: String,
    client: Client,
}

impl QxApiClient {
    /// Create client against the public QX API
    pub fn new() -> Result<Self> {
        Self::with_base_url(QX_API_BASE_URL, http::DEFAULT_TIMEOUT)
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
        http::join_url(&self.base_url, &format!("v1/qx/{}", path))
    }

    fn asset_url(&self, issuer: &str, asset: &str, tail: &str) -> Result<String> {
        let issuer = path_segment("issuer", issuer)?;
        let asset = path_segment("asset", asset)?;
        Ok(self.url(&format!("issuer/{}/asset/{}/{}", issuer, asset, tail)))
    }

    fn entity_url(&self, entity: &str, tail: &str) -> Result<String> {
        let entity = path_segment("entity", entity)?;
        Ok(self.url(&format!("entity/{}/{}", entity, tail)))
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        // Some endpoints answer `null` for an empty listing
        let items: Option<Vec<T>> = get_json(&self.client, url).await?;
        let items = items.unwrap_or_default();
        debug!("Fetched {} items from {}", items.len(), url);
        Ok(items)
    }

    async fn get_trades_at(&self, url: &str) -> Result<Vec<Trade>> {
        let trades: Vec<QxTrade> = self.get_list(url).await?;
        Ok(trades.into_iter().map(Trade::from).collect())
    }

    async fn get_transfers_at(&self, url: &str) -> Result<Vec<Transfer>> {
        let transfers: Vec<QxTransfer> = self.get_list(url).await?;
        Ok(transfers.into_iter().map(Transfer::from).collect())
    }

    // =========================================================================
    // Exchange-wide listings
    // =========================================================================

    pub async fn get_assets(&self) -> Result<Vec<Asset>> {
        self.get_list(&self.url("assets")).await
    }

    pub async fn get_trades(&self) -> Result<Vec<Trade>> {
        self.get_trades_at(&self.url("trades")).await
    }

    pub async fn get_token_trades(&self) -> Result<Vec<Trade>> {
        self.get_trades_at(&self.url("token-trades")).await
    }

    pub async fn get_smart_contract_trades(&self) -> Result<Vec<Trade>> {
        self.get_trades_at(&self.url("smart-contract-trades")).await
    }

    pub async fn get_transfers(&self) -> Result<Vec<Transfer>> {
        self.get_transfers_at(&self.url("transfers")).await
    }

    /// Asset issuance events (same shape as transfers)
    pub async fn get_issued_assets(&self) -> Result<Vec<QxTransfer>> {
        self.get_list(&self.url("issued-assets")).await
    }

    // =========================================================================
    // Entity (wallet) views
    // =========================================================================

    pub async fn get_entity_asks(&self, entity: &str) -> Result<Vec<EntityOrder>> {
        self.get_list(&self.entity_url(entity, "asks")?).await
    }

    pub async fn get_entity_bids(&self, entity: &str) -> Result<Vec<EntityOrder>> {
        self.get_list(&self.entity_url(entity, "bids")?).await
    }

    pub async fn get_entity_trades(&self, entity: &str) -> Result<Vec<Trade>> {
        self.get_trades_at(&self.entity_url(entity, "trades")?).await
    }

    pub async fn get_entity_transfers(&self, entity: &str) -> Result<Vec<Transfer>> {
        self.get_transfers_at(&self.entity_url(entity, "transfers")?)
            .await
    }

    // =========================================================================
    // Asset views
    // =========================================================================

    pub async fn get_asset_asks(&self, issuer: &str, asset: &str) -> Result<Vec<Order>> {
        self.get_list(&self.asset_url(issuer, asset, "asks")?).await
    }

    pub async fn get_asset_bids(&self, issuer: &str, asset: &str) -> Result<Vec<Order>> {
        self.get_list(&self.asset_url(issuer, asset, "bids")?).await
    }

    pub async fn get_asset_trades(&self, issuer: &str, asset: &str) -> Result<Vec<Trade>> {
        self.get_trades_at(&self.asset_url(issuer, asset, "trades")?)
            .await
    }

    pub async fn get_asset_transfers(&self, issuer: &str, asset: &str) -> Result<Vec<Transfer>> {
        self.get_transfers_at(&self.asset_url(issuer, asset, "transfers")?)
            .await
    }

    pub async fn get_asset_chart_average_price(
        &self,
        issuer: &str,
        asset: &str,
    ) -> Result<Vec<AveragePrice>> {
        self.get_list(&self.asset_url(issuer, asset, "chart/average-price")?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::client::ApiError;

    #[test]
    fn test_client_creation() {
        let client = QxApiClient::new().unwrap();
        assert_eq!(client.base_url(), QX_API_BASE_URL);
    }

    #[test]
    fn test_endpoint_urls() {
        let client =
            QxApiClient::with_base_url("http://localhost:9000/", Duration::from_secs(1)).unwrap();

        assert_eq!(client.url("trades"), "http://localhost:9000/v1/qx/trades");
        assert_eq!(
            client.asset_url("ISSUER", "QDOGE", "asks").unwrap(),
            "http://localhost:9000/v1/qx/issuer/ISSUER/asset/QDOGE/asks"
        );
        assert_eq!(
            client.asset_url("ISSUER", "QDOGE", "chart/average-price").unwrap(),
            "http://localhost:9000/v1/qx/issuer/ISSUER/asset/QDOGE/chart/average-price"
        );
        assert_eq!(
            client.entity_url("WALLET", "transfers").unwrap(),
            "http://localhost:9000/v1/qx/entity/WALLET/transfers"
        );
    }

    #[tokio::test]
    async fn test_empty_identifier_rejected_before_request() {
        let client = QxApiClient::new().unwrap();
        let result = client.get_asset_asks("", "QDOGE").await;
        assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
    }
}
