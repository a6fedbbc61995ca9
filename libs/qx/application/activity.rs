//! Epoch activity: trade/transfer roll-ups and the airdrop leaderboard

use crate::domain::{
    filter_by_wallet, AirdropBoard, AirdropPreview, AirdropResult, Epoch, Trade, TradeRollup,
    Transfer, TransferRollup,
};
use crate::infrastructure::client::{ApiError, BackendClient};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Backend request failed: {0}")]
    Backend(#[from] ApiError),

    #[error("Epoch {epoch}: {message}")]
    Epoch { epoch: u64, message: String },
}

pub type Result<T> = std::result::Result<T, ActivityError>;

/// Backend reads needed by the activity views
#[async_trait]
pub trait EpochDataSource: Send + Sync {
    async fn current_epoch(&self) -> std::result::Result<Epoch, ApiError>;
    async fn epoch_trades(&self, epoch_num: u64) -> std::result::Result<Vec<Trade>, ApiError>;
    async fn epoch_transfers(&self, epoch_num: u64)
        -> std::result::Result<Vec<Transfer>, ApiError>;
    async fn airdrop_results(
        &self,
        epoch_num: u64,
    ) -> std::result::Result<Vec<AirdropResult>, ApiError>;
    async fn airdrop_preview(&self, epoch_num: u64)
        -> std::result::Result<AirdropPreview, ApiError>;
}

#[async_trait]
impl EpochDataSource for BackendClient {
    async fn current_epoch(&self) -> std::result::Result<Epoch, ApiError> {
        self.get_current_epoch().await
    }

    async fn epoch_trades(&self, epoch_num: u64) -> std::result::Result<Vec<Trade>, ApiError> {
        self.get_epoch_trades(epoch_num).await
    }

    async fn epoch_transfers(
        &self,
        epoch_num: u64,
    ) -> std::result::Result<Vec<Transfer>, ApiError> {
        self.get_epoch_transfers(epoch_num).await
    }

    async fn airdrop_results(
        &self,
        epoch_num: u64,
    ) -> std::result::Result<Vec<AirdropResult>, ApiError> {
        self.get_airdrop_results(epoch_num).await
    }

    async fn airdrop_preview(
        &self,
        epoch_num: u64,
    ) -> std::result::Result<AirdropPreview, ApiError> {
        self.get_airdrop_preview(epoch_num).await
    }
}

/// Trade roll-up for one epoch after the search filter
#[derive(Debug, Clone)]
pub struct TradeActivity {
    pub epoch_num: u64,
    pub total_records: usize,
    pub filtered_records: usize,
    pub rollup: TradeRollup,
}

/// Transfer roll-up for one epoch after the search filter
#[derive(Debug, Clone)]
pub struct TransferActivity {
    pub epoch_num: u64,
    pub total_records: usize,
    pub filtered_records: usize,
    pub rollup: TransferRollup,
}

pub struct EpochActivityService<S: EpochDataSource> {
    source: Arc<S>,
}

impl<S: EpochDataSource> EpochActivityService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Explicit epoch, or the backend's current one
    pub async fn resolve_epoch(&self, epoch: Option<u64>) -> Result<u64> {
        match epoch {
            Some(epoch_num) => Ok(epoch_num),
            None => {
                let current = self.source.current_epoch().await?;
                debug!(
                    "Current epoch is {} (ongoing: {})",
                    current.epoch_num, current.is_ongoing
                );
                Ok(current.epoch_num)
            }
        }
    }

    pub async fn trade_activity(&self, epoch_num: u64, term: &str) -> Result<TradeActivity> {
        let trades = self.source.epoch_trades(epoch_num).await?;
        let filtered = filter_by_wallet(&trades, term);

        info!(
            "Epoch {}: {} trades ({} after filter)",
            epoch_num,
            trades.len(),
            filtered.len()
        );

        Ok(TradeActivity {
            epoch_num,
            total_records: trades.len(),
            filtered_records: filtered.len(),
            rollup: TradeRollup::aggregate(&filtered),
        })
    }

    pub async fn transfer_activity(&self, epoch_num: u64, term: &str) -> Result<TransferActivity> {
        let transfers = self.source.epoch_transfers(epoch_num).await?;
        let filtered = filter_by_wallet(&transfers, term);

        info!(
            "Epoch {}: {} transfers ({} after filter)",
            epoch_num,
            transfers.len(),
            filtered.len()
        );

        Ok(TransferActivity {
            epoch_num,
            total_records: transfers.len(),
            filtered_records: filtered.len(),
            rollup: TransferRollup::aggregate(&filtered),
        })
    }

    /// Stored results when present, otherwise the live preview
    pub async fn airdrop_board(&self, epoch_num: u64) -> Result<AirdropBoard> {
        match self.source.airdrop_results(epoch_num).await {
            Ok(results) if !results.is_empty() => {
                return Ok(AirdropBoard::from_stored(epoch_num, results));
            }
            Ok(_) => debug!("No stored airdrop results for epoch {}", epoch_num),
            Err(e) => warn!(
                "Stored airdrop results for epoch {} unavailable: {}",
                epoch_num, e
            ),
        }

        let preview = self
            .source
            .airdrop_preview(epoch_num)
            .await
            .map_err(|e| ActivityError::Epoch {
                epoch: epoch_num,
                message: format!("airdrop preview failed: {}", e),
            })?;

        Ok(AirdropBoard::from_preview(preview))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeSide;

    #[derive(Default)]
    struct FakeBackend {
        trades: Vec<Trade>,
        transfers: Vec<Transfer>,
        stored: Option<Vec<AirdropResult>>,
        preview_fails: bool,
    }

    fn trade(taker: &str, maker: &str, side: TradeSide, price: f64, quantity: f64) -> Trade {
        Trade {
            id: format!("{}-{}", taker, maker),
            tx_hash: String::new(),
            taker_wallet: taker.to_string(),
            maker_wallet: maker.to_string(),
            timestamp: "2025-01-01T00:00:00Z".to_string(),
            price,
            quantity,
            side,
            total: price * quantity,
            taker_registered: false,
            maker_registered: false,
        }
    }

    fn transfer(source: &str, destination: &str, amount: f64) -> Transfer {
        Transfer {
            id: format!("{}-{}", source, destination),
            tx_hash: String::new(),
            source: source.to_string(),
            destination: destination.to_string(),
            asset: "QDOGE".to_string(),
            amount,
            tick: 0,
            timestamp: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn result(rank: u32, wallet: &str) -> AirdropResult {
        AirdropResult {
            rank,
            wallet_id: wallet.to_string(),
            buy_amount: 100.0,
            airdrop_amount: 10.0,
        }
    }

    #[async_trait]
    impl EpochDataSource for FakeBackend {
        async fn current_epoch(&self) -> std::result::Result<Epoch, ApiError> {
            Ok(Epoch {
                epoch_num: 7,
                start_tick: "2025-01-01T00:00:00Z".to_string(),
                end_tick: None,
                total_airdrop: 1_000_000.0,
                is_ongoing: true,
            })
        }

        async fn epoch_trades(&self, _: u64) -> std::result::Result<Vec<Trade>, ApiError> {
            Ok(self.trades.clone())
        }

        async fn epoch_transfers(&self, _: u64) -> std::result::Result<Vec<Transfer>, ApiError> {
            Ok(self.transfers.clone())
        }

        async fn airdrop_results(
            &self,
            _: u64,
        ) -> std::result::Result<Vec<AirdropResult>, ApiError> {
            self.stored
                .clone()
                .ok_or_else(|| ApiError::ApiError("HTTP 500: boom".to_string()))
        }

        async fn airdrop_preview(
            &self,
            epoch_num: u64,
        ) -> std::result::Result<AirdropPreview, ApiError> {
            if self.preview_fails {
                return Err(ApiError::RateLimitExceeded);
            }
            Ok(AirdropPreview {
                epoch_num,
                total_airdrop: 500.0,
                distributed: 0.0,
                is_ongoing: true,
                preview: true,
                results: vec![result(1, "PREVIEW")],
            })
        }
    }

    fn service(backend: FakeBackend) -> EpochActivityService<FakeBackend> {
        EpochActivityService::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn test_resolve_epoch() {
        let svc = service(FakeBackend::default());
        assert_eq!(svc.resolve_epoch(Some(3)).await.unwrap(), 3);
        assert_eq!(svc.resolve_epoch(None).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_trade_activity_with_filter() {
        let svc = service(FakeBackend {
            trades: vec![
                trade("A", "B", TradeSide::Buy, 10.0, 5.0),
                trade("B", "A", TradeSide::Sell, 12.0, 1.0),
                trade("C", "D", TradeSide::Buy, 1.0, 1.0),
            ],
            ..Default::default()
        });

        let all = svc.trade_activity(1, "").await.unwrap();
        assert_eq!(all.total_records, 3);
        assert_eq!(all.filtered_records, 3);
        assert_eq!(all.rollup.totals.len(), 4);

        let only_a = svc.trade_activity(1, "a").await.unwrap();
        assert_eq!(only_a.total_records, 3);
        assert_eq!(only_a.filtered_records, 2);
        assert_eq!(only_a.rollup.buyers[0].wallet, "A");
        assert_eq!(only_a.rollup.buyers[0].amount, 62.0);
    }

    #[tokio::test]
    async fn test_transfer_activity() {
        let svc = service(FakeBackend {
            transfers: vec![transfer("S", "R", 40.0), transfer("S", "Q", 10.0)],
            ..Default::default()
        });

        let activity = svc.transfer_activity(2, "  ").await.unwrap();
        assert_eq!(activity.filtered_records, 2);
        assert_eq!(activity.rollup.senders[0].wallet, "S");
        assert_eq!(activity.rollup.senders[0].amount, 50.0);
        assert_eq!(activity.rollup.senders[0].count, 2);
    }

    #[tokio::test]
    async fn test_airdrop_prefers_stored_results() {
        let svc = service(FakeBackend {
            stored: Some(vec![result(1, "STORED")]),
            ..Default::default()
        });

        let board = svc.airdrop_board(4).await.unwrap();
        assert!(!board.is_preview);
        assert_eq!(board.results[0].wallet_id, "STORED");
    }

    #[tokio::test]
    async fn test_airdrop_falls_back_to_preview() {
        // Empty stored list
        let svc = service(FakeBackend {
            stored: Some(Vec::new()),
            ..Default::default()
        });
        let board = svc.airdrop_board(4).await.unwrap();
        assert!(board.is_preview);
        assert_eq!(board.total_airdrop, Some(500.0));

        // Stored request failing
        let svc = service(FakeBackend::default());
        let board = svc.airdrop_board(4).await.unwrap();
        assert!(board.is_preview);
        assert_eq!(board.results[0].wallet_id, "PREVIEW");
    }

    #[tokio::test]
    async fn test_airdrop_preview_failure_is_reported() {
        let svc = service(FakeBackend {
            preview_fails: true,
            ..Default::default()
        });

        let err = svc.airdrop_board(9).await.unwrap_err();
        assert!(matches!(err, ActivityError::Epoch { epoch: 9, .. }));
    }
}
