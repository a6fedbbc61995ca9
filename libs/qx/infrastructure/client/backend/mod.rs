//! Epoch backend client
//!
//! # Example
//!
//! ```rust,ignore
//! use qx::infrastructure::client::BackendClient;
//!
//! let client = BackendClient::with_base_url("http://localhost:8000", Duration::from_secs(30))?;
//! let epoch = client.get_current_epoch().await?;
//! let trades = client.get_epoch_trades(epoch.epoch_num).await?;
//! ```

mod client;
mod types;

pub use client::{BackendClient, BACKEND_API_BASE_URL};
pub use types::{
    AirdropResultsResponse, EpochTradesResponse, EpochTransfersResponse, EpochsResponse,
    ServiceInfo,
};
