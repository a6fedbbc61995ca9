//! QX exchange API client
//!
//! # Example
//!
//! ```rust,ignore
//! use qx::infrastructure::client::QxApiClient;
//!
//! let client = QxApiClient::new()?;
//! let asks = client.get_asset_asks("ISSUER_ID", "QDOGE").await?;
//! ```

mod client;
mod types;

pub use client::{QxApiClient, QX_API_BASE_URL};
pub use types::{Asset, EntityOrder, QxTrade, QxTransfer, TransferExtraData};
