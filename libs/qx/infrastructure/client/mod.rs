//! Dashboard API clients
//!
//! Two read-only REST services feed the dashboard:
//!
//! - **qx**: the public QX exchange API (orders, trades, transfers, charts)
//! - **backend**: the epoch backend (epoch trades/transfers, airdrops)

pub mod backend;
mod error;
pub mod http;
pub mod qx;

pub use backend::{BackendClient, BACKEND_API_BASE_URL};
pub use error::{ApiError, Result};
pub use qx::{QxApiClient, QX_API_BASE_URL};
