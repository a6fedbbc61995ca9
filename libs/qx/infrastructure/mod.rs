//! Infrastructure Layer
//!
//! Implementations of external interfaces (REST clients, configuration).
//! This layer depends on the domain layer but not on the application layer.

pub mod client;
pub mod config;

// Re-export commonly used types from client
pub use client::{ApiError, BackendClient, QxApiClient};

// Re-export config types
pub use config::{ConfigError, DashboardConfig};
