//! QDOGE Dashboard - Main Library
//!
//! Thin presentation layer over the `qx` workspace crate.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI parsing, config paths)
//! - **qx**: Clients, domain aggregation and the polling feed (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use qdoge_dashboard::bin_common::{load_config_from_env, ConfigType};
//! use qdoge_dashboard::qx::OrderbookFeed;
//! ```

// Re-export workspace library for convenience
pub use qx;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, parse_args, ConfigType, EpochArg};
}
