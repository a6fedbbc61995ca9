//! CLI utilities for binaries
//!
//! Handles configuration path lookup and argument parsing
//! for all binary executables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Dashboard configuration (config/dashboard.yaml)
    Dashboard,
    /// Custom path, used as given
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Dashboard => "config/dashboard.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        "DASHBOARD_CONFIG_PATH"
    }
}

/// Load configuration path from environment or use default
///
/// A custom path always wins over the environment.
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    match config_type {
        ConfigType::Custom(path) => path.into(),
        other => std::env::var(other.env_var_name())
            .unwrap_or_else(|_| other.default_path().to_string())
            .into(),
    }
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Epoch selector from the command line: a number, or `current`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochArg {
    Current,
    Number(u64),
}

impl EpochArg {
    pub fn parse(arg: Option<&str>) -> Result<Self, String> {
        match arg.map(str::trim) {
            None | Some("") => Ok(EpochArg::Current),
            Some(s) if s.eq_ignore_ascii_case("current") => Ok(EpochArg::Current),
            Some(s) => s
                .parse::<u64>()
                .map(EpochArg::Number)
                .map_err(|_| format!("invalid epoch '{}': expected a number or 'current'", s)),
        }
    }

    pub fn as_option(&self) -> Option<u64> {
        match self {
            EpochArg::Current => None,
            EpochArg::Number(n) => Some(*n),
        }
    }
}
