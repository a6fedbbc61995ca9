//! Shared dashboard context
//!
//! One `Arc<DashboardContext>` is created at startup and handed to every
//! view. Settings live in a watch channel so readers get a consistent
//! snapshot and can wait for changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Latest network tick as reported by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInfo {
    pub tick: u64,
    pub epoch: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiSettings {
    pub theme: Theme,
    /// Connected wallet identity, if any
    pub wallet: Option<String>,
    pub tick: Option<TickInfo>,
}

pub struct DashboardContext {
    settings: watch::Sender<UiSettings>,
}

impl DashboardContext {
    pub fn new(initial: UiSettings) -> Self {
        let (settings, _) = watch::channel(initial);
        Self { settings }
    }

    pub fn snapshot(&self) -> UiSettings {
        self.settings.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiSettings> {
        self.settings.subscribe()
    }

    pub fn theme(&self) -> Theme {
        self.settings.borrow().theme
    }

    pub fn set_theme(&self, theme: Theme) {
        self.settings.send_if_modified(|s| {
            let changed = s.theme != theme;
            s.theme = theme;
            changed
        });
    }

    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::default();
        self.settings.send_modify(|s| {
            s.theme = s.theme.toggled();
            theme = s.theme;
        });
        theme
    }

    /// Blank identities are ignored
    pub fn connect_wallet(&self, wallet: &str) {
        let wallet = wallet.trim();
        if wallet.is_empty() {
            return;
        }

        let changed = self.settings.send_if_modified(|s| {
            if s.wallet.as_deref() == Some(wallet) {
                return false;
            }
            s.wallet = Some(wallet.to_string());
            true
        });
        if changed {
            info!("Wallet connected: {}", wallet);
        }
    }

    pub fn disconnect_wallet(&self) {
        if self.settings.send_if_modified(|s| s.wallet.take().is_some()) {
            info!("Wallet disconnected");
        }
    }

    pub fn set_tick_info(&self, tick: TickInfo) {
        self.settings.send_if_modified(|s| {
            let changed = s.tick != Some(tick);
            s.tick = Some(tick);
            changed
        });
    }

    /// Whether `wallet` is the connected identity
    pub fn is_own_wallet(&self, wallet: &str) -> bool {
        self.settings.borrow().wallet.as_deref() == Some(wallet)
    }
}

impl Default for DashboardContext {
    fn default() -> Self {
        Self::new(UiSettings::default())
    }
}
