//! Heartbeat logging for long-running pollers

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Tracks when the last "still alive" line was logged
pub struct Heartbeat {
    interval: Duration,
    last_beat: DateTime<Utc>,
}

impl Heartbeat {
    /// Create a new heartbeat with the given interval in seconds
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs),
            last_beat: Utc::now(),
        }
    }

    /// Check if enough time has passed since the last beat
    pub fn should_beat(&self) -> bool {
        let elapsed = Utc::now().signed_duration_since(self.last_beat);
        elapsed.to_std().unwrap_or_default() >= self.interval
    }

    /// Record a heartbeat at the current time
    pub fn beat(&mut self) {
        self.last_beat = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_always_beats() {
        let heartbeat = Heartbeat::new(0);
        assert!(heartbeat.should_beat());
    }

    #[test]
    fn test_fresh_heartbeat_waits() {
        let mut heartbeat = Heartbeat::new(3600);
        assert!(!heartbeat.should_beat());
        heartbeat.beat();
        assert!(!heartbeat.should_beat());
    }
}
