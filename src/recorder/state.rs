//! Recording state management
//!
//! Defines the session state machine, session limits, and the elapsed-time
//! display helper.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Hard cap on a single capture, in seconds (3 minutes)
pub const MAX_DURATION_SECS: u32 = 180;

/// Current state of the recording system.
///
/// The two-state machine is explicit: `start()` refuses to run unless the
/// state is `Idle`, so a second concurrent capture can never leak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    /// No recording in progress
    Idle,
    /// Currently recording
    Active,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Configuration for a capture session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hard cap on session length, in seconds
    pub max_duration_secs: u32,

    /// Interval between elapsed-counter ticks
    pub tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: MAX_DURATION_SECS,
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Format an elapsed-seconds counter as `MM:SS`, zero-padded
pub fn format_elapsed(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(RecorderState::default(), RecorderState::Idle);
    }

    #[test]
    fn test_default_config_matches_cap() {
        let config = SessionConfig::default();
        assert_eq!(config.max_duration_secs, 180);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(MAX_DURATION_SECS), "03:00");
    }
}
