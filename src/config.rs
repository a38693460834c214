//! Client configuration
//!
//! The only configurable surface is the base URL of the recording store.

use serde::{Deserialize, Serialize};

/// Default recording store origin
pub const DEFAULT_API_BASE: &str = "https://screen-recording-app-backened-2.onrender.com";

/// Environment variable overriding the store origin
pub const API_BASE_ENV: &str = "SCREENREEL_API_BASE";

/// Configuration for the upload client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the recording store, no trailing slash
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Build from the environment, falling back to the default origin
    pub fn from_env() -> Self {
        match std::env::var(API_BASE_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value),
            _ => Self::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("https://rec.example.com/");
        assert_eq!(config.base_url, "https://rec.example.com");
    }

    #[test]
    fn test_default_points_at_fixed_origin() {
        assert_eq!(ClientConfig::default().base_url, DEFAULT_API_BASE);
    }
}
