//! Widget configuration types.
//!
//! `WidgetConfig` represents the `config.toml` in the Banter data directory.
//! Every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use std::time::Duration;

use crate::error::ConfigError;

/// Top-level configuration for the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the chat backend (endpoints are appended to it).
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Message playback pacing.
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Placeholder shown when an entry turn does not provide one.
    #[serde(default = "default_placeholder")]
    pub default_placeholder: String,

    /// Minimum characters (after whitespace removal) for a phone number.
    #[serde(default = "default_min_phone_digits")]
    pub min_phone_digits: usize,

    /// Sending this exact value routes to the restart flow.
    #[serde(default = "default_restart_token")]
    pub restart_token: String,

    /// Asset referenced by bot entries in exported markup.
    #[serde(default = "default_bot_icon")]
    pub bot_icon: String,

    /// Background colour shown when the bot icon fails to load.
    #[serde(default = "default_icon_fallback_color")]
    pub icon_fallback_color: String,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_placeholder() -> String {
    "Type your message...".to_string()
}

fn default_min_phone_digits() -> usize {
    10
}

fn default_restart_token() -> String {
    "restart".to_string()
}

fn default_bot_icon() -> String {
    "logo.jpeg".to_string()
}

fn default_icon_fallback_color() -> String {
    "#002D62".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            pacing: PacingConfig::default(),
            default_placeholder: default_placeholder(),
            min_phone_digits: default_min_phone_digits(),
            restart_token: default_restart_token(),
            bot_icon: default_bot_icon(),
            icon_fallback_color: default_icon_fallback_color(),
        }
    }
}

/// Timing of paced message playback.
///
/// Message `i` shows the typing indicator at `i * message_interval_ms` after
/// the turn arrives and is revealed `typing_indicator_ms` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "default_typing_indicator_ms")]
    pub typing_indicator_ms: u64,
    #[serde(default = "default_message_interval_ms")]
    pub message_interval_ms: u64,
}

fn default_typing_indicator_ms() -> u64 {
    600
}

fn default_message_interval_ms() -> u64 {
    1000
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            typing_indicator_ms: default_typing_indicator_ms(),
            message_interval_ms: default_message_interval_ms(),
        }
    }
}

impl PacingConfig {
    pub fn typing_indicator(&self) -> Duration {
        Duration::from_millis(self.typing_indicator_ms)
    }

    pub fn message_interval(&self) -> Duration {
        Duration::from_millis(self.message_interval_ms)
    }

    /// The indicator of one message must be gone before the next one shows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing_indicator_ms >= self.message_interval_ms {
            return Err(ConfigError::InvalidPacing {
                indicator_ms: self.typing_indicator_ms,
                interval_ms: self.message_interval_ms,
            });
        }
        Ok(())
    }
}
