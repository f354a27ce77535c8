//! HueBot configuration.
//!
//! Loaded once at startup from a JSON file.  Every section has defaults,
//! so a minimal file only needs the chat token and bridge address.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::channel::{ChannelId, ChannelInfo};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "huebot.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueBotConfig {
    pub slack: SlackConfig,
    pub hue: HueConfig,
    pub general: GeneralConfig,
    pub lights: LightsConfig,
    /// Known channels; build results from other channels are ignored.
    pub channels: Vec<ChannelEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Bot token.
    pub token: String,
    /// Where new failures and warnings are announced.  `None` disables
    /// announcements.
    pub reporting_channel: Option<ChannelId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueConfig {
    pub bridge_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Propagate stream errors instead of retrying.
    pub debug: bool,
    /// Pause between polls when nothing arrived (milliseconds).
    pub poll_interval_ms: u64,
    /// Pause before reconnecting after a stream error (seconds).
    pub retry_delay_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            debug: false,
            poll_interval_ms: 1000,
            retry_delay_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    /// How long the success colour shows before fading (milliseconds).
    pub celebration_ms: u64,
    /// Fade time from success back to the resting colour (seconds).
    pub fade_secs: u64,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            celebration_ms: 1000,
            fade_secs: 60,
        }
    }
}

/// One entry of the channel directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub id: ChannelId,
    #[serde(flatten)]
    pub info: ChannelInfo,
}

impl HueBotConfig {
    /// Read, parse and validate the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slack.token.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("slack.token must be set"));
        }
        if self.hue.bridge_ip.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("hue.bridge_ip must be set"));
        }
        if self.general.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "general.poll_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }

    /// Channel entries keyed by id.  Later duplicates win.
    pub fn channel_map(&self) -> HashMap<ChannelId, ChannelInfo> {
        self.channels
            .iter()
            .map(|entry| (entry.id.clone(), entry.info.clone()))
            .collect()
    }
}
