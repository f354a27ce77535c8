//! Channel identity and metadata.
//!
//! A channel is the unit HueBot tracks: each build job posts into its own
//! chat channel, so the channel id doubles as the aggregator key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque chat channel id (e.g. `C024BE91L`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChannelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Human-facing metadata for a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelInfo {
    /// Display name, e.g. `ci-backend-test-linux`.
    pub name: String,
    pub purpose: String,
    pub topic: String,
}

impl ChannelInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Purpose if set, else topic, else empty.
    pub fn description(&self) -> &str {
        if !self.purpose.is_empty() {
            &self.purpose
        } else {
            &self.topic
        }
    }

    /// Text used when announcing this channel: description, else name.
    pub fn label(&self) -> &str {
        match self.description() {
            "" => &self.name,
            d => d,
        }
    }

    /// Test pipelines carry `-test-` in their name; their red builds only
    /// warn.
    pub fn is_test_channel(&self) -> bool {
        self.name.contains("-test-")
    }
}
