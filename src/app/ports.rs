//! Port traits — the hexagonal boundary between the status core and the
//! outside world.
//!
//! ```text
//!   MessageSource ──▶ HueBotService ──▶ StatusAggregator
//!                           │                 │ hooks
//!                           ▼                 ▼
//!                      EventSink     LightPort · NotifierPort
//! ```
//!
//! Driven adapters (chat client, light bridge, log output) implement
//! these traits.  Light and notifier calls return `anyhow::Result`; the
//! aggregator logs their failures instead of propagating them.

use core::fmt;
use std::time::Duration;

use crate::channel::{ChannelId, ChannelInfo};
use crate::classify::RtmEvent;

// ───────────────────────────────────────────────────────────────
// Light port (driven adapter: domain → light bridge)
// ───────────────────────────────────────────────────────────────

/// Hue/saturation pair in bridge units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueColour {
    /// 0–65535 around the colour wheel.
    pub hue: u16,
    /// 0–254.
    pub saturation: u8,
}

impl HueColour {
    pub const fn new(hue: u16, saturation: u8) -> Self {
        Self { hue, saturation }
    }
}

/// Drives every light in the group.
pub trait LightPort {
    /// Set all lights to `colour`, fading over `transition` if given.
    fn set_colour(&mut self, colour: HueColour, transition: Option<Duration>)
        -> anyhow::Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Notifier port (driven adapter: domain → chat)
// ───────────────────────────────────────────────────────────────

/// Posts plain-text messages into a chat channel.
pub trait NotifierPort {
    fn post_message(&mut self, channel: &ChannelId, text: &str) -> anyhow::Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Channel directory (driven adapter: domain ← chat metadata)
// ───────────────────────────────────────────────────────────────

/// Resolves channel ids to names and descriptions.
///
/// Takes `&mut self` so network-backed implementations can cache.
pub trait ChannelDirectory {
    fn channel_info(&mut self, channel: &ChannelId) -> Option<ChannelInfo>;
}

// ───────────────────────────────────────────────────────────────
// Message source (driving adapter: chat stream → domain)
// ───────────────────────────────────────────────────────────────

/// Polled real-time message stream.
pub trait MessageSource {
    /// Read the next batch of events.
    ///
    /// `Ok(Some(vec![]))` means nothing arrived yet, `Ok(None)` means the
    /// stream has closed for good.
    fn read_batch(&mut self) -> Result<Option<Vec<RtmEvent>>, SourceError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The service emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`MessageSource`] operations.
#[derive(Debug)]
pub enum SourceError {
    /// The connection to the stream dropped.
    Disconnected,
    /// Underlying read failed.
    Io(std::io::Error),
}

/// Errors from loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file missing or unreadable.
    Io(std::io::Error),
    /// Config file is not valid JSON for [`HueBotConfig`](crate::config::HueBotConfig).
    Parse(serde_json::Error),
    /// A field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "message stream disconnected"),
            Self::Io(e) => write!(f, "message stream I/O error: {e}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Disconnected => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config: {e}"),
            Self::Parse(e) => write!(f, "invalid config: {e}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::ValidationFailed(_) => None,
        }
    }
}
