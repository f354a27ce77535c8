//! Message-stream classification.
//!
//! Turns raw chat events into [`StatusReport`]s.  Two kinds of message
//! are understood:
//!
//! | Message                          | Report                          |
//! |----------------------------------|---------------------------------|
//! | text `failure`/`warning`/`normal`| that severity                   |
//! | build attachment, colour good    | Normal                          |
//! | build attachment, colour warning | Warning                         |
//! | build attachment, colour danger  | Failure (Warning on `-test-`)   |
//!
//! Everything else is ignored.  Nothing in here touches the aggregator.

use serde::Deserialize;

use crate::app::commands::StatusReport;
use crate::channel::{ChannelId, ChannelInfo};
use crate::state::Severity;

/// Attachment colour the CI server uses for a passing build.
pub const GOOD: &str = "36a64f";
/// Attachment colour for an unstable build.
pub const WARNING: &str = "daa038";
/// Attachment colour for a broken build.
pub const DANGER: &str = "d00000";

/// One item of the real-time message stream.  Unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RtmEvent {
    pub channel: Option<ChannelId>,
    pub text: Option<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub color: Option<String>,
}

impl RtmEvent {
    pub fn text(channel: &str, text: &str) -> Self {
        Self {
            channel: Some(channel.into()),
            text: Some(text.to_string()),
            attachments: Vec::new(),
        }
    }

    pub fn build(channel: &str, color: &str) -> Self {
        Self {
            channel: Some(channel.into()),
            text: None,
            attachments: vec![Attachment {
                color: Some(color.to_string()),
            }],
        }
    }

    /// Colour of the first attachment, if any.
    pub fn build_colour(&self) -> Option<&str> {
        self.attachments.first()?.color.as_deref()
    }
}

/// Build result encoded in an attachment colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildColour {
    Good,
    Warning,
    Danger,
}

impl BuildColour {
    /// Accepts the hex codes above or the named aliases, case-insensitive,
    /// with or without a leading `#`.
    pub fn parse(raw: &str) -> Option<Self> {
        let colour = raw.trim().trim_start_matches('#').to_ascii_lowercase();
        match colour.as_str() {
            GOOD | "good" | "green" => Some(Self::Good),
            WARNING | "warning" | "yellow" | "amber" => Some(Self::Warning),
            DANGER | "danger" | "red" => Some(Self::Danger),
            _ => None,
        }
    }

    /// Severity for a channel; red on a test channel only warns.
    pub fn severity(self, channel: &ChannelInfo) -> Severity {
        match self {
            Self::Good => Severity::Normal,
            Self::Warning => Severity::Warning,
            Self::Danger if channel.is_test_channel() => Severity::Warning,
            Self::Danger => Severity::Failure,
        }
    }
}

/// Hand-typed `failure` / `warning` / `normal` messages.
pub fn classify_text(event: &RtmEvent) -> Option<StatusReport> {
    let channel = event.channel.as_ref()?;
    let severity = Severity::from_name(event.text.as_deref()?)?;
    Some(StatusReport::new(channel.clone(), severity))
}

/// CI build-result messages.  `info` is the channel's metadata; without
/// it the message cannot be classified.
pub fn classify_build(event: &RtmEvent, info: Option<&ChannelInfo>) -> Option<StatusReport> {
    let channel = event.channel.as_ref()?;
    let colour = BuildColour::parse(event.build_colour()?)?;
    let severity = colour.severity(info?);
    Some(StatusReport::new(channel.clone(), severity))
}
