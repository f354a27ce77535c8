//! Inbound status reports.
//!
//! A [`StatusReport`] is what the classifier produces from a raw chat
//! event, and what the [`HueBotService`](super::service::HueBotService)
//! feeds into the aggregator.

use crate::channel::ChannelId;
use crate::state::Severity;

/// "Channel `channel` is now at `severity`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub channel: ChannelId,
    pub severity: Severity,
}

impl StatusReport {
    pub fn new(channel: ChannelId, severity: Severity) -> Self {
        Self { channel, severity }
    }
}
