//! Outbound application events.
//!
//! The [`HueBotService`](super::service::HueBotService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use crate::channel::ChannelId;
use crate::state::Severity;

use super::commands::StatusReport;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service is ready to consume messages.
    Started,

    /// A classified report was applied to the aggregator.
    Reported(StatusReport),

    /// The aggregate severity moved.
    AggregateChanged { from: Severity, to: Severity },

    /// A message could not be turned into a report.
    Ignored {
        channel: Option<ChannelId>,
        reason: IgnoreReason,
    },
}

/// Why a message produced no report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A build result arrived for a channel the directory does not know.
    UnknownChannel,
}
