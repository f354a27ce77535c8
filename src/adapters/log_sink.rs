//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.

use log::{debug, info, warn};

use crate::app::events::{AppEvent, IgnoreReason};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | listening for status messages");
            }
            AppEvent::Reported(report) => {
                debug!("REPORT | {} -> {}", report.channel, report.severity);
            }
            AppEvent::AggregateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::Ignored { channel, reason } => {
                let channel = channel.as_ref().map_or("-", |c| c.as_str());
                match reason {
                    IgnoreReason::UnknownChannel => {
                        warn!("IGNORED | channel={} | not in directory", channel);
                    }
                }
            }
        }
    }
}
