//! Application service — the hexagonal core.
//!
//! [`HueBotService`] owns the status aggregator and the channel
//! directory.  Incoming chat events are classified and applied; the
//! indicators registered on the aggregator react through their hooks.
//!
//! ```text
//!  MessageSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                    │      HueBotService        │
//!  ChannelDirectory ◀│ classify · StatusAggregator│──▶ lights / notifier hooks
//!                    └──────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::channel::ChannelId;
use crate::classify::{classify_build, classify_text, RtmEvent};
use crate::config::GeneralConfig;
use crate::error::Result;
use crate::lights::HueIndicator;
use crate::notifier::ChatNotifier;
use crate::state::StatusAggregator;

use super::commands::StatusReport;
use super::events::{AppEvent, IgnoreReason};
use super::ports::{ChannelDirectory, EventSink, LightPort, MessageSource, NotifierPort};

// ───────────────────────────────────────────────────────────────
// HueBotService
// ───────────────────────────────────────────────────────────────

/// The application service routes chat events into the aggregator.
pub struct HueBotService<D> {
    state: StatusAggregator<ChannelId>,
    directory: Rc<RefCell<D>>,
    reports_applied: u64,
}

impl<D: ChannelDirectory> HueBotService<D> {
    pub fn new(directory: D) -> Self {
        Self {
            state: StatusAggregator::new(),
            directory: Rc::new(RefCell::new(directory)),
            reports_applied: 0,
        }
    }

    // ── Wiring ────────────────────────────────────────────────

    /// Drive `lights` from aggregate transitions.
    pub fn attach_lights<L>(&mut self, lights: HueIndicator<L>) -> Rc<RefCell<HueIndicator<L>>>
    where
        L: LightPort + 'static,
    {
        lights.register(&mut self.state)
    }

    /// Announce newly failing / warning channels through `port`.
    ///
    /// The notifier shares this service's channel directory.
    pub fn attach_notifier<N>(
        &mut self,
        port: N,
        reporting_channel: Option<ChannelId>,
    ) -> Rc<RefCell<ChatNotifier<N, D>>>
    where
        N: NotifierPort + 'static,
        D: 'static,
    {
        let notifier = ChatNotifier::new(port, Rc::clone(&self.directory), reporting_channel);
        notifier.register(&mut self.state)
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("HueBot service started");
    }

    // ── Event handling ────────────────────────────────────────

    /// Classify one chat event and apply whatever it reports.
    ///
    /// Both parsers run; a single event may yield two reports.
    pub fn handle_event(&mut self, event: &RtmEvent, sink: &mut impl EventSink) -> Vec<StatusReport> {
        let mut reports = Vec::with_capacity(2);

        if let Some(report) = classify_text(event) {
            reports.push(report);
        }

        if let (Some(channel), Some(_)) = (&event.channel, event.build_colour()) {
            // Release the directory before any hook can borrow it.
            let info = self.directory.borrow_mut().channel_info(channel);
            match classify_build(event, info.as_ref()) {
                Some(report) => reports.push(report),
                None if info.is_none() => {
                    warn!("build result for unknown channel {channel}, ignoring");
                    sink.emit(&AppEvent::Ignored {
                        channel: Some(channel.clone()),
                        reason: IgnoreReason::UnknownChannel,
                    });
                }
                None => debug!("unrecognised build colour in {channel}"),
            }
        }

        for report in &reports {
            self.apply(report.clone(), sink);
        }
        reports
    }

    /// Apply a classified report, emitting an event if the aggregate moved.
    pub fn apply(&mut self, report: StatusReport, sink: &mut impl EventSink) {
        let before = self.state.aggregate();
        self.state.report(report.channel.clone(), report.severity);
        let after = self.state.aggregate();
        self.reports_applied += 1;

        sink.emit(&AppEvent::Reported(report));
        if before != after {
            sink.emit(&AppEvent::AggregateChanged {
                from: before,
                to: after,
            });
        }
    }

    /// Read one batch from `source` and handle every event in it.
    ///
    /// Returns `Ok(None)` once the source has closed, otherwise the number
    /// of events in the batch.
    pub fn poll(
        &mut self,
        source: &mut impl MessageSource,
        sink: &mut impl EventSink,
    ) -> Result<Option<usize>> {
        let Some(batch) = source.read_batch()? else {
            return Ok(None);
        };
        for event in &batch {
            self.handle_event(event, sink);
        }
        Ok(Some(batch.len()))
    }

    /// Poll `source` until it closes.
    ///
    /// Sleeps `poll_interval_ms` after an empty batch.  A stream error ends
    /// the run in debug mode; otherwise it is logged and polling resumes
    /// after `retry_delay_secs`.
    pub fn run(
        &mut self,
        source: &mut impl MessageSource,
        sink: &mut impl EventSink,
        general: &GeneralConfig,
    ) -> Result<()> {
        let idle = Duration::from_millis(general.poll_interval_ms);
        let retry = Duration::from_secs(general.retry_delay_secs);

        loop {
            match self.poll(source, sink) {
                Ok(Some(0)) => thread::sleep(idle),
                Ok(Some(_)) => {}
                Ok(None) => {
                    info!("message stream closed");
                    return Ok(());
                }
                Err(e) if general.debug => return Err(e),
                Err(e) => {
                    warn!("{e}; retrying in {}s", retry.as_secs());
                    thread::sleep(retry);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &StatusAggregator<ChannelId> {
        &self.state
    }

    /// Reports applied since startup.
    pub fn reports_applied(&self) -> u64 {
        self.reports_applied
    }
}
