//! Chat notifier.
//!
//! Announces each channel that newly starts failing or warning in a
//! single reporting channel.  Aggregate edges are the lights' business;
//! the notifier only listens to the per-key hooks.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use log::debug;

use crate::app::ports::{ChannelDirectory, NotifierPort};
use crate::channel::ChannelId;
use crate::state::StatusAggregator;

/// `<!here>` pings everyone currently active in the reporting channel.
pub fn failure_message(label: &str) -> String {
    format!("<!here> {label} has failed")
}

pub fn warning_message(label: &str) -> String {
    format!("{label} is unstable")
}

/// Posts per-channel alerts through a [`NotifierPort`].
pub struct ChatNotifier<N, D> {
    port: N,
    directory: Rc<RefCell<D>>,
    reporting_channel: Option<ChannelId>,
}

impl<N, D> ChatNotifier<N, D>
where
    N: NotifierPort,
    D: ChannelDirectory,
{
    pub fn new(port: N, directory: Rc<RefCell<D>>, reporting_channel: Option<ChannelId>) -> Self {
        Self {
            port,
            directory,
            reporting_channel,
        }
    }

    pub fn message_failure(&mut self, channel: &ChannelId) -> anyhow::Result<()> {
        let text = failure_message(&self.label(channel));
        self.send(&text)
    }

    pub fn message_warning(&mut self, channel: &ChannelId) -> anyhow::Result<()> {
        let text = warning_message(&self.label(channel));
        self.send(&text)
    }

    pub fn port(&self) -> &N {
        &self.port
    }

    /// Hook this notifier into `state`'s per-key hooks.
    pub fn register(self, state: &mut StatusAggregator<ChannelId>) -> Rc<RefCell<Self>>
    where
        N: 'static,
        D: 'static,
    {
        let shared = Rc::new(RefCell::new(self));

        let notifier = Rc::clone(&shared);
        state.set_on_new_failure(move |channel| notifier.borrow_mut().message_failure(channel));
        let notifier = Rc::clone(&shared);
        state.set_on_new_warning(move |channel| notifier.borrow_mut().message_warning(channel));

        shared
    }

    // ── Internal ──────────────────────────────────────────────

    /// Description, else name, else the raw id.
    fn label(&self, channel: &ChannelId) -> String {
        self.directory
            .borrow_mut()
            .channel_info(channel)
            .map_or_else(|| channel.to_string(), |info| info.label().to_string())
    }

    fn send(&mut self, text: &str) -> anyhow::Result<()> {
        let Some(target) = &self.reporting_channel else {
            debug!("no reporting channel, dropping: {text}");
            return Ok(());
        };
        self.port
            .post_message(target, text)
            .with_context(|| format!("posting to {target}"))
    }
}
