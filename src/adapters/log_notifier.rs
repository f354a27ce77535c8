//! Log-only notifier adapter.

use log::info;

use crate::app::ports::NotifierPort;
use crate::channel::ChannelId;

#[derive(Debug, Default)]
pub struct LogNotifier {
    sent: u64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages posted so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl NotifierPort for LogNotifier {
    fn post_message(&mut self, channel: &ChannelId, text: &str) -> anyhow::Result<()> {
        info!("POST | #{} | {}", channel, text);
        self.sent += 1;
        Ok(())
    }
}
