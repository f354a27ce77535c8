//! Static channel directory built from configuration.

use std::collections::HashMap;

use crate::app::ports::ChannelDirectory;
use crate::channel::{ChannelId, ChannelInfo};
use crate::config::HueBotConfig;

#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    channels: HashMap<ChannelId, ChannelInfo>,
}

impl StaticDirectory {
    pub fn new(channels: HashMap<ChannelId, ChannelInfo>) -> Self {
        Self { channels }
    }

    pub fn from_config(config: &HueBotConfig) -> Self {
        Self::new(config.channel_map())
    }

    pub fn insert(&mut self, id: impl Into<ChannelId>, info: ChannelInfo) {
        self.channels.insert(id.into(), info);
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl ChannelDirectory for StaticDirectory {
    fn channel_info(&mut self, channel: &ChannelId) -> Option<ChannelInfo> {
        self.channels.get(channel).cloned()
    }
}
