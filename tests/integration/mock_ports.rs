//! Mock port adapters for integration tests.
//!
//! Records every call so tests can assert on the full command history.

use std::collections::VecDeque;
use std::time::Duration;

use huebot::app::events::AppEvent;
use huebot::app::ports::{
    EventSink, HueColour, LightPort, MessageSource, NotifierPort, SourceError,
};
use huebot::channel::{ChannelId, ChannelInfo};
use huebot::classify::RtmEvent;
use huebot::adapters::directory::StaticDirectory;
use huebot::config::LightsConfig;

// ── Lights ────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingLights {
    pub calls: Vec<(HueColour, Option<Duration>)>,
    /// Fail every call with this message when set.
    pub fail_with: Option<&'static str>,
}

#[allow(dead_code)]
impl RecordingLights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(msg: &'static str) -> Self {
        Self {
            calls: Vec::new(),
            fail_with: Some(msg),
        }
    }

    pub fn colours(&self) -> Vec<HueColour> {
        self.calls.iter().map(|(c, _)| *c).collect()
    }
}

impl LightPort for RecordingLights {
    fn set_colour(&mut self, colour: HueColour, transition: Option<Duration>) -> anyhow::Result<()> {
        if let Some(msg) = self.fail_with {
            anyhow::bail!(msg);
        }
        self.calls.push((colour, transition));
        Ok(())
    }
}

/// No celebration pause, so tests don't sleep.
pub fn instant_lights() -> LightsConfig {
    LightsConfig {
        celebration_ms: 0,
        fade_secs: 60,
    }
}

// ── Notifier ──────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub posts: Vec<(ChannelId, String)>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.posts.iter().map(|(_, t)| t.as_str()).collect()
    }
}

impl NotifierPort for RecordingNotifier {
    fn post_message(&mut self, channel: &ChannelId, text: &str) -> anyhow::Result<()> {
        self.posts.push((channel.clone(), text.to_string()));
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemSink {
    pub events: Vec<AppEvent>,
}

impl MemSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregate_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::AggregateChanged { .. }))
            .count()
    }
}

impl EventSink for MemSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Message source ────────────────────────────────────────────

/// Replays a fixed script of batches, then reports the stream closed.
pub struct ScriptedSource {
    pub script: VecDeque<Result<Vec<RtmEvent>, SourceError>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<RtmEvent>, SourceError>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl MessageSource for ScriptedSource {
    fn read_batch(&mut self) -> Result<Option<Vec<RtmEvent>>, SourceError> {
        match self.script.pop_front() {
            Some(Ok(batch)) => Ok(Some(batch)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}

// ── Directory ─────────────────────────────────────────────────

/// `C1` main build, `C2` test pipeline, `C3` name only.
pub fn directory() -> StaticDirectory {
    let mut dir = StaticDirectory::default();
    dir.insert(
        "C1",
        ChannelInfo {
            name: "ci-main".into(),
            purpose: "Main build".into(),
            topic: String::new(),
        },
    );
    dir.insert("C2", ChannelInfo::named("ci-api-test-e2e"));
    dir.insert("C3", ChannelInfo::named("ci-docs"));
    dir
}
