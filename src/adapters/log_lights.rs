//! Log-only light adapter.
//!
//! Stands in for a real bridge: every command is logged and the last
//! colour is kept so it can be inspected.

use std::time::Duration;

use log::info;

use crate::app::ports::{HueColour, LightPort};

#[derive(Debug)]
pub struct LogLights {
    bridge: String,
    current: Option<HueColour>,
}

impl LogLights {
    pub fn new(bridge: impl Into<String>) -> Self {
        Self {
            bridge: bridge.into(),
            current: None,
        }
    }

    pub fn current_colour(&self) -> Option<HueColour> {
        self.current
    }
}

impl LightPort for LogLights {
    fn set_colour(&mut self, colour: HueColour, transition: Option<Duration>) -> anyhow::Result<()> {
        match transition {
            Some(t) => info!(
                "LIGHT | {} | hue={} sat={} over {:?}",
                self.bridge, colour.hue, colour.saturation, t
            ),
            None => info!(
                "LIGHT | {} | hue={} sat={}",
                self.bridge, colour.hue, colour.saturation
            ),
        }
        self.current = Some(colour);
        Ok(())
    }
}
