//! Status light indicator.
//!
//! Turns aggregate transitions into colours on the light group:
//!
//! | Aggregate | Colour                                         |
//! |-----------|------------------------------------------------|
//! | Failure   | red                                            |
//! | Warning   | orange                                         |
//! | Normal    | green flash, then slow fade to warm white      |
//!
//! The celebration pause runs inline, so it holds up the message loop
//! for its duration.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::info;

use crate::app::ports::{HueColour, LightPort};
use crate::config::LightsConfig;
use crate::state::StatusAggregator;

pub const FAILURE_COLOUR: HueColour = HueColour::new(0, 254);
pub const WARNING_COLOUR: HueColour = HueColour::new(6865, 223);
pub const NORMAL_COLOUR: HueColour = HueColour::new(10991, 78);
pub const SUCCESS_COLOUR: HueColour = HueColour::new(25600, 254);

/// Drives a [`LightPort`] from aggregate hooks.
pub struct HueIndicator<L> {
    light: L,
    celebration: Duration,
    fade: Duration,
}

impl<L: LightPort> HueIndicator<L> {
    pub fn new(light: L, config: &LightsConfig) -> Self {
        Self {
            light,
            celebration: Duration::from_millis(config.celebration_ms),
            fade: Duration::from_secs(config.fade_secs),
        }
    }

    pub fn indicate_failure(&mut self) -> anyhow::Result<()> {
        info!("lights: failure");
        self.light
            .set_colour(FAILURE_COLOUR, None)
            .context("setting failure colour")
    }

    pub fn indicate_warning(&mut self) -> anyhow::Result<()> {
        info!("lights: warning");
        self.light
            .set_colour(WARNING_COLOUR, None)
            .context("setting warning colour")
    }

    /// Flash the success colour, then fade back to the resting colour.
    pub fn back_to_normal(&mut self) -> anyhow::Result<()> {
        info!("lights: back to normal");
        self.light
            .set_colour(SUCCESS_COLOUR, None)
            .context("setting success colour")?;
        if !self.celebration.is_zero() {
            thread::sleep(self.celebration);
        }
        self.light
            .set_colour(NORMAL_COLOUR, Some(self.fade))
            .context("fading to normal colour")
    }

    pub fn light(&self) -> &L {
        &self.light
    }

    /// Hook this indicator into `state`'s aggregate hooks.
    ///
    /// Returns the shared handle so the caller can still inspect it.
    pub fn register<K>(self, state: &mut StatusAggregator<K>) -> Rc<RefCell<Self>>
    where
        L: 'static,
        K: Eq + Hash + Clone + fmt::Debug + 'static,
    {
        let shared = Rc::new(RefCell::new(self));

        let lights = Rc::clone(&shared);
        state.set_on_failure(move || lights.borrow_mut().indicate_failure());
        let lights = Rc::clone(&shared);
        state.set_on_warning(move || lights.borrow_mut().indicate_warning());
        let lights = Rc::clone(&shared);
        state.set_on_normal(move || lights.borrow_mut().back_to_normal());

        shared
    }
}
