//! HueBot library.
//!
//! Watches build and status messages in chat channels, keeps one
//! aggregate severity across all of them, and drives status lights and
//! chat alerts when that severity changes.
//!
//! The heart of the crate is [`state::StatusAggregator`]; everything
//! else classifies input for it or reacts to its hooks.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod channel;
pub mod classify;
pub mod config;
pub mod error;
pub mod lights;
pub mod notifier;
pub mod state;

pub use channel::{ChannelId, ChannelInfo};
pub use state::{HookResult, Severity, StatusAggregator};
