//! Application core — routing between the message stream, the status
//! aggregator, and the indicators.
//!
//! All I/O happens through **port traits** defined in [`ports`]; the
//! service never talks to a chat API or a light bridge directly.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
