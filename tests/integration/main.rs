//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  No chat API or light bridge is involved.

mod aggregator_tests;
mod mock_ports;
