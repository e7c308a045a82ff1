//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the polling rules for the Lumen monitor: baseline
//! seeding, the noise gate, classification and hand-off to the dispatcher.
//! All interaction with the ADC and the push gateway happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
