//! Lumen ambient-light monitor library.
//!
//! Exposes the pure-logic modules (classifier, service, notification
//! building) for integration testing, plus the adapters the binary wires
//! together.  Raspberry Pi specific code is guarded by the `rpi` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod notify;
pub mod sensors;
