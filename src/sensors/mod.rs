//! Sensor subsystem.
//!
//! The light-dependent resistor sits on one input of an MCP3008 ADC.
//! [`Mcp3008`] implements the [`ReadingSource`](crate::app::ports::ReadingSource)
//! port directly; the channel to sample comes from configuration.

pub mod mcp3008;

pub use mcp3008::{Mcp3008, SpiOpener};
