//! Unified error types for the Lumen monitor.
//!
//! A single `Error` enum for the failures that can stop startup.  Delivery
//! failures never reach it; the dispatcher folds them into a result value.  Sensor and delivery errors are
//! `Copy` so they can be carried inside [`AppEvent`](crate::app::events::AppEvent)s
//! and outcomes without allocation.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Startup failures funnel into this type.
#[derive(Debug)]
pub enum Error {
    /// The light sensor could not be read.
    Sensor(SensorError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC channel index outside 0–7.
    InvalidChannel(u8),
    /// The SPI bus could not be opened.
    BusOpenFailed,
    /// The SPI transfer returned an error.
    TransferFailed,
    /// Reading is outside the 10-bit ADC range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChannel(ch) => write!(f, "invalid ADC channel {ch} (must be 0-7)"),
            Self::BusOpenFailed => write!(f, "SPI bus open failed"),
            Self::TransferFailed => write!(f, "SPI transfer failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Delivery errors
// ---------------------------------------------------------------------------

/// Categorised push-gateway delivery failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// DNS, TCP or TLS failure before a response arrived.
    Connection,
    /// The gateway answered with a non-success status.
    Status(u16),
    /// The envelope could not be serialised.
    Encode,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Connection => write!(f, "connection failed"),
            Self::Status(code) => write!(f, "gateway returned HTTP {code}"),
            Self::Encode => write!(f, "envelope encoding failed"),
        }
    }
}

impl std::error::Error for DeliveryError {}
