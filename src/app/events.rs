//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to the console, count them in
//! tests, etc.

use crate::classifier::{ClassifiedEvent, Reading};
use crate::error::{DeliveryError, SensorError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started sampling `channel`.
    Started { channel: u8 },

    /// The comparison baseline was seeded from a first reading.
    BaselineSet { reading: Reading, baseline: Reading },

    /// The sensor could not be read this cycle.
    ReadFailed(SensorError),

    /// A reading pair crossed the noise floor and was classified.
    Classified(ClassifiedEvent),

    /// The push gateway accepted a notification.
    Delivered { status: u16, groups: usize },

    /// A notification was dropped after one failed attempt.
    DeliveryFailed(DeliveryError),

    /// Periodic statistics snapshot.
    Telemetry(MonitorStats),
}

/// Running counters suitable for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub cycles: u64,
    pub read_failures: u64,
    pub below_noise: u64,
    pub events: u64,
    pub delivered: u64,
    pub delivery_failures: u64,
    pub last_reading: Option<Reading>,
    pub previous: Option<Reading>,
}
