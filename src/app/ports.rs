//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (ADC, push gateway, event sinks, config storage) implement
//! these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware or
//! the network directly.

use crate::classifier::Reading;
use crate::config::MonitorConfig;
use crate::error::{DeliveryError, SensorError};

// ───────────────────────────────────────────────────────────────
// Reading source (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per poll cycle.
pub trait ReadingSource {
    /// Sample `channel` (0–7).  Implementations acquire and release the
    /// underlying bus within the call.
    fn read(&mut self, channel: u8) -> Result<Reading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Notification transport (driven adapter: domain → push gateway)
// ───────────────────────────────────────────────────────────────

/// Single-shot delivery of an encoded envelope.
///
/// Implementations make exactly one attempt and never retry.  A response
/// body, if any, is ignored; only the status code is reported.
pub trait NotificationTransport {
    /// POST `body` (JSON) to `endpoint`.  Returns the HTTP status on a
    /// 2xx response.
    fn post_json(&mut self, endpoint: &str, body: &str) -> Result<u16, DeliveryError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ config storage)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate before persisting and after loading.
/// Invalid values are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration.  Returns [`ConfigError::NotFound`] if nothing
    /// has been stored yet.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations and config construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first start).
    NotFound,
    /// Stored config could not be parsed.
    Corrupted(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError(std::io::ErrorKind),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted(detail) => write!(f, "config corrupted: {}", detail),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

impl std::error::Error for ConfigError {}
