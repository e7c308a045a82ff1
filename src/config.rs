//! System configuration parameters
//!
//! All tunable parameters for the Lumen monitor.  Values are loaded once at
//! startup through a [`ConfigPort`](crate::app::ports::ConfigPort) and never
//! change while the polling loop runs.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::classifier::{IconToken, READING_MAX};

/// Maximum number of fluctuation bands a [`ThresholdConfig`] can hold.
pub const MAX_BANDS: usize = 8;

/// Highest MCP3008 single-ended channel index.
pub const MAX_CHANNEL: u8 = 7;

// ───────────────────────────────────────────────────────────────
// Fluctuation bands
// ───────────────────────────────────────────────────────────────

/// A magnitude threshold on the absolute change between two readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluctuationBand {
    /// Minimum delta (inclusive) for this band to qualify.
    pub threshold: u16,
    /// Recipient group appended when the band qualifies.
    pub group: String,
    /// Condition label shown in the notification.
    pub label: String,
    /// Icon override; `None` keeps whatever an earlier band selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconToken>,
}

impl FluctuationBand {
    pub fn new(
        threshold: u16,
        group: impl Into<String>,
        label: impl Into<String>,
        icon: Option<IconToken>,
    ) -> Self {
        Self {
            threshold,
            group: group.into(),
            label: label.into(),
            icon,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Threshold configuration
// ───────────────────────────────────────────────────────────────

/// Validated, immutable classifier thresholds.
///
/// The only way to obtain one is [`ThresholdConfig::new`] (or deserialising,
/// which runs the same checks), so every instance satisfies:
///
/// - `dark_threshold < bright_threshold <= 1023`
/// - band thresholds are non-zero and strictly increasing
/// - `noise_floor` is below the smallest band threshold, so every band
///   can clear the noise gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdSettings", into = "ThresholdSettings")]
pub struct ThresholdConfig {
    dark_threshold: u16,
    bright_threshold: u16,
    noise_floor: u16,
    bands: heapless::Vec<FluctuationBand, MAX_BANDS>,
}

impl ThresholdConfig {
    pub fn new(
        dark_threshold: u16,
        bright_threshold: u16,
        noise_floor: u16,
        bands: impl IntoIterator<Item = FluctuationBand>,
    ) -> Result<Self, ConfigError> {
        let mut collected = heapless::Vec::new();
        for band in bands {
            collected.push(band).map_err(|_| {
                ConfigError::ValidationFailed("at most 8 fluctuation bands are supported")
            })?;
        }
        let config = Self {
            dark_threshold,
            bright_threshold,
            noise_floor,
            bands: collected,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn dark_threshold(&self) -> u16 {
        self.dark_threshold
    }

    pub fn bright_threshold(&self) -> u16 {
        self.bright_threshold
    }

    pub fn noise_floor(&self) -> u16 {
        self.noise_floor
    }

    /// Bands in ascending threshold order.
    pub fn bands(&self) -> &[FluctuationBand] {
        &self.bands
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dark_threshold >= self.bright_threshold {
            return Err(ConfigError::ValidationFailed(
                "dark_threshold must be < bright_threshold",
            ));
        }
        if self.bright_threshold > READING_MAX {
            return Err(ConfigError::ValidationFailed(
                "bright_threshold must be <= 1023",
            ));
        }
        if self.bands.iter().any(|b| b.threshold == 0) {
            return Err(ConfigError::ValidationFailed(
                "fluctuation band thresholds must be > 0",
            ));
        }
        if self.bands.iter().any(|b| b.group.is_empty()) {
            return Err(ConfigError::ValidationFailed(
                "fluctuation band group must not be empty",
            ));
        }
        if self.bands.windows(2).any(|w| w[0].threshold >= w[1].threshold) {
            return Err(ConfigError::ValidationFailed(
                "fluctuation band thresholds must be strictly increasing",
            ));
        }
        if let Some(first) = self.bands.first() {
            if self.noise_floor >= first.threshold {
                return Err(ConfigError::ValidationFailed(
                    "noise_floor must be below the smallest band threshold",
                ));
            }
        }
        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            dark_threshold: 10,
            bright_threshold: 250,
            noise_floor: 5,
            bands: [
                FluctuationBand::new(50, "d1", "Small Fluctuation", Some(IconToken::Fluctuation)),
                FluctuationBand::new(100, "d2", "Medium Fluctuation", None),
                FluctuationBand::new(150, "d3", "Large Fluctuation", None),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// Unvalidated wire form of [`ThresholdConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThresholdSettings {
    dark_threshold: u16,
    bright_threshold: u16,
    noise_floor: u16,
    #[serde(default)]
    bands: heapless::Vec<FluctuationBand, MAX_BANDS>,
}

impl TryFrom<ThresholdSettings> for ThresholdConfig {
    type Error = ConfigError;

    fn try_from(raw: ThresholdSettings) -> Result<Self, Self::Error> {
        let config = Self {
            dark_threshold: raw.dark_threshold,
            bright_threshold: raw.bright_threshold,
            noise_floor: raw.noise_floor,
            bands: raw.bands,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<ThresholdConfig> for ThresholdSettings {
    fn from(config: ThresholdConfig) -> Self {
        Self {
            dark_threshold: config.dark_threshold,
            bright_threshold: config.bright_threshold,
            noise_floor: config.noise_floor,
            bands: config.bands,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Notifier / sensor sections
// ───────────────────────────────────────────────────────────────

/// Push-gateway delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Gateway endpoint receiving the JSON envelope.
    pub endpoint: String,
    /// Sender identifier registered with the gateway.
    pub sender_id: String,
    /// Ask the gateway to validate without delivering.
    pub dry_run: bool,
    /// Message time-to-live on the gateway (seconds).
    pub time_to_live_secs: u32,
    /// Notification title prefix.
    pub title: String,
    /// Upper bound on a single delivery attempt (milliseconds).
    pub request_timeout_ms: u32,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://png.d2d.msg.intuit.com/api/v2/push".into(),
            sender_id: "lumen-raspi".into(),
            dry_run: false,
            time_to_live_secs: 1,
            title: "Lumen Raspi".into(),
            request_timeout_ms: 5000,
        }
    }
}

/// MCP3008 wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// ADC input the light sensor is wired to (0–7).
    pub channel: u8,
    /// SPI bus index (`/dev/spidev<bus>.<cs>`).
    pub spi_bus: u8,
    /// SPI chip-select line.
    pub chip_select: u8,
    /// SPI clock (Hz).  The MCP3008 tops out at 1.35 MHz at 2.7 V.
    pub clock_hz: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            channel: 0,
            spi_bus: 0,
            chip_select: 0,
            clock_hz: 1_350_000,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Top-level configuration
// ───────────────────────────────────────────────────────────────

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Classification ---
    pub thresholds: ThresholdConfig,

    // --- Delivery ---
    pub notifier: NotifierConfig,

    // --- Hardware ---
    pub sensor: SensorConfig,

    // --- Timing ---
    /// Delay between sensor reads (milliseconds)
    pub poll_interval_ms: u32,
    /// Statistics summary interval (seconds)
    pub telemetry_interval_secs: u32,

    // --- Logging ---
    pub log_level: log::LevelFilter,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            notifier: NotifierConfig::default(),
            sensor: SensorConfig::default(),
            poll_interval_ms: 1000,      // 1 Hz
            telemetry_interval_secs: 300, // every 5 min
            log_level: log::LevelFilter::Info,
        }
    }
}

impl MonitorConfig {
    /// Range-check the fields not covered by [`ThresholdConfig`]'s own
    /// invariants.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor.channel > MAX_CHANNEL {
            return Err(ConfigError::ValidationFailed("sensor.channel must be 0-7"));
        }
        if self.sensor.clock_hz == 0 {
            return Err(ConfigError::ValidationFailed("sensor.clock_hz must be > 0"));
        }
        if !(100..=60_000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 100-60000",
            ));
        }
        if !(10..=86_400).contains(&self.telemetry_interval_secs) {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_secs must be 10-86400",
            ));
        }
        let endpoint = &self.notifier.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(
                "notifier.endpoint must be an http(s) URL",
            ));
        }
        if self.notifier.sender_id.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "notifier.sender_id must not be empty",
            ));
        }
        if !(100..=30_000).contains(&self.notifier.request_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "notifier.request_timeout_ms must be 100-30000",
            ));
        }
        Ok(())
    }
}
