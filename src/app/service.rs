//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the classifier thresholds, the delivery target and
//! the previous reading.  It exposes a clean, hardware-agnostic API.  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  ReadingSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                    │      MonitorService      │
//!                    │ noise gate · classifier  │ ──▶ NotificationTransport
//!                    └──────────────────────────┘
//! ```

use log::{debug, info};

use crate::classifier::{Reading, classify};
use crate::config::{MonitorConfig, ThresholdConfig};
use crate::error::SensorError;
use crate::notify::{DeliveryResult, Destination, dispatch};

use super::events::{AppEvent, MonitorStats};
use super::ports::{EventSink, NotificationTransport, ReadingSource};

/// What one poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The sensor read failed; classification was skipped.
    ReadFailed(SensorError),
    /// No baseline existed yet; this reading seeded it.
    Baseline,
    /// The change was within the noise floor; the baseline was kept.
    BelowNoise,
    /// The change was classified but produced no event.
    Unchanged,
    /// An event was produced and one delivery attempt was made.
    Notified(DeliveryResult),
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The monitor service orchestrates all domain logic.
pub struct MonitorService {
    thresholds: ThresholdConfig,
    destination: Destination,
    channel: u8,
    /// Reading the next sample is compared against.  Only replaced once a
    /// pair has passed the noise gate and been classified.
    previous: Option<Reading>,
    stats: MonitorStats,
}

impl MonitorService {
    /// Construct the service from configuration.
    ///
    /// Does **not** read the sensor — call [`start`](Self::start) next.
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            destination: Destination::from(&config.notifier),
            channel: config.sensor.channel,
            previous: None,
            stats: MonitorStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup and try to seed the baseline.  A failed read here
    /// is not fatal; the first successful [`tick`](Self::tick) seeds it
    /// instead.
    pub fn start(&mut self, source: &mut impl ReadingSource, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            channel: self.channel,
        });
        info!("MonitorService started on channel {}", self.channel);

        match source.read(self.channel) {
            Ok(reading) => self.seed_baseline(reading, sink),
            Err(e) => {
                self.stats.read_failures += 1;
                sink.emit(&AppEvent::ReadFailed(e));
            }
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one poll cycle: read → noise gate → classify → dispatch.
    pub fn tick(
        &mut self,
        source: &mut impl ReadingSource,
        transport: &mut impl NotificationTransport,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.stats.cycles += 1;

        // 1. Read sensor via ReadingSource
        let current = match source.read(self.channel) {
            Ok(reading) => reading,
            Err(e) => {
                self.stats.read_failures += 1;
                sink.emit(&AppEvent::ReadFailed(e));
                return CycleOutcome::ReadFailed(e);
            }
        };
        self.stats.last_reading = Some(current);

        // 2. Seed the baseline if startup could not
        let Some(previous) = self.previous else {
            self.seed_baseline(current, sink);
            return CycleOutcome::Baseline;
        };

        // 3. Noise gate — the baseline stays put so slow drift accumulates
        let delta = previous.delta(current);
        if delta <= self.thresholds.noise_floor() {
            self.stats.below_noise += 1;
            debug!("READ | {} (delta {} within noise floor)", current, delta);
            return CycleOutcome::BelowNoise;
        }

        // 4. Classify and advance the baseline
        let event = classify(previous, current, &self.thresholds);
        self.previous = Some(current);

        let Some(event) = event else {
            debug!("READ | {} (delta {}, no condition change)", current, delta);
            return CycleOutcome::Unchanged;
        };

        // 5. Dispatch via NotificationTransport
        self.stats.events += 1;
        sink.emit(&AppEvent::Classified(event.clone()));
        let groups = event.groups.len();
        let result = dispatch(event, &self.destination, transport);

        match result {
            DeliveryResult::Delivered { status } => {
                self.stats.delivered += 1;
                sink.emit(&AppEvent::Delivered { status, groups });
            }
            DeliveryResult::DeliveryFailed(e) => {
                self.stats.delivery_failures += 1;
                sink.emit(&AppEvent::DeliveryFailed(e));
            }
        }

        CycleOutcome::Notified(result)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the running counters.
    pub fn build_telemetry(&self) -> MonitorStats {
        MonitorStats {
            previous: self.previous,
            ..self.stats
        }
    }

    /// The reading the next sample will be compared against.
    pub fn previous(&self) -> Option<Reading> {
        self.previous
    }

    // ── Internal ──────────────────────────────────────────────

    /// The baseline sits one dark-threshold below the first reading, so a
    /// sensor that powers up just above darkness reports the condition
    /// it starts in.
    fn seed_baseline(&mut self, reading: Reading, sink: &mut impl EventSink) {
        let baseline = reading.saturating_sub(self.thresholds.dark_threshold());
        self.previous = Some(baseline);
        self.stats.last_reading = Some(reading);
        sink.emit(&AppEvent::BaselineSet { reading, baseline });
    }
}
