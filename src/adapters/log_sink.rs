//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via the console logger in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { channel } => {
                info!("START | sampling ADC channel {}", channel);
            }
            AppEvent::BaselineSet { reading, baseline } => {
                info!("READ  | first reading {} -> baseline {}", reading, baseline);
            }
            AppEvent::ReadFailed(e) => {
                warn!("READ  | failed: {}", e);
            }
            AppEvent::Classified(ev) => {
                info!(
                    "EVENT | {} -> {} | {} | icon={} | groups={}",
                    ev.previous,
                    ev.current,
                    ev.condition_label,
                    ev.icon.as_str(),
                    ev.groups.join(","),
                );
            }
            AppEvent::Delivered { status, groups } => {
                info!("NOTIFY| delivered to {} group(s), HTTP {}", groups, status);
            }
            AppEvent::DeliveryFailed(e) => {
                warn!("NOTIFY| dropped: {}", e);
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | cycles={} read_err={} quiet={} events={} sent={} send_err={} | \
                     last={} baseline={}",
                    t.cycles,
                    t.read_failures,
                    t.below_noise,
                    t.events,
                    t.delivered,
                    t.delivery_failures,
                    t.last_reading.map_or_else(|| "-".to_owned(), |r| r.to_string()),
                    t.previous.map_or_else(|| "-".to_owned(), |r| r.to_string()),
                );
            }
        }
    }
}
