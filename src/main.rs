//! Lumen — Main Entry Point
//!
//! Hexagonal architecture with a single-threaded fixed-interval poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Mcp3008<RppalSpiOpener>  HttpTransport          LogEventSink  │
//! │  (ReadingSource)          (NotificationTransport) (EventSink)  │
//! │  FileConfigAdapter        ConsoleLogger                        │
//! │  (ConfigPort)             (log::Log)                           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  noise gate · classifier · dispatcher                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `lumen [CONFIG_PATH]` (default `lumen.json`).
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use lumen::adapters::console_logger::ConsoleLogger;
use lumen::adapters::file_config::FileConfigAdapter;
use lumen::adapters::http_transport::HttpTransport;
use lumen::adapters::log_sink::LogEventSink;
use lumen::adapters::spi_bus::RppalSpiOpener;
use lumen::app::events::AppEvent;
use lumen::app::ports::{ConfigError, ConfigPort, EventSink};
use lumen::app::service::MonitorService;
use lumen::config::MonitorConfig;
use lumen::error::Error;
use lumen::sensors::Mcp3008;

const DEFAULT_CONFIG_PATH: &str = "lumen.json";

fn main() -> Result<()> {
    // ── 1. Load config (or defaults on first start) ───────────
    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config_store = FileConfigAdapter::new(path);

    let (config, first_start) = match config_store.load() {
        Ok(cfg) => (cfg, false),
        Err(ConfigError::NotFound) => (MonitorConfig::default(), true),
        Err(e) => {
            // Invalid thresholds or ranges are fatal: never run half-configured.
            return Err(Error::from(e))
                .with_context(|| format!("loading {}", config_store.path().display()));
        }
    };

    // ── 2. Logging ────────────────────────────────────────────
    ConsoleLogger::init(config.log_level).context("installing console logger")?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Lumen v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    if first_start {
        warn!(
            "No config at {}, writing defaults",
            config_store.path().display()
        );
        if let Err(e) = config_store.save(&config) {
            warn!("Could not persist default config ({}), continuing", e);
        }
    }

    let t = &config.thresholds;
    info!(
        "Thresholds: dark={} bright={} noise={} bands={}",
        t.dark_threshold(),
        t.bright_threshold(),
        t.noise_floor(),
        t.bands().len()
    );
    if config.notifier.dry_run {
        info!("Notifier in dry-run mode");
    }

    // ── 3. Construct adapters ─────────────────────────────────
    let opener = RppalSpiOpener::new(&config.sensor)
        .map_err(Error::from)
        .context("configuring SPI bus")?;
    let mut adc = Mcp3008::new(opener);
    let mut transport = HttpTransport::new(Duration::from_millis(
        config.notifier.request_timeout_ms.into(),
    ));
    let mut log_sink = LogEventSink::new();

    // ── 4. Construct monitor service ──────────────────────────
    let mut monitor = MonitorService::new(&config);
    monitor.start(&mut adc, &mut log_sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    let poll_interval = Duration::from_millis(config.poll_interval_ms.into());
    let telemetry_every = (u64::from(config.telemetry_interval_secs) * 1000
        / u64::from(config.poll_interval_ms))
    .max(1);
    let mut telemetry_counter: u64 = 0;

    loop {
        thread::sleep(poll_interval);

        monitor.tick(&mut adc, &mut transport, &mut log_sink);

        telemetry_counter += 1;
        if telemetry_counter >= telemetry_every {
            log_sink.emit(&AppEvent::Telemetry(monitor.build_telemetry()));
            telemetry_counter = 0;
        }
    }
}
