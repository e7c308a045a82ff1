//! Console backend for the `log` facade.
//!
//! `set_logger` needs a `'static` logger and the level comes from the
//! config file at runtime, so there is one static instance per level and
//! `init` picks the matching one.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError, set_logger, set_max_level};

static OFF_LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Off);
static ERROR_LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Error);
static WARN_LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Warn);
static INFO_LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Info);
static DEBUG_LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Debug);
static TRACE_LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Trace);

/// Writes `LEVEL target -- message` lines to stderr.
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Install the logger for `level`.  Fails if a logger is already set.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger: &'static dyn Log = match level {
            LevelFilter::Off => &OFF_LOGGER,
            LevelFilter::Error => &ERROR_LOGGER,
            LevelFilter::Warn => &WARN_LOGGER,
            LevelFilter::Info => &INFO_LOGGER,
            LevelFilter::Debug => &DEBUG_LOGGER,
            LevelFilter::Trace => &TRACE_LOGGER,
        };
        set_logger(logger)?;
        set_max_level(level);
        Ok(())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {} -- {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}
