//! Raspberry Pi SPI adapter.
//!
//! Implements [`SpiOpener`] on top of `rppal`.  Every call to
//! [`SpiOpener::open`] opens `/dev/spidev<bus>.<cs>` afresh; the returned
//! device closes the file descriptor when dropped at the end of the read.

use log::warn;
use rppal::spi::{Bus, Mode, SimpleHalSpiDevice, SlaveSelect, Spi};

use crate::config::SensorConfig;
use crate::error::SensorError;
use crate::sensors::SpiOpener;

/// Opens the configured SPI bus in mode 0 for each conversion.
pub struct RppalSpiOpener {
    bus: Bus,
    slave_select: SlaveSelect,
    clock_hz: u32,
}

impl RppalSpiOpener {
    /// Map the configured bus and chip-select indices onto `rppal` enums.
    /// Returns `Err(SensorError::BusOpenFailed)` for indices the Pi does
    /// not have.
    pub fn new(cfg: &SensorConfig) -> Result<Self, SensorError> {
        let bus = match cfg.spi_bus {
            0 => Bus::Spi0,
            1 => Bus::Spi1,
            2 => Bus::Spi2,
            3 => Bus::Spi3,
            4 => Bus::Spi4,
            5 => Bus::Spi5,
            6 => Bus::Spi6,
            other => {
                warn!("SPI: no bus {}", other);
                return Err(SensorError::BusOpenFailed);
            }
        };
        let slave_select = match cfg.chip_select {
            0 => SlaveSelect::Ss0,
            1 => SlaveSelect::Ss1,
            2 => SlaveSelect::Ss2,
            other => {
                warn!("SPI: no chip-select {}", other);
                return Err(SensorError::BusOpenFailed);
            }
        };
        Ok(Self {
            bus,
            slave_select,
            clock_hz: cfg.clock_hz,
        })
    }
}

impl SpiOpener for RppalSpiOpener {
    type Device = SimpleHalSpiDevice<Spi>;

    fn open(&mut self) -> Result<Self::Device, SensorError> {
        let spi = Spi::new(self.bus, self.slave_select, self.clock_hz, Mode::Mode0).map_err(|e| {
            warn!("SPI: open {:?}/{:?} failed: {}", self.bus, self.slave_select, e);
            SensorError::BusOpenFailed
        })?;
        Ok(SimpleHalSpiDevice::new(spi))
    }
}
