//! MCP3008 8-channel 10-bit ADC driver.
//!
//! One conversion is a 3-byte full-duplex SPI transfer:
//!
//! ```text
//!  MOSI: 0000_0001  1 ccc_0000  xxxx_xxxx      start bit, single-ended, channel
//!  MISO: xxxx_xxxx  xxxx_x0 98  7654_3210      10-bit result
//! ```
//!
//! ## Bus lifetime
//!
//! The bus is opened through a [`SpiOpener`] at the start of every
//! [`Mcp3008::read`] and dropped before it returns, so no SPI handle is held
//! between poll cycles.  On the Raspberry Pi the opener is
//! [`RppalSpiOpener`](crate::adapters::spi_bus::RppalSpiOpener); tests inject
//! an in-memory device.

use embedded_hal::spi::SpiDevice;

use crate::app::ports::ReadingSource;
use crate::classifier::Reading;
use crate::config::MAX_CHANNEL;
use crate::error::SensorError;

const START_BIT: u8 = 0x01;
const SINGLE_ENDED: u8 = 0x08;

/// Produces a freshly opened SPI device for one conversion.
pub trait SpiOpener {
    type Device: SpiDevice;

    fn open(&mut self) -> Result<Self::Device, SensorError>;
}

pub struct Mcp3008<O: SpiOpener> {
    opener: O,
}

impl<O: SpiOpener> Mcp3008<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    /// Perform a single-ended conversion on `channel`.
    pub fn read(&mut self, channel: u8) -> Result<Reading, SensorError> {
        if channel > MAX_CHANNEL {
            return Err(SensorError::InvalidChannel(channel));
        }

        let mut frame = request_frame(channel);
        let mut device = self.opener.open()?;
        device
            .transfer_in_place(&mut frame)
            .map_err(|_| SensorError::TransferFailed)?;
        drop(device);

        Reading::try_from(decode_frame(&frame))
    }
}

impl<O: SpiOpener> ReadingSource for Mcp3008<O> {
    fn read(&mut self, channel: u8) -> Result<Reading, SensorError> {
        Mcp3008::read(self, channel)
    }
}

fn request_frame(channel: u8) -> [u8; 3] {
    [START_BIT, (SINGLE_ENDED | channel) << 4, 0x00]
}

fn decode_frame(frame: &[u8; 3]) -> u16 {
    (u16::from(frame[1] & 0x03) << 8) | u16::from(frame[2])
}
