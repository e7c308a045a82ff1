//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements            | Connects to                 |
//! |------------------|-----------------------|-----------------------------|
//! | `spi_bus`        | SpiOpener             | `/dev/spidev*` via rppal    |
//! | `http_transport` | NotificationTransport | Push gateway (HTTPS POST)   |
//! | `file_config`    | ConfigPort            | JSON config file            |
//! | `log_sink`       | EventSink             | `log` facade                |
//! | `console_logger` | log::Log              | stderr                      |

pub mod console_logger;
pub mod file_config;
pub mod http_transport;
pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod spi_bus;
