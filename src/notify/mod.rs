//! Notification subsystem — message building and single-shot delivery.

pub mod dispatcher;
pub mod message;

pub use dispatcher::{DeliveryResult, Destination, dispatch};
