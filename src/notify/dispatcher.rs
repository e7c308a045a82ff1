//! Notification dispatcher.
//!
//! Turns a [`ClassifiedEvent`] into a gateway envelope and makes exactly
//! one delivery attempt through a [`NotificationTransport`].  Every failure
//! is folded into [`DeliveryResult::DeliveryFailed`]; nothing is retried and
//! nothing propagates to the polling loop.

use log::debug;

use super::message::{build_envelope, encode};
use crate::app::ports::NotificationTransport;
use crate::classifier::ClassifiedEvent;
use crate::config::NotifierConfig;
use crate::error::DeliveryError;

/// Where and how a notification is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub endpoint: String,
    pub sender_id: String,
    pub dry_run: bool,
    pub time_to_live_secs: u32,
    /// Title shown above the condition label.
    pub title: String,
}

impl From<&NotifierConfig> for Destination {
    fn from(cfg: &NotifierConfig) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            sender_id: cfg.sender_id.clone(),
            dry_run: cfg.dry_run,
            time_to_live_secs: cfg.time_to_live_secs,
            title: cfg.title.clone(),
        }
    }
}

/// Outcome of a single delivery attempt.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The gateway accepted the envelope.
    Delivered { status: u16 },
    /// The envelope was dropped.
    DeliveryFailed(DeliveryError),
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Encode `event` and hand it to `transport` once.
pub fn dispatch(
    event: ClassifiedEvent,
    target: &Destination,
    transport: &mut impl NotificationTransport,
) -> DeliveryResult {
    let body = match build_envelope(event, target).and_then(|envelope| encode(&envelope)) {
        Ok(body) => body,
        Err(e) => return DeliveryResult::DeliveryFailed(e),
    };

    debug!("NOTIFY | POST {} ({} bytes)", target.endpoint, body.len());

    match transport.post_json(&target.endpoint, &body) {
        Ok(status) => DeliveryResult::Delivered { status },
        Err(e) => DeliveryResult::DeliveryFailed(e),
    }
}
