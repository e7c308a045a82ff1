//! Push-gateway message types.
//!
//! The gateway expects an envelope whose `gcm.data.payload` field is itself
//! a JSON document *encoded as a string*; the receiving app decodes it a
//! second time to render a big-text notification:
//!
//! ```text
//! {"senderId": .., "gcm": {"dry_run": .., "time_to_live": .., "groups": [..],
//!                          "data": {"payload": "{\"style\":\"BigTextStyle\", ..}"}}}
//! ```
//!
//! Both layers are typed structs serialised with `serde_json`; no text
//! templating is involved.

use serde::Serialize;

use super::dispatcher::Destination;
use crate::classifier::{ClassifiedEvent, IconToken, Reading};
use crate::error::DeliveryError;

const STYLE_BIG_TEXT: &str = "BigTextStyle";
const SMALL_ICON: &str = "ic_lightbulb";

// ───────────────────────────────────────────────────────────────
// Inner payload (rendered by the phone / watch app)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub style: &'static str,
    pub content_title: String,
    pub content_text: String,
    #[serde(rename = "BigTextStyle")]
    pub big_text_style: BigTextStyle,
    pub small_icon: &'static str,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BigTextStyle {
    pub big_content_title: String,
    pub big_text: String,
    pub summary: String,
}

/// Build the notification body for a lighting change.
pub fn build_payload(
    title: &str,
    condition_label: &str,
    icon: IconToken,
    previous: Reading,
    current: Reading,
) -> NotificationPayload {
    NotificationPayload {
        style: STYLE_BIG_TEXT,
        content_title: title.to_owned(),
        content_text: condition_label.to_owned(),
        big_text_style: BigTextStyle {
            big_content_title: format!("{title} {condition_label}"),
            big_text: format!("Lighting conditions changed from {previous} to {current}"),
            summary: format!("Lighting changed from {previous} to {current}"),
        },
        small_icon: SMALL_ICON,
        background: format!("{SMALL_ICON}_{}", icon.as_str()),
    }
}

// ───────────────────────────────────────────────────────────────
// Envelope (consumed by the gateway)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub sender_id: String,
    pub gcm: GcmSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GcmSection {
    pub dry_run: bool,
    pub time_to_live: u32,
    pub groups: Vec<String>,
    pub data: PayloadData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadData {
    /// JSON-encoded [`NotificationPayload`].
    pub payload: String,
}

/// Wrap a classified event for delivery to `target`.  The event's groups
/// become the recipient groups.
pub fn build_envelope(event: ClassifiedEvent, target: &Destination) -> Result<Envelope, DeliveryError> {
    let payload = build_payload(
        &target.title,
        &event.condition_label,
        event.icon,
        event.previous,
        event.current,
    );
    let payload = serde_json::to_string(&payload).map_err(|_| DeliveryError::Encode)?;

    Ok(Envelope {
        sender_id: target.sender_id.clone(),
        gcm: GcmSection {
            dry_run: target.dry_run,
            time_to_live: target.time_to_live_secs,
            groups: event.groups,
            data: PayloadData { payload },
        },
    })
}

/// Serialise an envelope to its wire form.
pub fn encode(envelope: &Envelope) -> Result<String, DeliveryError> {
    serde_json::to_string(envelope).map_err(|_| DeliveryError::Encode)
}
