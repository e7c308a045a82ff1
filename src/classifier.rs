//! Lighting-condition classifier.
//!
//! Compares two consecutive light readings against the configured
//! [`ThresholdConfig`] and decides whether a notification-worthy change
//! happened.  Two independent rule families contribute recipient groups:
//!
//! ```text
//!  delta = |current - previous|
//!
//!  magnitude:   d >= band[0] ─▶ d1   d >= band[1] ─▶ d2   ...   (all that apply)
//!  transition:  prev < bright < cur ─▶ artificial
//!               prev > bright > cur ─▶ natural
//!               prev < dark   < cur ─▶ natural | artificial     (first match only)
//!               prev > dark   > cur ─▶ dark
//! ```
//!
//! Threshold comparisons are strict: a reading sitting exactly on a
//! threshold has not crossed it.  The classifier is a pure function; the
//! noise floor is applied by the caller before classification, so a small
//! delta that straddles a threshold still produces a transition event.

use serde::{Deserialize, Serialize};

use crate::config::ThresholdConfig;
use crate::error::SensorError;

/// Largest value a 10-bit ADC conversion can produce.
pub const READING_MAX: u16 = 1023;

// ───────────────────────────────────────────────────────────────
// Reading
// ───────────────────────────────────────────────────────────────

/// Relative light intensity on one ADC channel, `0..=1023`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Reading(u16);

impl Reading {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(READING_MAX);

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Absolute difference between two readings.
    pub const fn delta(self, other: Self) -> u16 {
        self.0.abs_diff(other.0)
    }

    /// `self - amount`, floored at zero.
    #[must_use]
    pub const fn saturating_sub(self, amount: u16) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

impl TryFrom<u16> for Reading {
    type Error = SensorError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        if raw > READING_MAX {
            return Err(SensorError::OutOfRange);
        }
        Ok(Self(raw))
    }
}

impl core::fmt::Display for Reading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Icons and conditions
// ───────────────────────────────────────────────────────────────

/// Icon selector understood by the receiving app (`ic_lightbulb_<token>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IconToken {
    /// Plain bulb; used when nothing selects a more specific icon.
    #[default]
    #[serde(rename = "b")]
    Bulb,
    #[serde(rename = "r")]
    Fluctuation,
    #[serde(rename = "y")]
    Artificial,
    #[serde(rename = "g")]
    Natural,
}

impl IconToken {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bulb => "b",
            Self::Fluctuation => "r",
            Self::Artificial => "y",
            Self::Natural => "g",
        }
    }
}

/// The lighting condition a threshold crossing leads into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LightingCondition {
    Artificial,
    Natural,
    Dark,
}

impl LightingCondition {
    /// Recipient group for this condition.
    pub const fn group(self) -> &'static str {
        match self {
            Self::Artificial => "artificial",
            Self::Natural => "natural",
            Self::Dark => "dark",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Artificial => "Artificial Lighting",
            Self::Natural => "Natural Lighting",
            Self::Dark => "Absence of Light",
        }
    }

    /// Icon override.  Darkness keeps whatever icon was already selected.
    pub const fn icon(self) -> Option<IconToken> {
        match self {
            Self::Artificial => Some(IconToken::Artificial),
            Self::Natural => Some(IconToken::Natural),
            Self::Dark => None,
        }
    }

    /// Detect a threshold crossing between two readings.  Rules are
    /// evaluated in order and the first match wins.
    pub fn detect(previous: Reading, current: Reading, config: &ThresholdConfig) -> Option<Self> {
        let (k0, k1) = (previous.value(), current.value());
        let dark = config.dark_threshold();
        let bright = config.bright_threshold();

        if k0 < bright && bright < k1 {
            Some(Self::Artificial)
        } else if k0 > bright && bright > k1 {
            Some(Self::Natural)
        } else if k0 < dark && dark < k1 {
            // Leaving darkness: where we landed decides the kind of light.
            if k1 < bright {
                Some(Self::Natural)
            } else {
                Some(Self::Artificial)
            }
        } else if k0 > dark && dark > k1 {
            Some(Self::Dark)
        } else {
            None
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Classified event
// ───────────────────────────────────────────────────────────────

/// A notification-worthy lighting change.
///
/// `groups` is never empty: "nothing happened" is expressed as `None`
/// from [`classify`], not as an event without recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEvent {
    /// Recipient groups in evaluation order (magnitude bands, then transition).
    pub groups: Vec<String>,
    pub condition_label: String,
    pub icon: IconToken,
    /// Threshold crossing that fired, if any.
    pub condition: Option<LightingCondition>,
    pub previous: Reading,
    pub current: Reading,
}

/// Classify a reading pair.  Returns `None` when neither a magnitude band
/// nor a transition rule applies.
pub fn classify(
    previous: Reading,
    current: Reading,
    config: &ThresholdConfig,
) -> Option<ClassifiedEvent> {
    let delta = previous.delta(current);

    let mut groups = Vec::new();
    let mut label = "";
    let mut icon = IconToken::default();

    // Bands are strictly ascending, so the first miss ends the walk.
    for band in config.bands().iter().take_while(|b| delta >= b.threshold) {
        groups.push(band.group.clone());
        label = &band.label;
        if let Some(band_icon) = band.icon {
            icon = band_icon;
        }
    }

    let condition = LightingCondition::detect(previous, current, config);
    if let Some(cond) = condition {
        groups.push(cond.group().to_owned());
        label = cond.label();
        if let Some(cond_icon) = cond.icon() {
            icon = cond_icon;
        }
    }

    if groups.is_empty() {
        return None;
    }

    Some(ClassifiedEvent {
        groups,
        condition_label: label.to_owned(),
        icon,
        condition,
        previous,
        current,
    })
}
