//! Fuzz target: `classify`
//!
//! Builds a threshold set and a reading pair from raw bytes and checks:
//! - No panics for any valid threshold set
//! - Every event carries at least one group
//! - Band groups come out in configured order
//!
//! cargo fuzz run fuzz_classify

#![no_main]

use libfuzzer_sys::fuzz_target;
use lumen::classifier::{READING_MAX, Reading, classify};
use lumen::config::{FluctuationBand, ThresholdConfig};

fn word(data: &[u8], i: usize) -> u16 {
    let lo = data.get(2 * i).copied().unwrap_or(0);
    let hi = data.get(2 * i + 1).copied().unwrap_or(0);
    u16::from_le_bytes([lo, hi]) % (READING_MAX + 1)
}

fuzz_target!(|data: &[u8]| {
    let band_count = data.first().map_or(0, |b| usize::from(b % 9));
    let bands = (0..band_count)
        .map(|i| FluctuationBand::new(word(data, 5 + i), format!("d{}", i + 1), "band", None));

    // Most byte strings yield invalid thresholds; rejection is fine.
    let Ok(cfg) = ThresholdConfig::new(word(data, 1), word(data, 2), word(data, 3), bands) else {
        return;
    };

    let prev = Reading::try_from(word(data, 14)).unwrap();
    let cur = Reading::try_from(word(data, 15)).unwrap();

    if let Some(ev) = classify(prev, cur, &cfg) {
        assert!(!ev.groups.is_empty(), "event without groups");
        let band_groups: Vec<_> = cfg.bands().iter().map(|b| b.group.as_str()).collect();
        let emitted: Vec<_> = ev
            .groups
            .iter()
            .map(String::as_str)
            .filter(|g| band_groups.contains(g))
            .collect();
        assert_eq!(emitted, band_groups[..emitted.len()], "bands out of order");
    }
});
