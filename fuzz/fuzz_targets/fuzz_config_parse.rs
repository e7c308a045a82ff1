//! Fuzz target: `MonitorConfig` deserialisation
//!
//! Feeds arbitrary bytes to the JSON config parser and verifies that any
//! document it accepts also passes validation once re-encoded, i.e. the
//! threshold invariants cannot be bypassed through the file format.
//!
//! cargo fuzz run fuzz_config_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use lumen::config::MonitorConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(cfg) = serde_json::from_slice::<MonitorConfig>(data) else {
        return;
    };

    let t = &cfg.thresholds;
    assert!(t.dark_threshold() < t.bright_threshold());
    assert!(
        t.bands().windows(2).all(|w| w[0].threshold < w[1].threshold),
        "bands accepted out of order"
    );

    let json = serde_json::to_string(&cfg).unwrap();
    let again: MonitorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(again, cfg);
});
