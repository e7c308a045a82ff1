//! Integration tests for the MonitorService → classifier → dispatcher
//! pipeline, driven cycle by cycle with scripted readings.

use super::mock_hw::{FailingTransport, RecordingSink, RecordingTransport, ScriptedSource, r};

use lumen::app::events::AppEvent;
use lumen::app::service::{CycleOutcome, MonitorService};
use lumen::config::{FluctuationBand, MonitorConfig, ThresholdConfig};
use lumen::error::{DeliveryError, SensorError};
use lumen::notify::DeliveryResult;

fn make_monitor(config: &MonitorConfig, script: &[u16]) -> (MonitorService, ScriptedSource, RecordingSink) {
    let mut monitor = MonitorService::new(config);
    let mut source = ScriptedSource::readings(script);
    let mut sink = RecordingSink::new();
    monitor.start(&mut source, &mut sink);
    (monitor, source, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_announces_channel_and_seeds_baseline() {
    let (monitor, _source, sink) = make_monitor(&MonitorConfig::default(), &[15]);

    assert!(matches!(sink.events[0], AppEvent::Started { channel: 0 }));
    assert!(matches!(
        sink.events[1],
        AppEvent::BaselineSet { reading, baseline } if reading == r(15) && baseline == r(5)
    ));
    assert_eq!(monitor.previous(), Some(r(5)));
}

#[test]
fn failed_startup_read_is_recovered_on_first_tick() {
    let mut monitor = MonitorService::new(&MonitorConfig::default());
    let mut source = ScriptedSource::new([Err(SensorError::TransferFailed), Ok(r(300))]);
    let mut transport = RecordingTransport::new();
    let mut sink = RecordingSink::new();

    monitor.start(&mut source, &mut sink);
    assert_eq!(monitor.previous(), None);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ReadFailed(_))), 1);

    let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
    assert_eq!(outcome, CycleOutcome::Baseline);
    assert_eq!(monitor.previous(), Some(r(290)));
    assert!(transport.posts.is_empty());
}

#[test]
fn configured_channel_is_sampled() {
    let mut config = MonitorConfig::default();
    config.sensor.channel = 3;
    let (mut monitor, mut source, mut sink) = make_monitor(&config, &[100, 400]);
    let mut transport = RecordingTransport::new();

    let _ = monitor.tick(&mut source, &mut transport, &mut sink);
    assert_eq!(source.channels, vec![3, 3]);
}

// ── Noise gate ────────────────────────────────────────────────

#[test]
fn sub_noise_change_keeps_previous_reading() {
    let (mut monitor, mut source, mut sink) = make_monitor(&MonitorConfig::default(), &[500, 493, 495]);
    let mut transport = RecordingTransport::new();

    // 490 → 493 and 490 → 495 are both within the floor of 5.
    for _ in 0..2 {
        let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
        assert_eq!(outcome, CycleOutcome::BelowNoise);
        assert_eq!(monitor.previous(), Some(r(490)));
    }
    assert!(transport.posts.is_empty());
    assert_eq!(monitor.build_telemetry().below_noise, 2);
}

#[test]
fn slow_drift_accumulates_until_it_clears_the_floor() {
    let (mut monitor, mut source, mut sink) = make_monitor(&MonitorConfig::default(), &[500, 494, 496]);
    let mut transport = RecordingTransport::new();

    assert_eq!(
        monitor.tick(&mut source, &mut transport, &mut sink),
        CycleOutcome::BelowNoise
    );
    // 490 → 496: delta 6 clears the floor but crosses nothing.
    assert_eq!(
        monitor.tick(&mut source, &mut transport, &mut sink),
        CycleOutcome::Unchanged
    );
    assert_eq!(monitor.previous(), Some(r(496)));
    assert!(transport.posts.is_empty());
}

#[test]
fn band_just_above_noise_floor_is_reachable() {
    let mut config = MonitorConfig::default();
    config.thresholds = ThresholdConfig::new(
        10,
        250,
        49,
        [FluctuationBand::new(50, "d1", "Small Fluctuation", None)],
    )
    .unwrap();
    let (mut monitor, mut source, mut sink) = make_monitor(&config, &[310, 350]);
    let mut transport = RecordingTransport::new();

    // 300 → 350: delta 50 clears the floor of 49 and meets d1 exactly.
    let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
    assert!(matches!(outcome, CycleOutcome::Notified(_)));
    assert_eq!(transport.groups(0), ["d1"]);
}

// ── Read failures ─────────────────────────────────────────────

#[test]
fn read_failure_skips_the_cycle() {
    let mut monitor = MonitorService::new(&MonitorConfig::default());
    let mut source = ScriptedSource::new([Ok(r(100)), Err(SensorError::TransferFailed), Ok(r(101))]);
    let mut transport = RecordingTransport::new();
    let mut sink = RecordingSink::new();
    monitor.start(&mut source, &mut sink);

    let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
    assert_eq!(outcome, CycleOutcome::ReadFailed(SensorError::TransferFailed));
    assert_eq!(monitor.previous(), Some(r(90)));
    assert!(matches!(
        sink.last(),
        Some(AppEvent::ReadFailed(SensorError::TransferFailed))
    ));

    // The loop carries on with the next reading.
    let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
    assert_eq!(outcome, CycleOutcome::Unchanged);

    let t = monitor.build_telemetry();
    assert_eq!(t.cycles, 2);
    assert_eq!(t.read_failures, 1);
}

// ── Classification and delivery ───────────────────────────────

#[test]
fn lights_on_from_dark_notifies_every_band_and_artificial() {
    let (mut monitor, mut source, mut sink) = make_monitor(&MonitorConfig::default(), &[15, 260]);
    let mut transport = RecordingTransport::new();

    let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
    assert_eq!(
        outcome,
        CycleOutcome::Notified(DeliveryResult::Delivered { status: 200 })
    );
    assert_eq!(monitor.previous(), Some(r(260)));

    assert_eq!(transport.posts.len(), 1);
    assert_eq!(transport.groups(0), ["d1", "d2", "d3", "artificial"]);

    let payload = transport.payload(0);
    assert_eq!(payload["contentText"], "Artificial Lighting");
    assert_eq!(payload["background"], "ic_lightbulb_y");
    assert_eq!(
        payload["BigTextStyle"]["bigText"],
        "Lighting conditions changed from 5 to 260"
    );

    assert!(matches!(
        sink.last(),
        Some(AppEvent::Delivered { status: 200, groups: 4 })
    ));
}

#[test]
fn falling_below_dark_keeps_default_icon() {
    let (mut monitor, mut source, mut sink) = make_monitor(&MonitorConfig::default(), &[30, 5]);
    let mut transport = RecordingTransport::new();

    // 20 → 5: no band, rule d only.
    let _ = monitor.tick(&mut source, &mut transport, &mut sink);

    assert_eq!(transport.groups(0), ["dark"]);
    let payload = transport.payload(0);
    assert_eq!(payload["contentText"], "Absence of Light");
    assert_eq!(payload["background"], "ic_lightbulb_b");
}

#[test]
fn fluctuation_without_crossing_uses_band_icon() {
    let (mut monitor, mut source, mut sink) = make_monitor(&MonitorConfig::default(), &[410, 460]);
    let mut transport = RecordingTransport::new();

    // 400 → 460: delta 60 qualifies for d1 only.
    let _ = monitor.tick(&mut source, &mut transport, &mut sink);

    assert_eq!(transport.groups(0), ["d1"]);
    let payload = transport.payload(0);
    assert_eq!(payload["contentText"], "Small Fluctuation");
    assert_eq!(payload["background"], "ic_lightbulb_r");
}

#[test]
fn envelope_carries_notifier_settings() {
    let mut config = MonitorConfig::default();
    config.notifier.endpoint = "http://gateway.local/push".into();
    config.notifier.sender_id = "porch".into();
    config.notifier.dry_run = true;
    config.notifier.time_to_live_secs = 30;
    let (mut monitor, mut source, mut sink) = make_monitor(&config, &[15, 260]);
    let mut transport = RecordingTransport::new();

    let _ = monitor.tick(&mut source, &mut transport, &mut sink);

    assert_eq!(transport.posts[0].0, "http://gateway.local/push");
    let body = transport.body(0);
    assert_eq!(body["senderId"], "porch");
    assert_eq!(body["gcm"]["dry_run"], true);
    assert_eq!(body["gcm"]["time_to_live"], 30);
}

#[test]
fn delivery_failure_advances_previous_and_loop_continues() {
    let (mut monitor, mut source, mut sink) = make_monitor(&MonitorConfig::default(), &[15, 260, 5]);
    let mut transport = FailingTransport::new(DeliveryError::Timeout);

    let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
    assert_eq!(
        outcome,
        CycleOutcome::Notified(DeliveryResult::DeliveryFailed(DeliveryError::Timeout))
    );
    assert_eq!(monitor.previous(), Some(r(260)));
    assert!(matches!(
        sink.last(),
        Some(AppEvent::DeliveryFailed(DeliveryError::Timeout))
    ));

    // 260 → 5 is classified against the advanced reading.
    let outcome = monitor.tick(&mut source, &mut transport, &mut sink);
    assert!(matches!(outcome, CycleOutcome::Notified(res) if !res.is_delivered()));
    assert_eq!(transport.attempts, 2);

    let t = monitor.build_telemetry();
    assert_eq!(t.events, 2);
    assert_eq!(t.delivered, 0);
    assert_eq!(t.delivery_failures, 2);
}

#[test]
fn classified_event_is_emitted_before_delivery() {
    let (mut monitor, mut source, mut sink) = make_monitor(&MonitorConfig::default(), &[15, 260]);
    let mut transport = RecordingTransport::new();
    let _ = monitor.tick(&mut source, &mut transport, &mut sink);

    let classified = sink
        .events
        .iter()
        .position(|e| matches!(e, AppEvent::Classified(_)))
        .unwrap();
    let delivered = sink
        .events
        .iter()
        .position(|e| matches!(e, AppEvent::Delivered { .. }))
        .unwrap();
    assert!(classified < delivered);
}
