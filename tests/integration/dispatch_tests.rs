//! Dispatcher tests: classified event → envelope → transport, one attempt.

use super::mock_hw::{FailingTransport, RecordingTransport, r};

use lumen::classifier::classify;
use lumen::config::{MonitorConfig, NotifierConfig, ThresholdConfig};
use lumen::error::DeliveryError;
use lumen::notify::{DeliveryResult, Destination, dispatch};

fn destination() -> Destination {
    Destination::from(&NotifierConfig::default())
}

#[test]
fn delivered_event_posts_once_to_the_endpoint() {
    let event = classify(r(260), r(5), &ThresholdConfig::default()).unwrap();
    let mut transport = RecordingTransport::new();

    let result = dispatch(event, &destination(), &mut transport);

    assert_eq!(result, DeliveryResult::Delivered { status: 200 });
    assert_eq!(transport.posts.len(), 1);
    assert_eq!(transport.posts[0].0, NotifierConfig::default().endpoint);
    assert_eq!(transport.groups(0), ["d1", "d2", "d3", "natural"]);
    assert_eq!(transport.payload(0)["contentTitle"], "Lumen Raspi");
    assert_eq!(transport.payload(0)["contentText"], "Natural Lighting");
}

#[test]
fn non_success_status_is_reported_not_raised() {
    let event = classify(r(8), r(12), &ThresholdConfig::default()).unwrap();
    let mut transport = FailingTransport::new(DeliveryError::Status(503));

    let result = dispatch(event, &destination(), &mut transport);

    assert_eq!(
        result,
        DeliveryResult::DeliveryFailed(DeliveryError::Status(503))
    );
    assert!(!result.is_delivered());
    assert_eq!(transport.attempts, 1, "delivery is never retried");
}

#[test]
fn each_failure_category_surfaces_unchanged() {
    for error in [
        DeliveryError::Timeout,
        DeliveryError::Connection,
        DeliveryError::Status(404),
    ] {
        let event = classify(r(8), r(12), &ThresholdConfig::default()).unwrap();
        let mut transport = FailingTransport::new(error);
        assert_eq!(
            dispatch(event, &destination(), &mut transport),
            DeliveryResult::DeliveryFailed(error)
        );
    }
}

#[test]
fn destination_follows_notifier_config() {
    let mut config = MonitorConfig::default();
    config.notifier.title = "Porch".into();
    config.notifier.time_to_live_secs = 60;
    let target = Destination::from(&config.notifier);

    let event = classify(r(8), r(12), &config.thresholds).unwrap();
    let mut transport = RecordingTransport::new();
    let _ = dispatch(event, &target, &mut transport);

    assert_eq!(transport.body(0)["gcm"]["time_to_live"], 60);
    assert_eq!(transport.payload(0)["BigTextStyle"]["bigContentTitle"], "Porch Natural Lighting");
}
