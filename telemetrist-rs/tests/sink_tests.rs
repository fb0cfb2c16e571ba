//! Delivery tests against a simulated analytics endpoint

use std::time::{Duration, Instant};

use serde_json::json;
use telemetrist::{EventSink, SendOutcome, SinkConfig};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sink_for(server: &MockServer, timeout: Duration) -> EventSink {
    let mut config = SinkConfig::for_backend(&server.uri());
    config.timeout = timeout;
    EventSink::new(config).expect("Failed to build sink")
}

#[tokio::test]
async fn test_personal_fields_never_leave_the_process() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analytics"))
        .and(body_json(json!({
            "event_name": "image_uploaded",
            "payload": {"feature": "upload"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "logged"})))
        .expect(1)
        .mount(&server)
        .await;

    let sink = sink_for(&server, Duration::from_secs(3));
    let outcome = sink
        .send("image_uploaded", &json!({"email": "a@b.com", "feature": "upload"}))
        .await;

    assert_eq!(outcome, SendOutcome::Delivered);
}

#[tokio::test]
async fn test_hanging_endpoint_is_abandoned_at_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let sink = sink_for(&server, Duration::from_millis(200));
    let started = Instant::now();
    let outcome = sink.send("page_view", &json!({"page": "market"})).await;

    assert_eq!(outcome, SendOutcome::TimedOut);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_server_error_is_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = sink_for(&server, Duration::from_secs(3))
        .send("page_view", &json!({"page": "policy"}))
        .await;

    assert!(matches!(outcome, SendOutcome::Failed(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_swallowed() {
    let mut config = SinkConfig::for_backend("http://127.0.0.1:1");
    config.timeout = Duration::from_secs(2);
    let sink = EventSink::new(config).unwrap();

    let outcome = sink.send("page_view", &json!({})).await;
    assert!(matches!(outcome, SendOutcome::Failed(_) | SendOutcome::TimedOut));
}

#[tokio::test]
async fn test_disabled_sink_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sink = sink_for(&server, Duration::from_secs(3));
    let toggle = sink.clone();

    toggle.disable();
    assert_eq!(sink.send("page_view", &json!({"page": "home"})).await, SendOutcome::Disabled);
    sink.track("page_view", json!({"page": "home"}));

    toggle.enable();
    assert_eq!(sink.send("page_view", &json!({"page": "home"})).await, SendOutcome::Delivered);
}

#[tokio::test]
async fn test_empty_event_name_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sink = sink_for(&server, Duration::from_secs(3));
    assert_eq!(sink.send("", &json!({"page": "home"})).await, SendOutcome::Rejected);
    assert_eq!(sink.send("click", &json!("not an object")).await, SendOutcome::Rejected);
}

#[tokio::test]
async fn test_track_returns_immediately_and_delivers_in_background() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analytics"))
        .and(body_json(json!({
            "event_name": "query_submitted",
            "payload": {"lang": "hi", "has_image": true}
        })))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let sink = sink_for(&server, Duration::from_secs(3));
    let started = Instant::now();
    sink.track(
        "query_submitted",
        json!({"lang": "hi", "has_image": true, "phone": "9999999999"}),
    );
    assert!(started.elapsed() < Duration::from_millis(100));

    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        let received = server.received_requests().await.unwrap_or_default();
        if !received.is_empty() {
            break;
        }
        assert!(Instant::now() < deadline, "event was never delivered");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
