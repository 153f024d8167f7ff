use std::time::Duration;

use insights_client::{
    ClientSettings, FailureKind, HttpInsightsClient, InsightsApi, GENERIC_FETCH_ERROR,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpInsightsClient {
    let settings = ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    };
    HttpInsightsClient::new(settings).expect("client")
}

#[tokio::test]
async fn fetch_returns_payload_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch-insights/"))
        .and(query_param("website_url", "https://memy.co.in"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"brand": "memy", "products": 12})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payload = client
        .fetch_insights("https://memy.co.in")
        .await
        .expect("fetch ok");

    assert_eq!(payload, json!({"brand": "memy", "products": 12}));
}

#[tokio::test]
async fn website_url_parameter_is_encoded() {
    let server = MockServer::start().await;
    // The raw input goes out URL-encoded and reaches the service
    // byte-exact after decoding.
    Mock::given(method("GET"))
        .and(path("/fetch-insights/"))
        .and(query_param("website_url", "https://memy.co.in/?tag=a b&x=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payload = client
        .fetch_insights("https://memy.co.in/?tag=a b&x=1")
        .await
        .expect("fetch ok");

    assert_eq!(payload, json!({"ok": true}));
}

#[tokio::test]
async fn error_detail_is_preferred() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch-insights/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Website not found"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_insights("not-a-real-site").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert_eq!(err.message, "Website not found");
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn missing_detail_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch-insights/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_insights("https://gone.example.com").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, GENERIC_FETCH_ERROR);
}

#[tokio::test]
async fn non_detail_error_body_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch-insights/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_insights("https://memy.co.in").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, GENERIC_FETCH_ERROR);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch-insights/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"brand": "slow"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let client = HttpInsightsClient::new(settings).expect("client");
    let err = client.fetch_insights("https://memy.co.in").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    drop(server);

    let settings = ClientSettings {
        base_url,
        ..ClientSettings::default()
    };
    let client = HttpInsightsClient::new(settings).expect("client");
    let err = client.fetch_insights("https://memy.co.in").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn non_json_success_body_is_a_payload_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch-insights/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>nope</html>", "text/html"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_insights("https://memy.co.in").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Payload);
}

#[tokio::test]
async fn health_probe_distinguishes_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.health().await.expect("healthy");

    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing)
        .await;

    let client = client_for(&failing);
    let err = client.health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[test]
fn invalid_base_url_is_rejected_up_front() {
    let settings = ClientSettings {
        base_url: "not a url".to_string(),
        ..ClientSettings::default()
    };
    let err = HttpInsightsClient::new(settings).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
