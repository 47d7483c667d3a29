#![allow(clippy::unwrap_used)]
// Integration tests for `BreezeClient` over `HttpTransport` using wiremock.
//
// The client is blocking, so the mock server is driven from a dedicated
// tokio runtime and every client call happens outside `block_on`.

use secrecy::SecretString;
use serde_json::json;
use tokio::runtime::Runtime;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use breeze_api::{BreezeClient, DataQuery, DevicesQuery, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

const TOKEN: &str = "test-token";

fn setup() -> (Runtime, MockServer, BreezeClient) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    let base = Url::parse(&format!("{}/api/2.0/", server.uri())).unwrap();
    let config = TransportConfig::new(base, SecretString::from(TOKEN.to_string()));
    let client = BreezeClient::connect(&config).unwrap();
    (rt, server, client)
}

fn mount(rt: &Runtime, server: &MockServer, mock: Mock) {
    rt.block_on(mock.mount(server));
}

// ── Devices ─────────────────────────────────────────────────────────

#[test]
fn test_list_devices_sends_token_header() {
    let (rt, server, client) = setup();

    let body = json!([
        {
            "deviceId": 11,
            "title": "WTG01",
            "deviceType": "turbine",
            "site": { "siteId": 1, "title": "Hilltop" },
            "latitude": 55.0,
            "longitude": 12.0
        },
        {
            "deviceId": 21,
            "title": "INV01",
            "deviceType": "inverter",
            "site": { "siteId": 2, "title": "Meadow" },
            "latitude": "54.5",
            "longitude": "11.5"
        }
    ]);

    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/2.0/devices.json"))
            .and(header("Breeze-ApiToken", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body)),
    );

    assert!(!client.connected());
    let devices = client.devices(&DevicesQuery::default()).unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].title, "WTG01");
    assert_eq!(devices[1].site.site_id, 2);
    assert!(client.connected());
}

#[test]
fn test_empty_parameters_are_not_sent() {
    let (rt, server, client) = setup();

    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/2.0/devices.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );

    let query = DevicesQuery {
        page_size: Some(50),
        ..DevicesQuery::default()
    };
    client.devices(&query).unwrap();

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("pageSize=50"));
}

// ── Data ────────────────────────────────────────────────────────────

#[test]
fn test_data_passes_batched_ids() {
    let (rt, server, client) = setup();

    let body = json!([
        {
            "aggregateId": 1,
            "dataSignal": { "dataSignalId": 5, "title": "Power" },
            "data": { "2024-01-01T00:00:00": 1200.5 }
        }
    ]);

    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/2.0/data.json"))
            .and(query_param("deviceIds", "11,12"))
            .and(query_param("dataSignalIds", "5"))
            .and(query_param("aggregate", "site"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body)),
    );

    let query = DataQuery {
        device_ids: vec![11, 12],
        data_signal_ids: vec![5],
        aggregate: Some("site".into()),
        ..DataQuery::default()
    };
    let entries = client.data(&query).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].aggregate_id, 1);
    assert_eq!(entries[0].data_signal.data_signal_id, 5);
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn test_non_200_returns_status_and_body() {
    let (rt, server, client) = setup();

    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/2.0/datasignals.json"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token")),
    );

    let result = client.data_signals(&[]);

    match result {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid token");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
    assert!(!client.connected());
}

#[test]
fn test_invalid_json_is_deserialization_error() {
    let (rt, server, client) = setup();

    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/2.0/alerts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>")),
    );

    let result = client.alerts(&breeze_api::AlertsQuery::default());

    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("maintenance")),
        "expected Deserialization error, got: {result:?}"
    );
}
