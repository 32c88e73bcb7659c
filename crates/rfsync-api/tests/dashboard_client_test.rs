#![allow(clippy::unwrap_used)]
// Integration tests for `DashboardClient` using wiremock.

use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rfsync_api::{DashboardClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DashboardClient) {
    let server = MockServer::start().await;
    let client = DashboardClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_header_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "1", "name": "Acme" }])),
        )
        .mount(&server)
        .await;

    let key: secrecy::SecretString = "test-key".to_string().into();
    let client =
        DashboardClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();

    let orgs = client.list_organizations().await.unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].name, "Acme");
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "errors": ["Invalid API key"] })),
        )
        .mount(&server)
        .await;

    let result = client.list_organizations().await;
    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

// ── Networks ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_networks_follows_link_pagination() {
    let (server, client) = setup().await;

    let next = format!(
        "<{}/organizations/O1/networks?startingAfter=N_1>; rel=next",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/organizations/O1/networks"))
        .and(query_param("startingAfter", "N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "N_2", "name": "Branch-B", "productTypes": ["switch"] }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/O1/networks"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(json!([
                    { "id": "N_1", "name": "Branch-A", "productTypes": ["wireless", "appliance"] }
                ])),
        )
        .mount(&server)
        .await;

    let networks = client.list_networks("O1").await.unwrap();

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].id, "N_1");
    assert!(networks[0].is_wireless());
    assert_eq!(networks[1].id, "N_2");
    assert!(!networks[1].is_wireless());
}

// ── RF profiles ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_rf_profiles() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/wireless/rfProfiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "R1", "networkId": "N_1", "name": "legacy", "bandSelectionType": "ap" },
            { "id": "R2", "networkId": "N_1", "name": "high-density", "bandSelectionType": "ssid" }
        ])))
        .mount(&server)
        .await;

    let profiles = client.list_rf_profiles("N_1").await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].id(), Some("R1"));
    assert_eq!(profiles[1].name(), Some("high-density"));
    assert_eq!(profiles[1].network_id(), Some("N_1"));
}

#[tokio::test]
async fn test_create_rf_profile_sends_document_verbatim() {
    let (server, client) = setup().await;

    let doc = object(json!({
        "name": "5ghz-boost",
        "bandSelectionType": "ap",
        "fiveGhzSettings": { "minPower": 8, "maxPower": 30 }
    }));

    Mock::given(method("POST"))
        .and(path("/networks/N_1/wireless/rfProfiles"))
        .and(body_json(json!({
            "name": "5ghz-boost",
            "bandSelectionType": "ap",
            "fiveGhzSettings": { "minPower": 8, "maxPower": 30 }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "R9", "networkId": "N_1", "name": "5ghz-boost"
        })))
        .mount(&server)
        .await;

    let created = client.create_rf_profile("N_1", &doc).await.unwrap();
    assert_eq!(created.id(), Some("R9"));
}

#[tokio::test]
async fn test_update_rf_profile_surfaces_first_error_message() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/networks/N_1/wireless/rfProfiles/R1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": ["'minBitrate' must be one of 1, 2, 5.5", "second problem"]
        })))
        .mount(&server)
        .await;

    let doc = object(json!({ "name": "legacy" }));
    let err = client.update_rf_profile("N_1", "R1", &doc).await.unwrap_err();

    match &err {
        Error::Api {
            status,
            message,
            errors,
        } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "'minBitrate' must be one of 1, 2, 5.5");
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(err.api_message(), "'minBitrate' must be one of 1, 2, 5.5");
}

#[tokio::test]
async fn test_not_found_is_detectable() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_404/wireless/rfProfiles"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.list_rf_profiles("N_404").await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_network_devices_and_radio_assignment() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2AA-0000-0001", "model": "MR46", "name": "Lobby" },
            { "serial": "Q2BB-0000-0002", "model": "MS120-8" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/devices/Q2AA-0000-0001/wireless/radio/settings"))
        .and(body_json(json!({ "rfProfileId": "R9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "serial": "Q2AA-0000-0001", "rfProfileId": "R9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client.list_network_devices("N_1").await.unwrap();
    let aps: Vec<_> = devices.iter().filter(|d| d.is_access_point()).collect();
    assert_eq!(aps.len(), 1);

    let settings = client
        .update_device_radio_settings(&aps[0].serial, "R9")
        .await
        .unwrap();
    assert_eq!(settings.rf_profile_id.as_deref(), Some("R9"));
}

// ── Rate limiting ───────────────────────────────────────────────────

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "1", "name": "Acme" }])),
        )
        .mount(&server)
        .await;

    let orgs = client.list_organizations().await.unwrap();
    assert_eq!(orgs[0].id, "1");
}

#[tokio::test]
async fn test_rate_limit_budget_exhausted() {
    let (server, client) = setup().await;
    let client = client.with_max_retries(1);

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let result = client.list_organizations().await;
    assert!(
        matches!(result, Err(Error::RateLimited { retry_after_secs: 0 })),
        "expected RateLimited, got: {result:?}"
    );
}

// ── Decoding ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_garbage_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.list_network_devices("N_1").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_garbage_body_preview_respects_char_boundaries() {
    let (server, client) = setup().await;

    // The 200th byte falls inside a two-byte character.
    let body = format!("{}é trailing", "a".repeat(199));
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    match client.list_organizations().await {
        Err(Error::Deserialization { message, body: raw }) => {
            assert_eq!(raw, body);
            assert!(message.contains("aé"), "preview cut short: {message}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
