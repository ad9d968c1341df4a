#![allow(clippy::unwrap_used)]
// Integration tests for `VManageClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vinv_api::{Error, TransportConfig, VManageClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, VManageClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = VManageClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .and(body_string_contains("j_username=admin"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/client/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(token))
        .mount(server)
        .await;
}

fn secret(value: &str) -> secrecy::SecretString {
    value.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_sends_xsrf_token_on_data_requests() {
    let (server, client) = setup().await;
    mount_login(&server, "ABCDEF0123").await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .and(header("X-XSRF-TOKEN", "ABCDEF0123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("admin")).await.unwrap();
    let devices = client.list_devices().await.unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_login_rejected_returns_login_page() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Cisco vManage</title></head></html>"),
        )
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("wrong")).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_login_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("admin")).await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

#[tokio::test]
async fn test_login_unreadable_body_is_an_error() {
    let (server, client) = setup().await;

    // Claims gzip but is not, so decoding the body fails.
    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_string("definitely not gzip"),
        )
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("admin")).await;
    assert!(matches!(result, Err(Error::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn test_login_without_token_endpoint() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/client/token"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    client.login("admin", &secret("admin")).await.unwrap();
}

#[tokio::test]
async fn test_select_tenant_sets_vsession_header() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("GET"))
        .and(path("/dataservice/tenant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "name": "acme", "tenantId": "t-1" },
                { "name": "globex", "tenantId": "t-2" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dataservice/tenant/t-2/vsessionid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "VSessionId": "vs-42" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device/models"))
        .and(header("VSessionId", "vs-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("admin")).await.unwrap();
    client.select_tenant("globex").await.unwrap();
    client.list_device_models().await.unwrap();
}

#[tokio::test]
async fn test_select_unknown_tenant() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/tenant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "acme", "tenantId": "t-1" }]
        })))
        .mount(&server)
        .await;

    let result = client.select_tenant("initech").await;
    match result {
        Err(Error::Authentication { message }) => assert!(message.contains("initech")),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_logout_is_best_effort() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await;
}

// ── Inventory tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "header": { "generatedOn": 1_700_000_000_000_u64 },
            "data": [{
                "uuid": "C8K-ABC",
                "host-name": "dc1-edge1",
                "deviceId": "10.1.0.1",
                "site-id": "100",
                "reachability": "reachable",
                "device-type": "vedge",
                "device-model": "vedge-C8000V",
                "version": "17.9.3"
            }]
        })))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].uuid, "C8K-ABC");
    assert_eq!(devices[0].host_name.as_deref(), Some("dc1-edge1"));
    assert_eq!(devices[0].site_id.as_deref(), Some("100"));
    assert_eq!(devices[0].device_type.as_deref(), Some("vedge"));
}

#[tokio::test]
async fn test_list_device_models() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "name": "vedge-C8000V", "deviceClass": "cisco-router", "displayName": "C8000v" },
                { "name": "vedge-cloud", "deviceClass": "viptela-router" }
            ]
        })))
        .mount(&server)
        .await;

    let models = client.list_device_models().await.unwrap();
    let classes: Vec<_> = models.iter().map(|m| m.device_class.as_str()).collect();
    assert_eq!(classes, vec!["cisco-router", "viptela-router"]);
}

#[tokio::test]
async fn test_list_edge_certificates() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/certificate/vedge/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "host-name": "dc1-edge1",
                "chassisNumber": "C8K-ABC",
                "serialNumber": "0A1B2C",
                "vedgeCertificateState": "certinstalled",
                "validity": "valid"
            }]
        })))
        .mount(&server)
        .await;

    let certs = client.list_edge_certificates().await.unwrap();
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0].chassis_number.as_deref(), Some("C8K-ABC"));
    assert_eq!(certs[0].validity.as_deref(), Some("valid"));
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_api_error_body_is_surfaced() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {
                "message": "Server error",
                "details": "Failed to query device list",
                "code": "DMGR0001"
            }
        })))
        .mount(&server)
        .await;

    match client.list_devices().await {
        Err(Error::Api {
            status,
            message,
            details,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Server error");
            assert_eq!(details.as_deref(), Some("Failed to query device list"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_devices().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "{result:?}"
    );
}

#[tokio::test]
async fn test_forbidden() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/certificate/vedge/list"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "message": "User does not have read access to Certificates" }
        })))
        .mount(&server)
        .await;

    match client.list_edge_certificates().await {
        Err(Error::Forbidden { message }) => assert!(message.contains("Certificates")),
        other => panic!("expected Forbidden error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_page_instead_of_data_is_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>login</body></html>"))
        .mount(&server)
        .await;

    let result = client.list_devices().await;
    assert!(matches!(result, Err(Error::SessionExpired)), "{result:?}");
}

#[tokio::test]
async fn test_malformed_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let result = client.list_devices().await;
    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "{ not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device/models"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client.list_device_models().await;
    assert!(
        matches!(result, Err(Error::Api { status: 404, .. })),
        "{result:?}"
    );
}
