#![allow(clippy::unwrap_used)]
// Integration tests for `BigIpClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bigctl_api::{
    BigIpClient, Credentials, Endpoint, Error, ObjectType, TransportConfig, VirtualServerStatus,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BigIpClient) {
    let server = MockServer::start().await;
    let endpoint = Endpoint::new(server.address().to_string()).with_protocol("http");
    let client = BigIpClient::with_client(
        reqwest::Client::new(),
        endpoint,
        Credentials::new("admin", "s3cret".to_owned().into()),
    );
    (server, client)
}

fn ltm(suffix: &str) -> String {
    format!("/mgmt/tm/ltm/{suffix}")
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_from_lookup_without_credentials_fails_before_network() {
    let result = Credentials::from_lookup(|_| None);
    assert!(matches!(result, Err(Error::MissingCredentials { .. })));
}

// ── Generic object operations ───────────────────────────────────────

#[tokio::test]
async fn test_list_uses_collection_and_basic_auth() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(ltm("virtual")))
        .and(basic_auth("admin", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.list(ObjectType::default()).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn test_get_and_sub_resources_use_tilde_encoding() {
    let (server, client) = setup().await;

    for suffix in ["", "/stats", "/profiles"] {
        Mock::given(method("GET"))
            .and(path(ltm(&format!("virtual/~producao~vs_web{suffix}"))))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let partition = "producao";
    let name = "vs_web";
    client
        .get_object(partition, name, ObjectType::Virtual)
        .await
        .unwrap();
    client
        .get_stats(partition, name, ObjectType::Virtual)
        .await
        .unwrap();
    client
        .get_persistence_profiles(partition, name, ObjectType::Virtual)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_enable_and_disable_send_single_flag() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path(ltm("virtual/~Common~vs_api")))
        .and(body_json(json!({ "enabled": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(ltm("node/~Common~app01")))
        .and(body_json(json!({ "disabled": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .enable("Common", "vs_api", ObjectType::Virtual)
        .await
        .unwrap();
    client
        .disable("Common", "app01", ObjectType::Node)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_returns_raw_error_response() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(ltm("virtual/~Common~gone")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "code": 404, "message": "Object not found" })),
        )
        .mount(&server)
        .await;

    // Non-2xx is not an error at this layer.
    let resp = client
        .delete_object("Common", "gone", ObjectType::Virtual)
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Object not found");
}

// ── Pools ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pool_reads() {
    let (server, client) = setup().await;

    for suffix in [
        "pool",
        "pool/~producao~poolA/stats",
        "pool/~producao~poolA/members",
        "pool/~producao~poolA/members/~producao~10.0.0.1:8080/stats",
    ] {
        Mock::given(method("GET"))
            .and(path(ltm(suffix)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    client.list_pools().await.unwrap();
    client.get_pool_stats("producao", "poolA").await.unwrap();
    client.get_pool_members("producao", "poolA").await.unwrap();
    client
        .get_pool_member_stats("producao", "poolA", "10.0.0.1:8080")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_pool_member_posts_qualified_name() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ltm("pool/~producao~poolA/members/")))
        .and(body_json(json!({ "name": "/producao/10.0.0.1:8080" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .add_pool_member("producao", "poolA", "10.0.0.1", "8080")
        .await
        .unwrap();
    assert!(resp.status().is_success());
}

#[tokio::test]
async fn test_remove_pool_member_uses_bare_member_segment() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(ltm("pool/~producao~poolA/members/10.0.0.1:8080")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .remove_pool_member("producao", "poolA", "10.0.0.1", "8080")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request_path = requests[0].url.path();
    assert!(request_path.ends_with("/members/10.0.0.1:8080"), "{request_path}");
    assert!(!request_path.contains("~producao~10.0.0.1"), "{request_path}");
}

#[tokio::test]
async fn test_add_existing_member_hands_back_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ltm("pool/~producao~poolA/members/")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": 409,
            "message": "01020066:3: The requested Pool Member (/producao/poolA /producao/10.0.0.1 8080) already exists in partition producao."
        })))
        .mount(&server)
        .await;

    let resp = client
        .add_pool_member("producao", "poolA", "10.0.0.1", "8080")
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);
}

// ── Nodes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_node() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ltm("node/")))
        .and(body_json(json!({
            "name": "app01",
            "partition": "producao",
            "address": "10.51.136.134"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_node("producao", "app01", "10.51.136.134")
        .await
        .unwrap();
}

// ── Virtual server summaries ────────────────────────────────────────

#[tokio::test]
async fn test_list_virtual_server_summaries() {
    let (server, client) = setup().await;

    let collection = json!({
        "kind": "tm:ltm:virtual:virtualcollectionstate",
        "items": [{
            "name": "vs_web",
            "partition": "Common",
            "addressStatus": "yes",
            "destination": "/Common/10.1.1.1:80",
            "disabled": true,
            "source": "0.0.0.0/0",
            "ipProtocol": "tcp",
            "sourcePort": "preserve",
            "sourceAddressTranslation": { "type": "none" }
        }]
    });

    Mock::given(method("GET"))
        .and(path(ltm("virtual")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&collection))
        .mount(&server)
        .await;

    let summaries = client.list_virtual_server_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].destination, "10.1.1.1:80");
    assert_eq!(summaries[0].status, Some(VirtualServerStatus::Disabled));
    assert_eq!(summaries[0].pool, None);
}

#[tokio::test]
async fn test_list_virtual_server_summaries_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(ltm("virtual")))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "code": 401, "message": "Authentication failed." })),
        )
        .mount(&server)
        .await;

    let err = client.list_virtual_server_summaries().await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Authentication failed.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so nothing answers on the port.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let client = BigIpClient::with_client(
        reqwest::Client::new(),
        Endpoint::new(addr).with_protocol("http"),
        Credentials::new("admin", "x".to_owned().into()),
    );

    let err = client.list_pools().await.unwrap_err();
    assert!(err.is_connect(), "expected connect error, got {err:?}");
}

#[tokio::test]
async fn test_expired_timeout_is_not_a_connect_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ltm("pool")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = BigIpClient::new(
        Endpoint::new(server.address().to_string()).with_protocol("http"),
        Credentials::new("admin", "x".to_owned().into()),
        &TransportConfig {
            timeout: Some(Duration::from_millis(200)),
            ..TransportConfig::default()
        },
    )
    .unwrap();

    let err = client.list_pools().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(!err.is_connect(), "timeout misreported as connect: {err:?}");
}
