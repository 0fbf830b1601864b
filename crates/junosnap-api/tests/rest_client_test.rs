#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use junosnap_api::{Error, RestClient, Rpc, Transport};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RestClient::with_client(
        reqwest::Client::new(),
        base_url,
        "netops".into(),
        "s3cret".to_string().into(),
    );
    (server, client)
}

// ── Operational RPCs ────────────────────────────────────────────────

#[tokio::test]
async fn test_rpc_reply_is_decoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rpc/get-software-information"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "software-information": [{
                "host-name": [{"data": "sw-access-1"}],
                "product-model": [{"data": "ex2300-24p"}],
                "junos-version": [{"data": "21.4R3-S4"}]
            }]
        })))
        .mount(&server)
        .await;

    let reply = client
        .execute_rpc(&Rpc::new("get-software-information"))
        .await
        .unwrap();

    assert_eq!(reply["software-information"]["host-name"], "sw-access-1");
    assert_eq!(reply["software-information"]["junos-version"], "21.4R3-S4");
}

#[tokio::test]
async fn test_rpc_params_go_in_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rpc/get-lldp-interface-neighbors"))
        .and(query_param("interface-device", "ge-0/0/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lldp-neighbors-information": [{
                "lldp-neighbor-information": [{
                    "lldp-local-interface": [{"data": "ge-0/0/1"}]
                }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rpc = Rpc::new("get-lldp-interface-neighbors").arg("interface-device", "ge-0/0/1");
    let reply = client.execute_rpc(&rpc).await.unwrap();

    assert_eq!(
        reply["lldp-neighbors-information"]["lldp-neighbor-information"]["lldp-local-interface"],
        "ge-0/0/1"
    );
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rpc/get-software-information"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client
        .execute_rpc(&Rpc::new("get-software-information"))
        .await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_xml_rpc_error_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rpc/get-ospf-overview-information"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<rpc-error><error-severity>warning</error-severity>\
             <error-message>OSPF instance is not running</error-message></rpc-error>",
        ))
        .mount(&server)
        .await;

    let err = client
        .execute_rpc(&Rpc::new("get-ospf-overview-information"))
        .await
        .unwrap_err();

    assert_eq!(err.rpc_message(), Some("OSPF instance is not running"));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rpc/get-poe-interface-information"))
        .respond_with(ResponseTemplate::new(500).set_body_string("syntax error"))
        .mount(&server)
        .await;

    let err = client
        .execute_rpc(&Rpc::new("get-poe-interface-information"))
        .await
        .unwrap_err();

    match err {
        Error::Rpc { rpc, message } => {
            assert_eq!(rpc, "get-poe-interface-information");
            assert!(message.contains("500"), "message: {message}");
        }
        other => panic!("expected Rpc error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rpc/get-system-storage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Filesystem Size Used"))
        .mount(&server)
        .await;

    let result = client.execute_rpc(&Rpc::new("get-system-storage")).await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Configuration ───────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_config_posts_filter() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_string_contains(
            "<get-configuration><configuration><vlans/></configuration></get-configuration>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "configuration": {
                "vlans": {
                    "vlan": [
                        {"name": "users", "vlan-id": 20},
                        {"name": "voice", "vlan-id": 30, "description": "phones"}
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = client
        .fetch_config("<configuration><vlans/></configuration>")
        .await
        .unwrap();

    assert_eq!(config["configuration"]["vlans"]["vlan"][1]["name"], "voice");
}
