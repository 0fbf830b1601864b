#![allow(clippy::unwrap_used)]
// Tests for `ReplayTransport` over a temporary capture directory.

use serde_json::json;

use junosnap_api::{Error, ReplayTransport, Rpc, Transport};

#[tokio::test]
async fn test_replays_rpc_capture() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("get-route-engine-information.json"),
        r#"{"route-engine-information": {"route-engine": {"slot": "0"}}}"#,
    )
    .unwrap();

    let replay = ReplayTransport::new(dir.path()).with_host("sw-lab-1");
    let reply = replay
        .execute_rpc(&Rpc::new("get-route-engine-information"))
        .await
        .unwrap();

    assert_eq!(replay.host(), "sw-lab-1");
    assert_eq!(
        reply,
        json!({"route-engine-information": {"route-engine": {"slot": "0"}}})
    );
}

#[tokio::test]
async fn test_replays_configuration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("configuration.json"),
        r#"{"configuration": {"system": {"domain-name": "lab.example"}}}"#,
    )
    .unwrap();

    let replay = ReplayTransport::new(dir.path());
    let config = replay
        .fetch_config("<configuration><system><domain-name/></system></configuration>")
        .await
        .unwrap();

    assert_eq!(config["configuration"]["system"]["domain-name"], "lab.example");
}

#[tokio::test]
async fn test_missing_capture_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let replay = ReplayTransport::new(dir.path());

    let err = replay
        .execute_rpc(&Rpc::new("get-fan-information"))
        .await
        .unwrap_err();

    match err {
        Error::MissingCapture { rpc, path, .. } => {
            assert_eq!(rpc, "get-fan-information");
            assert!(path.ends_with("get-fan-information.json"));
        }
        other => panic!("expected MissingCapture, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_capture_is_deserialization_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("get-system-storage.json"), "not json").unwrap();

    let replay = ReplayTransport::new(dir.path());
    let result = replay.execute_rpc(&Rpc::new("get-system-storage")).await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}
