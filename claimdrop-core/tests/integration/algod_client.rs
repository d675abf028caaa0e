use crate::fixtures::{admin_address, TEST_APP_ID, TEST_TOKEN_ID};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use claimdrop_core::domain::state::GlobalStateEntry;
use claimdrop_core::domain::txn::SignedTransactionBytes;
use claimdrop_core::foundation::{AppId, ClaimError, ErrorCode, TxId, ALGOD_TOKEN_HEADER};
use claimdrop_core::infrastructure::config::NodeConfig;
use claimdrop_core::infrastructure::node::{AlgodClient, ChainNode};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;

const API_TOKEN: &str = "algod-test-token";

#[derive(Clone, Default)]
struct MockAlgod {
    tokens: Arc<Mutex<Vec<Option<String>>>>,
    submitted: Arc<Mutex<Vec<Vec<u8>>>>,
    reject_with: Option<String>,
    confirm_after_polls: Option<usize>,
    pool_error: Option<String>,
    polls: Arc<Mutex<usize>>,
}

impl MockAlgod {
    fn seen(&self, headers: &HeaderMap) {
        self.tokens.lock().push(headers.get(ALGOD_TOKEN_HEADER).and_then(|value| value.to_str().ok()).map(str::to_string));
    }
}

async fn params(State(state): State<MockAlgod>, headers: HeaderMap) -> Json<Value> {
    state.seen(&headers);
    Json(json!({
        "consensus-version": "future",
        "fee": 0,
        "min-fee": 1000,
        "last-round": 500,
        "genesis-id": "testnet-v1.0",
        "genesis-hash": STANDARD.encode([9u8; 32]),
    }))
}

async fn application(State(state): State<MockAlgod>, Path(app_id): Path<u64>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.seen(&headers);
    if app_id != TEST_APP_ID {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "application does not exist"})));
    }
    let body = json!({
        "id": app_id,
        "params": {
            "creator": admin_address().to_string(),
            "global-state": [
                {"key": STANDARD.encode("token_id"), "value": {"type": 2, "bytes": "", "uint": TEST_TOKEN_ID}},
                {"key": STANDARD.encode("admin"), "value": {"type": 1, "bytes": STANDARD.encode(admin_address().as_bytes()), "uint": 0}},
            ]
        }
    });
    (StatusCode::OK, Json(body))
}

async fn submit(State(state): State<MockAlgod>, headers: HeaderMap, body: axum::body::Bytes) -> (StatusCode, Json<Value>) {
    state.seen(&headers);
    state.submitted.lock().push(body.to_vec());
    if let Some(message) = &state.reject_with {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": message})));
    }
    (StatusCode::OK, Json(json!({"txId": "MOCKTXID"})))
}

async fn status() -> Json<Value> {
    Json(json!({"last-round": 500}))
}

async fn wait_for_block(Path(round): Path<u64>) -> Json<Value> {
    Json(json!({"last-round": round + 1}))
}

async fn pending(State(state): State<MockAlgod>, Path(_tx_id): Path<String>) -> Json<Value> {
    let mut polls = state.polls.lock();
    *polls += 1;
    if let Some(error) = &state.pool_error {
        return Json(json!({"pool-error": error}));
    }
    match state.confirm_after_polls {
        Some(after) if *polls >= after => Json(json!({"confirmed-round": 502, "pool-error": ""})),
        _ => Json(json!({"confirmed-round": 0, "pool-error": ""})),
    }
}

async fn spawn_algod(state: MockAlgod) -> NodeConfig {
    let app = Router::new()
        .route("/v2/transactions/params", get(params))
        .route("/v2/applications/:app_id", get(application))
        .route("/v2/transactions", post(submit))
        .route("/v2/status", get(status))
        .route("/v2/status/wait-for-block-after/:round", get(wait_for_block))
        .route("/v2/transactions/pending/:tx_id", get(pending))
        .with_state(state);

    let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0));
    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind");
    let bound_addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    NodeConfig { url: format!("http://{}/", bound_addr), token: API_TOKEN.to_string(), ..NodeConfig::default() }
}

#[tokio::test]
async fn test_suggested_params_apply_validity_window() {
    let state = MockAlgod::default();
    let mut config = spawn_algod(state.clone()).await;
    config.validity_window = 10;
    let client = AlgodClient::new(&config).unwrap();

    let params = client.suggested_params().await.unwrap();
    assert_eq!(params.first_valid, 500);
    assert_eq!(params.last_valid, 510);
    assert_eq!(params.min_fee, 1000);
    assert_eq!(params.genesis_id, "testnet-v1.0");
    assert_eq!(params.genesis_hash, [9u8; 32]);
    assert_eq!(state.tokens.lock().as_slice(), &[Some(API_TOKEN.to_string())]);
}

#[tokio::test]
async fn test_global_state_decodes_teal_values() {
    let client = AlgodClient::new(&spawn_algod(MockAlgod::default()).await).unwrap();

    let entries = client.application_global_state(AppId::new(TEST_APP_ID)).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], GlobalStateEntry::uint("token_id", TEST_TOKEN_ID));
    assert_eq!(entries[1], GlobalStateEntry::bytes("admin", admin_address().as_bytes().to_vec()));
}

#[tokio::test]
async fn test_global_state_when_application_missing_then_empty() {
    let client = AlgodClient::new(&spawn_algod(MockAlgod::default()).await).unwrap();
    assert!(client.application_global_state(AppId::new(777)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_raw_group_concatenates_members() {
    let state = MockAlgod::default();
    let client = AlgodClient::new(&spawn_algod(state.clone()).await).unwrap();
    let group = [SignedTransactionBytes::new(vec![1, 2]), SignedTransactionBytes::new(vec![3])];

    let tx_id = client.send_raw_group(&group).await.unwrap();
    assert_eq!(tx_id, TxId::new("MOCKTXID"));
    assert_eq!(state.submitted.lock().as_slice(), &[vec![1u8, 2, 3]]);
}

#[tokio::test]
async fn test_send_raw_group_when_rejected_then_node_message() {
    let state = MockAlgod { reject_with: Some("TransactionPool.Remember: overspend".to_string()), ..MockAlgod::default() };
    let client = AlgodClient::new(&spawn_algod(state).await).unwrap();

    let err = client.send_raw_group(&[SignedTransactionBytes::new(vec![1])]).await.unwrap_err();
    assert!(matches!(err, ClaimError::ChainSubmission(_)));
    assert_eq!(err.to_string(), "TransactionPool.Remember: overspend");
}

#[tokio::test]
async fn test_wait_for_confirmation_polls_until_confirmed() {
    let state = MockAlgod { confirm_after_polls: Some(3), ..MockAlgod::default() };
    let client = AlgodClient::new(&spawn_algod(state.clone()).await).unwrap();

    let round = client.wait_for_confirmation(&TxId::new("MOCKTXID"), 4).await.unwrap();
    assert_eq!(round, 502);
    assert_eq!(*state.polls.lock(), 3);
}

#[tokio::test]
async fn test_wait_for_confirmation_gives_up_after_bound() {
    let state = MockAlgod::default();
    let client = AlgodClient::new(&spawn_algod(state.clone()).await).unwrap();

    let err = client.wait_for_confirmation(&TxId::new("MOCKTXID"), 2).await.unwrap_err();
    assert_eq!(err.to_string(), "Transaction MOCKTXID not confirmed after 2 rounds");
    assert_eq!(*state.polls.lock(), 2);
}

#[tokio::test]
async fn test_wait_for_confirmation_surfaces_pool_error() {
    let state = MockAlgod { pool_error: Some("overspend".to_string()), ..MockAlgod::default() };
    let client = AlgodClient::new(&spawn_algod(state).await).unwrap();

    let err = client.wait_for_confirmation(&TxId::new("MOCKTXID"), 4).await.unwrap_err();
    assert!(err.to_string().contains("overspend"));
}

async fn unreachable_node() -> NodeConfig {
    let listener = tokio::net::TcpListener::bind(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0))).await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    NodeConfig { url: format!("http://{}/", addr), token: API_TOKEN.to_string(), ..NodeConfig::default() }
}

#[tokio::test]
async fn test_submission_when_node_unreachable_then_chain_submission() {
    let client = AlgodClient::new(&unreachable_node().await).unwrap();

    let err = client.send_raw_group(&[SignedTransactionBytes::new(vec![0x80])]).await.unwrap_err();
    assert!(matches!(err, ClaimError::ChainSubmission(_)));
    assert_eq!(err.code(), ErrorCode::ChainSubmission);

    let err = client.wait_for_confirmation(&TxId::new("MOCKTXID"), 2).await.unwrap_err();
    assert!(matches!(err, ClaimError::ChainSubmission(_)));
    assert!(err.to_string().contains("/v2/status"));
}

#[tokio::test]
async fn test_reads_when_node_unreachable_then_node_rpc_error() {
    let client = AlgodClient::new(&unreachable_node().await).unwrap();

    let err = client.suggested_params().await.unwrap_err();
    assert!(matches!(err, ClaimError::NodeRpcError(_)));
    let err = client.application_global_state(AppId::new(TEST_APP_ID)).await.unwrap_err();
    assert!(matches!(err, ClaimError::NodeRpcError(_)));
}
