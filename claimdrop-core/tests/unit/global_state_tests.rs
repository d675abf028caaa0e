use crate::fixtures::{token_state, TEST_APP_ID, TEST_TOKEN_ID};
use claimdrop_core::application::GlobalStateReader;
use claimdrop_core::domain::state::{GlobalState, GlobalStateEntry};
use claimdrop_core::foundation::{AppId, AssetId, ClaimError, GLOBAL_STATE_EMPTY_MSG, TOKEN_ID_MISSING_MSG};
use claimdrop_core::infrastructure::node::InMemoryNode;
use std::sync::Arc;

#[test]
fn test_token_id_when_present_then_returned() {
    let state = GlobalState::from_entries(token_state());
    assert_eq!(state.token_id().unwrap(), AssetId::new(TEST_TOKEN_ID));
}

#[test]
fn test_token_id_when_state_empty_then_empty_message() {
    let err = GlobalState::default().token_id().unwrap_err();
    assert!(matches!(err, ClaimError::ContractState(_)));
    assert_eq!(err.to_string(), GLOBAL_STATE_EMPTY_MSG);
}

#[test]
fn test_token_id_when_key_absent_then_missing_message() {
    let state = GlobalState::from_entries([GlobalStateEntry::uint("admin_count", 2)]);
    assert_eq!(state.token_id().unwrap_err().to_string(), TOKEN_ID_MISSING_MSG);
}

#[test]
fn test_token_id_when_key_repeated_then_first_entry_wins() {
    let state = GlobalState::from_entries([GlobalStateEntry::uint("token_id", 7), GlobalStateEntry::uint("token_id", 9)]);
    assert_eq!(state.token_id().unwrap(), AssetId::new(7));
    assert_eq!(state.len(), 1);
}

#[tokio::test]
async fn test_read_token_id_reads_fresh_each_call() {
    let node = Arc::new(InMemoryNode::new().with_global_state(AppId::new(TEST_APP_ID), token_state()));
    let reader = GlobalStateReader::new(node.clone());

    assert_eq!(reader.read_token_id(AppId::new(TEST_APP_ID)).await.unwrap(), AssetId::new(TEST_TOKEN_ID));
    assert_eq!(reader.read_token_id(AppId::new(TEST_APP_ID)).await.unwrap(), AssetId::new(TEST_TOKEN_ID));
    assert_eq!(node.global_state_reads(), 2);

    node.set_global_state(AppId::new(TEST_APP_ID), vec![GlobalStateEntry::uint("token_id", 42)]);
    assert_eq!(reader.read_token_id(AppId::new(TEST_APP_ID)).await.unwrap(), AssetId::new(42));
}

#[tokio::test]
async fn test_read_token_id_when_app_unknown_then_empty_message() {
    let reader = GlobalStateReader::new(Arc::new(InMemoryNode::new()));
    let err = reader.read_token_id(AppId::new(9)).await.unwrap_err();
    assert_eq!(err.to_string(), GLOBAL_STATE_EMPTY_MSG);
}

#[tokio::test]
async fn test_read_token_id_with_custom_key() {
    let node = Arc::new(InMemoryNode::new().with_global_state(AppId::new(TEST_APP_ID), vec![GlobalStateEntry::uint("reward_asset", 5)]));
    let reader = GlobalStateReader::new(node).with_token_key(b"reward_asset".to_vec());
    assert_eq!(reader.read_token_id(AppId::new(TEST_APP_ID)).await.unwrap(), AssetId::new(5));
}
