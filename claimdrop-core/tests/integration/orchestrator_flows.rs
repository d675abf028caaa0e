use crate::fixtures::{
    admin_address, decode_method_args, holder_address, other_address, HarnessBuilder, TEST_APP_ID, TEST_TOKEN_ID, TEST_WAIT_ROUNDS,
    UNMAPPED_NETWORK,
};
use claimdrop_core::application::ContractMethods;
use claimdrop_core::domain::boxes::{BoxKeyDeriver, BoxReference};
use claimdrop_core::domain::operation::OperationKind;
use claimdrop_core::domain::state::GlobalStateEntry;
use claimdrop_core::domain::txn::{AbiValue, TransactionBody};
use claimdrop_core::foundation::{
    AppId, AssetId, ClaimError, NetworkId, ALLOCATION_LENGTH_MISMATCH_MSG, GLOBAL_STATE_EMPTY_MSG, NO_ACTIVE_ACCOUNT_MSG, TOKEN_ID_MISSING_MSG,
};
use claimdrop_core::infrastructure::node::NodeCall;
use rust_decimal::Decimal;
use std::str::FromStr;

fn methods() -> ContractMethods {
    ContractMethods::defaults().expect("default methods")
}

#[tokio::test]
async fn test_every_operation_when_no_active_account_then_fails_before_io() {
    let harness = HarnessBuilder::new().without_account().build();
    let orchestrator = &harness.orchestrator;

    let add = orchestrator.add_allocations(&[holder_address()], &[Decimal::ONE], 6).await.unwrap_err();
    let reclaim = orchestrator.reclaim_allocation(&holder_address()).await.unwrap_err();
    let claim = orchestrator.claim_rewards().await.unwrap_err();

    for err in [&add, &reclaim, &claim] {
        assert!(matches!(err, ClaimError::Precondition(_)));
        assert_eq!(err.to_string(), NO_ACTIVE_ACCOUNT_MSG);
    }
    assert_eq!(harness.node.call_count(), 0);
    assert!(harness.signer.groups().is_empty());
}

#[tokio::test]
async fn test_every_operation_when_network_unmapped_then_configuration_error() {
    let harness = HarnessBuilder::new().network(UNMAPPED_NETWORK).build();
    let orchestrator = &harness.orchestrator;

    let errors = [
        orchestrator.add_allocations(&[holder_address()], &[Decimal::ONE], 6).await.unwrap_err(),
        orchestrator.reclaim_allocation(&holder_address()).await.unwrap_err(),
        orchestrator.claim_rewards().await.unwrap_err(),
    ];
    for err in &errors {
        assert!(matches!(err, ClaimError::Configuration(_)));
        assert_eq!(err.to_string(), "App ID not configured for network: betanet");
    }
    assert_eq!(harness.node.call_count(), 0);
}

#[tokio::test]
async fn test_network_switch_is_observed_on_next_call() {
    let harness = HarnessBuilder::new().build();
    assert_eq!(harness.orchestrator.application_id().unwrap(), AppId::new(TEST_APP_ID));

    harness.wallet.set_network(NetworkId::new(UNMAPPED_NETWORK));
    let err = harness.orchestrator.claim_rewards().await.unwrap_err();
    assert_eq!(err.to_string(), "App ID not configured for network: betanet");
}

#[tokio::test]
async fn test_add_allocations_when_lengths_mismatch_then_no_io() {
    let harness = HarnessBuilder::new().build();

    let err = harness.orchestrator.add_allocations(&[holder_address(), other_address()], &[Decimal::ONE], 6).await.unwrap_err();
    assert_eq!(err.to_string(), ALLOCATION_LENGTH_MISMATCH_MSG);

    let err = harness.orchestrator.add_allocations(&[], &[], 6).await.unwrap_err();
    assert!(matches!(err, ClaimError::Validation(_)));
    assert_eq!(harness.node.call_count(), 0);
}

#[tokio::test]
async fn test_add_allocations_encodes_addresses_and_scaled_amounts() {
    let harness = HarnessBuilder::new().build();
    let addresses = [holder_address(), other_address()];
    let amounts = [Decimal::from(100), Decimal::from_str("0.25").unwrap()];

    let result = harness.orchestrator.add_allocations(&addresses, &amounts, 6).await.unwrap();

    let group = harness.signer.last_group();
    assert_eq!(group.len(), 1);
    let call = group.method_call().unwrap();
    assert_eq!(call.sender(), &admin_address());
    assert_eq!(
        decode_method_args(&methods().add_allocations, call),
        vec![AbiValue::AddressArray(addresses.to_vec()), AbiValue::Uint64Array(vec![100_000_000, 250_000])]
    );

    let app_call = call.as_application_call().unwrap();
    assert_eq!(app_call.app_id, AppId::new(TEST_APP_ID));
    let expected_boxes: Vec<BoxReference> = addresses.iter().map(|address| BoxReference::own(BoxKeyDeriver::default().derive(address))).collect();
    assert_eq!(app_call.boxes, expected_boxes);

    assert_eq!(result.tx_ids, group.tx_ids().unwrap());
    assert_eq!(result.confirmed_round, 1_001);
}

#[tokio::test]
async fn test_add_allocations_call_sequence() {
    let harness = HarnessBuilder::new().build();
    let result = harness.orchestrator.add_allocations(&[holder_address()], &[Decimal::from(100)], 6).await.unwrap();

    let calls = harness.node.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], NodeCall::GlobalState(AppId::new(TEST_APP_ID)));
    assert_eq!(calls[1], NodeCall::SuggestedParams);
    assert!(matches!(&calls[2], NodeCall::SendRawGroup(signed) if signed.len() == 1));
    assert_eq!(calls[3], NodeCall::WaitForConfirmation(result.tx_ids[0].clone(), TEST_WAIT_ROUNDS));
}

#[tokio::test]
async fn test_reclaim_allocation_targets_address_box() {
    let harness = HarnessBuilder::new().box_prefix(b"alloc").build();

    harness.orchestrator.reclaim_allocation(&holder_address()).await.unwrap();

    let group = harness.signer.last_group();
    let call = group.method_call().unwrap();
    assert_eq!(decode_method_args(&methods().reclaim_allocation, call), vec![AbiValue::Address(holder_address())]);
    let boxes = &call.as_application_call().unwrap().boxes;
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].name, BoxKeyDeriver::new(b"alloc".to_vec()).derive(&holder_address()));
    assert_eq!(group.group_id(), None);
}

#[tokio::test]
async fn test_claim_rewards_opts_in_before_claim() {
    let harness = HarnessBuilder::new().build();

    let result = harness.orchestrator.claim_rewards().await.unwrap();

    let group = harness.signer.last_group();
    assert_eq!(group.len(), 2);
    let [opt_in, claim] = group.transactions() else { panic!("expected two transactions") };

    assert!(opt_in.is_asset_opt_in());
    assert!(matches!(opt_in.body, TransactionBody::AssetTransfer { asset_id, amount: 0, .. } if asset_id == AssetId::new(TEST_TOKEN_ID)));
    let app_call = claim.as_application_call().unwrap();
    assert_eq!(app_call.app_args, vec![methods().claim.selector().to_vec()]);
    assert_eq!(app_call.foreign_assets, vec![AssetId::new(TEST_TOKEN_ID)]);
    assert_eq!(app_call.boxes, vec![BoxReference::own(BoxKeyDeriver::default().derive(&admin_address()))]);

    assert!(group.group_id().is_some());
    assert_eq!(opt_in.header.group, claim.header.group);

    let submitted = harness.node.submitted_groups();
    assert_eq!(submitted.len(), 1);
    for signed in &submitted[0] {
        let (_, sender) = signed.signature_and_sender().unwrap();
        assert_eq!(sender, admin_address());
    }
    assert_eq!(submitted[0][0].tx_id().unwrap(), result.tx_ids[0]);
}

#[tokio::test]
async fn test_claim_rewards_when_state_empty_then_nothing_submitted() {
    let harness = HarnessBuilder::new().global_state(Vec::new()).build();

    let err = harness.orchestrator.claim_rewards().await.unwrap_err();
    assert!(matches!(err, ClaimError::ContractState(_)));
    assert_eq!(err.to_string(), GLOBAL_STATE_EMPTY_MSG);
    assert!(harness.node.submitted_groups().is_empty());
}

#[tokio::test]
async fn test_claim_rewards_when_token_id_missing_then_nothing_submitted() {
    let harness = HarnessBuilder::new().global_state(vec![GlobalStateEntry::uint("total_allocated", 10)]).build();

    let err = harness.orchestrator.claim_rewards().await.unwrap_err();
    assert_eq!(err.to_string(), TOKEN_ID_MISSING_MSG);
    assert!(harness.signer.groups().is_empty());
}

#[tokio::test]
async fn test_rejected_submission_propagates_and_releases_guard() {
    let harness = HarnessBuilder::new().build();
    harness.node.reject_submissions("logic eval error: assert failed");

    let err = harness.orchestrator.reclaim_allocation(&holder_address()).await.unwrap_err();
    assert!(matches!(err, ClaimError::ChainSubmission(_)));
    assert!(err.to_string().contains("assert failed"));
    assert!(harness.orchestrator.in_flight().is_empty());
    assert!(!harness.node.calls().iter().any(|call| matches!(call, NodeCall::WaitForConfirmation(..))));
}

#[tokio::test]
async fn test_unconfirmed_submission_reports_wait_bound() {
    let harness = HarnessBuilder::new().build();
    harness.node.stall_confirmations();

    let err = harness.orchestrator.claim_rewards().await.unwrap_err();
    assert!(err.to_string().contains(&format!("not confirmed after {TEST_WAIT_ROUNDS} rounds")));
    assert_eq!(harness.node.submitted_groups().len(), 1);
    assert!(harness.orchestrator.in_flight().is_empty());
}

#[tokio::test]
async fn test_concurrent_call_for_same_pair_is_rejected() {
    let harness = HarnessBuilder::new().build();
    let permit = harness.orchestrator.in_flight().acquire(OperationKind::ClaimRewards, admin_address()).unwrap();

    let err = harness.orchestrator.claim_rewards().await.unwrap_err();
    assert!(matches!(err, ClaimError::OperationInFlight { .. }));
    assert_eq!(harness.node.call_count(), 0);

    harness.orchestrator.reclaim_allocation(&holder_address()).await.unwrap();

    drop(permit);
    harness.orchestrator.claim_rewards().await.unwrap();
    assert!(harness.orchestrator.in_flight().is_empty());
}

#[tokio::test]
async fn test_token_id_is_read_fresh_for_each_call() {
    let harness = HarnessBuilder::new().build();
    harness.orchestrator.claim_rewards().await.unwrap();

    harness.node.set_global_state(AppId::new(TEST_APP_ID), vec![GlobalStateEntry::uint("token_id", 99)]);
    harness.orchestrator.claim_rewards().await.unwrap();

    let group = harness.signer.last_group();
    let app_call = group.method_call().unwrap().as_application_call().unwrap();
    assert_eq!(app_call.foreign_assets, vec![AssetId::new(99)]);
    assert_eq!(harness.node.global_state_reads(), 2);
}
