//! Composes, signs and submits the contract's three call groups.

use crate::application::in_flight::InFlightGuard;
use crate::application::network::{NetworkAppIds, NetworkConfigResolver};
use crate::application::state_reader::GlobalStateReader;
use crate::domain::allocation::{scale_amounts, validate_allocations};
use crate::domain::boxes::{BoxKeyDeriver, BoxReference};
use crate::domain::operation::{CallStage, CallTracker, OperationKind};
use crate::domain::txn::{AbiMethod, AbiValue, GroupComposer, MethodCallParams, Transaction, TransactionGroup};
use crate::foundation::util::encoding::decode_prefixed_secret;
use crate::foundation::{Address, AppId, ClaimError, Round, TxId, DEFAULT_WAIT_ROUNDS};
use crate::infrastructure::config::{AppConfig, ContractConfig, DEFAULT_ADD_ALLOCATIONS_METHOD, DEFAULT_CLAIM_METHOD, DEFAULT_RECLAIM_METHOD};
use crate::infrastructure::node::ChainNode;
use crate::infrastructure::wallet::{WalletProvider, WalletSession};
use log::{error, info};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Outcome of a confirmed group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteResult {
    pub confirmed_round: Round,
    pub tx_ids: Vec<TxId>,
}

/// ABI methods of the deployed contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractMethods {
    pub add_allocations: AbiMethod,
    pub reclaim_allocation: AbiMethod,
    pub claim: AbiMethod,
}

impl ContractMethods {
    pub fn parse(add_allocations: &str, reclaim_allocation: &str, claim: &str) -> Result<Self, ClaimError> {
        Ok(Self { add_allocations: add_allocations.parse()?, reclaim_allocation: reclaim_allocation.parse()?, claim: claim.parse()? })
    }

    pub fn from_config(config: &ContractConfig) -> Result<Self, ClaimError> {
        Self::parse(&config.add_allocations_method, &config.reclaim_method, &config.claim_method)
    }

    pub fn defaults() -> Result<Self, ClaimError> {
        Self::parse(DEFAULT_ADD_ALLOCATIONS_METHOD, DEFAULT_RECLAIM_METHOD, DEFAULT_CLAIM_METHOD)
    }
}

pub struct TransactionOrchestrator {
    wallet: Arc<dyn WalletProvider>,
    node: Arc<dyn ChainNode>,
    resolver: NetworkConfigResolver,
    state_reader: GlobalStateReader,
    box_keys: BoxKeyDeriver,
    methods: ContractMethods,
    in_flight: InFlightGuard,
    wait_rounds: u64,
}

impl TransactionOrchestrator {
    /// Uses the process-wide in-flight registry, so two orchestrators cannot
    /// run the same operation for the same address at once.
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        node: Arc<dyn ChainNode>,
        app_ids: NetworkAppIds,
        methods: ContractMethods,
    ) -> Self {
        Self {
            wallet,
            state_reader: GlobalStateReader::new(node.clone()),
            node,
            resolver: NetworkConfigResolver::new(app_ids),
            box_keys: BoxKeyDeriver::default(),
            methods,
            in_flight: InFlightGuard::process_wide(),
            wait_rounds: DEFAULT_WAIT_ROUNDS,
        }
    }

    pub fn from_config(config: &AppConfig, wallet: Arc<dyn WalletProvider>, node: Arc<dyn ChainNode>) -> Result<Self, ClaimError> {
        let methods = ContractMethods::from_config(&config.contract)?;
        let prefix = decode_prefixed_secret(&config.contract.box_prefix)?;
        Ok(Self::new(wallet, node, NetworkAppIds::from_config(&config.network), methods)
            .with_box_keys(BoxKeyDeriver::new(prefix))
            .with_token_key(config.contract.token_id_key.as_bytes().to_vec())
            .with_wait_rounds(config.node.wait_rounds))
    }

    pub fn with_box_keys(mut self, box_keys: BoxKeyDeriver) -> Self {
        self.box_keys = box_keys;
        self
    }

    pub fn with_token_key(mut self, key: Vec<u8>) -> Self {
        self.state_reader = self.state_reader.with_token_key(key);
        self
    }

    pub fn with_wait_rounds(mut self, wait_rounds: u64) -> Self {
        self.wait_rounds = wait_rounds;
        self
    }

    /// Replace the process-wide registry, e.g. with an isolated one.
    pub fn with_in_flight(mut self, in_flight: InFlightGuard) -> Self {
        self.in_flight = in_flight;
        self
    }

    pub fn in_flight(&self) -> &InFlightGuard {
        &self.in_flight
    }

    pub fn box_keys(&self) -> &BoxKeyDeriver {
        &self.box_keys
    }

    pub fn state_reader(&self) -> &GlobalStateReader {
        &self.state_reader
    }

    /// Contract application id for the wallet's active network.
    pub fn application_id(&self) -> Result<AppId, ClaimError> {
        self.resolver.resolve_application_id(&self.wallet.network())
    }

    /// Record `amounts[i]` (human units) for `addresses[i]`, all or nothing.
    pub async fn add_allocations(&self, addresses: &[Address], amounts: &[Decimal], decimals: u32) -> Result<ExecuteResult, ClaimError> {
        let mut tracker = CallTracker::new(OperationKind::AddAllocations);
        let result = self.add_allocations_inner(&mut tracker, addresses, amounts, decimals).await;
        settle(&mut tracker, result)
    }

    /// Let `address` reclaim its allocation.
    pub async fn reclaim_allocation(&self, address: &Address) -> Result<ExecuteResult, ClaimError> {
        let mut tracker = CallTracker::new(OperationKind::ReclaimAllocation);
        let result = self.reclaim_allocation_inner(&mut tracker, address).await;
        settle(&mut tracker, result)
    }

    /// Opt the caller into the reward asset and claim, in one group.
    pub async fn claim_rewards(&self) -> Result<ExecuteResult, ClaimError> {
        let mut tracker = CallTracker::new(OperationKind::ClaimRewards);
        let result = self.claim_rewards_inner(&mut tracker).await;
        settle(&mut tracker, result)
    }

    async fn add_allocations_inner(
        &self,
        tracker: &mut CallTracker,
        addresses: &[Address],
        amounts: &[Decimal],
        decimals: u32,
    ) -> Result<ExecuteResult, ClaimError> {
        tracker.advance(CallStage::Validating)?;
        let session = self.wallet.session();
        let sender = session.require_active_address()?;
        validate_allocations(addresses, amounts)?;
        let scaled = scale_amounts(amounts, decimals)?;

        tracker.advance(CallStage::ResolvingConfig)?;
        let app_id = self.application_id()?;
        let _permit = self.in_flight.acquire(OperationKind::AddAllocations, sender)?;

        tracker.advance(CallStage::ReadingState)?;
        self.state_reader.read_token_id(app_id).await?;

        tracker.advance(CallStage::DerivingBoxKey)?;
        let boxes: Vec<BoxReference> = addresses.iter().map(|address| BoxReference::own(self.box_keys.derive(address))).collect();

        tracker.advance(CallStage::Composing)?;
        let params = self.node.suggested_params().await?;
        let call = MethodCallParams::new(app_id, self.methods.add_allocations.clone(), sender, params)
            .with_args(vec![AbiValue::AddressArray(addresses.to_vec()), AbiValue::Uint64Array(scaled)])
            .with_boxes(boxes);
        let mut composer = GroupComposer::new();
        composer.add_method_call(call)?;
        let group = composer.build_group()?;
        info!("[Client] adding allocations app_id={} count={} decimals={}", app_id, addresses.len(), decimals);

        self.execute(tracker, &session, sender, group).await
    }

    async fn reclaim_allocation_inner(&self, tracker: &mut CallTracker, address: &Address) -> Result<ExecuteResult, ClaimError> {
        tracker.advance(CallStage::Validating)?;
        let session = self.wallet.session();
        let sender = session.require_active_address()?;

        tracker.advance(CallStage::ResolvingConfig)?;
        let app_id = self.application_id()?;
        let _permit = self.in_flight.acquire(OperationKind::ReclaimAllocation, *address)?;

        tracker.advance(CallStage::ReadingState)?;
        self.state_reader.read_token_id(app_id).await?;

        tracker.advance(CallStage::DerivingBoxKey)?;
        let box_ref = BoxReference::own(self.box_keys.derive(address));

        tracker.advance(CallStage::Composing)?;
        let params = self.node.suggested_params().await?;
        let call = MethodCallParams::new(app_id, self.methods.reclaim_allocation.clone(), sender, params)
            .with_args(vec![AbiValue::Address(*address)])
            .with_boxes(vec![box_ref]);
        let mut composer = GroupComposer::new();
        composer.add_method_call(call)?;
        let group = composer.build_group()?;
        info!("[Client] reclaiming allocation app_id={} address={}", app_id, address);

        self.execute(tracker, &session, sender, group).await
    }

    async fn claim_rewards_inner(&self, tracker: &mut CallTracker) -> Result<ExecuteResult, ClaimError> {
        tracker.advance(CallStage::Validating)?;
        let session = self.wallet.session();
        let sender = session.require_active_address()?;

        tracker.advance(CallStage::ResolvingConfig)?;
        let app_id = self.application_id()?;
        let _permit = self.in_flight.acquire(OperationKind::ClaimRewards, sender)?;

        tracker.advance(CallStage::ReadingState)?;
        let token_id = self.state_reader.read_token_id(app_id).await?;

        tracker.advance(CallStage::DerivingBoxKey)?;
        let box_ref = BoxReference::own(self.box_keys.derive(&sender));

        tracker.advance(CallStage::Composing)?;
        let params = self.node.suggested_params().await?;
        let opt_in = Transaction::asset_opt_in(sender, &params, token_id)?;
        let call = MethodCallParams::new(app_id, self.methods.claim.clone(), sender, params)
            .with_foreign_asset(token_id)
            .with_boxes(vec![box_ref]);
        let mut composer = GroupComposer::new();
        composer.add_transaction(opt_in)?;
        composer.add_method_call(call)?;
        let group = composer.build_group()?;
        info!("[Client] claiming rewards app_id={} token_id={} sender={}", app_id, token_id, sender);

        self.execute(tracker, &session, sender, group).await
    }

    async fn execute(
        &self,
        tracker: &mut CallTracker,
        session: &WalletSession,
        sender: Address,
        group: TransactionGroup,
    ) -> Result<ExecuteResult, ClaimError> {
        tracker.advance(CallStage::Submitting)?;
        let tx_ids = group.tx_ids()?;
        let indexes = group.indexes_signed_by(&sender);
        if indexes.len() != group.len() {
            return Err(ClaimError::chain_submission("transaction group has members the active account cannot sign"));
        }
        let signed = session.signer.sign_transactions(&group, &indexes).await?;
        if signed.len() != group.len() {
            return Err(ClaimError::chain_submission(format!("signer returned {} of {} transactions", signed.len(), group.len())));
        }
        let first_id = self.node.send_raw_group(&signed).await?;
        let confirmed_round = self.node.wait_for_confirmation(&first_id, self.wait_rounds).await?;

        tracker.advance(CallStage::Confirmed)?;
        info!("[Client] {} confirmed round={} tx_ids={:?}", tracker.operation(), confirmed_round, tx_ids);
        Ok(ExecuteResult { confirmed_round, tx_ids })
    }
}

fn settle(tracker: &mut CallTracker, result: Result<ExecuteResult, ClaimError>) -> Result<ExecuteResult, ClaimError> {
    if let Err(err) = &result {
        tracker.fail();
        error!("{} {}", tracker.operation().error_tag(), err);
    }
    result
}
