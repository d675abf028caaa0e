use crate::domain::state::GlobalStateEntry;
use crate::domain::txn::{SignedTransactionBytes, SuggestedParams};
use crate::foundation::{AppId, ClaimError, Round, TxId, DEFAULT_MIN_FEE};
use crate::infrastructure::node::{not_confirmed, ChainNode};
use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// One recorded interaction with [`InMemoryNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeCall {
    SuggestedParams,
    GlobalState(AppId),
    SendRawGroup(Vec<SignedTransactionBytes>),
    WaitForConfirmation(TxId, u64),
}

/// Deterministic in-process node. Records every call; confirms submissions
/// immediately unless told otherwise.
pub struct InMemoryNode {
    params: Mutex<SuggestedParams>,
    global_state: Mutex<HashMap<AppId, Vec<GlobalStateEntry>>>,
    calls: Mutex<Vec<NodeCall>>,
    submit_error: Mutex<Option<String>>,
    confirm: Mutex<bool>,
    round: AtomicU64,
}

impl InMemoryNode {
    pub fn new() -> Self {
        Self {
            params: Mutex::new(default_params()),
            global_state: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            submit_error: Mutex::new(None),
            confirm: Mutex::new(true),
            round: AtomicU64::new(1_000),
        }
    }

    pub fn with_global_state(self, app_id: AppId, entries: Vec<GlobalStateEntry>) -> Self {
        self.set_global_state(app_id, entries);
        self
    }

    pub fn set_global_state(&self, app_id: AppId, entries: Vec<GlobalStateEntry>) {
        self.global_state.lock().insert(app_id, entries);
    }

    pub fn set_params(&self, params: SuggestedParams) {
        *self.params.lock() = params;
    }

    /// Make the next submissions fail with `message`.
    pub fn reject_submissions(&self, message: impl Into<String>) {
        *self.submit_error.lock() = Some(message.into());
    }

    /// Leave submissions unconfirmed so confirmation waits time out.
    pub fn stall_confirmations(&self) {
        *self.confirm.lock() = false;
    }

    pub fn calls(&self) -> Vec<NodeCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn submitted_groups(&self) -> Vec<Vec<SignedTransactionBytes>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                NodeCall::SendRawGroup(group) => Some(group.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn global_state_reads(&self) -> usize {
        self.calls.lock().iter().filter(|call| matches!(call, NodeCall::GlobalState(_))).count()
    }

    fn record(&self, call: NodeCall) {
        self.calls.lock().push(call);
    }
}

impl Default for InMemoryNode {
    fn default() -> Self {
        Self::new()
    }
}

fn default_params() -> SuggestedParams {
    SuggestedParams {
        fee: 0,
        flat_fee: false,
        min_fee: DEFAULT_MIN_FEE,
        first_valid: 1_000,
        last_valid: 2_000,
        genesis_id: "dockernet-v1".to_string(),
        genesis_hash: [7u8; 32],
    }
}

#[async_trait]
impl ChainNode for InMemoryNode {
    async fn suggested_params(&self) -> Result<SuggestedParams, ClaimError> {
        self.record(NodeCall::SuggestedParams);
        Ok(self.params.lock().clone())
    }

    async fn application_global_state(&self, app_id: AppId) -> Result<Vec<GlobalStateEntry>, ClaimError> {
        self.record(NodeCall::GlobalState(app_id));
        Ok(self.global_state.lock().get(&app_id).cloned().unwrap_or_default())
    }

    async fn send_raw_group(&self, signed: &[SignedTransactionBytes]) -> Result<TxId, ClaimError> {
        self.record(NodeCall::SendRawGroup(signed.to_vec()));
        if let Some(message) = self.submit_error.lock().clone() {
            return Err(ClaimError::chain_submission(message));
        }
        let first = signed.first().ok_or_else(|| ClaimError::chain_submission("empty transaction group"))?;
        let tx_id = first.tx_id()?;
        debug!("in-memory node accepted group tx_id={} size={}", tx_id, signed.len());
        Ok(tx_id)
    }

    async fn wait_for_confirmation(&self, tx_id: &TxId, max_rounds: u64) -> Result<Round, ClaimError> {
        self.record(NodeCall::WaitForConfirmation(tx_id.clone(), max_rounds));
        if !*self.confirm.lock() {
            return Err(not_confirmed(tx_id, max_rounds));
        }
        Ok(self.round.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
