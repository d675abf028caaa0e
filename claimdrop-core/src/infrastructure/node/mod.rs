use crate::domain::state::GlobalStateEntry;
use crate::domain::txn::{SignedTransactionBytes, SuggestedParams};
use crate::foundation::{AppId, ClaimError, Round, TxId};
use async_trait::async_trait;

pub mod algod;
pub mod memory;
pub mod models;

pub use algod::AlgodClient;
pub use memory::{InMemoryNode, NodeCall};

/// Chain-node queries and submission used by the orchestrator.
#[async_trait]
pub trait ChainNode: Send + Sync {
    async fn suggested_params(&self) -> Result<SuggestedParams, ClaimError>;

    /// Decoded global state of `app_id`. An application without state yields an empty list.
    async fn application_global_state(&self, app_id: AppId) -> Result<Vec<GlobalStateEntry>, ClaimError>;

    /// Submit a signed group atomically; returns the id of its first transaction.
    async fn send_raw_group(&self, signed: &[SignedTransactionBytes]) -> Result<TxId, ClaimError>;

    /// Wait at most `max_rounds` rounds for `tx_id` to be confirmed.
    async fn wait_for_confirmation(&self, tx_id: &TxId, max_rounds: u64) -> Result<Round, ClaimError>;
}

pub(crate) fn not_confirmed(tx_id: &TxId, max_rounds: u64) -> ClaimError {
    ClaimError::chain_submission(format!("Transaction {tx_id} not confirmed after {max_rounds} rounds"))
}
