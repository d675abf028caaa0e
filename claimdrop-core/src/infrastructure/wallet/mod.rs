//! Wallet seam: the active account and a way to sign for it.

use crate::domain::txn::{SignedTransactionBytes, TransactionGroup};
use crate::foundation::{Address, ClaimError, NetworkId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub mod local;

pub use local::{LocalKeySigner, StaticWallet};

#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Sign the members of `group` at `indexes`, in that order.
    async fn sign_transactions(&self, group: &TransactionGroup, indexes: &[usize]) -> Result<Vec<SignedTransactionBytes>, ClaimError>;
}

/// Snapshot of the wallet taken at the start of one call.
#[derive(Clone)]
pub struct WalletSession {
    pub active_address: Option<Address>,
    pub signer: Arc<dyn TransactionSigner>,
}

impl WalletSession {
    pub fn new(active_address: Option<Address>, signer: Arc<dyn TransactionSigner>) -> Self {
        Self { active_address, signer }
    }

    pub fn require_active_address(&self) -> Result<Address, ClaimError> {
        self.active_address.ok_or_else(ClaimError::no_active_account)
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession").field("active_address", &self.active_address).finish_non_exhaustive()
    }
}

/// Owner of the wallet session and the active network. Read-only to this crate.
pub trait WalletProvider: Send + Sync {
    fn session(&self) -> WalletSession;
    fn network(&self) -> NetworkId;
}
