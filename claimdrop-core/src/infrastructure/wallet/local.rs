use crate::domain::txn::{SignedTransaction, SignedTransactionBytes, TransactionGroup};
use crate::foundation::util::encoding::decode_prefixed_secret;
use crate::foundation::{Address, ClaimError, NetworkId};
use crate::infrastructure::wallet::{TransactionSigner, WalletProvider, WalletSession};
use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

/// Signs with a single ed25519 key held in memory.
pub struct LocalKeySigner {
    signing_key: SigningKey,
    address: Address,
}

impl LocalKeySigner {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        let address = Address::new(signing_key.verifying_key().to_bytes());
        Self { signing_key, address }
    }

    /// Parse a seed given as `hex:<..>`, `b64:<..>` or bare hex.
    pub fn from_secret_str(secret: &str) -> Result<Self, ClaimError> {
        let bytes = decode_prefixed_secret(secret)?;
        let seed: [u8; 32] =
            bytes.as_slice().try_into().map_err(|_| ClaimError::ConfigError("ed25519 seed must be exactly 32 bytes".to_string()))?;
        Ok(Self::from_seed(seed))
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl TransactionSigner for LocalKeySigner {
    async fn sign_transactions(&self, group: &TransactionGroup, indexes: &[usize]) -> Result<Vec<SignedTransactionBytes>, ClaimError> {
        let mut signed = Vec::with_capacity(indexes.len());
        for index in indexes {
            let txn = group
                .transactions()
                .get(*index)
                .ok_or_else(|| ClaimError::chain_submission(format!("no transaction at group index {index}")))?;
            if txn.sender() != &self.address {
                return Err(ClaimError::chain_submission(format!("signer {} cannot sign for sender {}", self.address, txn.sender())));
            }
            let signature = self.signing_key.sign(&txn.bytes_to_sign()?).to_bytes();
            signed.push(SignedTransactionBytes::try_from(&SignedTransaction::new(txn.clone(), signature))?);
        }
        debug!("local signer signed count={} signer={}", signed.len(), self.address);
        Ok(signed)
    }
}

/// Fixed session and network, for the CLI and tests.
pub struct StaticWallet {
    active_address: RwLock<Option<Address>>,
    signer: Arc<dyn TransactionSigner>,
    network: RwLock<NetworkId>,
}

impl StaticWallet {
    pub fn new(active_address: Option<Address>, signer: Arc<dyn TransactionSigner>, network: NetworkId) -> Self {
        Self { active_address: RwLock::new(active_address), signer, network: RwLock::new(network) }
    }

    /// Wallet whose active account is the local key.
    pub fn local(signer: LocalKeySigner, network: NetworkId) -> Self {
        let address = signer.address();
        Self::new(Some(address), Arc::new(signer), network)
    }

    pub fn disconnect(&self) {
        *self.active_address.write() = None;
    }

    pub fn set_network(&self, network: NetworkId) {
        *self.network.write() = network;
    }
}

impl WalletProvider for StaticWallet {
    fn session(&self) -> WalletSession {
        WalletSession::new(*self.active_address.read(), self.signer.clone())
    }

    fn network(&self) -> NetworkId {
        self.network.read().clone()
    }
}
