//! Per-address storage-box naming.
//!
//! The contract keys allocation bookkeeping by `prefix || public_key`. The
//! prefix comes from `contract.box_prefix` and must match the deployed
//! contract byte for byte.

use crate::foundation::{Address, ClaimError};
use std::fmt;

/// Name of a contract storage box.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxKey(Vec<u8>);

impl BoxKey {
    pub fn new(name: Vec<u8>) -> Self {
        Self(name)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for BoxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxKey({})", hex::encode(&self.0))
    }
}

/// Reference to a box owned by `app_index` (0 = the called application).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxReference {
    pub app_index: u64,
    pub name: BoxKey,
}

impl BoxReference {
    pub fn own(name: BoxKey) -> Self {
        Self { app_index: 0, name }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoxKeyDeriver {
    prefix: Vec<u8>,
}

impl BoxKeyDeriver {
    pub fn new(prefix: impl Into<Vec<u8>>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn derive(&self, address: &Address) -> BoxKey {
        let mut name = Vec::with_capacity(self.prefix.len() + address.as_bytes().len());
        name.extend_from_slice(&self.prefix);
        name.extend_from_slice(address.as_bytes());
        BoxKey(name)
    }

    /// Same as [`derive`](Self::derive) for a textual address; fails with `invalid address`.
    pub fn derive_str(&self, address: &str) -> Result<BoxKey, ClaimError> {
        let address: Address = address.trim().parse()?;
        Ok(self.derive(&address))
    }
}
