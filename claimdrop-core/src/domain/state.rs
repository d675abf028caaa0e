use crate::foundation::{AssetId, ClaimError, GLOBAL_STATE_EMPTY_MSG, TOKEN_ID_KEY, TOKEN_ID_MISSING_MSG};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A contract storage value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TealValue {
    Bytes(Vec<u8>),
    Uint(u64),
}

impl TealValue {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            TealValue::Uint(value) => Some(*value),
            TealValue::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TealValue::Bytes(value) => Some(value),
            TealValue::Uint(_) => None,
        }
    }
}

/// One decoded `(key, value)` pair of contract global state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalStateEntry {
    pub key: Vec<u8>,
    pub value: TealValue,
}

impl GlobalStateEntry {
    pub fn uint(key: impl Into<Vec<u8>>, value: u64) -> Self {
        Self { key: key.into(), value: TealValue::Uint(value) }
    }

    pub fn bytes(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into(), value: TealValue::Bytes(value.into()) }
    }
}

/// Snapshot of a contract's global state keyed by raw key bytes.
///
/// Built fresh from every node read; never cached across calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalState {
    entries: BTreeMap<Vec<u8>, TealValue>,
}

impl GlobalState {
    /// A repeated key keeps its first value.
    pub fn from_entries(entries: impl IntoIterator<Item = GlobalStateEntry>) -> Self {
        let mut state = Self::default();
        for entry in entries {
            state.entries.entry(entry.key).or_insert(entry.value);
        }
        state
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &[u8]) -> Option<&TealValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }

    /// Reward asset id stored under `token_id`.
    pub fn token_id(&self) -> Result<AssetId, ClaimError> {
        self.asset_id_at(TOKEN_ID_KEY.as_bytes())
    }

    pub fn asset_id_at(&self, key: &[u8]) -> Result<AssetId, ClaimError> {
        if self.is_empty() {
            return Err(ClaimError::ContractState(GLOBAL_STATE_EMPTY_MSG.to_string()));
        }
        let Some(value) = self.get(key) else {
            return Err(ClaimError::ContractState(TOKEN_ID_MISSING_MSG.to_string()));
        };
        let key_text = String::from_utf8_lossy(key);
        match value.as_uint() {
            Some(0) => Err(ClaimError::ContractState(format!("{key_text} in contract's global state is zero"))),
            Some(id) => Ok(AssetId::new(id)),
            None => Err(ClaimError::ContractState(format!("{key_text} in contract's global state is not an integer"))),
        }
    }
}
