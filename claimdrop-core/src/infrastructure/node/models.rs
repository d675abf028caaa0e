//! algod v2 JSON shapes.

use crate::domain::state::{GlobalStateEntry, TealValue};
use crate::domain::txn::SuggestedParams;
use crate::foundation::util::encoding::decode_base64;
use crate::foundation::{ClaimError, Hash32, Round};
use serde::Deserialize;

const TEAL_BYTES: u8 = 1;
const TEAL_UINT: u8 = 2;

#[derive(Clone, Debug, Deserialize)]
pub struct TransactionParamsResponse {
    pub fee: u64,
    #[serde(rename = "min-fee")]
    pub min_fee: u64,
    #[serde(rename = "last-round")]
    pub last_round: Round,
    #[serde(rename = "genesis-id")]
    pub genesis_id: String,
    #[serde(rename = "genesis-hash")]
    pub genesis_hash: String,
}

impl TransactionParamsResponse {
    pub fn into_params(self, validity_window: u64) -> Result<SuggestedParams, ClaimError> {
        let genesis_hash: Hash32 = decode_base64(&self.genesis_hash)?
            .try_into()
            .map_err(|_| ClaimError::EncodingError("genesis-hash must be 32 bytes".to_string()))?;
        Ok(SuggestedParams {
            fee: self.fee,
            flat_fee: false,
            min_fee: self.min_fee,
            first_valid: self.last_round,
            last_valid: self.last_round.saturating_add(validity_window),
            genesis_id: self.genesis_id,
            genesis_hash,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApplicationResponse {
    pub id: u64,
    pub params: ApplicationParams,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApplicationParams {
    #[serde(rename = "global-state", default)]
    pub global_state: Vec<TealKeyValue>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TealKeyValue {
    /// base64 key bytes.
    pub key: String,
    pub value: TealValueJson,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TealValueJson {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

impl TryFrom<TealKeyValue> for GlobalStateEntry {
    type Error = ClaimError;

    fn try_from(entry: TealKeyValue) -> Result<Self, Self::Error> {
        let key = decode_base64(&entry.key)?;
        let value = match entry.value.kind {
            TEAL_BYTES => TealValue::Bytes(decode_base64(&entry.value.bytes)?),
            TEAL_UINT => TealValue::Uint(entry.value.uint),
            other => return Err(ClaimError::EncodingError(format!("unknown TEAL value type {other}"))),
        };
        Ok(GlobalStateEntry { key, value })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PostTransactionsResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PendingTransactionResponse {
    #[serde(rename = "confirmed-round", default)]
    pub confirmed_round: Option<Round>,
    #[serde(rename = "pool-error", default)]
    pub pool_error: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeStatusResponse {
    #[serde(rename = "last-round")]
    pub last_round: Round,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}
