use crate::foundation::{Hash32, Round};
use serde::{Deserialize, Serialize};

/// Network parameters a transaction is built against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    /// Fee per byte, or the whole fee when `flat_fee` is set.
    pub fee: u64,
    pub flat_fee: bool,
    pub min_fee: u64,
    pub first_valid: Round,
    pub last_valid: Round,
    pub genesis_id: String,
    pub genesis_hash: Hash32,
}

impl SuggestedParams {
    pub fn fee_for_size(&self, size_bytes: usize) -> u64 {
        if self.flat_fee {
            return self.fee;
        }
        self.fee.saturating_mul(size_bytes as u64).max(self.min_fee)
    }
}
