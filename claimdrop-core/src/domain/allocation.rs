use crate::foundation::{Address, ClaimError, ALLOCATION_LENGTH_MISMATCH_MSG, MAX_ASSET_DECIMALS};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Addresses paired 1:1 with human-unit amounts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub addresses: Vec<Address>,
    pub amounts: Vec<Decimal>,
}

impl AllocationRequest {
    pub fn new(addresses: Vec<Address>, amounts: Vec<Decimal>) -> Self {
        Self { addresses, amounts }
    }

    pub fn validate(&self) -> Result<(), ClaimError> {
        validate_allocations(&self.addresses, &self.amounts)
    }
}

/// The only gate on the add-allocations path; runs before any I/O.
pub fn validate_allocations<A, B>(addresses: &[A], amounts: &[B]) -> Result<(), ClaimError> {
    if addresses.is_empty() || amounts.is_empty() || addresses.len() != amounts.len() {
        return Err(ClaimError::Validation(ALLOCATION_LENGTH_MISMATCH_MSG.to_string()));
    }
    Ok(())
}

/// Scale a human-unit amount to the asset's smallest unit, truncating toward zero.
pub fn scale_amount(amount: Decimal, decimals: u32) -> Result<u64, ClaimError> {
    if decimals > MAX_ASSET_DECIMALS {
        return Err(ClaimError::Validation(format!("decimals {decimals} exceeds maximum {MAX_ASSET_DECIMALS}")));
    }
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ClaimError::Validation(format!("amount must not be negative: {amount}")));
    }
    let factor = Decimal::from(10u64.pow(decimals));
    amount
        .checked_mul(factor)
        .map(|scaled| scaled.trunc())
        .and_then(|scaled| scaled.to_u64())
        .ok_or_else(|| ClaimError::Validation(format!("amount out of range: {amount} with {decimals} decimals")))
}

pub fn scale_amounts(amounts: &[Decimal], decimals: u32) -> Result<Vec<u64>, ClaimError> {
    amounts.iter().map(|amount| scale_amount(*amount, decimals)).collect()
}
