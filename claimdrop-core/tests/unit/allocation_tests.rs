use crate::fixtures::{admin_address, holder_address};
use claimdrop_core::domain::allocation::{scale_amount, scale_amounts, validate_allocations, AllocationRequest};
use claimdrop_core::foundation::{ClaimError, ALLOCATION_LENGTH_MISMATCH_MSG};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_scale_amount_when_six_decimals_then_multiplies_by_million() {
    assert_eq!(scale_amount(Decimal::from(100), 6).unwrap(), 100_000_000);
    assert_eq!(scale_amount(Decimal::from_str("0.5").unwrap(), 6).unwrap(), 500_000);
}

#[test]
fn test_scale_amount_when_fractional_remainder_then_truncates() {
    assert_eq!(scale_amount(Decimal::from_str("2.9999999").unwrap(), 6).unwrap(), 2_999_999);
    assert_eq!(scale_amount(Decimal::from_str("0.1").unwrap(), 0).unwrap(), 0);
}

#[test]
fn test_scale_amount_when_negative_then_validation_error() {
    let err = scale_amount(Decimal::from_str("-0.5").unwrap(), 6).unwrap_err();
    assert!(matches!(err, ClaimError::Validation(_)));
}

#[test]
fn test_scale_amounts_preserves_order() {
    let amounts = [Decimal::from(1), Decimal::from(2), Decimal::from(3)];
    assert_eq!(scale_amounts(&amounts, 2).unwrap(), vec![100, 200, 300]);
}

#[test]
fn test_validate_allocations_when_lengths_differ_then_exact_message() {
    let err = validate_allocations(&[admin_address(), holder_address()], &[Decimal::ONE]).unwrap_err();
    assert_eq!(err.to_string(), ALLOCATION_LENGTH_MISMATCH_MSG);

    let err = AllocationRequest::new(Vec::new(), Vec::new()).validate().unwrap_err();
    assert_eq!(err.to_string(), "Addresses and amounts arrays must have the same non-zero length.");
}
