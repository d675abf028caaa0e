use crate::fixtures::{admin_address, holder_address};
use claimdrop_core::domain::txn::{AbiMethod, AbiType, AbiValue};
use claimdrop_core::infrastructure::config::{DEFAULT_ADD_ALLOCATIONS_METHOD, DEFAULT_CLAIM_METHOD, DEFAULT_RECLAIM_METHOD};

#[test]
fn test_selector_matches_published_vector() {
    let method: AbiMethod = "add(uint64,uint64)uint128".parse().unwrap();
    assert_eq!(hex::encode(method.selector()), "8aa3b61f");
}

#[test]
fn test_default_methods_parse() {
    let add: AbiMethod = DEFAULT_ADD_ALLOCATIONS_METHOD.parse().unwrap();
    assert_eq!(add.args, vec![AbiType::AddressArray, AbiType::Uint64Array]);
    let reclaim: AbiMethod = DEFAULT_RECLAIM_METHOD.parse().unwrap();
    assert_eq!(reclaim.args, vec![AbiType::Address]);
    let claim: AbiMethod = DEFAULT_CLAIM_METHOD.parse().unwrap();
    assert!(claim.args.is_empty());
}

#[test]
fn test_address_array_layout() {
    let value = AbiValue::AddressArray(vec![admin_address(), holder_address()]);
    let encoded = value.encode().unwrap();
    assert_eq!(&encoded[..2], &[0, 2]);
    assert_eq!(encoded.len(), 2 + 64);
    assert_eq!(&encoded[2..34], admin_address().as_bytes());
    assert_eq!(AbiValue::decode(AbiType::AddressArray, &encoded).unwrap(), value);
}

#[test]
fn test_decode_rejects_truncated_array() {
    let mut encoded = AbiValue::Uint64Array(vec![7, 8]).encode().unwrap();
    encoded.pop();
    assert!(AbiValue::decode(AbiType::Uint64Array, &encoded).is_err());
}
