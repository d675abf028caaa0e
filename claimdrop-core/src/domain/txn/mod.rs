//! Transaction model: construction, canonical encoding, ABI arguments, grouping.

pub mod abi;
pub(crate) mod encoding;
pub mod group;
pub mod params;
pub mod types;

pub use abi::{AbiMethod, AbiType, AbiValue};
pub use group::{compute_group_id, ComposerStatus, GroupComposer, MethodCallParams, TransactionGroup};
pub use params::SuggestedParams;
pub use types::{
    ApplicationCall, OnComplete, SignedTransaction, SignedTransactionBytes, Transaction, TransactionBody, TransactionHeader,
};
