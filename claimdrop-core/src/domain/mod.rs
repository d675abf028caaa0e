//! Domain layer: pure logic with no I/O.

pub mod allocation;
pub mod boxes;
pub mod operation;
pub mod state;
pub mod txn;

pub use allocation::{scale_amount, scale_amounts, validate_allocations, AllocationRequest};
pub use boxes::{BoxKey, BoxKeyDeriver, BoxReference};
pub use operation::{CallStage, CallTracker, OperationKind};
pub use state::{GlobalState, GlobalStateEntry, TealValue};
pub use txn::{
    AbiMethod, AbiType, AbiValue, GroupComposer, MethodCallParams, SignedTransaction, SignedTransactionBytes, SuggestedParams,
    Transaction, TransactionBody, TransactionGroup,
};
