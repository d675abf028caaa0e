//! Application layer: wires domain logic to the node, wallet and backend.

pub mod in_flight;
pub mod network;
pub mod orchestrator;
pub mod state_reader;

pub use in_flight::{InFlightGuard, InFlightPermit};
pub use network::{NetworkAppIds, NetworkConfigResolver};
pub use orchestrator::{ContractMethods, ExecuteResult, TransactionOrchestrator};
pub use state_reader::GlobalStateReader;
