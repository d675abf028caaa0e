//! Client for the allocation/claim contract: resolves per-network
//! deployment, reads contract state, composes and submits atomic
//! transaction groups, and notifies the companion backend.

pub mod application;
pub mod domain;
pub mod foundation;
pub mod infrastructure;

pub use foundation::{ClaimError, Result};
