use crate::domain::operation::OperationKind;
use crate::foundation::{Address, ClaimError};
use log::{trace, warn};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

type InFlightKey = (OperationKind, Address);

static PROCESS_WIDE: OnceLock<InFlightGuard> = OnceLock::new();

/// At most one in-flight call per `(operation, address)`.
#[derive(Clone, Debug, Default)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<InFlightKey>>>,
}

impl InFlightGuard {
    /// An isolated registry, not shared with `process_wide`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the registry shared by every orchestrator in the process.
    pub fn process_wide() -> Self {
        PROCESS_WIDE.get_or_init(InFlightGuard::new).clone()
    }

    pub fn shares_registry_with(&self, other: &InFlightGuard) -> bool {
        Arc::ptr_eq(&self.active, &other.active)
    }

    /// Claim the pair, or fail with `OperationInFlight` if another call holds it.
    pub fn acquire(&self, operation: OperationKind, address: Address) -> Result<InFlightPermit, ClaimError> {
        let mut active = self.active.lock();
        if !active.insert((operation, address)) {
            warn!("rejecting concurrent call operation={} address={}", operation, address);
            return Err(ClaimError::OperationInFlight { operation: operation.to_string(), address: address.to_string() });
        }
        trace!("in-flight acquire operation={} address={}", operation, address);
        Ok(InFlightPermit { active: self.active.clone(), key: (operation, address) })
    }

    pub fn is_in_flight(&self, operation: OperationKind, address: &Address) -> bool {
        self.active.lock().contains(&(operation, *address))
    }

    pub fn len(&self) -> usize {
        self.active.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.lock().is_empty()
    }
}

/// Releases its pair on drop.
#[derive(Debug)]
pub struct InFlightPermit {
    active: Arc<Mutex<HashSet<InFlightKey>>>,
    key: InFlightKey,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.active.lock().remove(&self.key);
        trace!("in-flight release operation={} address={}", self.key.0, self.key.1);
    }
}
