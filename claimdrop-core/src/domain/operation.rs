use crate::foundation::ClaimError;
use log::trace;
use std::fmt;

/// The three contract-call operations.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    AddAllocations,
    ReclaimAllocation,
    ClaimRewards,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::AddAllocations => "add_allocations",
            OperationKind::ReclaimAllocation => "reclaim_allocation",
            OperationKind::ClaimRewards => "claim_rewards",
        }
    }

    /// Prefix of the error line logged when the operation fails.
    pub fn error_tag(&self) -> &'static str {
        match self {
            OperationKind::AddAllocations => "[Client] Error adding allocations:",
            OperationKind::ReclaimAllocation => "[Client] Error reclaiming allocation:",
            OperationKind::ClaimRewards => "[Client] Error claiming rewards:",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CallStage {
    Idle,
    Validating,
    ResolvingConfig,
    ReadingState,
    DerivingBoxKey,
    Composing,
    Submitting,
    Confirmed,
    Failed,
}

const VALID_TRANSITIONS: &[(CallStage, CallStage)] = &[
    (CallStage::Idle, CallStage::Validating),
    (CallStage::Validating, CallStage::ResolvingConfig),
    (CallStage::ResolvingConfig, CallStage::ReadingState),
    (CallStage::ResolvingConfig, CallStage::DerivingBoxKey),
    (CallStage::ResolvingConfig, CallStage::Composing),
    (CallStage::ReadingState, CallStage::DerivingBoxKey),
    (CallStage::ReadingState, CallStage::Composing),
    (CallStage::DerivingBoxKey, CallStage::Composing),
    (CallStage::Composing, CallStage::Submitting),
    (CallStage::Submitting, CallStage::Confirmed),
];

pub fn is_terminal(stage: CallStage) -> bool {
    matches!(stage, CallStage::Confirmed | CallStage::Failed)
}

pub fn validate_transition(from: CallStage, to: CallStage) -> bool {
    if to == CallStage::Failed {
        return !is_terminal(from);
    }
    VALID_TRANSITIONS.contains(&(from, to))
}

/// Internal progress of one contract call. Not persisted or exposed.
#[derive(Debug)]
pub struct CallTracker {
    operation: OperationKind,
    stage: CallStage,
}

impl CallTracker {
    pub fn new(operation: OperationKind) -> Self {
        Self { operation, stage: CallStage::Idle }
    }

    pub fn stage(&self) -> CallStage {
        self.stage
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn advance(&mut self, to: CallStage) -> Result<(), ClaimError> {
        if !validate_transition(self.stage, to) {
            return Err(ClaimError::InvalidStateTransition { from: format!("{:?}", self.stage), to: format!("{:?}", to) });
        }
        trace!("call stage operation={} from={:?} to={:?}", self.operation, self.stage, to);
        self.stage = to;
        Ok(())
    }

    /// Move to `Failed` unless already terminal.
    pub fn fail(&mut self) {
        if !is_terminal(self.stage) {
            trace!("call stage operation={} from={:?} to=Failed", self.operation, self.stage);
            self.stage = CallStage::Failed;
        }
    }
}
