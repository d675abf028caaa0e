use claimdrop_core::domain::operation::{validate_transition, CallStage, CallTracker, OperationKind};

#[test]
fn test_error_tags_are_stable() {
    assert_eq!(OperationKind::AddAllocations.error_tag(), "[Client] Error adding allocations:");
    assert_eq!(OperationKind::ReclaimAllocation.error_tag(), "[Client] Error reclaiming allocation:");
    assert_eq!(OperationKind::ClaimRewards.error_tag(), "[Client] Error claiming rewards:");
}

#[test]
fn test_any_non_terminal_stage_can_fail() {
    for stage in [CallStage::Idle, CallStage::Validating, CallStage::Composing, CallStage::Submitting] {
        assert!(validate_transition(stage, CallStage::Failed), "{stage:?}");
    }
    assert!(!validate_transition(CallStage::Failed, CallStage::Failed));
    assert!(!validate_transition(CallStage::Confirmed, CallStage::Failed));
}

#[test]
fn test_reclaim_path_without_state_read() {
    let mut tracker = CallTracker::new(OperationKind::ReclaimAllocation);
    tracker.advance(CallStage::Validating).unwrap();
    tracker.advance(CallStage::ResolvingConfig).unwrap();
    tracker.advance(CallStage::DerivingBoxKey).unwrap();
    tracker.advance(CallStage::Composing).unwrap();
    assert!(tracker.advance(CallStage::Confirmed).is_err());
    assert_eq!(tracker.stage(), CallStage::Composing);
}
