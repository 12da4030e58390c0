use super::*;

#[test]
fn resolves_once_and_takes_once() {
    let (resolver, result) = deferred::<u32>();
    assert!(!result.is_resolved());
    assert_eq!(result.take(), None);

    resolver.resolve(7);
    assert!(result.is_resolved());
    assert_eq!(result.resolution_count(), 1);
    assert_eq!(result.peek(), Some(7));
    assert_eq!(result.take(), Some(7));
    assert_eq!(result.take(), None);
    assert!(result.is_resolved());
}

#[test]
fn dropped_resolver_marks_abandoned() {
    let (resolver, result) = deferred::<u32>();
    drop(resolver);
    assert!(result.is_abandoned());
    assert!(!result.is_resolved());
    assert_eq!(result.resolution_count(), 0);
}

#[test]
fn ready_is_resolved_immediately() {
    let result = Deferred::ready("done");
    assert_eq!(result.resolution_count(), 1);
    assert_eq!(result.take(), Some("done"));
}

#[test]
fn pending_slot_rejects_second_arm() {
    let mut slot = PendingSlot::new("swap");
    slot.arm(1).unwrap();
    let err = slot.arm(2).unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(slot.get(), Some(&1));
    assert_eq!(slot.take(), Some(1));
    assert!(!slot.is_armed());
    slot.arm(3).unwrap();
    assert_eq!(slot.get(), Some(&3));
}
