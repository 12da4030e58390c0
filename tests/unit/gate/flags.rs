use super::*;

#[test]
fn flags_mirror_the_active_operation() {
    let mut gate = Gate::new();
    assert!(!gate.flags().any());

    gate.open(BoundaryOp::Shift).unwrap();
    let flags = gate.flags();
    assert!(flags.shifting);
    assert!(!flags.pushing && !flags.popping && !flags.unshifting);
}

#[test]
fn second_open_is_rejected() {
    let mut gate = Gate::new();
    gate.open(BoundaryOp::Push).unwrap();
    let err = gate.open(BoundaryOp::Pop).unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(gate.active(), Some(BoundaryOp::Push));
}

#[test]
fn close_is_idempotent_and_kind_checked() {
    let mut gate = Gate::new();
    gate.open(BoundaryOp::Unshift).unwrap();
    assert!(!gate.close(BoundaryOp::Push));
    assert_eq!(gate.active(), Some(BoundaryOp::Unshift));
    assert!(gate.close(BoundaryOp::Unshift));
    assert!(!gate.close(BoundaryOp::Unshift));
    assert_eq!(gate.active(), None);
}

#[test]
fn pair_completes_once_both_items_acknowledge() {
    let mut acks = PairAcks::new(ItemId(3), ItemId(4));
    assert_eq!(acks.ack(ItemId(9)), AckOutcome::Ignored);
    assert_eq!(acks.ack(ItemId(4)), AckOutcome::Recorded);
    assert_eq!(acks.ack(ItemId(4)), AckOutcome::Ignored);
    assert!(!acks.is_complete());
    assert_eq!(acks.ack(ItemId(3)), AckOutcome::Advanced);
    assert!(acks.is_complete());
    assert_eq!(acks.ack(ItemId(3)), AckOutcome::Ignored);
}
