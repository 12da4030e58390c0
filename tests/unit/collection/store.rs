use super::*;
use crate::foundation::core::Layout;
use crate::geometry::paths::swap_paths;

fn collection() -> Collection {
    Collection::from_values([12, 58, 51, 21])
}

#[test]
fn append_adds_fresh_identity_at_end() {
    let mut c = collection();
    let before = c.snapshot();
    let after = c.append(7);
    assert_eq!(after.len(), 5);
    assert_eq!(after[4].value(), 7);
    assert!(!before.ids().contains(&after[4].id()));
    assert_eq!(&after.ids()[..4], &before.ids()[..]);
}

#[test]
fn prepend_shifts_indices_but_keeps_ids() {
    let mut c = collection();
    let before = c.snapshot();
    let after = c.prepend(3);
    assert_eq!(after.values(), vec![3, 12, 58, 51, 21]);
    for (old_index, id) in before.ids().into_iter().enumerate() {
        assert_eq!(after.index_of(id), Some(old_index + 1));
        assert_eq!(after.by_id(id).unwrap().value(), before[old_index].value());
    }
}

#[test]
fn append_then_remove_last_is_inverse() {
    let mut c = collection();
    let before = c.snapshot();
    let _ = c.append(99);
    let removed = c.remove_last().unwrap();
    assert_eq!(removed.value(), 99);
    assert_eq!(c.snapshot(), before);
}

#[test]
fn remove_first_takes_index_zero() {
    let mut c = collection();
    let first_id = c.snapshot()[0].id();
    let removed = c.remove_first().unwrap();
    assert_eq!(removed.id(), first_id);
    assert_eq!(c.snapshot().values(), vec![58, 51, 21]);
}

#[test]
fn removals_on_empty_collection_fail_without_change() {
    let mut c = Collection::new();
    assert!(matches!(c.remove_last(), Err(VizError::EmptyCollection)));
    assert!(matches!(c.remove_first(), Err(VizError::EmptyCollection)));
    assert!(matches!(c.exchange(0, 0), Err(VizError::EmptyCollection)));
    assert!(c.is_empty());
}

#[test]
fn exchange_trades_values_and_keeps_ids_in_place() {
    let mut c = collection();
    let before = c.snapshot();
    let after = c.exchange(0, 2).unwrap();
    assert_eq!(after.values(), vec![51, 58, 12, 21]);
    assert_eq!(after.ids(), before.ids());
}

#[test]
fn exchange_twice_restores_order_and_clears_flags() {
    let mut c = collection();
    let before = c.snapshot();
    let paths = swap_paths(Layout::default(), 1, 3).unwrap();
    let _ = c
        .set_states(&[
            (1, ItemState::Swapping { path: paths.first }),
            (3, ItemState::Swapping { path: paths.second }),
        ])
        .unwrap();

    let once = c.exchange(1, 3).unwrap();
    assert!(once.iter().all(|it| !it.is_being_swapped()));
    assert!(once.iter().all(|it| it.swap_path().is_none()));

    let twice = c.exchange(1, 3).unwrap();
    assert_eq!(twice, before);
}

#[test]
fn exchange_out_of_range_is_rejected_without_change() {
    let mut c = collection();
    let before = c.snapshot();
    let err = c.exchange(1, 9).unwrap_err();
    assert!(matches!(err, VizError::InvalidIndex { index: 9, len: 4 }));
    assert_eq!(c.snapshot(), before);
}

#[test]
fn snapshots_never_alias_later_edits() {
    let mut c = collection();
    let before = c.snapshot();
    let _ = c.exchange(0, 1).unwrap();
    let _ = c.append(1);
    assert_eq!(before.values(), vec![12, 58, 51, 21]);
    assert_eq!(c.snapshot().values(), vec![58, 12, 51, 21, 1]);
}

#[test]
fn apply_routes_every_mutation() {
    let mut c = collection();
    let out = c.apply(Mutation::Append { value: 5 }).unwrap();
    assert_eq!(out.into_snapshot().unwrap().len(), 5);
    let out = c.apply(Mutation::RemoveFirst).unwrap();
    assert_eq!(out.into_removed().unwrap().value(), 12);
    let out = c.apply(Mutation::Prepend { value: 1 }).unwrap();
    assert_eq!(out.into_snapshot().unwrap()[0].value(), 1);
    let out = c.apply(Mutation::Exchange { first: 0, second: 1 }).unwrap();
    assert_eq!(out.into_snapshot().unwrap().values(), vec![58, 1, 51, 21, 5]);
    let out = c.apply(Mutation::RemoveLast).unwrap();
    assert_eq!(out.into_removed().unwrap().value(), 5);
}

#[test]
fn set_states_is_all_or_nothing() {
    let mut c = collection();
    let _ = c.set_states(&[(0, ItemState::EnteringBoundary)]).unwrap();
    let before = c.snapshot();
    // Item 0 cannot start comparing while entering, so item 1 must not change either.
    let err = c
        .set_states(&[(1, ItemState::Comparing), (0, ItemState::Comparing)])
        .unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(c.snapshot(), before);
    assert!(c.has_transient());
}

#[test]
fn clear_state_resets_only_matching_items() {
    let mut c = collection();
    let _ = c
        .set_states(&[(0, ItemState::Sorted), (1, ItemState::Comparing)])
        .unwrap();
    c.clear_state(StateKind::Sorted);
    let snap = c.snapshot();
    assert!(!snap[0].is_sorted());
    assert!(snap[1].is_being_compared());
}
