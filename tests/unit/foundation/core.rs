use super::*;

#[test]
fn allocator_never_repeats_ids() {
    let mut ids = IdAllocator::new();
    let a = ids.next_id();
    let b = ids.next_id();
    let c = ids.next_id();
    assert!(a < b && b < c);
    assert_eq!(ids.issued(), 3);
}

#[test]
fn item_id_display_is_stable() {
    assert_eq!(ItemId(7).to_string(), "item-7");
}

#[test]
fn default_layout_points() {
    let layout = Layout::default();
    assert_eq!(layout.pitch(), 72.0);
    assert_eq!(layout.origin_point(), Point::new(30.0, 30.0));
    assert_eq!(layout.right_point(), Point::new(66.0, 30.0));
    assert_eq!(layout.left_point(), Point::new(-6.0, 30.0));
}

#[test]
fn layout_rejects_degenerate_values() {
    assert!(Layout::new(0.0, 12.0).is_err());
    assert!(Layout::new(60.0, -1.0).is_err());
    assert!(Layout::new(f64::NAN, 12.0).is_err());
    assert!(Layout::new(60.0, 0.0).is_ok());
}

#[test]
fn layout_fills_missing_fields_from_defaults() {
    let layout: Layout = serde_json::from_str(r#"{ "gap": 8.0 }"#).unwrap();
    assert_eq!(layout.cell_size, 60.0);
    assert_eq!(layout.gap, 8.0);
}

#[test]
fn boundary_ops_classify_by_side_and_direction() {
    assert!(BoundaryOp::Push.is_insert() && BoundaryOp::Push.at_end());
    assert!(!BoundaryOp::Pop.is_insert() && BoundaryOp::Pop.at_end());
    assert!(!BoundaryOp::Shift.is_insert() && !BoundaryOp::Shift.at_end());
    assert!(BoundaryOp::Unshift.is_insert() && !BoundaryOp::Unshift.at_end());
    assert_eq!(
        serde_json::to_string(&BoundaryOp::Unshift).unwrap(),
        "\"unshift\""
    );
}
