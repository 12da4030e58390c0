use super::*;

fn layout() -> Layout {
    Layout::new(60.0, 12.0).unwrap()
}

#[test]
fn adjacent_pair_matches_reference_numbers() {
    let paths = swap_paths(layout(), 2, 3).unwrap();
    assert_eq!(paths.first.excursion(), 36.0);
    assert_eq!(paths.second.excursion(), 36.0);
    assert_eq!(paths.first.dx, 72.0);
    assert_eq!(paths.second.dx, -72.0);
}

#[test]
fn non_adjacent_pair_bows_by_full_pitch() {
    let paths = swap_paths(layout(), 0, 6).unwrap();
    assert_eq!(paths.first.excursion(), 72.0);
    assert_eq!(paths.first.dx, 6.0 * 72.0);
    assert_eq!(paths.second.dx, -6.0 * 72.0);
}

#[test]
fn halves_bow_in_opposite_directions() {
    for (i, j) in [(0, 1), (4, 1), (2, 5)] {
        let paths = swap_paths(layout(), i, j).unwrap();
        assert_eq!(paths.first.bow, Bow::Over);
        assert_eq!(paths.second.bow, Bow::Under);
        assert!(paths.first.dy < 0.0);
        assert!(paths.second.dy > 0.0);
        assert_eq!(paths.first.from_index, i);
        assert_eq!(paths.first.to_index, j);
        assert_eq!(paths.second.from_index, j);
        assert_eq!(paths.second.to_index, i);
    }
}

#[test]
fn same_index_is_rejected() {
    assert!(swap_paths(layout(), 3, 3).is_err());
}

#[test]
fn offset_walks_lift_travel_settle() {
    let path = swap_paths(layout(), 2, 3).unwrap().first;
    // 36 up, 72 across, 36 down: 144 in total.
    assert_eq!(path.length(), 144.0);
    assert_eq!(path.offset_at(0.0), Vec2::ZERO);
    assert_eq!(path.offset_at(0.25), Vec2::new(0.0, -36.0));
    assert_eq!(path.offset_at(0.5), Vec2::new(36.0, -36.0));
    assert_eq!(path.offset_at(1.0), Vec2::new(72.0, 0.0));
    assert_eq!(path.offset_at(2.0), Vec2::new(72.0, 0.0));
}

#[test]
fn svg_path_starts_at_cell_centre() {
    let path = swap_paths(layout(), 2, 3).unwrap().first;
    let bez = path.to_bez_path(layout());
    assert_eq!(bez.elements().len(), 4);
    let svg = path.to_svg(layout());
    assert!(svg.starts_with("M30"), "{svg}");
}

#[test]
fn boundary_motions_enter_and_leave_on_the_right_side() {
    let l = layout();
    let push = boundary_motion(l, BoundaryOp::Push);
    assert_eq!(push.from, Point::new(66.0, 30.0));
    assert_eq!(push.to, l.origin_point());
    assert!(push.appearing());

    let shift = boundary_motion(l, BoundaryOp::Shift);
    assert_eq!(shift.point_at(1.0), Point::new(-6.0, 30.0));
    assert_eq!(shift.offset_at(l, 1.0), Vec2::new(-36.0, 0.0));
    assert!(!shift.appearing());

    let pop = boundary_motion(l, BoundaryOp::Pop);
    assert_eq!(pop.point_at(0.5), Point::new(48.0, 30.0));
}
