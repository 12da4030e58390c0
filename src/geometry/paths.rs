//! Swap-path and boundary-motion geometry.
//!
//! Everything here is a pure function of the layout constants and the indices involved,
//! so a test (or the rendering layer) can re-derive any descriptor from `S`, `G`, `i`, `j`.
//!
//! Coordinates follow screen conventions: `+x` to the right, `+y` downwards.

use kurbo::{Line, ParamCurve};

use crate::foundation::core::{BezPath, BoundaryOp, Layout, Point, Vec2};
use crate::foundation::error::{VizError, VizResult};

/// Which side of the row a swapping item travels on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bow {
    /// Up and over the row.
    Over,
    /// Down and under the row.
    Under,
}

/// One half of a swap: the motion applied to a single item.
///
/// The path is a three-segment polyline relative to the item's resting position:
/// lift (or drop) by `dy`, travel `dx`, settle back onto the row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SwapPath {
    /// Index the item starts at.
    pub from_index: usize,
    /// Index whose slot the item travels to.
    pub to_index: usize,
    /// Signed horizontal displacement.
    pub dx: f64,
    /// Signed vertical excursion (negative when bowing over).
    pub dy: f64,
    pub bow: Bow,
}

impl SwapPath {
    /// Magnitude of the vertical excursion.
    pub fn excursion(&self) -> f64 {
        self.dy.abs()
    }

    /// The four corners of the path, relative to the item's resting position.
    pub fn waypoints(&self) -> [Vec2; 4] {
        [
            Vec2::ZERO,
            Vec2::new(0.0, self.dy),
            Vec2::new(self.dx, self.dy),
            Vec2::new(self.dx, 0.0),
        ]
    }

    /// Total travelled distance.
    pub fn length(&self) -> f64 {
        2.0 * self.dy.abs() + self.dx.abs()
    }

    /// Displacement after travelling the fraction `t` (clamped to `0..=1`) of the path length.
    pub fn offset_at(&self, t: f64) -> Vec2 {
        let pts = self.waypoints().map(|v| v.to_point());
        polyline_at(&pts, t).to_vec2()
    }

    /// Path in cell-local coordinates, starting at the cell centre.
    pub fn to_bez_path(&self, layout: Layout) -> BezPath {
        let origin = layout.origin_point();
        let mut path = BezPath::new();
        let mut pts = self.waypoints().into_iter().map(|v| origin + v);
        if let Some(first) = pts.next() {
            path.move_to(first);
        }
        for p in pts {
            path.line_to(p);
        }
        path
    }

    /// SVG path data (`M .. L ..`) of [`SwapPath::to_bez_path`].
    pub fn to_svg(&self, layout: Layout) -> String {
        self.to_bez_path(layout).to_svg()
    }
}

/// Geometry for both items of a swap.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SwapPaths {
    /// Applied to the item originally at the first index.
    pub first: SwapPath,
    /// Applied to the item originally at the second index.
    pub second: SwapPath,
}

/// Compute the swap paths for the items at `first` and `second`.
///
/// Each item travels the signed horizontal distance to the other's slot. Adjacent pairs bow
/// by `S/2 + G/2`, non-adjacent pairs by `S + G` to clear the items in between. The first item
/// goes over the row and the second goes under it, so the two paths never overlap.
pub fn swap_paths(layout: Layout, first: usize, second: usize) -> VizResult<SwapPaths> {
    if first == second {
        return Err(VizError::validation(format!(
            "swap requires two distinct indices, got {first} twice"
        )));
    }

    let pitch = layout.pitch();
    let distance = first.abs_diff(second);
    let excursion = if distance == 1 {
        layout.cell_size / 2.0 + layout.gap / 2.0
    } else {
        pitch
    };
    let dx = (second as f64 - first as f64) * pitch;

    Ok(SwapPaths {
        first: SwapPath {
            from_index: first,
            to_index: second,
            dx,
            dy: -excursion,
            bow: Bow::Over,
        },
        second: SwapPath {
            from_index: second,
            to_index: first,
            dx: -dx,
            dy: excursion,
            bow: Bow::Under,
        },
    })
}

/// Straight-line motion of the boundary item during push/pop/shift/unshift.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundaryMotion {
    pub op: BoundaryOp,
    /// Cell-local start point.
    pub from: Point,
    /// Cell-local end point.
    pub to: Point,
}

impl BoundaryMotion {
    /// Position after the fraction `t` (clamped) of the motion.
    pub fn point_at(&self, t: f64) -> Point {
        Line::new(self.from, self.to).eval(t.clamp(0.0, 1.0))
    }

    /// Displacement from the cell centre after the fraction `t` of the motion.
    pub fn offset_at(&self, layout: Layout, t: f64) -> Vec2 {
        self.point_at(t) - layout.origin_point()
    }

    /// Inserted items fade in, removed items fade out.
    pub fn appearing(&self) -> bool {
        self.op.is_insert()
    }
}

/// Motion of the boundary item for `op`.
///
/// Pushed items enter from the right, popped items leave to the right; unshifted items enter
/// from the left, shifted items leave to the left.
pub fn boundary_motion(layout: Layout, op: BoundaryOp) -> BoundaryMotion {
    let origin = layout.origin_point();
    let (from, to) = match op {
        BoundaryOp::Push => (layout.right_point(), origin),
        BoundaryOp::Pop => (origin, layout.right_point()),
        BoundaryOp::Shift => (origin, layout.left_point()),
        BoundaryOp::Unshift => (layout.left_point(), origin),
    };
    BoundaryMotion { op, from, to }
}

fn polyline_at(pts: &[Point], t: f64) -> Point {
    let Some(&start) = pts.first() else {
        return Point::ORIGIN;
    };
    let total: f64 = pts.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total <= 0.0 {
        return start;
    }

    let mut remaining = t.clamp(0.0, 1.0) * total;
    for w in pts.windows(2) {
        let seg = w[0].distance(w[1]);
        if seg > 0.0 && remaining <= seg {
            return Line::new(w[0], w[1]).eval(remaining / seg);
        }
        remaining -= seg;
    }
    pts[pts.len() - 1]
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/paths.rs"]
mod tests;
