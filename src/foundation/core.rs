use std::fmt;

use crate::foundation::error::{VizError, VizResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Numeric payload of a cell.
pub type Value = i64;

/// Stable identity of an item.
///
/// Assigned once when the item is created (push/unshift/initial load) and never reused,
/// so the rendering layer can key on it while positional indices shift.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// Monotonic [`ItemId`] source. Ids are never handed out twice by the same allocator.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// Fixed layout constants of the cell row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Cell edge length `S`.
    pub cell_size: f64,
    /// Horizontal gap `G` between neighbouring cells.
    pub gap: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            gap: 12.0,
        }
    }
}

impl Layout {
    pub fn new(cell_size: f64, gap: f64) -> VizResult<Self> {
        let layout = Self { cell_size, gap };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(VizError::validation("Layout cell_size must be finite and > 0"));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(VizError::validation("Layout gap must be finite and >= 0"));
        }
        Ok(())
    }

    /// Distance between the origins of two neighbouring cells (`S + G`).
    pub fn pitch(self) -> f64 {
        self.cell_size + self.gap
    }

    /// Centre of a cell in its own local coordinates.
    pub fn origin_point(self) -> Point {
        let half = self.cell_size / 2.0;
        Point::new(half, half)
    }

    /// Half a gap to the right of the cell, on the row's centre line.
    pub fn right_point(self) -> Point {
        Point::new(self.cell_size + self.gap / 2.0, self.cell_size / 2.0)
    }

    /// Half a gap to the left of the cell, on the row's centre line.
    pub fn left_point(self) -> Point {
        Point::new(-self.gap / 2.0, self.cell_size / 2.0)
    }
}

/// Structural operation that animates the boundary item of the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryOp {
    /// Append at the end.
    Push,
    /// Remove from the end.
    Pop,
    /// Remove from the front.
    Shift,
    /// Insert at the front.
    Unshift,
}

impl BoundaryOp {
    pub const ALL: [BoundaryOp; 4] = [Self::Push, Self::Pop, Self::Shift, Self::Unshift];

    /// `true` for operations that insert a new item.
    pub fn is_insert(self) -> bool {
        matches!(self, Self::Push | Self::Unshift)
    }

    /// `true` for operations acting on the last position.
    pub fn at_end(self) -> bool {
        matches!(self, Self::Push | Self::Pop)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Shift => "shift",
            Self::Unshift => "unshift",
        }
    }
}

impl fmt::Display for BoundaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
