use crate::collection::store::Snapshot;
use crate::foundation::core::BoundaryOp;
use crate::gate::flags::OperationFlags;

/// What the rendering layer reads for one render: the items with their states, the
/// collection-wide operation flags and whether the engine is busy.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderView {
    pub snapshot: Snapshot,
    pub flags: OperationFlags,
    pub is_animating: bool,
}

impl RenderView {
    /// The boundary operation being animated, if any.
    pub fn boundary_op(&self) -> Option<BoundaryOp> {
        let flags = self.flags;
        if flags.pushing {
            Some(BoundaryOp::Push)
        } else if flags.popping {
            Some(BoundaryOp::Pop)
        } else if flags.shifting {
            Some(BoundaryOp::Shift)
        } else if flags.unshifting {
            Some(BoundaryOp::Unshift)
        } else {
            None
        }
    }

    /// Index of the item the active boundary operation animates.
    pub fn boundary_index(&self) -> Option<usize> {
        let op = self.boundary_op()?;
        if self.snapshot.is_empty() {
            return None;
        }
        Some(if op.at_end() { self.snapshot.len() - 1 } else { 0 })
    }
}
