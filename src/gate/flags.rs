use crate::foundation::core::{BoundaryOp, ItemId};
use crate::foundation::error::{VizError, VizResult};

/// The four collection-wide operation flags, as consumed by the rendering layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperationFlags {
    pub pushing: bool,
    pub popping: bool,
    pub shifting: bool,
    pub unshifting: bool,
}

impl OperationFlags {
    pub fn from_active(op: Option<BoundaryOp>) -> Self {
        Self {
            pushing: op == Some(BoundaryOp::Push),
            popping: op == Some(BoundaryOp::Pop),
            shifting: op == Some(BoundaryOp::Shift),
            unshifting: op == Some(BoundaryOp::Unshift),
        }
    }

    pub fn any(self) -> bool {
        self.pushing || self.popping || self.shifting || self.unshifting
    }
}

/// What an acknowledgment did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AckOutcome {
    /// Nothing was waiting for it; absorbed as a no-op.
    Ignored,
    /// Accepted, still waiting for the partner item.
    Recorded,
    /// Completed the awaited transition and moved the operation forward.
    Advanced,
}

impl AckOutcome {
    pub fn is_ignored(self) -> bool {
        self == Self::Ignored
    }
}

/// Holder of the collection-wide operation flag.
///
/// At most one boundary operation is active. Setting it tells the rendering layer to begin
/// that operation's transition; closing it is idempotent.
#[derive(Clone, Debug, Default)]
pub struct Gate {
    active: Option<BoundaryOp>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, op: BoundaryOp) -> VizResult<()> {
        if let Some(current) = self.active {
            return Err(VizError::rejected(format!(
                "cannot start {op} while {current} is in progress"
            )));
        }
        tracing::debug!(%op, "gate opened");
        self.active = Some(op);
        Ok(())
    }

    /// Close the flag for `op`. Returns `false` (and changes nothing) when `op` is not active.
    pub fn close(&mut self, op: BoundaryOp) -> bool {
        if self.active != Some(op) {
            return false;
        }
        tracing::debug!(%op, "gate closed");
        self.active = None;
        true
    }

    pub fn active(&self) -> Option<BoundaryOp> {
        self.active
    }

    pub fn flags(&self) -> OperationFlags {
        OperationFlags::from_active(self.active)
    }
}

/// Per-item acknowledgments awaited from the two items of a compare or swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairAcks {
    first: ItemId,
    second: ItemId,
    first_done: bool,
    second_done: bool,
}

impl PairAcks {
    pub fn new(first: ItemId, second: ItemId) -> Self {
        Self {
            first,
            second,
            first_done: false,
            second_done: false,
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        id == self.first || id == self.second
    }

    /// Record the acknowledgment of `id`. Unknown ids and repeats are ignored.
    pub fn ack(&mut self, id: ItemId) -> AckOutcome {
        let slot = if id == self.first {
            &mut self.first_done
        } else if id == self.second {
            &mut self.second_done
        } else {
            return AckOutcome::Ignored;
        };
        if *slot {
            return AckOutcome::Ignored;
        }
        *slot = true;
        if self.is_complete() {
            AckOutcome::Advanced
        } else {
            AckOutcome::Recorded
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_done && self.second_done
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gate/flags.rs"]
mod tests;
