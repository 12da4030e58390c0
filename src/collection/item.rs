use std::fmt;

use crate::foundation::core::{ItemId, Value};
use crate::foundation::error::{VizError, VizResult};
use crate::geometry::paths::SwapPath;

/// Animation state of a single item.
///
/// One explicit state replaces independent swap/compare/sorted flags, so combinations such
/// as "swapping while comparing" or "swap path without swapping" cannot be represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ItemState {
    #[default]
    Idle,
    /// Appearing at the boundary after push/unshift.
    EnteringBoundary,
    /// Leaving at the boundary before pop/shift removes it.
    ExitingBoundary,
    Comparing,
    /// Travelling along its own half of the swap geometry.
    Swapping { path: SwapPath },
    /// Settled in its final sorted position.
    Sorted,
}

/// Payload-free discriminant of [`ItemState`], used by the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Idle,
    EnteringBoundary,
    ExitingBoundary,
    Comparing,
    Swapping,
    Sorted,
}

impl StateKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::EnteringBoundary => "entering_boundary",
            Self::ExitingBoundary => "exiting_boundary",
            Self::Comparing => "comparing",
            Self::Swapping => "swapping",
            Self::Sorted => "sorted",
        }
    }

    /// Whether the transition table allows `self -> next`.
    pub fn allows(self, next: StateKind) -> bool {
        use StateKind::*;
        matches!(
            (self, next),
            (Idle, Idle | EnteringBoundary | ExitingBoundary | Comparing | Swapping | Sorted)
                | (EnteringBoundary, Idle)
                | (Comparing, Idle | Swapping)
                | (Swapping, Idle)
                | (Sorted, Idle)
        )
    }

    /// States that belong to an unfinished transition and keep the engine busy.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Self::EnteringBoundary | Self::ExitingBoundary | Self::Comparing | Self::Swapping
        )
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ItemState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::EnteringBoundary => StateKind::EnteringBoundary,
            Self::ExitingBoundary => StateKind::ExitingBoundary,
            Self::Comparing => StateKind::Comparing,
            Self::Swapping { .. } => StateKind::Swapping,
            Self::Sorted => StateKind::Sorted,
        }
    }
}

/// A cell of the row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Item {
    id: ItemId,
    value: Value,
    #[serde(flatten)]
    state: ItemState,
}

impl Item {
    pub(crate) fn new(id: ItemId, value: Value) -> Self {
        Self {
            id,
            value,
            state: ItemState::Idle,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub fn is_being_swapped(&self) -> bool {
        matches!(self.state, ItemState::Swapping { .. })
    }

    pub fn is_being_compared(&self) -> bool {
        matches!(self.state, ItemState::Comparing)
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self.state, ItemState::Sorted)
    }

    /// This item's half of the swap geometry; present exactly while it is swapping.
    pub fn swap_path(&self) -> Option<&SwapPath> {
        match &self.state {
            ItemState::Swapping { path } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Back to idle without consulting the transition table; used by commits and resets.
    pub(crate) fn reset(&mut self) {
        self.state = ItemState::Idle;
    }

    /// Move to `next`, checked against the transition table.
    pub(crate) fn transition(&mut self, next: ItemState) -> VizResult<()> {
        let from = self.state.kind();
        let to = next.kind();
        if !from.allows(to) {
            return Err(VizError::rejected(format!(
                "{} cannot go from {from} to {to}",
                self.id
            )));
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collection/item.rs"]
mod tests;
