use std::ops::Deref;
use std::sync::Arc;

use crate::collection::item::{Item, ItemState, StateKind};
use crate::foundation::core::{IdAllocator, ItemId, Value};
use crate::foundation::error::{VizError, VizResult};

/// Immutable view of the collection at one point in time.
///
/// Snapshots share storage with the collection until the next mutation, which copies on
/// write; a snapshot never observes a later or half-applied edit.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    items: Arc<Vec<Item>>,
}

impl Snapshot {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn values(&self) -> Vec<Value> {
        self.items.iter().map(Item::value).collect()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Item::id).collect()
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|it| it.id() == id)
    }

    pub fn by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|it| it.id() == id)
    }
}

impl Deref for Snapshot {
    type Target = [Item];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// Structural edits accepted by [`Collection::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Append { value: Value },
    RemoveLast,
    RemoveFirst,
    Prepend { value: Value },
    Exchange { first: usize, second: usize },
}

/// Result of a [`Mutation`].
#[derive(Clone, Debug, PartialEq)]
pub enum MutationOutcome {
    /// Full snapshot after an insert or exchange.
    Snapshot(Snapshot),
    /// Item taken out by a removal.
    Removed(Item),
}

impl MutationOutcome {
    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            Self::Snapshot(s) => Some(s),
            Self::Removed(_) => None,
        }
    }

    pub fn into_removed(self) -> Option<Item> {
        match self {
            Self::Removed(item) => Some(item),
            Self::Snapshot(_) => None,
        }
    }
}

/// Canonical ordered item collection.
///
/// Every change goes through `&mut self`, so edits are serialized and always start from the
/// current state. Failed edits leave the collection untouched.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    items: Arc<Vec<Item>>,
    ids: IdAllocator,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut ids = IdAllocator::new();
        let items = values
            .into_iter()
            .map(|v| Item::new(ids.next_id(), v))
            .collect();
        Self {
            items: Arc::new(items),
            ids,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: Arc::clone(&self.items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Single entry point for structural edits.
    ///
    /// Inserts and exchanges yield the new snapshot, removals the removed item.
    pub fn apply(&mut self, mutation: Mutation) -> VizResult<MutationOutcome> {
        match mutation {
            Mutation::Append { value } => Ok(MutationOutcome::Snapshot(self.append(value))),
            Mutation::Prepend { value } => Ok(MutationOutcome::Snapshot(self.prepend(value))),
            Mutation::RemoveLast => self.remove_last().map(MutationOutcome::Removed),
            Mutation::RemoveFirst => self.remove_first().map(MutationOutcome::Removed),
            Mutation::Exchange { first, second } => self
                .exchange(first, second)
                .map(MutationOutcome::Snapshot),
        }
    }

    /// Add a freshly identified item at the end.
    fn append(&mut self, value: Value) -> Snapshot {
        let item = Item::new(self.ids.next_id(), value);
        tracing::debug!(id = %item.id(), value, "append");
        self.items_mut().push(item);
        self.snapshot()
    }

    /// Insert a freshly identified item at index 0; existing items keep their ids.
    fn prepend(&mut self, value: Value) -> Snapshot {
        let item = Item::new(self.ids.next_id(), value);
        tracing::debug!(id = %item.id(), value, "prepend");
        self.items_mut().insert(0, item);
        self.snapshot()
    }

    fn remove_last(&mut self) -> VizResult<Item> {
        if self.is_empty() {
            return Err(VizError::EmptyCollection);
        }
        let removed = self.items_mut().pop().ok_or(VizError::EmptyCollection)?;
        tracing::debug!(id = %removed.id(), "remove last");
        Ok(removed)
    }

    fn remove_first(&mut self) -> VizResult<Item> {
        if self.is_empty() {
            return Err(VizError::EmptyCollection);
        }
        let removed = self.items_mut().remove(0);
        tracing::debug!(id = %removed.id(), "remove first");
        Ok(removed)
    }

    /// Trade the values at `first` and `second`. Both items keep their ids and end up idle.
    fn exchange(&mut self, first: usize, second: usize) -> VizResult<Snapshot> {
        self.check_index(first)?;
        self.check_index(second)?;
        let items = self.items_mut();
        let a = items[first].value();
        let b = items[second].value();
        items[first].set_value(b);
        items[second].set_value(a);
        items[first].reset();
        items[second].reset();
        tracing::debug!(first, second, "exchange committed");
        Ok(self.snapshot())
    }

    /// Move several items to new states at once. All transitions are checked before any
    /// is applied.
    pub(crate) fn set_states(&mut self, changes: &[(usize, ItemState)]) -> VizResult<Snapshot> {
        for (index, next) in changes {
            self.check_index(*index)?;
            let from = self.items[*index].state().kind();
            if !from.allows(next.kind()) {
                return Err(VizError::rejected(format!(
                    "{} cannot go from {from} to {}",
                    self.items[*index].id(),
                    next.kind()
                )));
            }
        }
        let items = self.items_mut();
        for (index, next) in changes {
            items[*index].transition(*next)?;
        }
        Ok(self.snapshot())
    }

    /// Reset every item in state `kind` back to idle.
    pub(crate) fn clear_state(&mut self, kind: StateKind) {
        if !self.items.iter().any(|it| it.state().kind() == kind) {
            return;
        }
        for item in self.items_mut() {
            if item.state().kind() == kind {
                item.reset();
            }
        }
    }

    /// `true` while any item is in a transient state.
    pub fn has_transient(&self) -> bool {
        self.items.iter().any(|it| it.state().kind().is_transient())
    }

    fn items_mut(&mut self) -> &mut Vec<Item> {
        Arc::make_mut(&mut self.items)
    }

    fn check_index(&self, index: usize) -> VizResult<()> {
        if self.is_empty() {
            return Err(VizError::EmptyCollection);
        }
        if index >= self.len() {
            return Err(VizError::invalid_index(index, self.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collection/store.rs"]
mod tests;
