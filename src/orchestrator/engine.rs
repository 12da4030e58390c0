use crate::collection::item::{Item, ItemState, StateKind};
use crate::collection::store::{Collection, Mutation, MutationOutcome, Snapshot};
use crate::config::model::EngineConfig;
use crate::foundation::core::{BoundaryOp, ItemId, Layout, Value};
use crate::foundation::deferred::{Deferred, PendingSlot, Resolver, deferred};
use crate::foundation::error::{VizError, VizResult};
use crate::gate::flags::{AckOutcome, Gate, OperationFlags, PairAcks};
use crate::geometry::paths::swap_paths;
use crate::orchestrator::sort_run::{SortProgress, SortRun};
use crate::render::view::RenderView;

/// The operation currently waiting on the rendering layer.
#[derive(Debug)]
enum Flight {
    /// Push/unshift: mutation already applied, waiting for the boundary item to settle.
    Insert {
        op: BoundaryOp,
        id: ItemId,
        resolver: Resolver<Snapshot>,
    },
    /// Pop/shift: waiting for the boundary item to leave before removing it.
    Remove {
        op: BoundaryOp,
        id: ItemId,
        resolver: Resolver<Item>,
    },
    /// Stand-alone swap: waiting for both items to arrive.
    Swap {
        first: usize,
        second: usize,
        acks: PairAcks,
        resolver: Resolver<Snapshot>,
    },
    Sort {
        run: SortRun,
        resolver: Resolver<Snapshot>,
    },
}

impl Flight {
    fn name(&self) -> &'static str {
        match self {
            Self::Insert { op, .. } | Self::Remove { op, .. } => op.name(),
            Self::Swap { .. } => "swap",
            Self::Sort { .. } => "sort",
        }
    }
}

/// Array operation and animation orchestration engine.
///
/// Owns the item collection, the operation flags and the continuation of the single
/// operation in flight. Animated operations return a [`Deferred`] right away and finish
/// when the rendering layer calls the matching `on_*_end` acknowledgment.
///
/// ```
/// use arrayviz::ArrayEngine;
///
/// let mut engine = ArrayEngine::new([3, 1, 2]);
/// let pushed = engine.push(4).unwrap();
/// assert!(engine.is_animating());
/// assert!(engine.pop().is_err()); // single flight
///
/// engine.on_push_end().unwrap();
/// assert_eq!(pushed.take().unwrap().values(), vec![3, 1, 2, 4]);
/// ```
#[derive(Debug)]
pub struct ArrayEngine {
    collection: Collection,
    layout: Layout,
    gate: Gate,
    flight: PendingSlot<Flight>,
}

impl Default for ArrayEngine {
    fn default() -> Self {
        Self::with_layout(Layout::default(), [])
    }
}

impl ArrayEngine {
    /// Engine over `values` with the default layout.
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self::with_layout(Layout::default(), values)
    }

    pub fn with_layout(layout: Layout, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            collection: Collection::from_values(values),
            layout,
            gate: Gate::new(),
            flight: PendingSlot::new("array engine"),
        }
    }

    pub fn from_config(config: &EngineConfig) -> VizResult<Self> {
        config.validate()?;
        Ok(Self::with_layout(
            config.layout,
            config.initial_values.iter().copied(),
        ))
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.collection.snapshot()
    }

    pub fn flags(&self) -> OperationFlags {
        self.gate.flags()
    }

    /// Everything the rendering layer needs for one render.
    pub fn view(&self) -> RenderView {
        RenderView {
            snapshot: self.snapshot(),
            flags: self.flags(),
            is_animating: self.is_animating(),
        }
    }

    /// `true` while an operation flag is set, an item is mid-transition or an operation
    /// is waiting for an acknowledgment. New operations are rejected in that state.
    pub fn is_animating(&self) -> bool {
        self.gate.active().is_some() || self.flight.is_armed() || self.collection.has_transient()
    }

    pub fn is_sorting(&self) -> bool {
        matches!(self.flight.get(), Some(Flight::Sort { .. }))
    }

    /// Progress of the running sort, if any.
    pub fn sort_progress(&self) -> Option<SortProgress> {
        match self.flight.get() {
            Some(Flight::Sort { run, .. }) => Some(run.progress()),
            _ => None,
        }
    }

    /// Append `value` and animate it in. Resolves with the snapshot once the new last item
    /// has settled.
    #[tracing::instrument(skip(self))]
    pub fn push(&mut self, value: Value) -> VizResult<Deferred<Snapshot>> {
        self.begin(BoundaryOp::Push)?;
        self.gate.open(BoundaryOp::Push)?;
        let snapshot = self.edit(Mutation::Append { value })?;
        self.insert_flight(BoundaryOp::Push, &snapshot, snapshot.len() - 1)
    }

    /// Insert `value` at the front and animate it in.
    #[tracing::instrument(skip(self))]
    pub fn unshift(&mut self, value: Value) -> VizResult<Deferred<Snapshot>> {
        self.begin(BoundaryOp::Unshift)?;
        self.gate.open(BoundaryOp::Unshift)?;
        let snapshot = self.edit(Mutation::Prepend { value })?;
        self.insert_flight(BoundaryOp::Unshift, &snapshot, 0)
    }

    /// Animate the last item out; it is removed once the rendering layer acknowledges.
    #[tracing::instrument(skip(self))]
    pub fn pop(&mut self) -> VizResult<Deferred<Item>> {
        self.begin(BoundaryOp::Pop)?;
        let index = self
            .collection
            .len()
            .checked_sub(1)
            .ok_or(VizError::EmptyCollection)?;
        self.remove_flight(BoundaryOp::Pop, index)
    }

    /// Animate the first item out; it is removed once the rendering layer acknowledges.
    #[tracing::instrument(skip(self))]
    pub fn shift(&mut self) -> VizResult<Deferred<Item>> {
        self.begin(BoundaryOp::Shift)?;
        if self.collection.is_empty() {
            return Err(VizError::EmptyCollection);
        }
        self.remove_flight(BoundaryOp::Shift, 0)
    }

    /// Move the items at `first` and `second` along their swap paths; the exchange is
    /// committed when both have arrived.
    #[tracing::instrument(skip(self))]
    pub fn swap(&mut self, first: usize, second: usize) -> VizResult<Deferred<Snapshot>> {
        self.ensure_idle("swap")?;
        let acks = self.pair_acks(first, second)?;
        let paths = swap_paths(self.layout, first, second)?;
        self.collection.clear_state(StateKind::Sorted);
        let _ = self.collection.set_states(&[
            (first, ItemState::Swapping { path: paths.first }),
            (second, ItemState::Swapping { path: paths.second }),
        ])?;

        let (resolver, result) = deferred();
        self.flight.arm(Flight::Swap {
            first,
            second,
            acks,
            resolver,
        })?;
        Ok(result)
    }

    /// Animate a full bubble sort. Resolves with the sorted snapshot after the last step.
    ///
    /// Once started the sort runs to completion; there is no way to abort it.
    #[tracing::instrument(skip(self))]
    pub fn bubble_sort(&mut self) -> VizResult<Deferred<Snapshot>> {
        self.ensure_idle("sort")?;
        self.collection.clear_state(StateKind::Sorted);
        let run = SortRun::start(&mut self.collection, self.layout)?;
        if run.is_done() {
            return Ok(Deferred::ready(self.snapshot()));
        }

        let (resolver, result) = deferred();
        self.flight.arm(Flight::Sort { run, resolver })?;
        Ok(result)
    }

    pub fn push_now(&mut self, value: Value) -> VizResult<Snapshot> {
        self.ensure_idle("push")?;
        self.collection.clear_state(StateKind::Sorted);
        self.edit(Mutation::Append { value })
    }

    pub fn unshift_now(&mut self, value: Value) -> VizResult<Snapshot> {
        self.ensure_idle("unshift")?;
        self.collection.clear_state(StateKind::Sorted);
        self.edit(Mutation::Prepend { value })
    }

    pub fn pop_now(&mut self) -> VizResult<Item> {
        self.ensure_idle("pop")?;
        self.collection.clear_state(StateKind::Sorted);
        self.remove(Mutation::RemoveLast)
    }

    pub fn shift_now(&mut self) -> VizResult<Item> {
        self.ensure_idle("shift")?;
        self.collection.clear_state(StateKind::Sorted);
        self.remove(Mutation::RemoveFirst)
    }

    pub fn swap_now(&mut self, first: usize, second: usize) -> VizResult<Snapshot> {
        self.ensure_idle("swap")?;
        self.collection.clear_state(StateKind::Sorted);
        self.edit(Mutation::Exchange { first, second })
    }

    pub fn on_push_end(&mut self) -> VizResult<AckOutcome> {
        self.on_boundary_end(BoundaryOp::Push)
    }

    pub fn on_pop_end(&mut self) -> VizResult<AckOutcome> {
        self.on_boundary_end(BoundaryOp::Pop)
    }

    pub fn on_shift_end(&mut self) -> VizResult<AckOutcome> {
        self.on_boundary_end(BoundaryOp::Shift)
    }

    pub fn on_unshift_end(&mut self) -> VizResult<AckOutcome> {
        self.on_boundary_end(BoundaryOp::Unshift)
    }

    /// The boundary item finished its `op` transition.
    pub fn on_boundary_end(&mut self, op: BoundaryOp) -> VizResult<AckOutcome> {
        let pending = match self.flight.get() {
            Some(Flight::Insert { op: p, .. } | Flight::Remove { op: p, .. }) => *p == op,
            _ => false,
        };
        if !pending {
            tracing::trace!(%op, "stray boundary acknowledgment");
            return Ok(AckOutcome::Ignored);
        }
        let Some(flight) = self.flight.take() else {
            return Ok(AckOutcome::Ignored);
        };
        let _ = self.gate.close(op);

        match flight {
            Flight::Insert { id, resolver, .. } => {
                if let Some(index) = self.snapshot().index_of(id) {
                    let _ = self.collection.set_states(&[(index, ItemState::Idle)])?;
                }
                tracing::debug!(%op, %id, "insert settled");
                resolver.resolve(self.snapshot());
            }
            Flight::Remove { id, resolver, .. } => {
                let mut removed = self.remove(if op.at_end() {
                    Mutation::RemoveLast
                } else {
                    Mutation::RemoveFirst
                })?;
                if removed.id() != id {
                    tracing::error!(%op, expected = %id, got = %removed.id(), "boundary item changed while in flight");
                }
                removed.reset();
                tracing::debug!(%op, id = %removed.id(), "item removed");
                resolver.resolve(removed);
            }
            other => {
                // Unreachable through the guard above; keep the continuation armed.
                self.flight.arm(other)?;
                return Ok(AckOutcome::Ignored);
            }
        }
        Ok(AckOutcome::Advanced)
    }

    /// The item at `index` finished its compare highlight.
    pub fn on_compare_pre_end(&mut self, index: usize) -> VizResult<AckOutcome> {
        let Some(id) = self.id_at(index) else {
            return Ok(AckOutcome::Ignored);
        };
        let outcome = match self.flight.get_mut() {
            Some(Flight::Sort { run, .. }) => {
                run.on_compare_pre_end(&mut self.collection, self.layout, id)?
            }
            _ => AckOutcome::Ignored,
        };
        self.after_sort_ack("compare pre-end", index, outcome)
    }

    /// The item at `index` finished returning from its compare highlight.
    pub fn on_compare_post_end(&mut self, index: usize) -> VizResult<AckOutcome> {
        let Some(id) = self.id_at(index) else {
            return Ok(AckOutcome::Ignored);
        };
        let outcome = match self.flight.get_mut() {
            Some(Flight::Sort { run, .. }) => {
                run.on_compare_post_end(&mut self.collection, self.layout, id)?
            }
            _ => AckOutcome::Ignored,
        };
        self.after_sort_ack("compare post-end", index, outcome)
    }

    /// The item at `index` arrived at the end of its swap path.
    pub fn on_swap_pre_end(&mut self, index: usize) -> VizResult<AckOutcome> {
        let Some(id) = self.id_at(index) else {
            return Ok(AckOutcome::Ignored);
        };
        let outcome = match self.flight.get_mut() {
            Some(Flight::Sort { run, .. }) => run.on_swap_pre_end(&mut self.collection, id)?,
            Some(Flight::Swap { acks, .. }) => acks.ack(id),
            _ => AckOutcome::Ignored,
        };

        let swap_done =
            outcome == AckOutcome::Advanced && matches!(self.flight.get(), Some(Flight::Swap { .. }));
        if swap_done {
            if let Some(Flight::Swap {
                first,
                second,
                resolver,
                ..
            }) = self.flight.take()
            {
                let snapshot = self.edit(Mutation::Exchange { first, second })?;
                tracing::debug!(first, second, "swap settled");
                resolver.resolve(snapshot);
            }
            return Ok(outcome);
        }
        self.after_sort_ack("swap pre-end", index, outcome)
    }

    /// The item at `index` finished returning to rest after a committed swap.
    pub fn on_swap_post_end(&mut self, index: usize) -> VizResult<AckOutcome> {
        let Some(id) = self.id_at(index) else {
            return Ok(AckOutcome::Ignored);
        };
        let outcome = match self.flight.get_mut() {
            Some(Flight::Sort { run, .. }) => {
                run.on_swap_post_end(&mut self.collection, self.layout, id)?
            }
            _ => AckOutcome::Ignored,
        };
        self.after_sort_ack("swap post-end", index, outcome)
    }

    /// Apply an insert or exchange through the collection's single entry point.
    fn edit(&mut self, mutation: Mutation) -> VizResult<Snapshot> {
        match self.collection.apply(mutation)? {
            MutationOutcome::Snapshot(snapshot) => Ok(snapshot),
            MutationOutcome::Removed(item) => Err(VizError::validation(format!(
                "{mutation:?} removed {} instead of editing in place",
                item.id()
            ))),
        }
    }

    fn remove(&mut self, mutation: Mutation) -> VizResult<Item> {
        match self.collection.apply(mutation)? {
            MutationOutcome::Removed(item) => Ok(item),
            MutationOutcome::Snapshot(_) => Err(VizError::validation(format!(
                "{mutation:?} does not remove an item"
            ))),
        }
    }

    fn ensure_idle(&self, what: &str) -> VizResult<()> {
        if self.is_animating() {
            let current = self.flight.get().map(Flight::name).unwrap_or("an animation");
            tracing::debug!(requested = what, current, "operation ignored while busy");
            return Err(VizError::rejected(format!(
                "{what} ignored while {current} is in progress"
            )));
        }
        Ok(())
    }

    fn begin(&mut self, op: BoundaryOp) -> VizResult<()> {
        self.ensure_idle(op.name())?;
        self.collection.clear_state(StateKind::Sorted);
        Ok(())
    }

    fn insert_flight(
        &mut self,
        op: BoundaryOp,
        snapshot: &Snapshot,
        index: usize,
    ) -> VizResult<Deferred<Snapshot>> {
        let id = snapshot
            .get(index)
            .map(Item::id)
            .ok_or_else(|| VizError::invalid_index(index, snapshot.len()))?;
        let _ = self
            .collection
            .set_states(&[(index, ItemState::EnteringBoundary)])?;
        let (resolver, result) = deferred();
        self.flight.arm(Flight::Insert { op, id, resolver })?;
        Ok(result)
    }

    fn remove_flight(&mut self, op: BoundaryOp, index: usize) -> VizResult<Deferred<Item>> {
        let id = self
            .id_at(index)
            .ok_or_else(|| VizError::invalid_index(index, self.len()))?;
        self.gate.open(op)?;
        let _ = self
            .collection
            .set_states(&[(index, ItemState::ExitingBoundary)])?;
        let (resolver, result) = deferred();
        self.flight.arm(Flight::Remove { op, id, resolver })?;
        Ok(result)
    }

    fn pair_acks(&self, first: usize, second: usize) -> VizResult<PairAcks> {
        if self.collection.is_empty() {
            return Err(VizError::EmptyCollection);
        }
        let len = self.len();
        let a = self.id_at(first).ok_or(VizError::invalid_index(first, len))?;
        let b = self
            .id_at(second)
            .ok_or(VizError::invalid_index(second, len))?;
        Ok(PairAcks::new(a, b))
    }

    fn id_at(&self, index: usize) -> Option<ItemId> {
        self.collection.get(index).map(Item::id)
    }

    fn after_sort_ack(
        &mut self,
        what: &'static str,
        index: usize,
        outcome: AckOutcome,
    ) -> VizResult<AckOutcome> {
        if outcome.is_ignored() {
            tracing::trace!(what, index, "stray acknowledgment");
            return Ok(outcome);
        }
        tracing::debug!(what, index, ?outcome, "acknowledged");

        let finished = matches!(self.flight.get(), Some(Flight::Sort { run, .. }) if run.is_done());
        if finished {
            if let Some(Flight::Sort { resolver, .. }) = self.flight.take() {
                resolver.resolve(self.snapshot());
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/engine.rs"]
mod tests;
