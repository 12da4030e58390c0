use crate::collection::item::ItemState;
use crate::collection::store::{Collection, Mutation};
use crate::foundation::core::{ItemId, Layout};
use crate::foundation::error::{VizError, VizResult};
use crate::gate::flags::{AckOutcome, PairAcks};
use crate::geometry::paths::swap_paths;
use crate::sort::bubble::{Step, bubble_sort_steps, settles_after};

/// Where a running sort is waiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SortPhase {
    /// Both items highlighted; waiting for each item's pre-end acknowledgment.
    ComparePre { first: usize, second: usize },
    /// Highlight cleared; waiting for each item's post-end acknowledgment.
    ComparePost { first: usize, second: usize },
    /// Both items travelling; waiting for each item's pre-end acknowledgment.
    SwapPre { first: usize, second: usize },
    /// Exchange committed; waiting for each item's post-end acknowledgment.
    SwapPost { first: usize, second: usize },
    Done,
}

/// Progress report of a running sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SortProgress {
    /// Index of the step being animated.
    pub step: usize,
    pub total_steps: usize,
    pub phase: SortPhase,
    /// Length of the prefix that is not yet known to be sorted.
    pub unsorted_len: usize,
}

#[derive(Debug)]
enum Waiting {
    Pre(PairAcks),
    Post(PairAcks),
    Done,
}

/// Drains the bubble-sort steps one acknowledged transition at a time.
#[derive(Debug)]
pub(crate) struct SortRun {
    steps: Vec<Step>,
    cursor: usize,
    unsorted_len: usize,
    waiting: Waiting,
}

impl SortRun {
    /// Generate the steps from the current values and start the first one.
    pub(crate) fn start(collection: &mut Collection, layout: Layout) -> VizResult<Self> {
        let values = collection.snapshot().values();
        let steps = bubble_sort_steps(&values);
        tracing::debug!(steps = steps.len(), len = values.len(), "sort started");
        let mut run = Self {
            steps,
            cursor: 0,
            unsorted_len: values.len(),
            waiting: Waiting::Done,
        };
        run.enter_current(collection, layout)?;
        Ok(run)
    }

    pub(crate) fn is_done(&self) -> bool {
        matches!(self.waiting, Waiting::Done)
    }

    pub(crate) fn progress(&self) -> SortProgress {
        let phase = match (self.steps.get(self.cursor), &self.waiting) {
            (_, Waiting::Done) | (None, _) => SortPhase::Done,
            (Some(step), Waiting::Pre(_)) => {
                let (first, second) = step.pair();
                if step.is_compare() {
                    SortPhase::ComparePre { first, second }
                } else {
                    SortPhase::SwapPre { first, second }
                }
            }
            (Some(step), Waiting::Post(_)) => {
                let (first, second) = step.pair();
                if step.is_compare() {
                    SortPhase::ComparePost { first, second }
                } else {
                    SortPhase::SwapPost { first, second }
                }
            }
        };
        SortProgress {
            step: self.cursor,
            total_steps: self.steps.len(),
            phase,
            unsorted_len: self.unsorted_len,
        }
    }

    pub(crate) fn on_compare_pre_end(
        &mut self,
        collection: &mut Collection,
        layout: Layout,
        id: ItemId,
    ) -> VizResult<AckOutcome> {
        let Some(Step::Compare {
            first,
            second,
            will_swap,
        }) = self.current()
        else {
            return Ok(AckOutcome::Ignored);
        };
        let Waiting::Pre(acks) = &mut self.waiting else {
            return Ok(AckOutcome::Ignored);
        };
        let outcome = acks.ack(id);
        if outcome != AckOutcome::Advanced {
            return Ok(outcome);
        }

        if will_swap {
            // The swap of the same pair follows directly: no return-to-default in between.
            self.cursor += 1;
            self.enter_current(collection, layout)?;
        } else {
            let pair = self.pair_ids(collection, first, second)?;
            let _ = collection.set_states(&[(first, ItemState::Idle), (second, ItemState::Idle)])?;
            self.waiting = Waiting::Post(pair);
        }
        Ok(AckOutcome::Advanced)
    }

    pub(crate) fn on_compare_post_end(
        &mut self,
        collection: &mut Collection,
        layout: Layout,
        id: ItemId,
    ) -> VizResult<AckOutcome> {
        if !matches!(self.current(), Some(Step::Compare { .. })) {
            return Ok(AckOutcome::Ignored);
        }
        self.finish_post(collection, layout, id)
    }

    pub(crate) fn on_swap_pre_end(
        &mut self,
        collection: &mut Collection,
        id: ItemId,
    ) -> VizResult<AckOutcome> {
        let Some(Step::Swap { first, second }) = self.current() else {
            return Ok(AckOutcome::Ignored);
        };
        let Waiting::Pre(acks) = &mut self.waiting else {
            return Ok(AckOutcome::Ignored);
        };
        let outcome = acks.ack(id);
        if outcome != AckOutcome::Advanced {
            return Ok(outcome);
        }

        let pair = self.pair_ids(collection, first, second)?;
        let _ = collection.apply(Mutation::Exchange { first, second })?;
        self.waiting = Waiting::Post(pair);
        Ok(AckOutcome::Advanced)
    }

    pub(crate) fn on_swap_post_end(
        &mut self,
        collection: &mut Collection,
        layout: Layout,
        id: ItemId,
    ) -> VizResult<AckOutcome> {
        if !matches!(self.current(), Some(Step::Swap { .. })) {
            return Ok(AckOutcome::Ignored);
        }
        self.finish_post(collection, layout, id)
    }

    fn current(&self) -> Option<Step> {
        if self.is_done() {
            return None;
        }
        self.steps.get(self.cursor).copied()
    }

    fn finish_post(
        &mut self,
        collection: &mut Collection,
        layout: Layout,
        id: ItemId,
    ) -> VizResult<AckOutcome> {
        let Some(step) = self.current() else {
            return Ok(AckOutcome::Ignored);
        };
        // Both items settle before the next step, so no post-end can leak into it.
        let Waiting::Post(pair) = &mut self.waiting else {
            return Ok(AckOutcome::Ignored);
        };
        let outcome = pair.ack(id);
        if outcome != AckOutcome::Advanced {
            return Ok(outcome);
        }

        if let Some(index) = settles_after(step, self.unsorted_len) {
            let _ = collection.set_states(&[(index, ItemState::Sorted)])?;
            self.unsorted_len = index;
            tracing::debug!(index, "item settled");
        }
        self.cursor += 1;
        self.enter_current(collection, layout)?;
        Ok(AckOutcome::Advanced)
    }

    /// Put the items of the step under the cursor into their animated state, or finish.
    fn enter_current(&mut self, collection: &mut Collection, layout: Layout) -> VizResult<()> {
        let Some(step) = self.steps.get(self.cursor).copied() else {
            let remaining: Vec<_> = (0..self.unsorted_len)
                .map(|i| (i, ItemState::Sorted))
                .collect();
            let _ = collection.set_states(&remaining)?;
            self.unsorted_len = 0;
            self.waiting = Waiting::Done;
            tracing::debug!(steps = self.steps.len(), "sort finished");
            return Ok(());
        };

        tracing::debug!(cursor = self.cursor, ?step, "sort step");
        let (first, second) = step.pair();
        let pair = self.pair_ids(collection, first, second)?;
        match step {
            Step::Compare { .. } => {
                let _ = collection.set_states(&[
                    (first, ItemState::Comparing),
                    (second, ItemState::Comparing),
                ])?;
            }
            Step::Swap { .. } => {
                let paths = swap_paths(layout, first, second)?;
                let _ = collection.set_states(&[
                    (first, ItemState::Swapping { path: paths.first }),
                    (second, ItemState::Swapping { path: paths.second }),
                ])?;
            }
        }
        self.waiting = Waiting::Pre(pair);
        Ok(())
    }

    fn pair_ids(&self, collection: &Collection, first: usize, second: usize) -> VizResult<PairAcks> {
        let len = collection.len();
        let a = collection
            .get(first)
            .ok_or_else(|| VizError::invalid_index(first, len))?;
        let b = collection
            .get(second)
            .ok_or_else(|| VizError::invalid_index(second, len))?;
        Ok(PairAcks::new(a.id(), b.id()))
    }
}
