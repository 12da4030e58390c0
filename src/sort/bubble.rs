/// One step of an animated comparison sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Highlight the pair; `will_swap` tells whether a [`Step::Swap`] of the same pair follows.
    Compare {
        first: usize,
        second: usize,
        will_swap: bool,
    },
    /// Exchange the pair.
    Swap { first: usize, second: usize },
}

impl Step {
    /// The `(first, second)` index pair the step acts on.
    pub fn pair(self) -> (usize, usize) {
        match self {
            Self::Compare { first, second, .. } | Self::Swap { first, second } => (first, second),
        }
    }

    pub fn is_compare(self) -> bool {
        matches!(self, Self::Compare { .. })
    }

    pub fn is_swap(self) -> bool {
        matches!(self, Self::Swap { .. })
    }
}

/// Steps of a full bubble sort of `values`.
///
/// Pass `i` compares `(j, j + 1)` for every `j` in `0..n - i - 1`; a pair swaps only when the
/// left value is strictly greater, so equal values keep their order. Every pass runs to the
/// end (no early exit), giving exactly `n(n-1)/2` compares. Works on a private copy; the input
/// is never touched.
pub fn bubble_sort_steps<T: PartialOrd + Clone>(values: &[T]) -> Vec<Step> {
    let mut work = values.to_vec();
    let n = work.len();
    let mut steps = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    for i in 0..n {
        for j in 0..n - i - 1 {
            let will_swap = work[j] > work[j + 1];
            steps.push(Step::Compare {
                first: j,
                second: j + 1,
                will_swap,
            });
            if will_swap {
                steps.push(Step::Swap {
                    first: j,
                    second: j + 1,
                });
                work.swap(j, j + 1);
            }
        }
    }

    steps
}

/// Apply every [`Step::Swap`] of `steps` to `values` in order.
pub fn replay_swaps<T>(values: &mut [T], steps: &[Step]) {
    for step in steps {
        if let Step::Swap { first, second } = *step {
            values.swap(first, second);
        }
    }
}

/// Index that becomes final once `step` (the last step touching it in its pass) completes.
///
/// In pass `i` the right edge of the unsorted region is `n - i - 1`; it settles after the
/// pass's final pair, i.e. after that pair's compare (no swap) or its swap.
pub(crate) fn settles_after(step: Step, unsorted_len: usize) -> Option<usize> {
    let (_, second) = step.pair();
    let closes_pass = second + 1 == unsorted_len;
    let last_for_pair = match step {
        Step::Compare { will_swap, .. } => !will_swap,
        Step::Swap { .. } => true,
    };
    (closes_pass && last_for_pair).then_some(second)
}

#[cfg(test)]
#[path = "../../tests/unit/sort/bubble.rs"]
mod tests;
