use crate::domain::{Traversal, TraversalLog};

/// Everything one detection pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionReport {
    pub traversals: TraversalLog,

    // Passes that were seen but not recorded
    pub discarded_out_of_bounds: usize,
    pub discarded_no_exit: usize,
    pub dropped_at_capacity: usize,
}

impl DetectionReport {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            traversals: TraversalLog::with_capacity(capacity),
            discarded_out_of_bounds: 0,
            discarded_no_exit: 0,
            dropped_at_capacity: 0,
        }
    }

    /// True when valid traversals were lost because the log filled up.
    pub fn truncated(&self) -> bool {
        self.dropped_at_capacity > 0
    }

    pub fn recorded(&self) -> &[Traversal] {
        self.traversals.as_slice()
    }
}
