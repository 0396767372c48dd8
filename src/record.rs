#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use tracing::warn;
use typed_builder::TypedBuilder;

/// One row of the namelist.
///
/// `total` and `rate` are derived from `marks`; whatever was loaded from disk
/// is only a cache and is recomputed by [`crate::stats::recompute`] before it
/// is displayed or written.
#[derive(Debug, Clone, PartialEq, TypedBuilder, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Student ID, the unique key within a namelist.
    #[builder(setter(into))]
    id:    String,
    /// Display name.
    #[builder(setter(into))]
    name:  String,
    /// Submission flags, one per assignment column.
    #[builder(default)]
    marks: Vec<i64>,
    /// Number of submitted assignments among those considered.
    #[builder(default)]
    total: i64,
    /// `total` over the number of assignments considered.
    #[builder(default)]
    rate:  f64,
}

/// Result of recording one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The mark went from unsubmitted to submitted.
    Marked,
    /// The assignment was already marked; resubmissions are not an error.
    AlreadyMarked,
    /// The assignment index is not below the namelist's column count.
    OutOfRange,
    /// The record has fewer mark slots than the namelist's column count.
    MissingSlot,
}

impl MarkOutcome {
    /// True when the submission counts as recorded.
    pub fn is_success(self) -> bool {
        matches!(self, MarkOutcome::Marked | MarkOutcome::AlreadyMarked)
    }
}

impl StudentRecord {
    /// Student ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submission flags.
    pub fn marks(&self) -> &[i64] {
        &self.marks
    }

    /// Derived submission count.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Derived submission rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Overwrites the derived statistics.
    pub(crate) fn set_stats(&mut self, total: i64, rate: f64) {
        self.total = total;
        self.rate = rate;
    }

    /// Marks the 0-based `assignment` as submitted.
    ///
    /// * `assignment`: index of the assignment folder
    /// * `capacity`: number of mark columns in the namelist
    pub fn mark_submission(&mut self, assignment: usize, capacity: usize) -> MarkOutcome {
        if assignment >= capacity {
            warn!(
                "Assignment {} is out of bounds for student {}. Max assignment columns available: \
                 {capacity}. Submission not recorded for this assignment.",
                assignment + 1,
                self.id
            );
            return MarkOutcome::OutOfRange;
        }

        if self.marks.len() < capacity {
            warn!(
                "Student {} has fewer mark slots ({}) than expected ({capacity}). Cannot mark \
                 assignment {}.",
                self.id,
                self.marks.len(),
                assignment + 1
            );
            return MarkOutcome::MissingSlot;
        }

        match self.marks.get_mut(assignment) {
            Some(slot) if *slot == 0 => {
                *slot = 1;
                MarkOutcome::Marked
            }
            Some(_) => MarkOutcome::AlreadyMarked,
            None => MarkOutcome::MissingSlot,
        }
    }
}
