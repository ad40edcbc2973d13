//! Value types exchanged between the workflow and the API port.

use serde::{Deserialize, Serialize};

use crate::{ApiError, GroupPath};

// ---------------------------------------------------------------------------
// Group listing
// ---------------------------------------------------------------------------

/// Groups returned by one listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupListing {
    /// Group paths in the order the API returned them.
    pub groups: Vec<GroupPath>,

    /// `true` when the API reported further pages that were not fetched.
    pub truncated: bool,
}

// ---------------------------------------------------------------------------
// Assignment outcome
// ---------------------------------------------------------------------------

/// Result of assigning the security policy project to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum AssignmentOutcome {
    /// The mutation returned an empty `errors` list.
    Assigned,

    /// The mutation ran but the API reported errors for this group.
    Rejected {
        /// Error strings from the mutation payload.
        errors: Vec<String>,
    },

    /// The call itself failed (transport, HTTP status, malformed body).
    Failed {
        /// The failure.
        error: ApiError,
    },

    /// The assignment task ended abnormally (for example a panic in the API
    /// adapter) before producing a result.
    Aborted {
        /// What the runtime reported for the task.
        reason: String,
    },
}

impl AssignmentOutcome {
    /// Builds an outcome from the mutation's `errors` list.
    pub fn from_mutation_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::Assigned
        } else {
            Self::Rejected { errors }
        }
    }

    /// Returns `true` for [`AssignmentOutcome::Assigned`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Assigned)
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Counts of per-group outcomes for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Groups whose assignment succeeded.
    pub assigned: usize,

    /// Groups that were rejected, failed, or aborted.
    pub failed: usize,
}

impl RunSummary {
    /// Adds one outcome to the tally.
    pub fn record(&mut self, outcome: &AssignmentOutcome) {
        if outcome.is_success() {
            self.assigned += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Total number of groups processed.
    pub fn total(self) -> usize {
        self.assigned + self.failed
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} assigned, {} failed", self.assigned, self.failed)
    }
}
