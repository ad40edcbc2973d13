//! User-facing progress reporting.
//!
//! The console lines are the tool's only user interface, so they go through
//! [`OutcomeReporter`] rather than `tracing`; structured logs are emitted
//! separately by the workflow.

use policy::{ApiError, AssignmentOutcome, GroupPath, RunSummary};

/// Receives progress events from the workflow.
///
/// Called concurrently from assignment tasks, hence `Send + Sync`.
pub trait OutcomeReporter: Send + Sync {
    /// The group listing succeeded but more pages exist than were read.
    fn listing_truncated(&self, listed: usize);

    /// The group listing failed; no assignments will run.
    fn listing_failed(&self, error: &ApiError);

    /// One group's assignment settled.
    fn group_outcome(&self, group: &GroupPath, outcome: &AssignmentOutcome);

    /// Every assignment has settled.
    fn completed(&self, summary: &RunSummary);
}

/// Which console stream a line belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Renders the console line for one group's outcome.
pub fn outcome_line(group: &GroupPath, outcome: &AssignmentOutcome) -> (Stream, String) {
    match outcome {
        AssignmentOutcome::Assigned => (Stream::Stdout, format!("Policy assigned to {group}")),
        AssignmentOutcome::Rejected { errors } => (
            Stream::Stderr,
            format!("Error assigning policy to {group}: {errors:?}"),
        ),
        AssignmentOutcome::Failed { error } => (
            Stream::Stderr,
            format!("Error assigning policy to {group}: {error}"),
        ),
        AssignmentOutcome::Aborted { reason } => (
            Stream::Stderr,
            format!("Error assigning policy to {group}: assignment aborted: {reason}"),
        ),
    }
}

/// Renders the final completion line.
pub fn completion_line(summary: &RunSummary) -> String {
    format!("Policy assignment complete! ({summary})")
}

/// Writes progress to stdout (successes, completion) and stderr (failures).
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl OutcomeReporter for ConsoleReporter {
    fn listing_truncated(&self, listed: usize) {
        eprintln!(
            "Warning: the group list was truncated after {listed} groups; \
             groups on later pages will not receive the policy."
        );
    }

    fn listing_failed(&self, error: &ApiError) {
        eprintln!("Error fetching groups: {error}");
    }

    fn group_outcome(&self, group: &GroupPath, outcome: &AssignmentOutcome) {
        match outcome_line(group, outcome) {
            (Stream::Stdout, line) => println!("{line}"),
            (Stream::Stderr, line) => eprintln!("{line}"),
        }
    }

    fn completed(&self, summary: &RunSummary) {
        println!("{}", completion_line(summary));
    }
}
