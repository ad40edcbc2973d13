//! List groups once, then assign the policy project to each with bounded
//! fan-out.

use std::sync::Arc;

use policy::{
    ApiError, AssignerConfig, AssignmentOutcome, GroupPath, GroupPolicyApi, RunId, RunSummary,
};
use tokio::task::JoinSet;
use tracing::{error, info, warn, Instrument};

use crate::report::OutcomeReporter;

/// Drives one run against a [`GroupPolicyApi`].
///
/// Holds only shared, immutable handles; cloning is cheap and each
/// assignment task owns a clone.
#[derive(Clone)]
pub struct PolicyAssignment {
    api: Arc<dyn GroupPolicyApi>,
    config: Arc<AssignerConfig>,
    reporter: Arc<dyn OutcomeReporter>,
}

impl PolicyAssignment {
    /// Wires the workflow to an API adapter, a validated configuration, and a
    /// progress sink.
    pub fn new(
        api: Arc<dyn GroupPolicyApi>,
        config: Arc<AssignerConfig>,
        reporter: Arc<dyn OutcomeReporter>,
    ) -> Self {
        Self {
            api,
            config,
            reporter,
        }
    }

    /// Lists every group the credential can see.
    ///
    /// Errors propagate; a truncated listing is reported but still returned.
    pub async fn fetch_all_groups(&self) -> Result<Vec<GroupPath>, ApiError> {
        let listing = self.api.list_groups().await?;
        if listing.truncated {
            warn!(
                listed = listing.groups.len(),
                "group listing has further pages that were not fetched"
            );
            self.reporter.listing_truncated(listing.groups.len());
        }
        info!(count = listing.groups.len(), "fetched groups");
        Ok(listing.groups)
    }

    /// Assigns the configured policy project to `group` and reports the outcome.
    ///
    /// Never fails: every error is folded into the returned outcome.
    pub async fn assign_security_policy(&self, group: &GroupPath) -> AssignmentOutcome {
        let outcome = self.attempt_assignment(group).await;
        self.record_outcome(group, &outcome);
        outcome
    }

    /// Like [`Self::assign_security_policy`], but the API call runs in its own
    /// task so a panic inside the adapter still yields a reported outcome for
    /// `group`.
    async fn assign_isolated(self, group: GroupPath) -> AssignmentOutcome {
        let worker = self.clone();
        let target = group.clone();
        let attempt = tokio::spawn(
            async move { worker.attempt_assignment(&target).await }.in_current_span(),
        );

        let outcome = match attempt.await {
            Ok(outcome) => outcome,
            Err(join_error) => AssignmentOutcome::Aborted {
                reason: join_error.to_string(),
            },
        };
        self.record_outcome(&group, &outcome);
        outcome
    }

    async fn attempt_assignment(&self, group: &GroupPath) -> AssignmentOutcome {
        match self
            .api
            .assign_security_policy_project(group, self.config.policy_project_id())
            .await
        {
            Ok(errors) => AssignmentOutcome::from_mutation_errors(errors),
            Err(error) => AssignmentOutcome::Failed { error },
        }
    }

    fn record_outcome(&self, group: &GroupPath, outcome: &AssignmentOutcome) {
        match outcome {
            AssignmentOutcome::Assigned => info!(group = %group, "policy assigned"),
            AssignmentOutcome::Rejected { errors } => {
                warn!(group = %group, ?errors, "policy assignment rejected")
            }
            AssignmentOutcome::Failed { error } => {
                warn!(group = %group, %error, "policy assignment failed")
            }
            AssignmentOutcome::Aborted { reason } => {
                warn!(group = %group, %reason, "policy assignment aborted")
            }
        }
        self.reporter.group_outcome(group, outcome);
    }

    /// Runs the whole workflow.
    ///
    /// A listing failure is reported and returned; no assignment is attempted.
    /// Otherwise every group is assigned with at most
    /// [`AssignerConfig::concurrency`] calls in flight, and the completion is
    /// reported only after all of them have settled.
    pub async fn run(&self, run_id: RunId) -> Result<RunSummary, ApiError> {
        let span = tracing::info_span!("policy_assignment", %run_id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<RunSummary, ApiError> {
        let groups = match self.fetch_all_groups().await {
            Ok(groups) => groups,
            Err(err) => {
                warn!(error = %err, "failed to fetch groups");
                self.reporter.listing_failed(&err);
                return Err(err);
            }
        };

        let limit = self.config.concurrency();
        let mut summary = RunSummary::default();
        let mut tasks = JoinSet::new();

        for group in groups {
            while tasks.len() >= limit {
                settle_next(&mut tasks, &mut summary).await;
            }
            tasks.spawn(self.clone().assign_isolated(group).in_current_span());
        }
        while !tasks.is_empty() {
            settle_next(&mut tasks, &mut summary).await;
        }

        info!(
            assigned = summary.assigned,
            failed = summary.failed,
            "policy assignment complete"
        );
        self.reporter.completed(&summary);
        Ok(summary)
    }
}

async fn settle_next(tasks: &mut JoinSet<AssignmentOutcome>, summary: &mut RunSummary) {
    match tasks.join_next().await {
        Some(Ok(outcome)) => summary.record(&outcome),
        // Only reachable if reporting itself panicked; the group line may be missing.
        Some(Err(join_error)) => {
            error!(error = %join_error, "assignment task aborted");
            summary.failed += 1;
        }
        None => {}
    }
}
