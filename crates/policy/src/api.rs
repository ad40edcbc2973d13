//! Port trait for the GitLab GraphQL API.
//!
//! The workflow in the `assigner` crate depends only on [`GroupPolicyApi`];
//! the `gitlab` crate supplies the HTTP implementation and tests supply
//! in-memory fakes.

use async_trait::async_trait;

use crate::{ApiError, GroupListing, GroupPath, SecurityPolicyProjectId};

/// The two remote operations the tool performs.
#[async_trait]
pub trait GroupPolicyApi: Send + Sync {
    /// Lists groups visible to the credential.
    ///
    /// Reads a single response page; [`GroupListing::truncated`] reports
    /// whether the API indicated more.
    async fn list_groups(&self) -> Result<GroupListing, ApiError>;

    /// Runs `securityPolicyProjectAssign` for one group.
    ///
    /// `Ok` carries the mutation's `errors` list, which is empty on success.
    async fn assign_security_policy_project(
        &self,
        group: &GroupPath,
        project: &SecurityPolicyProjectId,
    ) -> Result<Vec<String>, ApiError>;
}
