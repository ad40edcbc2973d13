//! GraphQL documents and wire types for the two operations.

use serde::{Deserialize, Serialize};

pub(crate) const GROUPS_QUERY: &str = r#"
  query {
    groups {
      nodes {
        fullPath
      }
      pageInfo {
        hasNextPage
      }
    }
  }
"#;

pub(crate) const ASSIGN_MUTATION: &str = r#"
  mutation SecurityPolicyProjectAssign($fullPath: String!, $securityPolicyProjectId: ProjectID!) {
    securityPolicyProjectAssign(
      input: { fullPath: $fullPath, securityPolicyProjectId: $securityPolicyProjectId }
    ) {
      clientMutationId
      errors
    }
  }
"#;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignVariables<'a> {
    pub full_path: &'a str,
    pub security_policy_project_id: &'a str,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupsData {
    pub groups: Option<GroupConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupConnection {
    #[serde(default)]
    pub nodes: Vec<Option<GroupNode>>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupNode {
    pub full_path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignData {
    pub security_policy_project_assign: Option<AssignPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignPayload {
    pub client_mutation_id: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}
