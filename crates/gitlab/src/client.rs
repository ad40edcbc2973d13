//! reqwest-backed implementation of [`GroupPolicyApi`].

use async_trait::async_trait;
use policy::{
    AccessToken, ApiError, AssignerConfig, GroupListing, GroupPath, GroupPolicyApi,
    SecurityPolicyProjectId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::graphql::{
    AssignData, AssignVariables, GraphQlRequest, GraphQlResponse, GroupsData, ASSIGN_MUTATION,
    GROUPS_QUERY,
};

const USER_AGENT: &str = concat!("assign-security-policy/", env!("CARGO_PKG_VERSION"));

/// The HTTP client could not be constructed (e.g. TLS backend failure).
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// GraphQL client for one GitLab instance.
///
/// Cheap to share behind an `Arc`; the underlying `reqwest::Client` pools
/// connections across concurrent calls.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    endpoint: String,
    token: AccessToken,
}

impl GitLabClient {
    /// Builds a client for `config.endpoint()` with the configured request timeout.
    pub fn new(config: &AssignerConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint().to_string(),
            token: config.access_token().clone(),
        })
    }

    /// GraphQL endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<V, T>(
        &self,
        request: &GraphQlRequest<'_, V>,
    ) -> Result<Envelope<T>, ApiError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.token.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "GraphQL request rejected");
            let body = body.trim();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: (!body.is_empty()).then(|| body.to_string()),
            });
        }

        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse {
                message: format!("response body is not valid GraphQL JSON: {e}"),
            })?;

        Ok(Envelope {
            data: envelope.data,
            errors: envelope.errors.into_iter().map(|e| e.message).collect(),
        })
    }
}

/// `data` and top-level error messages of a 2xx GraphQL response.
struct Envelope<T> {
    data: Option<T>,
    errors: Vec<String>,
}

impl<T> Envelope<T> {
    /// Extracts the field the caller asked for.
    ///
    /// A present field is used even when top-level errors were reported
    /// alongside it (a partial response); the errors are logged. A missing
    /// field is [`ApiError::GraphQl`] if errors were reported, otherwise
    /// [`ApiError::MalformedResponse`].
    fn require<U>(
        self,
        what: &'static str,
        field: impl FnOnce(T) -> Option<U>,
    ) -> Result<U, ApiError> {
        let Self { data, errors } = self;
        match data.and_then(field) {
            Some(value) => {
                if !errors.is_empty() {
                    warn!(what, ?errors, "partial GraphQL response; using the data returned");
                }
                Ok(value)
            }
            None if !errors.is_empty() => Err(ApiError::GraphQl { messages: errors }),
            None => Err(ApiError::MalformedResponse {
                message: format!("response has no {what}"),
            }),
        }
    }
}

#[async_trait]
impl GroupPolicyApi for GitLabClient {
    #[tracing::instrument(skip_all)]
    async fn list_groups(&self) -> Result<GroupListing, ApiError> {
        let request = GraphQlRequest::<()> {
            query: GROUPS_QUERY,
            variables: None,
        };
        let connection = self
            .execute::<_, GroupsData>(&request)
            .await?
            .require("groups connection", |data| data.groups)?;

        let mut groups = Vec::with_capacity(connection.nodes.len());
        for node in connection.nodes.into_iter().flatten() {
            match node.full_path.and_then(GroupPath::new) {
                Some(path) => groups.push(path),
                None => warn!("skipping group node without a fullPath"),
            }
        }
        let truncated = connection.page_info.is_some_and(|p| p.has_next_page);

        debug!(count = groups.len(), truncated, "listed groups");
        Ok(GroupListing { groups, truncated })
    }

    #[tracing::instrument(skip(self, project), fields(group = %group))]
    async fn assign_security_policy_project(
        &self,
        group: &GroupPath,
        project: &SecurityPolicyProjectId,
    ) -> Result<Vec<String>, ApiError> {
        let request = GraphQlRequest {
            query: ASSIGN_MUTATION,
            variables: Some(AssignVariables {
                full_path: group.as_str(),
                security_policy_project_id: project.as_str(),
            }),
        };
        let payload = self
            .execute::<_, AssignData>(&request)
            .await?
            .require("securityPolicyProjectAssign payload", |data| {
                data.security_policy_project_assign
            })?;

        debug!(
            client_mutation_id = payload.client_mutation_id.as_deref().unwrap_or(""),
            errors = payload.errors.len(),
            "securityPolicyProjectAssign returned"
        );
        Ok(payload.errors)
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else {
        err.to_string()
    };
    ApiError::Transport { message }
}
