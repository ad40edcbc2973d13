//! Validated runtime configuration.
//!
//! [`AssignerConfig`] is built exactly once from raw, possibly-missing values
//! ([`RawConfig`]) and then passed by reference to every component. Validation
//! covers every required value so misconfiguration is reported before the
//! first request is sent.

use std::time::Duration;

use crate::{AccessToken, ConfigError, SecurityPolicyProjectId};

/// Environment variable holding the GitLab base URL.
pub const GITLAB_URL_VAR: &str = "GITLAB_URL";
/// Environment variable holding the access token.
pub const ACCESS_TOKEN_VAR: &str = "GITLAB_ACCESS_TOKEN";
/// Environment variable holding the security policy project id.
pub const POLICY_PROJECT_VAR: &str = "SECURITY_POLICY_PROJECT_ID";

/// Default number of mutations in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const GRAPHQL_PATH: &str = "/api/graphql";

/// Unvalidated configuration as collected from flags, environment and `.env`.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    /// Base URL of the GitLab instance, without the GraphQL path.
    pub gitlab_url: Option<String>,

    /// Personal, group, or project access token.
    pub access_token: Option<String>,

    /// Global id or bare numeric id of the security policy project.
    pub policy_project_id: Option<String>,

    /// Mutations in flight at once; [`DEFAULT_CONCURRENCY`] when unset.
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds; [`DEFAULT_REQUEST_TIMEOUT`] when unset.
    pub request_timeout_secs: Option<u64>,
}

/// Immutable, validated configuration for one run.
#[derive(Debug, Clone)]
pub struct AssignerConfig {
    endpoint: String,
    access_token: AccessToken,
    policy_project_id: SecurityPolicyProjectId,
    concurrency: usize,
    request_timeout: Duration,
}

impl AssignerConfig {
    /// Validates `raw`.
    ///
    /// The policy project id is checked first so that its absence is always
    /// the reported error when several values are missing.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let policy_project_id = raw
            .policy_project_id
            .and_then(SecurityPolicyProjectId::new)
            .ok_or(ConfigError::Missing {
                variable: POLICY_PROJECT_VAR,
                description: "the security policy project ID",
            })?;

        let base_url = raw
            .gitlab_url
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigError::Missing {
                variable: GITLAB_URL_VAR,
                description: "the base URL of the GitLab instance",
            })?;
        let endpoint = graphql_endpoint(&base_url)?;

        let access_token = raw
            .access_token
            .and_then(AccessToken::new)
            .ok_or(ConfigError::Missing {
                variable: ACCESS_TOKEN_VAR,
                description: "a GitLab access token",
            })?;

        let concurrency = raw.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ConfigError::Invalid {
                variable: "ASSIGN_CONCURRENCY",
                reason: "must be at least 1".into(),
            });
        }

        let request_timeout = match raw.request_timeout_secs {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(0) => {
                return Err(ConfigError::Invalid {
                    variable: "ASSIGN_REQUEST_TIMEOUT_SECS",
                    reason: "must be at least 1 second".into(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
        };

        Ok(Self {
            endpoint,
            access_token,
            policy_project_id,
            concurrency,
            request_timeout,
        })
    }

    /// Full GraphQL endpoint URL (`<base>/api/graphql`).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Token sent as the bearer credential on every request.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Project assigned to every group, in global-id form.
    pub fn policy_project_id(&self) -> &SecurityPolicyProjectId {
        &self.policy_project_id
    }

    /// Upper bound on mutations in flight at once. Always at least 1.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Upper bound on one HTTP request, connect to last body byte.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn graphql_endpoint(base_url: &str) -> Result<String, ConfigError> {
    let base = base_url.trim().trim_end_matches('/');
    let has_scheme = base
        .strip_prefix("https://")
        .or_else(|| base.strip_prefix("http://"))
        .is_some_and(|host| !host.is_empty());
    if !has_scheme {
        return Err(ConfigError::Invalid {
            variable: GITLAB_URL_VAR,
            reason: format!("'{base_url}' is not an http:// or https:// URL"),
        });
    }
    Ok(format!("{base}{GRAPHQL_PATH}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawConfig {
        RawConfig {
            gitlab_url: Some("https://gitlab.example.com/".into()),
            access_token: Some("glpat-abc".into()),
            policy_project_id: Some("12".into()),
            ..RawConfig::default()
        }
    }

    #[test]
    fn builds_endpoint_and_applies_defaults() {
        let config = AssignerConfig::from_raw(complete()).unwrap();
        assert_eq!(config.endpoint(), "https://gitlab.example.com/api/graphql");
        assert_eq!(config.policy_project_id().as_str(), "gid://gitlab/Project/12");
        assert_eq!(config.concurrency(), DEFAULT_CONCURRENCY);
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn missing_policy_project_is_reported_first() {
        let err = AssignerConfig::from_raw(RawConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing { variable: POLICY_PROJECT_VAR, .. }
        ));
    }

    #[test]
    fn blank_policy_project_counts_as_missing() {
        let raw = RawConfig {
            policy_project_id: Some("  ".into()),
            ..complete()
        };
        assert!(matches!(
            AssignerConfig::from_raw(raw),
            Err(ConfigError::Missing { variable: POLICY_PROJECT_VAR, .. })
        ));
    }

    #[test]
    fn url_and_token_are_validated_up_front() {
        let no_url = RawConfig {
            gitlab_url: None,
            ..complete()
        };
        assert!(matches!(
            AssignerConfig::from_raw(no_url),
            Err(ConfigError::Missing { variable: GITLAB_URL_VAR, .. })
        ));

        let bad_url = RawConfig {
            gitlab_url: Some("gitlab.example.com".into()),
            ..complete()
        };
        assert!(matches!(
            AssignerConfig::from_raw(bad_url),
            Err(ConfigError::Invalid { variable: GITLAB_URL_VAR, .. })
        ));

        let no_token = RawConfig {
            access_token: Some(String::new()),
            ..complete()
        };
        assert!(matches!(
            AssignerConfig::from_raw(no_token),
            Err(ConfigError::Missing { variable: ACCESS_TOKEN_VAR, .. })
        ));
    }

    #[test]
    fn zero_tunables_are_rejected() {
        let raw = RawConfig {
            concurrency: Some(0),
            ..complete()
        };
        assert!(matches!(AssignerConfig::from_raw(raw), Err(ConfigError::Invalid { .. })));

        let raw = RawConfig {
            request_timeout_secs: Some(0),
            ..complete()
        };
        assert!(matches!(AssignerConfig::from_raw(raw), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn plain_http_base_is_accepted() {
        let raw = RawConfig {
            gitlab_url: Some("http://127.0.0.1:8080".into()),
            concurrency: Some(2),
            request_timeout_secs: Some(5),
            ..complete()
        };
        let config = AssignerConfig::from_raw(raw).unwrap();
        assert_eq!(config.endpoint(), "http://127.0.0.1:8080/api/graphql");
        assert_eq!(config.concurrency(), 2);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
