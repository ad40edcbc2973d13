//! Command-line flags, each backed by an environment variable.

use clap::{Parser, ValueEnum};
use policy::config::{ACCESS_TOKEN_VAR, GITLAB_URL_VAR, POLICY_PROJECT_VAR};
use policy::RawConfig;

/// Log line format for the stderr tracing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "assign-security-policy",
    version,
    about = "Assign a security policy project to every GitLab group visible to the token"
)]
pub struct Args {
    /// Base URL of the GitLab instance (e.g. https://gitlab.example.com)
    #[arg(long, value_name = "URL", env = GITLAB_URL_VAR)]
    pub gitlab_url: Option<String>,

    /// Access token with permission to manage security policies
    #[arg(long, value_name = "TOKEN", env = ACCESS_TOKEN_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Security policy project to assign (global id or numeric project id)
    #[arg(long, value_name = "ID", env = POLICY_PROJECT_VAR)]
    pub policy_project_id: Option<String>,

    /// Maximum number of assignment requests in flight at once [default: 8]
    #[arg(long, value_name = "N", env = "ASSIGN_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS", env = "ASSIGN_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Format of diagnostic log lines written to stderr
    #[arg(long, value_enum, env = "LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    /// Splits off the values that feed [`policy::AssignerConfig`].
    pub fn raw_config(&self) -> RawConfig {
        RawConfig {
            gitlab_url: self.gitlab_url.clone(),
            access_token: self.token.clone(),
            policy_project_id: self.policy_project_id.clone(),
            concurrency: self.concurrency,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}
