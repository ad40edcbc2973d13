//! Error types for the policy assignment domain.
//!
//! [`ConfigError`] covers misconfiguration detected before any network I/O and
//! always stops the run. [`ApiError`] covers failures of a single call against
//! the GitLab GraphQL API; whether it stops the run depends on the caller (the
//! group lister propagates it, the policy assigner contains it).

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A required configuration value is missing or malformed.
///
/// Produced while building [`crate::AssignerConfig`]; the tool never issues a
/// request with an invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value was not provided by flag, environment, or `.env` file.
    #[error("{variable} environment variable is not set. Please provide {description}.")]
    Missing {
        /// Name of the environment variable that supplies the value.
        variable: &'static str,
        /// What the value is, phrased for the operator.
        description: &'static str,
    },

    /// A value was provided but cannot be used.
    #[error("{variable} is invalid: {reason}")]
    Invalid {
        /// Name of the environment variable that supplies the value.
        variable: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// API errors
// ---------------------------------------------------------------------------

/// Failure of one GraphQL call.
///
/// Each variant carries the most specific detail available: the HTTP response
/// body, the GraphQL error messages, or the transport error text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, connect, timeout).
    #[error("transport error: {message}")]
    Transport {
        /// Underlying client error message.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", .body.as_deref().unwrap_or("request failed"))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, when one could be read and was non-empty.
        body: Option<String>,
    },

    /// The response carried top-level GraphQL `errors`.
    #[error("GraphQL errors: {}", .messages.join("; "))]
    GraphQl {
        /// Error messages reported by the API.
        messages: Vec<String>,
    },

    /// The response body did not have the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Description of what was missing or unparseable.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_message_names_the_variable() {
        let err = ConfigError::Missing {
            variable: "SECURITY_POLICY_PROJECT_ID",
            description: "the security policy project ID",
        };
        assert_eq!(
            err.to_string(),
            "SECURITY_POLICY_PROJECT_ID environment variable is not set. \
             Please provide the security policy project ID."
        );
    }

    #[test]
    fn http_error_prefers_body_over_generic_message() {
        let with_body = ApiError::Http {
            status: 401,
            body: Some(r#"{"message":"401 Unauthorized"}"#.into()),
        };
        assert_eq!(with_body.to_string(), r#"HTTP 401: {"message":"401 Unauthorized"}"#);

        let without_body = ApiError::Http {
            status: 502,
            body: None,
        };
        assert_eq!(without_body.to_string(), "HTTP 502: request failed");
    }

    #[test]
    fn graphql_error_joins_messages() {
        let err = ApiError::GraphQl {
            messages: vec!["first".into(), "second".into()],
        };
        assert_eq!(err.to_string(), "GraphQL errors: first; second");
    }
}
