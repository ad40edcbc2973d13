//! Newtype domain identifiers.
//!
//! Every value that names something on the remote GitLab instance is a distinct
//! newtype, so a [`GroupPath`] can never be passed where a
//! [`SecurityPolicyProjectId`] is expected even though both are strings on the
//! wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or whitespace only.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Full path of a GitLab group (e.g. `"team-a"`, `"platform/security"`).
    ///
    /// Produced by the group lister and consumed exactly once by a policy
    /// assignment. Uniqueness is not enforced here.
    GroupPath
}

// ---------------------------------------------------------------------------

const PROJECT_GID_PREFIX: &str = "gid://gitlab/Project/";

/// Global id of the security policy project assigned to every group.
///
/// GitLab's mutation takes a `ProjectID!` scalar, which is a global id of the
/// form `gid://gitlab/Project/<n>`. A bare numeric id is accepted and
/// normalised to that form; any other non-empty value is passed through
/// untouched and left for the API to judge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityPolicyProjectId(String);

impl SecurityPolicyProjectId {
    /// Creates a project id, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let v = v.trim();
        if v.is_empty() {
            return None;
        }
        if v.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(format!("{PROJECT_GID_PREFIX}{v}")))
        } else {
            Some(Self(v.to_string()))
        }
    }

    /// Returns the global id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SecurityPolicyProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// Personal, group, or project access token used as a bearer credential.
///
/// `Debug` is redacted so the token never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a token, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let v = v.trim();
        if v.is_empty() {
            None
        } else {
            Some(Self(v.to_string()))
        }
    }

    /// Returns the raw secret. Only the HTTP transport should call this.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

// ---------------------------------------------------------------------------

/// Identifies a single invocation of the tool.
///
/// Generated fresh for every run and attached to the run span so all
/// per-group events can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
