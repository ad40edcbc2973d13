//! Core domain for assigning a security policy project to GitLab groups.
//!
//! This crate contains the newtype identifiers, validated configuration,
//! outcome types, error types, and the [`GroupPolicyApi`] port used by the
//! rest of the workspace.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies. It
//! defines *what* is needed; the `gitlab` crate defines *how* to reach the API
//! and the `assigner` crate sequences the calls.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`GroupPath`, `SecurityPolicyProjectId`, etc.) |
//! | [`config`] | `RawConfig` → `AssignerConfig` validation |
//! | [`types`] | `GroupListing`, `AssignmentOutcome`, `RunSummary` |
//! | [`errors`] | `ConfigError` and `ApiError` |
//! | [`api`] | The `GroupPolicyApi` port trait |

pub mod api;
pub mod config;
pub mod errors;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use api::GroupPolicyApi;
pub use config::{AssignerConfig, RawConfig};
pub use errors::{ApiError, ConfigError};
pub use identifiers::{AccessToken, GroupPath, RunId, SecurityPolicyProjectId};
pub use types::{AssignmentOutcome, GroupListing, RunSummary};
