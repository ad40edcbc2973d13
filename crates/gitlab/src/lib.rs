//! GitLab GraphQL infrastructure adapter.
//!
//! Implements [`policy::GroupPolicyApi`] over `POST <base>/api/graphql` with
//! bearer-token authentication.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain workflow rules. HTTP
//! transport, GraphQL documents, and response-shape checking live here; the
//! `assigner` crate sees only [`policy::GroupPolicyApi`] and
//! [`policy::ApiError`].
//!
//! ## Error mapping
//!
//! | Condition | `ApiError` variant |
//! |-----------|--------------------|
//! | connect/TLS/timeout/body read | `Transport` |
//! | non-2xx status | `Http` (with response body when non-empty) |
//! | top-level GraphQL `errors` and the requested field absent | `GraphQl` |
//! | invalid JSON, or `data`/payload missing without errors | `MalformedResponse` |
//!
//! A partial response (top-level `errors` next to the requested field) is not
//! a failure: the returned data is used and the errors are logged at `warn`.
//!
//! Mutation-level `errors` (inside the `securityPolicyProjectAssign` payload)
//! are not failures at this layer; they are returned to the caller as data.

mod client;
mod graphql;

pub use client::{ClientBuildError, GitLabClient};
