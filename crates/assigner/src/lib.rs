//! Security policy assignment workflow.
//!
//! [`PolicyAssignment`] lists groups once through [`policy::GroupPolicyApi`]
//! and then assigns the configured security policy project to each group
//! concurrently, bounded by [`policy::AssignerConfig::concurrency`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** This crate sequences calls against the port
//! trait and reports progress; it contains no transport code.
//!
//! ## Failure isolation
//!
//! - A listing failure is fatal to the run and returned to the caller.
//! - A failure assigning one group, including a panic inside the adapter,
//!   is reported and counted, never propagated. Sibling assignments are
//!   unaffected and the run always reaches completion.

pub mod report;
pub mod workflow;

pub use report::{ConsoleReporter, OutcomeReporter};
pub use workflow::PolicyAssignment;
