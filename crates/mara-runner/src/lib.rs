//! # mara-runner
//!
//! The consuming side of a merged manifest. [`Manifest`] is a typed view of
//! the versions, operations and addons a merged document asks for,
//! [`build_plan`] orders them into [`Step`]s, and a [`Runner`] consumes them.
//! Only the [`DryRunRunner`] ships here: it writes the plan without executing
//! anything.

pub mod config;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod runner;

pub use config::RunnerConfig;
pub use error::{RunnerError, RunnerResult};
pub use manifest::{Manifest, NamedLists, Section, VersionSteps};
pub use plan::{build_plan, Plan, Step};
pub use runner::{DryRunRunner, RunReport, Runner};
