//! Merge engine for maraplus.
//!
//! Folds an ordered list of manifest documents into one. The first document
//! is the base; each later fragment refines or extends it without the base
//! having to be rewritten.
//!
//! # Merge rules
//!
//! - Scalars: the later document wins.
//! - Mappings: merged key by key; keys missing from the override are kept.
//! - Sequences: base order first, then entries the override adds. Override
//!   entries of the form `DEL->{payload}` remove `payload` instead.
//! - `migration.versions`: entries are matched by their `version` id and
//!   merged in place; unmatched entries are appended.
//!
//! # Key Types
//!
//! - [`Merger`]: The engine, configured by [`MergeConfig`]
//! - [`MarkerSyntax`]: Recognises deletion markers
//! - [`MergeError`]: Why a fold was aborted

pub mod config;
mod dict;
pub mod error;
mod fold;
mod list;
pub mod marker;
mod merger;
mod path;
mod versions;

pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use fold::merge_documents;
pub use marker::MarkerSyntax;
pub use merger::Merger;
