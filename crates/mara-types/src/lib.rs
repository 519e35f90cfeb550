//! Foundation types for maraplus.
//!
//! Manifests are parsed by a loader into a language-neutral tree of
//! [`Node`]s. Every other maraplus crate depends on `mara-types`.
//!
//! # Key Types
//!
//! - [`Node`] / [`Shape`]: Tagged document tree and its structural classification
//! - [`Mapping`]: Insertion-ordered, string-keyed mapping
//! - [`Document`]: One manifest source rooted at `migration`
//! - [`DocumentError`]: Structural problems found in a document

pub mod document;
pub mod error;
pub mod keys;
pub mod node;

pub use document::{display_version, entry_version, split_version_entry, Document};
pub use error::{DocumentError, DocumentResult};
pub use node::{Mapping, Node, Shape};
