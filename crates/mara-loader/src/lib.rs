//! Manifest loading for maraplus.
//!
//! A [`Loader`] turns manifest text into a [`mara_types::Document`]; the
//! merge engine only ever sees the resulting tree. Merged documents are
//! written back out with [`Format::emit`].
//!
//! # Modules
//!
//! - [`error`]: [`LoadError`] and the [`LoadResult`] alias
//! - [`traits`]: The [`Loader`] trait
//! - [`yaml`]: [`YamlLoader`] backed by `serde_yaml`
//! - [`json`]: [`JsonLoader`] backed by `serde_json`
//! - [`format`]: [`Format`] selection and emitters

pub mod error;
pub mod format;
pub mod json;
pub mod traits;
mod tree;
pub mod yaml;

pub use error::{LoadError, LoadResult};
pub use format::{loader_for_path, to_json_string, to_yaml_string, Format};
pub use json::JsonLoader;
pub use traits::Loader;
pub use yaml::YamlLoader;
