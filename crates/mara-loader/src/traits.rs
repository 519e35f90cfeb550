//! The [`Loader`] trait turning manifest text into document trees.

use std::fs;
use std::io::Read;
use std::path::Path;

use mara_types::Document;

use crate::error::{LoadError, LoadResult};
use crate::format::Format;

/// Parses manifest text into a [`Document`].
///
/// Loaders only turn text into a tree. They do not check manifest
/// structure; the merge fold does that so errors name the offending
/// document's position.
pub trait Loader: Send + Sync {
    /// The text format this loader reads.
    fn format(&self) -> Format;

    /// Parse a document from text. `origin` names the source in errors.
    fn load_str(&self, text: &str, origin: &str) -> LoadResult<Document>;

    /// Read everything from `reader` and parse it.
    fn load_reader(&self, reader: &mut dyn Read, origin: &str) -> LoadResult<Document> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Io {
                path: origin.into(),
                source,
            })?;
        self.load_str(&text, origin)
    }

    /// Read and parse a file.
    fn load_path(&self, path: &Path) -> LoadResult<Document> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&text, &path.display().to_string())
    }
}
