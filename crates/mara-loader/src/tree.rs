use mara_types::{Document, Node};

use crate::error::{LoadError, LoadResult};

/// Wrap a parsed root node as a document.
pub(crate) fn into_document(root: Node, origin: &str) -> LoadResult<Document> {
    match root {
        Node::Null => Err(LoadError::Empty {
            origin: origin.to_string(),
        }),
        Node::Mapping(map) => Ok(Document::new(map)),
        other => Err(LoadError::RootNotMapping {
            origin: origin.to_string(),
            found: other.shape(),
        }),
    }
}

/// Text used for a scalar mapping key.
pub(crate) fn key_text(key: Node, origin: &str) -> LoadResult<String> {
    match key {
        Node::Null => Ok("null".into()),
        Node::String(s) => Ok(s),
        other => other.scalar_text().ok_or_else(|| LoadError::UnsupportedKey {
            origin: origin.to_string(),
            shape: other.shape(),
        }),
    }
}
