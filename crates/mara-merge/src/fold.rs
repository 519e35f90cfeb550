//! The left fold over an ordered list of documents.
//!
//! The first document is the base; each later document overrides the
//! accumulation of everything before it. Document order is precedence
//! order: the last document wins on conflicting scalars and deletions.

use mara_types::{Document, Node};
use tracing::debug;

use crate::error::{MergeError, MergeResult};
use crate::merger::Merger;
use crate::path::KeyPath;

impl Merger {
    /// Fold `documents` into one merged document.
    ///
    /// Errors carry the 0-based index of the offending document. No partial
    /// result is returned on failure.
    pub fn merge_documents(&self, documents: &[Document]) -> MergeResult<Document> {
        let (first, rest) = documents.split_first().ok_or(MergeError::EmptyInput)?;
        first.validate().map_err(MergeError::malformed(0))?;

        let mut merged = self.normalize_document(first);
        for (offset, next) in rest.iter().enumerate() {
            merged = self.merge_pair(&merged, next, offset + 1)?;
        }
        debug!(documents = documents.len(), "manifest fold complete");
        Ok(merged)
    }

    /// Merge one override document into an accumulated base.
    ///
    /// `document` is the override's position in the fold; the base is
    /// reported as the document before it.
    pub fn merge_pair(
        &self,
        base: &Document,
        over: &Document,
        document: usize,
    ) -> MergeResult<Document> {
        base.validate()
            .map_err(MergeError::malformed(document.saturating_sub(1)))?;
        over.validate().map_err(MergeError::malformed(document))?;

        let root = self.merge_mapping_at(base.root(), over.root(), &KeyPath::root(), document)?;
        let merged = Document::new(root);
        debug!(
            document,
            versions = merged.versions().map(<[Node]>::len).unwrap_or(0),
            "merged manifest"
        );
        Ok(merged)
    }

    /// A copy of `document` with markers stripped and duplicates collapsed.
    pub fn normalize_document(&self, document: &Document) -> Document {
        match self.normalize(&Node::Mapping(document.root().clone())) {
            Node::Mapping(root) => Document::new(root),
            _ => document.clone(),
        }
    }
}

/// Fold `documents` with the default configuration.
pub fn merge_documents(documents: &[Document]) -> MergeResult<Document> {
    Merger::default().merge_documents(documents)
}
