//! Error types for the merge engine.

use mara_types::{DocumentError, Shape};

/// Errors that abort a merge. A failed merge never yields a partial document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    /// No documents were supplied to the fold.
    #[error("no documents to merge")]
    EmptyInput,

    /// A document lacks the required manifest structure.
    #[error("document {document} is malformed: {source}")]
    MalformedDocument {
        document: usize,
        #[source]
        source: DocumentError,
    },

    /// The same key holds incompatible shapes in base and override.
    #[error("document {document}: shape mismatch at '{path}': base has {base}, override has {over}")]
    ShapeMismatch {
        document: usize,
        path: String,
        base: Shape,
        over: Shape,
    },

    /// The merge configuration cannot be used.
    #[error("invalid merge configuration: {0}")]
    InvalidConfig(String),
}

impl MergeError {
    pub(crate) fn malformed(document: usize) -> impl FnOnce(DocumentError) -> Self {
        move |source| Self::MalformedDocument { document, source }
    }

    /// Index of the document that caused the error, if any.
    pub fn document(&self) -> Option<usize> {
        match self {
            Self::MalformedDocument { document, .. } | Self::ShapeMismatch { document, .. } => {
                Some(*document)
            }
            Self::EmptyInput | Self::InvalidConfig(_) => None,
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
