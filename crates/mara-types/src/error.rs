use thiserror::Error;

use crate::node::Shape;

/// Structural problems found when reading a manifest [`Document`](crate::Document).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentError {
    #[error("missing top-level 'migration' mapping")]
    MissingMigration,

    #[error("'migration' must be a mapping, found {0}")]
    MigrationNotMapping(Shape),

    #[error("missing 'migration.versions' sequence")]
    MissingVersions,

    #[error("'migration.versions' must be a sequence, found {0}")]
    VersionsNotSequence(Shape),

    #[error("'migration.options' must be a mapping, found {0}")]
    OptionsNotMapping(Shape),

    #[error("invalid version entry at index {index}: {reason}")]
    InvalidVersionEntry { index: usize, reason: String },

    #[error("duplicate version '{version}'")]
    DuplicateVersion { version: String },
}

/// Convenience alias for document results.
pub type DocumentResult<T> = Result<T, DocumentError>;
