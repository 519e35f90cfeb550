//! A single parsed manifest, rooted at `migration`.

use serde::{Serialize, Serializer};

use crate::error::{DocumentError, DocumentResult};
use crate::keys;
use crate::node::{Mapping, Node, Shape};

/// One parsed manifest source.
///
/// A `Document` holds whatever tree the loader produced. Structural
/// requirements (`migration`, `migration.versions`, unique version ids) are
/// checked by [`Document::validate`] and by the accessors, so callers decide
/// when a malformed source becomes an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn into_root(self) -> Mapping {
        self.root
    }

    /// The `migration` mapping.
    pub fn migration(&self) -> DocumentResult<&Mapping> {
        match self.root.get(keys::MIGRATION) {
            None | Some(Node::Null) => Err(DocumentError::MissingMigration),
            Some(Node::Mapping(map)) => Ok(map),
            Some(other) => Err(DocumentError::MigrationNotMapping(other.shape())),
        }
    }

    /// The `migration.options` mapping, or `None` when the document has none.
    pub fn options(&self) -> DocumentResult<Option<&Mapping>> {
        match self.migration()?.get(keys::OPTIONS) {
            None | Some(Node::Null) => Ok(None),
            Some(Node::Mapping(map)) => Ok(Some(map)),
            Some(other) => Err(DocumentError::OptionsNotMapping(other.shape())),
        }
    }

    /// The raw `migration.versions` entries, in document order.
    pub fn versions(&self) -> DocumentResult<&[Node]> {
        match self.migration()?.get(keys::VERSIONS) {
            None | Some(Node::Null) => Err(DocumentError::MissingVersions),
            Some(Node::Sequence(items)) => Ok(items),
            Some(other) => Err(DocumentError::VersionsNotSequence(other.shape())),
        }
    }

    /// The version identifier of every entry, in document order.
    ///
    /// Fails on entries that are not mappings, entries without a scalar
    /// `version`, and identifiers that appear more than once.
    pub fn version_ids(&self) -> DocumentResult<Vec<&Node>> {
        let mut ids: Vec<&Node> = Vec::new();
        for (index, entry) in self.versions()?.iter().enumerate() {
            let id = entry_version(entry).map_err(|reason| {
                DocumentError::InvalidVersionEntry { index, reason }
            })?;
            if ids.contains(&id) {
                return Err(DocumentError::DuplicateVersion {
                    version: display_version(id),
                });
            }
            ids.push(id);
        }
        Ok(ids)
    }

    /// Check every structural requirement of a manifest.
    pub fn validate(&self) -> DocumentResult<()> {
        self.options()?;
        self.version_ids()?;
        Ok(())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

/// The `version` identifier of a version entry.
pub fn entry_version(entry: &Node) -> Result<&Node, String> {
    split_version_entry(entry).map(|(_, id)| id)
}

/// A version entry's mapping together with its `version` identifier.
pub fn split_version_entry(entry: &Node) -> Result<(&Mapping, &Node), String> {
    let map = match entry {
        Node::Mapping(map) => map,
        other => return Err(format!("expected a mapping, found {}", other.shape())),
    };
    match map.get(keys::VERSION) {
        None | Some(Node::Null) => Err("missing 'version'".into()),
        Some(id) if id.shape() == Shape::Scalar => Ok((map, id)),
        Some(other) => Err(format!("'version' must be a scalar, found {}", other.shape())),
    }
}

/// Human-readable form of a version identifier.
pub fn display_version(id: &Node) -> String {
    id.scalar_text().unwrap_or_else(|| "~".into())
}
