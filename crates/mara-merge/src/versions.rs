//! Version-keyed merge of `migration.versions`.

use mara_types::{
    display_version, entry_version, keys, split_version_entry, DocumentError, Node,
};
use tracing::trace;

use crate::error::{MergeError, MergeResult};
use crate::merger::Merger;
use crate::path::KeyPath;

impl Merger {
    /// Merge override version entries into base version entries.
    ///
    /// An override entry whose `version` matches a base entry is merged into
    /// it in place. Any other override entry is appended, in override order.
    /// Version ids are never reordered or sorted.
    pub fn merge_versions(
        &self,
        base: &[Node],
        over: &[Node],
        document: usize,
    ) -> MergeResult<Vec<Node>> {
        let path = KeyPath::root().key(keys::MIGRATION).key(keys::VERSIONS);
        self.merge_versions_at(base, over, &path, document)
    }

    pub(crate) fn merge_versions_at(
        &self,
        base: &[Node],
        over: &[Node],
        path: &KeyPath,
        document: usize,
    ) -> MergeResult<Vec<Node>> {
        let mut merged = base.to_vec();
        for (index, entry) in over.iter().enumerate() {
            let (over_map, id) =
                split_version_entry(entry).map_err(|reason| MergeError::MalformedDocument {
                    document,
                    source: DocumentError::InvalidVersionEntry { index, reason },
                })?;
            let existing = merged
                .iter_mut()
                .find(|candidate| entry_version(candidate).ok() == Some(id));
            match existing {
                Some(Node::Mapping(base_map)) => {
                    let entry_path = path.version(&display_version(id));
                    let combined = self.merge_mapping_at(base_map, over_map, &entry_path, document)?;
                    *base_map = combined;
                    trace!(version = %display_version(id), "merged version entry");
                }
                _ => {
                    merged.push(self.normalize(entry));
                    trace!(version = %display_version(id), "appended version entry");
                }
            }
        }
        Ok(merged)
    }
}
