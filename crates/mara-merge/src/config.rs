use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};
use crate::marker::MarkerSyntax;

/// Configuration for the merge engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Syntax of the deletion directive recognised in override sequences.
    pub deletion_marker: MarkerSyntax,
}

impl MergeConfig {
    /// Reject configurations that would misread ordinary entries.
    pub fn validate(&self) -> MergeResult<()> {
        if self.deletion_marker.prefix.is_empty() {
            return Err(MergeError::InvalidConfig(
                "deletion marker prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}
