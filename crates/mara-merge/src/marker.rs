//! Deletion markers: `DEL->{payload}` entries in override sequences.
//!
//! A marker is a directive, never data. It removes `payload` from the
//! sequence being merged and is itself discarded.

use serde::{Deserialize, Serialize};

/// Prefix and suffix that wrap a deletion payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSyntax {
    pub prefix: String,
    pub suffix: String,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self::new("DEL->{", "}")
    }
}

impl MarkerSyntax {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// The payload of `entry` if it is a deletion marker.
    pub fn parse<'a>(&self, entry: &'a str) -> Option<&'a str> {
        if entry.len() < self.prefix.len() + self.suffix.len() {
            return None;
        }
        entry
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }

    /// Build the marker that deletes `payload`.
    pub fn wrap(&self, payload: &str) -> String {
        format!("{}{}{}", self.prefix, payload, self.suffix)
    }
}
