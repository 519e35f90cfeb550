use std::fmt;

use mara_types::keys;

/// Location of a node inside a document, used in error messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct KeyPath {
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Key(String),
    Version(String),
}

impl KeyPath {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    pub(crate) fn key(&self, key: &str) -> Self {
        self.child(Segment::Key(key.to_string()))
    }

    pub(crate) fn version(&self, id: &str) -> Self {
        self.child(Segment::Version(id.to_string()))
    }

    /// `true` for `migration.versions`, the list merged by version id.
    pub(crate) fn is_version_list(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [Segment::Key(first), Segment::Key(second)]
                if first == keys::MIGRATION && second == keys::VERSIONS
        )
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Version(id) => write!(f, "[{id}]")?,
            }
        }
        Ok(())
    }
}
