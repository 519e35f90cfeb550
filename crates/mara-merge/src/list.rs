//! Ordered-list reconciliation.
//!
//! The base sequence is already reconciled: no duplicates, no markers.
//! Override entries are applied strictly left to right. A deletion marker
//! removes its payload from what has been accumulated so far; any other
//! entry is appended unless an equal entry is already present. Output order
//! is base order followed by novel override entries in override order.

use mara_types::Node;
use tracing::{debug, trace};

use crate::merger::Merger;

impl Merger {
    /// Reconcile an override sequence into a base sequence.
    pub fn reconcile(&self, base: &[Node], over: &[Node]) -> Vec<Node> {
        let mut merged = base.to_vec();
        for entry in over {
            if let Some(payload) = self.deletion_payload(entry) {
                match merged.iter().position(|item| item.as_str() == Some(payload)) {
                    Some(pos) => {
                        trace!(payload, "deletion marker applied");
                        merged.remove(pos);
                    }
                    None => debug!(payload, "deletion target not present; ignoring"),
                }
                continue;
            }
            let item = self.normalize(entry);
            if !merged.contains(&item) {
                merged.push(item);
            }
        }
        merged
    }

    /// Strip markers and collapse duplicates throughout a tree that has no
    /// base counterpart.
    pub fn normalize(&self, node: &Node) -> Node {
        match node {
            Node::Sequence(items) => Node::Sequence(self.reconcile(&[], items)),
            Node::Mapping(map) => Node::Mapping(
                map.iter()
                    .map(|(key, value)| (key, self.normalize(value)))
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }

    fn deletion_payload<'a>(&self, entry: &'a Node) -> Option<&'a str> {
        entry
            .as_str()
            .and_then(|text| self.config.deletion_marker.parse(text))
    }
}
