//! The language-neutral document tree.
//!
//! A manifest source is parsed into a tree of [`Node`]s. Mappings keep their
//! keys in insertion order so merged output reads in the same order the
//! authors wrote it.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single node in a parsed manifest.
///
/// Equality is structural. Floats compare by bit pattern, so a `.nan` item
/// equals itself and `0.0` differs from `-0.0`.
#[derive(Clone, Debug)]
pub enum Node {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

/// Structural classification of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Sequence,
    Mapping,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Sequence => write!(f, "sequence"),
            Shape::Mapping => write!(f, "mapping"),
        }
    }
}

impl Node {
    /// Build a string node.
    pub fn string(value: impl Into<String>) -> Self {
        Node::String(value.into())
    }

    /// Build a sequence of string nodes.
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Sequence(values.into_iter().map(|v| Node::String(v.into())).collect())
    }

    /// The structural shape of this node. `Null` counts as a scalar.
    pub fn shape(&self) -> Shape {
        match self {
            Node::Sequence(_) => Shape::Sequence,
            Node::Mapping(_) => Shape::Mapping,
            _ => Shape::Scalar,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Render a scalar the way it would appear in the source text.
    ///
    /// Returns `None` for `Null`, sequences and mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Node::Bool(b) => Some(b.to_string()),
            Node::Integer(i) => Some(i.to_string()),
            Node::Float(x) => Some(float_text(*x)),
            Node::String(s) => Some(s.clone()),
            Node::Null | Node::Sequence(_) | Node::Mapping(_) => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Integer(a), Node::Integer(b)) => a == b,
            (Node::Float(a), Node::Float(b)) => a.to_bits() == b.to_bits(),
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Sequence(a), Node::Sequence(b)) => a == b,
            (Node::Mapping(a), Node::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

/// YAML spelling of a float. Integral values keep their `.0` so they never
/// read like an integer.
fn float_text(x: f64) -> String {
    if x.is_nan() {
        ".nan".into()
    } else if x.is_infinite() {
        let text = if x > 0.0 { ".inf" } else { "-.inf" };
        text.into()
    } else {
        format!("{x:?}")
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Integer(i) => serializer.serialize_i64(*i),
            Node::Float(x) => serializer.serialize_f64(*x),
            Node::String(s) => serializer.serialize_str(s),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Mapping(map) => map.serialize(serializer),
        }
    }
}

/// An insertion-ordered, string-keyed mapping.
///
/// Equality ignores key order: two mappings are equal when they hold the
/// same keys with equal values.
#[derive(Clone, Debug, Default)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert a value. An existing key keeps its position and gets the new
    /// value; a new key is appended. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, shifting later keys down to preserve order.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(Node::Null.shape(), Shape::Scalar);
        assert_eq!(Node::Integer(3).shape(), Shape::Scalar);
        assert_eq!(Node::strings(["a"]).shape(), Shape::Sequence);
        assert_eq!(Node::Mapping(Mapping::new()).shape(), Shape::Mapping);
        assert_eq!(Shape::Sequence.to_string(), "sequence");
    }

    #[test]
    fn insert_keeps_position_of_existing_key() {
        let mut map: Mapping = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        let previous = map.insert("a", "10");
        assert_eq!(previous, Some(Node::string("1")));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(map.get("a"), Some(&Node::string("10")));
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut map: Mapping = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(map.remove("b"), Some(Node::string("2")));
        assert_eq!(map.remove("missing"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn equality_ignores_key_order() {
        let left: Mapping = [("a", "1"), ("b", "2")].into_iter().collect();
        let right: Mapping = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(left, right);

        let different: Mapping = [("a", "1"), ("b", "3")].into_iter().collect();
        assert_ne!(left, different);
    }

    #[test]
    fn scalar_text() {
        assert_eq!(Node::Integer(7).scalar_text().as_deref(), Some("7"));
        assert_eq!(Node::string("0.1.0").scalar_text().as_deref(), Some("0.1.0"));
        assert_eq!(Node::Bool(true).scalar_text().as_deref(), Some("true"));
        assert_eq!(Node::Null.scalar_text(), None);
        assert_eq!(Node::strings(["x"]).scalar_text(), None);
    }

    #[test]
    fn float_text_stays_distinct_from_integers() {
        assert_eq!(Node::Float(1.0).scalar_text().as_deref(), Some("1.0"));
        assert_eq!(Node::Float(0.5).scalar_text().as_deref(), Some("0.5"));
        assert_eq!(Node::Float(f64::NAN).scalar_text().as_deref(), Some(".nan"));
        assert_eq!(Node::Float(f64::NEG_INFINITY).scalar_text().as_deref(), Some("-.inf"));
        assert_ne!(Node::Float(1.0).scalar_text(), Node::Integer(1).scalar_text());
    }

    #[test]
    fn floats_compare_by_bits() {
        assert_eq!(Node::Float(f64::NAN), Node::Float(f64::NAN));
        assert_eq!(Node::Float(1.5), Node::Float(1.5));
        assert_ne!(Node::Float(0.0), Node::Float(-0.0));
        assert_ne!(Node::Float(1.0), Node::Integer(1));
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut inner = Mapping::new();
        inner.insert("zeta", Node::Integer(1));
        inner.insert("alpha", Node::strings(["x", "y"]));
        inner.insert("none", Node::Null);
        let json = serde_json::to_string(&Node::Mapping(inner)).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":["x","y"],"none":null}"#);
    }
}
