//! Key-wise mapping merge.

use mara_types::{Mapping, Node, Shape};

use crate::error::{MergeError, MergeResult};
use crate::merger::Merger;
use crate::path::KeyPath;

impl Merger {
    /// Merge an override mapping into a base mapping.
    ///
    /// Keys keep base order, with override-only keys appended in override
    /// order. Scalars are last-writer-wins, sequences are reconciled,
    /// mappings recurse. A key absent from the override, or set to null
    /// there, leaves the base value untouched.
    ///
    /// `document` is the fold index of the override, reported in errors.
    pub fn merge_mappings(
        &self,
        base: &Mapping,
        over: &Mapping,
        document: usize,
    ) -> MergeResult<Mapping> {
        self.merge_mapping_at(base, over, &KeyPath::root(), document)
    }

    pub(crate) fn merge_mapping_at(
        &self,
        base: &Mapping,
        over: &Mapping,
        path: &KeyPath,
        document: usize,
    ) -> MergeResult<Mapping> {
        let mut merged = base.clone();
        for (key, over_value) in over.iter() {
            let value = match base.get(key) {
                Some(base_value) => {
                    self.merge_values(base_value, over_value, &path.key(key), document)?
                }
                None => self.normalize(over_value),
            };
            merged.insert(key, value);
        }
        Ok(merged)
    }

    fn merge_values(
        &self,
        base: &Node,
        over: &Node,
        path: &KeyPath,
        document: usize,
    ) -> MergeResult<Node> {
        match (base, over) {
            (_, Node::Null) => Ok(base.clone()),
            (Node::Null, _) => Ok(self.normalize(over)),
            (Node::Mapping(b), Node::Mapping(o)) => {
                Ok(Node::Mapping(self.merge_mapping_at(b, o, path, document)?))
            }
            (Node::Sequence(b), Node::Sequence(o)) if path.is_version_list() => {
                Ok(Node::Sequence(self.merge_versions_at(b, o, path, document)?))
            }
            (Node::Sequence(b), Node::Sequence(o)) => Ok(Node::Sequence(self.reconcile(b, o))),
            (b, o) if b.shape() == Shape::Scalar && o.shape() == Shape::Scalar => Ok(o.clone()),
            (b, o) => Err(MergeError::ShapeMismatch {
                document,
                path: path.to_string(),
                base: b.shape(),
                over: o.shape(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: Vec<(&str, Node)>) -> Mapping {
        pairs.into_iter().collect()
    }

    #[test]
    fn scalar_override_wins() {
        let base = map(vec![("install_command", Node::string("odoo2"))]);
        let over = map(vec![("install_command", Node::string("odoo"))]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        assert_eq!(merged.get("install_command"), Some(&Node::string("odoo")));
    }

    #[test]
    fn scalars_of_different_kinds_override() {
        let base = map(vec![("workers", Node::Integer(2))]);
        let over = map(vec![("workers", Node::string("auto"))]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        assert_eq!(merged.get("workers"), Some(&Node::string("auto")));
    }

    #[test]
    fn absent_key_keeps_base() {
        let base = map(vec![
            ("pre", Node::strings(["a"])),
            ("post", Node::strings(["b"])),
        ]);
        let over = map(vec![("post", Node::strings(["c"]))]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        assert_eq!(merged.get("pre"), Some(&Node::strings(["a"])));
        assert_eq!(merged.get("post"), Some(&Node::strings(["b", "c"])));
    }

    #[test]
    fn key_order_is_base_then_new() {
        let base = map(vec![("b", Node::Integer(1)), ("a", Node::Integer(2))]);
        let over = map(vec![("c", Node::Integer(3)), ("b", Node::Integer(4))]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(merged.get("b"), Some(&Node::Integer(4)));
    }

    #[test]
    fn nested_mappings_recurse() {
        let base = map(vec![(
            "addons",
            Node::Mapping(map(vec![
                ("install", Node::strings(["crm"])),
                ("upgrade", Node::strings(["note"])),
            ])),
        )]);
        let over = map(vec![(
            "addons",
            Node::Mapping(map(vec![
                ("install", Node::strings(["account", "crm"])),
                ("upgrade", Node::strings(["note", "hr"])),
            ])),
        )]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        let addons = merged.get("addons").unwrap().as_mapping().unwrap();
        assert_eq!(addons.get("install"), Some(&Node::strings(["crm", "account"])));
        assert_eq!(addons.get("upgrade"), Some(&Node::strings(["note", "hr"])));
    }

    #[test]
    fn override_only_key_is_normalized() {
        let base = Mapping::new();
        let over = map(vec![("install", Node::strings(["DEL->{crm}", "sale"]))]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        assert_eq!(merged.get("install"), Some(&Node::strings(["sale"])));
    }

    #[test]
    fn null_override_keeps_base() {
        let base = map(vec![("install", Node::strings(["crm"]))]);
        let over = map(vec![("install", Node::Null)]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        assert_eq!(merged.get("install"), Some(&Node::strings(["crm"])));
    }

    #[test]
    fn null_base_takes_override() {
        let base = map(vec![("addons", Node::Null)]);
        let over = map(vec![(
            "addons",
            Node::Mapping(map(vec![("install", Node::strings(["DEL->{x}", "crm"]))])),
        )]);
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        let addons = merged.get("addons").unwrap().as_mapping().unwrap();
        assert_eq!(addons.get("install"), Some(&Node::strings(["crm"])));
    }

    #[test]
    fn shape_mismatch_reports_path() {
        let base = map(vec![(
            "operations",
            Node::Mapping(map(vec![("pre", Node::strings(["a"]))])),
        )]);
        let over = map(vec![(
            "operations",
            Node::Mapping(map(vec![("pre", Node::string("a"))])),
        )]);
        let err = Merger::default().merge_mappings(&base, &over, 3).unwrap_err();
        assert_eq!(
            err,
            MergeError::ShapeMismatch {
                document: 3,
                path: "operations.pre".into(),
                base: Shape::Sequence,
                over: Shape::Scalar,
            }
        );
        assert_eq!(err.document(), Some(3));
    }

    #[test]
    fn mapping_against_sequence_fails() {
        let base = map(vec![("addons", Node::Mapping(Mapping::new()))]);
        let over = map(vec![("addons", Node::strings(["crm"]))]);
        let err = Merger::default().merge_mappings(&base, &over, 1).unwrap_err();
        assert!(matches!(
            err,
            MergeError::ShapeMismatch {
                base: Shape::Mapping,
                over: Shape::Sequence,
                ..
            }
        ));
    }

    #[test]
    fn identical_mappings_are_unchanged() {
        let base = map(vec![
            ("pre", Node::strings(["a", "b"])),
            ("opts", Node::Mapping(map(vec![("x", Node::Bool(true))]))),
        ]);
        let merged = Merger::default().merge_mappings(&base, &base, 1).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = map(vec![("install", Node::strings(["crm"]))]);
        let over = map(vec![("install", Node::strings(["DEL->{crm}"]))]);
        let before = (base.clone(), over.clone());
        let merged = Merger::default().merge_mappings(&base, &over, 1).unwrap();
        assert_eq!(merged.get("install"), Some(&Node::Sequence(vec![])));
        assert_eq!((base, over), before);
    }
}
