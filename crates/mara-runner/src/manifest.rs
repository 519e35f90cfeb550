//! Typed, read-only view of a merged manifest.

use mara_types::{display_version, keys, split_version_entry, Document, Mapping, Node};

use crate::error::{RunnerError, RunnerResult};

/// Named lists of strings, in document order (phase → commands,
/// action → addon names).
pub type NamedLists = Vec<(String, Vec<String>)>;

/// A merged manifest, ready to be turned into steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    pub options: Mapping,
    pub versions: Vec<VersionSteps>,
}

/// Everything one version entry asks for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VersionSteps {
    pub version: String,
    pub section: Section,
    /// Mode-specific sections, e.g. extra demo data for a `demo` mode.
    pub modes: Vec<(String, Section)>,
}

/// Operations and addon actions of a version or of one of its modes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub operations: NamedLists,
    pub addons: NamedLists,
}

impl Manifest {
    /// Read the typed view from a document.
    pub fn from_document(document: &Document) -> RunnerResult<Self> {
        document.validate()?;
        let options = document.options()?.cloned().unwrap_or_default();
        let versions = document
            .versions()?
            .iter()
            .map(VersionSteps::from_entry)
            .collect::<RunnerResult<_>>()?;
        Ok(Self { options, versions })
    }

    /// The first version entry whose id renders as `id`. Ids of different
    /// kinds (`1` and `'1'`) render alike; use `versions` to tell them apart.
    pub fn version(&self, id: &str) -> Option<&VersionSteps> {
        self.versions.iter().find(|v| v.version == id)
    }

    /// A scalar option rendered as text.
    pub fn option(&self, key: &str) -> Option<String> {
        self.options.get(key).and_then(Node::scalar_text)
    }
}

impl VersionSteps {
    fn from_entry(entry: &Node) -> RunnerResult<Self> {
        let (map, id) = split_version_entry(entry).map_err(|reason| {
            RunnerError::invalid(&display_version(entry), keys::VERSION, reason)
        })?;
        let version = display_version(id);
        let section = Section::from_mapping(&version, "", map)?;

        let mut modes = Vec::new();
        match map.get(keys::MODES) {
            None | Some(Node::Null) => {}
            Some(Node::Mapping(by_mode)) => {
                for (mode, value) in by_mode.iter() {
                    let prefix = format!("{}.{mode}.", keys::MODES);
                    let section = match value {
                        Node::Null => Section::default(),
                        Node::Mapping(inner) => Section::from_mapping(&version, &prefix, inner)?,
                        other => {
                            return Err(RunnerError::invalid(
                                &version,
                                format!("{}.{mode}", keys::MODES),
                                format!("expected a mapping, found {}", other.shape()),
                            ))
                        }
                    };
                    modes.push((mode.to_string(), section));
                }
            }
            Some(other) => {
                return Err(RunnerError::invalid(
                    &version,
                    keys::MODES,
                    format!("expected a mapping, found {}", other.shape()),
                ))
            }
        }

        Ok(Self {
            version,
            section,
            modes,
        })
    }

    pub fn mode(&self, name: &str) -> Option<&Section> {
        self.modes
            .iter()
            .find(|(mode, _)| mode == name)
            .map(|(_, section)| section)
    }
}

impl Section {
    fn from_mapping(version: &str, prefix: &str, map: &Mapping) -> RunnerResult<Self> {
        let operations_field = format!("{prefix}{}", keys::OPERATIONS);
        let addons_field = format!("{prefix}{}", keys::ADDONS);
        Ok(Self {
            operations: named_lists(version, &operations_field, map.get(keys::OPERATIONS))?,
            addons: named_lists(version, &addons_field, map.get(keys::ADDONS))?,
        })
    }

    /// Commands of an operation phase; empty when the phase is absent.
    pub fn operations(&self, phase: &str) -> &[String] {
        lookup(&self.operations, phase)
    }

    /// Addon names of an action; empty when the action is absent.
    pub fn addons(&self, action: &str) -> &[String] {
        lookup(&self.addons, action)
    }
}

fn lookup<'a>(lists: &'a NamedLists, name: &str) -> &'a [String] {
    lists
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, items)| items.as_slice())
        .unwrap_or(&[])
}

fn named_lists(version: &str, field: &str, node: Option<&Node>) -> RunnerResult<NamedLists> {
    let map = match node {
        None | Some(Node::Null) => return Ok(Vec::new()),
        Some(Node::Mapping(map)) => map,
        Some(other) => {
            return Err(RunnerError::invalid(
                version,
                field,
                format!("expected a mapping, found {}", other.shape()),
            ))
        }
    };

    let mut lists = Vec::with_capacity(map.len());
    for (name, value) in map.iter() {
        let items = match value {
            Node::Null => Vec::new(),
            Node::Sequence(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        RunnerError::invalid(
                            version,
                            format!("{field}.{name}"),
                            format!("expected a string, found {}", item.shape()),
                        )
                    })
                })
                .collect::<RunnerResult<_>>()?,
            other => {
                return Err(RunnerError::invalid(
                    version,
                    format!("{field}.{name}"),
                    format!("expected a sequence, found {}", other.shape()),
                ))
            }
        };
        lists.push((name.to_string(), items));
    }
    Ok(lists)
}

#[cfg(test)]
mod tests {
    use mara_loader::{Loader, YamlLoader};

    use super::*;

    fn manifest(text: &str) -> RunnerResult<Manifest> {
        Manifest::from_document(&YamlLoader.load_str(text, "test").unwrap())
    }

    const MANIFEST: &str = "
migration:
  options:
    install_command: odoo2
  versions:
    - version: setup
      operations:
        pre:
          - echo 'pre-operation'
        post:
          - anthem songs.setup::main
      addons:
        install: [crm, account]
        upgrade: []
      modes:
        demo:
          operations:
            post:
              - anthem songs.demo::main
          addons:
            install: [sale]
    - version: 0.1.0
";

    #[test]
    fn reads_versions_in_order() {
        let manifest = manifest(MANIFEST).unwrap();
        let ids: Vec<&str> = manifest.versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(ids, vec!["setup", "0.1.0"]);
        assert_eq!(manifest.option("install_command").as_deref(), Some("odoo2"));
    }

    #[test]
    fn reads_sections() {
        let manifest = manifest(MANIFEST).unwrap();
        let setup = manifest.version("setup").unwrap();
        assert_eq!(setup.section.operations("pre"), ["echo 'pre-operation'"]);
        assert_eq!(setup.section.addons("install"), ["crm", "account"]);
        assert!(setup.section.addons("upgrade").is_empty());
        assert!(setup.section.addons("missing").is_empty());

        let demo = setup.mode("demo").unwrap();
        assert_eq!(demo.operations("post"), ["anthem songs.demo::main"]);
        assert_eq!(demo.addons("install"), ["sale"]);
        assert!(setup.mode("prod").is_none());
    }

    #[test]
    fn empty_version_entry() {
        let manifest = manifest(MANIFEST).unwrap();
        let version = manifest.version("0.1.0").unwrap();
        assert_eq!(version.section, Section::default());
        assert!(version.modes.is_empty());
    }

    #[test]
    fn non_string_command_rejected() {
        let err = manifest(
            "migration:\n  versions:\n    - version: setup\n      operations:\n        pre: [[nested]]\n",
        )
        .unwrap_err();
        match err {
            RunnerError::InvalidEntry { version, field, .. } => {
                assert_eq!(version, "setup");
                assert_eq!(field, "operations.pre");
            }
            other => panic!("expected InvalidEntry, got {other:?}"),
        }
    }

    #[test]
    fn mode_field_names_are_qualified() {
        let err = manifest(
            "migration:\n  versions:\n    - version: setup\n      modes:\n        demo:\n          addons:\n            install: crm\n",
        )
        .unwrap_err();
        match err {
            RunnerError::InvalidEntry { field, .. } => assert_eq!(field, "modes.demo.addons.install"),
            other => panic!("expected InvalidEntry, got {other:?}"),
        }
    }

    #[test]
    fn malformed_document_rejected() {
        let err = manifest("migration:\n  options: {}\n").unwrap_err();
        assert!(matches!(err, RunnerError::Document(_)));
    }
}
