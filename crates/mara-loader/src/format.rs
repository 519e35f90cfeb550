use std::fmt;
use std::path::Path;

use mara_types::Document;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};
use crate::json::JsonLoader;
use crate::traits::Loader;
use crate::yaml::YamlLoader;

/// Supported manifest text formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// Guess the format from a file extension. Anything that is not
    /// `.json` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    /// A loader for this format.
    pub fn loader(self) -> Box<dyn Loader> {
        match self {
            Format::Yaml => Box::new(YamlLoader),
            Format::Json => Box::new(JsonLoader),
        }
    }

    /// Write a document as text in this format.
    pub fn emit(self, document: &Document) -> LoadResult<String> {
        match self {
            Format::Yaml => to_yaml_string(document),
            Format::Json => to_json_string(document),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "yaml"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// Pick a loader from a file extension.
pub fn loader_for_path(path: &Path) -> Box<dyn Loader> {
    Format::from_path(path).loader()
}

/// Emit a document as YAML.
pub fn to_yaml_string(document: &Document) -> LoadResult<String> {
    serde_yaml::to_string(document).map_err(|e| LoadError::Emit {
        format: Format::Yaml.to_string(),
        message: e.to_string(),
    })
}

/// Emit a document as pretty-printed JSON.
pub fn to_json_string(document: &Document) -> LoadResult<String> {
    serde_json::to_string_pretty(document).map_err(|e| LoadError::Emit {
        format: Format::Json.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("migration.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("migration.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("extra.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("no_extension")), Format::Yaml);
    }

    #[test]
    fn loader_matches_format() {
        assert_eq!(loader_for_path(Path::new("a.json")).format(), Format::Json);
        assert_eq!(loader_for_path(Path::new("a.yml")).format(), Format::Yaml);
    }

    #[test]
    fn yaml_emit_reloads_to_same_document() {
        let text = "migration:\n  options:\n    install_command: odoo\n  versions:\n  - version: setup\n    addons:\n      install:\n      - crm\n";
        let doc = YamlLoader.load_str(text, "test").unwrap();
        let emitted = Format::Yaml.emit(&doc).unwrap();
        let reloaded = YamlLoader.load_str(&emitted, "emitted").unwrap();
        assert_eq!(doc, reloaded);
    }

    #[test]
    fn json_emit_keeps_key_order() {
        let doc = YamlLoader
            .load_str("migration:\n  versions: []\n  options:\n    a: 1\n", "test")
            .unwrap();
        let json = Format::Json.emit(&doc).unwrap();
        let versions = json.find("versions").unwrap();
        let options = json.find("options").unwrap();
        assert!(versions < options);
    }
}
