//! YAML manifests, the format authors normally write.

use mara_types::{Document, Mapping, Node};
use serde_yaml::Value;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::format::Format;
use crate::traits::Loader;
use crate::tree::{into_document, key_text};

/// Loads YAML manifests with `serde_yaml`.
///
/// Tags are dropped in favour of the value they wrap. Scalar keys that are
/// not strings (`1`, `true`, `0.1`) are stringified.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlLoader;

impl Loader for YamlLoader {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn load_str(&self, text: &str, origin: &str) -> LoadResult<Document> {
        if text.trim().is_empty() {
            return Err(LoadError::Empty {
                origin: origin.to_string(),
            });
        }
        let value: Value = serde_yaml::from_str(text).map_err(|source| LoadError::Yaml {
            origin: origin.to_string(),
            source,
        })?;
        let document = into_document(convert(value, origin)?, origin)?;
        debug!(origin, keys = document.root().len(), "loaded YAML manifest");
        Ok(document)
    }
}

fn convert(value: Value, origin: &str) -> LoadResult<Node> {
    Ok(match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Integer(i)
            } else if n.is_u64() {
                return Err(LoadError::NumberOutOfRange {
                    origin: origin.to_string(),
                    value: n.to_string(),
                });
            } else {
                Node::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Node::String(s),
        Value::Sequence(items) => Node::Sequence(
            items
                .into_iter()
                .map(|item| convert(item, origin))
                .collect::<LoadResult<_>>()?,
        ),
        Value::Mapping(map) => {
            let mut out = Mapping::new();
            for (key, value) in map {
                let key = key_text(convert(key, origin)?, origin)?;
                out.insert(key, convert(value, origin)?);
            }
            Node::Mapping(out)
        }
        Value::Tagged(tagged) => convert(tagged.value, origin)?,
    })
}
