//! JSON manifests, mostly produced by other tools.

use mara_types::{Document, Mapping, Node};
use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::format::Format;
use crate::traits::Loader;
use crate::tree::into_document;

/// Loads JSON manifests with `serde_json`, keeping object key order.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    fn format(&self) -> Format {
        Format::Json
    }

    fn load_str(&self, text: &str, origin: &str) -> LoadResult<Document> {
        if text.trim().is_empty() {
            return Err(LoadError::Empty {
                origin: origin.to_string(),
            });
        }
        let value: Value = serde_json::from_str(text).map_err(|source| LoadError::Json {
            origin: origin.to_string(),
            source,
        })?;
        let document = into_document(convert(value, origin)?, origin)?;
        debug!(origin, keys = document.root().len(), "loaded JSON manifest");
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
        Value::Array(items) => Node::Sequence(
            items
                .into_iter()
                .map(|item| convert(item, origin))
                .collect::<LoadResult<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = Mapping::new();
            for (key, value) in map {
                out.insert(key, convert(value, origin)?);
            }
            Node::Mapping(out)
        }
    })
}
