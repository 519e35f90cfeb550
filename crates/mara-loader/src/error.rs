use std::path::PathBuf;

use mara_types::Shape;

/// Errors from loading or emitting manifest documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source contained no document at all.
    #[error("{origin}: empty manifest")]
    Empty { origin: String },

    /// The YAML text could not be parsed.
    #[error("{origin}: invalid YAML: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The JSON text could not be parsed.
    #[error("{origin}: invalid JSON: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document root is not a mapping.
    #[error("{origin}: document root must be a mapping, found {found}")]
    RootNotMapping { origin: String, found: Shape },

    /// A mapping key is a sequence or mapping.
    #[error("{origin}: unsupported {shape} used as a mapping key")]
    UnsupportedKey { origin: String, shape: Shape },

    /// A number does not fit the document model.
    #[error("{origin}: number out of range: {value}")]
    NumberOutOfRange { origin: String, value: String },

    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be written back to text.
    #[error("failed to emit {format}: {message}")]
    Emit { format: String, message: String },
}

/// Result alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
