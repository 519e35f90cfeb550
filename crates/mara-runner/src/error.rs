use mara_types::DocumentError;

/// Errors produced while reading or running a merged manifest.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The manifest lacks the required structure.
    #[error("invalid manifest: {0}")]
    Document(#[from] DocumentError),

    /// An operation or addon list holds something other than strings.
    #[error("version '{version}': invalid '{field}': {reason}")]
    InvalidEntry {
        version: String,
        field: String,
        reason: String,
    },

    /// Writing runner output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    pub(crate) fn invalid(
        version: &str,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEntry {
            version: version.to_string(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for runner results.
pub type RunnerResult<T> = Result<T, RunnerError>;
