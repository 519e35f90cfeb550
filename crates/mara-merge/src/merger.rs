use crate::config::MergeConfig;
use crate::error::MergeResult;

/// The merge engine.
///
/// A `Merger` holds only configuration. Every operation reads its inputs by
/// reference and returns freshly allocated output, so one engine can serve
/// any number of merges, from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Merger {
    pub(crate) config: MergeConfig,
}

impl Merger {
    /// Create an engine with a validated configuration.
    pub fn new(config: MergeConfig) -> MergeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }
}
