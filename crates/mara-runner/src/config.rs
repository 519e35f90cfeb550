use serde::{Deserialize, Serialize};

/// Configuration for building and running a step plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Mode whose extra operations and addons are folded into each version.
    pub mode: Option<String>,
    /// Command used to install and upgrade addons. The manifest's
    /// `options.install_command` takes precedence.
    pub install_command: String,
    /// Extra arguments appended to addon commands. The manifest's
    /// `options.install_args` takes precedence.
    pub install_args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mode: None,
            install_command: "odoo".into(),
            install_args: Vec::new(),
        }
    }
}

impl RunnerConfig {
    /// A configuration that selects `mode`.
    pub fn with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: Some(mode.into()),
            ..Default::default()
        }
    }
}
