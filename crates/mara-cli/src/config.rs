use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mara_loader::Format;
use mara_merge::{MarkerSyntax, MergeConfig};
use mara_runner::RunnerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "maraplus.toml";

/// Settings read from a `maraplus.toml` file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Manifests merged before any given on the command line. Relative paths
    /// are resolved against the config file's directory.
    pub extra_manifests: Vec<PathBuf>,
    pub format: Option<Format>,
    pub mode: Option<String>,
    pub install_command: Option<String>,
    pub install_args: Option<Vec<String>>,
    pub deletion_marker: MarkerSyntax,
}

impl FileConfig {
    /// Read `explicit` if given, else `maraplus.toml` in `dir` if it exists.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let default = dir.join(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        if let Some(base) = path.parent() {
            for extra in &mut config.extra_manifests {
                if extra.is_relative() {
                    *extra = base.join(&*extra);
                }
            }
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn merge_config(&self) -> MergeConfig {
        MergeConfig {
            deletion_marker: self.deletion_marker.clone(),
        }
    }

    /// Runner settings, with `mode` from the command line taking precedence.
    pub fn runner_config(&self, mode: Option<String>) -> RunnerConfig {
        let defaults = RunnerConfig::default();
        RunnerConfig {
            mode: mode.or_else(|| self.mode.clone()),
            install_command: self
                .install_command
                .clone()
                .unwrap_or(defaults.install_command),
            install_args: self.install_args.clone().unwrap_or(defaults.install_args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load(None, dir.path()).unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.merge_config(), MergeConfig::default());
    }

    #[test]
    fn default_file_is_discovered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "extra_manifests = [\"local.yml\"]\nformat = \"json\"\nmode = \"demo\"\n",
        )
        .unwrap();
        let config = FileConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.extra_manifests, vec![dir.path().join("local.yml")]);
        assert_eq!(config.format, Some(Format::Json));
        assert_eq!(config.mode.as_deref(), Some("demo"));
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(FileConfig::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn deletion_marker_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ci.toml");
        fs::write(&path, "[deletion_marker]\nprefix = \"REMOVE(\"\nsuffix = \")\"\n").unwrap();
        let config = FileConfig::load(Some(&path), dir.path()).unwrap();
        assert_eq!(config.deletion_marker, MarkerSyntax::new("REMOVE(", ")"));
    }

    #[test]
    fn invalid_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "extra_manifests = 3\n").unwrap();
        let err = FileConfig::read(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn runner_config_precedence() {
        let config = FileConfig {
            mode: Some("demo".into()),
            install_command: Some("odoo-bin".into()),
            install_args: Some(vec!["--workers=0".into()]),
            ..Default::default()
        };
        let runner = config.runner_config(None);
        assert_eq!(runner.mode.as_deref(), Some("demo"));
        assert_eq!(runner.install_command, "odoo-bin");
        assert_eq!(runner.install_args, vec!["--workers=0"]);

        let runner = config.runner_config(Some("prod".into()));
        assert_eq!(runner.mode.as_deref(), Some("prod"));
        assert_eq!(FileConfig::default().runner_config(None), RunnerConfig::default());
    }
}
