//! Ordered step plans.
//!
//! Each version contributes, in order: its `pre` operations, its addon
//! actions (`install` then `upgrade`), and its `post` operations. A selected
//! mode adds its own operations after the version's operations of the same
//! phase and unions its addons into the version's addon lists.

use std::fmt;
use std::ops::Range;

use tracing::warn;

use crate::config::RunnerConfig;
use crate::manifest::{Manifest, Section, VersionSteps};

pub const PRE: &str = "pre";
pub const POST: &str = "post";
pub const INSTALL: &str = "install";
pub const UPGRADE: &str = "upgrade";

const INSTALL_COMMAND_OPTION: &str = "install_command";
const INSTALL_ARGS_OPTION: &str = "install_args";

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// One thing the runner has to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A shell command of an operation phase.
    Operation {
        version: String,
        phase: String,
        command: String,
    },
    /// Installing or upgrading a set of addons.
    Addons {
        version: String,
        action: String,
        addons: Vec<String>,
        command_line: Vec<String>,
    },
}

impl Step {
    pub fn version(&self) -> &str {
        match self {
            Step::Operation { version, .. } | Step::Addons { version, .. } => version,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Operation { phase, command, .. } => write!(f, "{phase}: {command}"),
            Step::Addons {
                action,
                addons,
                command_line,
                ..
            } => write!(
                f,
                "{action}: {} ({})",
                addons.join(", "),
                command_line.join(" ")
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// The full, ordered list of steps for a manifest.
///
/// Steps are grouped by the position of their version entry, since two
/// distinct version ids can render to the same text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
    bounds: Vec<Range<usize>>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps of the version entry at `index` in the manifest.
    pub fn version_steps(&self, index: usize) -> &[Step] {
        self.bounds
            .get(index)
            .map(|range| &self.steps[range.clone()])
            .unwrap_or(&[])
    }
}

/// Build the step plan for a manifest.
pub fn build_plan(manifest: &Manifest, config: &RunnerConfig) -> Plan {
    let command = AddonCommand::resolve(manifest, config);
    let mut steps = Vec::new();
    let mut bounds = Vec::with_capacity(manifest.versions.len());
    for version in &manifest.versions {
        let start = steps.len();
        let mode = config.mode.as_deref().and_then(|m| version.mode(m));
        warn_unknown_phases(version, &version.section);
        if let Some(section) = mode {
            warn_unknown_phases(version, section);
        }

        push_operations(&mut steps, version, mode, PRE);
        for action in addon_actions(&version.section, mode) {
            let addons = union(version.section.addons(&action), mode.map(|s| s.addons(&action)));
            if addons.is_empty() {
                continue;
            }
            let Some(command_line) = command.line(&action, &addons) else {
                warn!(version = %version.version, %action, "unknown addon action; skipped");
                continue;
            };
            steps.push(Step::Addons {
                version: version.version.clone(),
                action,
                addons,
                command_line,
            });
        }
        push_operations(&mut steps, version, mode, POST);
        bounds.push(start..steps.len());
    }
    Plan { steps, bounds }
}

fn push_operations(
    steps: &mut Vec<Step>,
    version: &VersionSteps,
    mode: Option<&Section>,
    phase: &str,
) {
    let own = version.section.operations(phase).iter();
    let extra = mode.map(|s| s.operations(phase)).unwrap_or(&[]).iter();
    for command in own.chain(extra) {
        steps.push(Step::Operation {
            version: version.version.clone(),
            phase: phase.to_string(),
            command: command.clone(),
        });
    }
}

fn warn_unknown_phases(version: &VersionSteps, section: &Section) {
    for (phase, _) in &section.operations {
        if phase != PRE && phase != POST {
            warn!(version = %version.version, %phase, "unknown operation phase; skipped");
        }
    }
}

/// `install`, `upgrade`, then any other action in document order.
fn addon_actions(section: &Section, mode: Option<&Section>) -> Vec<String> {
    let mut actions = vec![INSTALL.to_string(), UPGRADE.to_string()];
    let declared = section
        .addons
        .iter()
        .chain(mode.map(|s| s.addons.as_slice()).unwrap_or(&[]));
    for (action, _) in declared {
        if !actions.contains(action) {
            actions.push(action.clone());
        }
    }
    actions
}

fn union(own: &[String], extra: Option<&[String]>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(own.len());
    for name in own.iter().chain(extra.unwrap_or(&[])) {
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    merged
}

struct AddonCommand {
    program: String,
    args: Vec<String>,
}

impl AddonCommand {
    fn resolve(manifest: &Manifest, config: &RunnerConfig) -> Self {
        let program = manifest
            .option(INSTALL_COMMAND_OPTION)
            .unwrap_or_else(|| config.install_command.clone());
        let args = match manifest.option(INSTALL_ARGS_OPTION) {
            Some(args) => args.split_whitespace().map(str::to_string).collect(),
            None => config.install_args.clone(),
        };
        Self { program, args }
    }

    fn line(&self, action: &str, addons: &[String]) -> Option<Vec<String>> {
        let flag = match action {
            INSTALL => "-i",
            UPGRADE => "-u",
            _ => return None,
        };
        let mut line = vec![
            self.program.clone(),
            flag.to_string(),
            addons.join(","),
            "--stop-after-init".to_string(),
        ];
        line.extend(self.args.iter().cloned());
        Some(line)
    }
}
