//! The runner seam and the dry-run runner.

use std::io::Write;

use tracing::{debug, info};

use crate::config::RunnerConfig;
use crate::error::RunnerResult;
use crate::manifest::Manifest;
use crate::plan::{build_plan, Step};

/// Consumes a merged manifest.
pub trait Runner {
    fn run(&mut self, manifest: &Manifest) -> RunnerResult<RunReport>;
}

/// What a run went through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Versions visited, in order.
    pub versions: Vec<String>,
    /// Steps handled across all versions.
    pub steps: usize,
}

/// Writes the step plan instead of executing it.
pub struct DryRunRunner<W: Write> {
    out: W,
    config: RunnerConfig,
}

impl<W: Write> DryRunRunner<W> {
    pub fn new(out: W, config: RunnerConfig) -> Self {
        Self { out, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Runner for DryRunRunner<W> {
    fn run(&mut self, manifest: &Manifest) -> RunnerResult<RunReport> {
        let plan = build_plan(manifest, &self.config);
        let mut report = RunReport::default();

        for (index, version) in manifest.versions.iter().enumerate() {
            writeln!(self.out, "version {}", version.version)?;
            let steps = plan.version_steps(index);
            for step in steps {
                match step {
                    Step::Operation { phase, command, .. } => {
                        writeln!(self.out, "  [{phase}] {command}")?;
                    }
                    Step::Addons {
                        action,
                        command_line,
                        ..
                    } => {
                        writeln!(self.out, "  [{action}] {}", command_line.join(" "))?;
                    }
                }
            }
            let count = steps.len();
            if count == 0 {
                writeln!(self.out, "  (nothing to do)")?;
            }
            debug!(version = %version.version, steps = count, "planned version");
            report.versions.push(version.version.clone());
            report.steps += count;
        }
        self.out.flush()?;

        info!(
            versions = report.versions.len(),
            steps = report.steps,
            "dry run complete"
        );
        Ok(report)
    }
}
