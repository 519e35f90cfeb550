use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use mara_loader::{loader_for_path, Format};
use mara_merge::Merger;
use mara_runner::{DryRunRunner, Manifest, Runner};
use mara_types::Document;
use tracing::debug;

use crate::cli::*;
use crate::config::FileConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = env::current_dir().context("failed to read the current directory")?;
    let config = FileConfig::load(cli.config.as_deref(), &cwd)?;
    match cli.command {
        Command::Merge(args) => cmd_merge(args, &config),
        Command::Plan(args) => cmd_plan(args, &config),
    }
}

fn cmd_merge(args: MergeArgs, config: &FileConfig) -> anyhow::Result<()> {
    let paths = manifest_paths(&args.sources, config);
    let merged = merge_paths(&paths, config)?;
    let format = args
        .format
        .map(Format::from)
        .or(config.format)
        .unwrap_or_default();
    let text = format.emit(&merged)?;

    match args.output {
        Some(output) => {
            fs::write(&output, &text)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "{} Merged {} manifests into {}",
                "✓".green().bold(),
                paths.len(),
                output.display().to_string().bold()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs, config: &FileConfig) -> anyhow::Result<()> {
    let paths = manifest_paths(&args.sources, config);
    let merged = merge_paths(&paths, config)?;
    let manifest = Manifest::from_document(&merged).context("merged manifest is not runnable")?;

    let runner_config = config.runner_config(args.mode);
    let mode = runner_config.mode.clone();
    let mut runner = DryRunRunner::new(io::stdout().lock(), runner_config);
    let report = runner.run(&manifest)?;
    drop(runner);

    let mode = mode.map(|m| format!(" (mode {})", m.yellow())).unwrap_or_default();
    println!(
        "{} {} versions, {} steps{}",
        "✓".green().bold(),
        report.versions.len().to_string().bold(),
        report.steps.to_string().bold(),
        mode
    );
    Ok(())
}

/// The base manifest, then the config file's extras, then the command line's.
fn manifest_paths(sources: &Sources, config: &FileConfig) -> Vec<PathBuf> {
    std::iter::once(&sources.manifest)
        .chain(&config.extra_manifests)
        .chain(&sources.extra_manifests)
        .cloned()
        .collect()
}

fn load_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    paths
        .iter()
        .map(|path| {
            loader_for_path(path)
                .load_path(path)
                .with_context(|| format!("failed to load manifest {}", path.display()))
        })
        .collect()
}

fn merge_paths(paths: &[PathBuf], config: &FileConfig) -> anyhow::Result<Document> {
    let merger = Merger::new(config.merge_config())?;
    let documents = load_documents(paths)?;
    debug!(manifests = documents.len(), "loaded manifests");
    merger.merge_documents(&documents).map_err(|err| {
        let culprit = err.document().and_then(|index| paths.get(index));
        match culprit {
            Some(path) => anyhow::Error::new(err).context(merge_failure(path)),
            None => anyhow::Error::new(err),
        }
    })
}

fn merge_failure(path: &Path) -> String {
    format!("failed to merge manifest {}", path.display())
}
