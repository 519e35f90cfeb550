use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mara_loader::Format;

#[derive(Parser)]
#[command(
    name = "maraplus",
    about = "Merge layered migration manifests and preview their steps",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./maraplus.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge a manifest with its extra manifests and print the result
    Merge(MergeArgs),
    /// Show the steps a merged manifest would run, without running them
    Plan(PlanArgs),
}

#[derive(Args)]
pub struct Sources {
    /// Base manifest
    pub manifest: PathBuf,
    /// Manifest merged on top of the base, in the order given
    #[arg(short = 'e', long = "extra-manifest")]
    pub extra_manifests: Vec<PathBuf>,
}

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub sources: Sources,
    #[arg(long)]
    pub format: Option<OutputFormat>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub sources: Sources,
    /// Mode whose extra operations and addons are included
    #[arg(long)]
    pub mode: Option<String>,
}
