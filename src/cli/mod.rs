//! Command-line parsing for the percentile curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "rank",
    version,
    about = "Score-to-percentile polynomial curve fitter"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan record files, fit every dataset, and write the compiled document.
    Process(ProcessArgs),
    /// Recompute accuracy of stored coefficients against stored points.
    Validate(CompiledArgs),
    /// Print per-point predictions vs real values for every dataset.
    Predictions(CompiledArgs),
    /// Print reference-percentile dynamics across datasets.
    Trend(CompiledArgs),
    /// Refit one dataset at several degrees and compare accuracy.
    Compare(CompareArgs),
    /// Rename one dataset's record files to their display names.
    Rename(RenameArgs),
}

/// Options for the full fitting pipeline.
#[derive(Debug, Parser, Clone)]
pub struct ProcessArgs {
    /// Directory containing numeric dataset subdirectories of record JSON files.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Output path for the compiled document.
    #[arg(short = 'o', long, default_value = "compiled.json")]
    pub out: PathBuf,

    /// Fixed polynomial degree (default: adaptive per dataset size).
    #[arg(short = 'd', long)]
    pub degree: Option<usize>,

    /// Score at which each model's summary percentile is evaluated.
    #[arg(long, default_value_t = 60000.0)]
    pub score: f64,
}

/// Options for commands that reload a compiled document.
#[derive(Debug, Parser, Clone)]
pub struct CompiledArgs {
    /// Path to a previously compiled document.
    #[arg(long, default_value = "compiled.json")]
    pub compiled: PathBuf,
}

/// Options for the degree comparison report.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// Dataset number to compare.
    pub dataset: u32,

    /// Path to a previously compiled document (source of the dataset's points).
    #[arg(long, default_value = "compiled.json")]
    pub compiled: PathBuf,

    /// Score at which each candidate model is sampled.
    #[arg(long, default_value_t = 60000.0)]
    pub score: f64,
}

/// Options for record renaming.
#[derive(Debug, Parser, Clone)]
pub struct RenameArgs {
    /// Dataset number whose files to rename.
    pub dataset: u32,

    /// Directory containing numeric dataset subdirectories.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}
