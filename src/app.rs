//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - scans record files and runs curve fitting
//! - prints reports
//! - writes the compiled document

use clap::Parser;

use crate::cli::{Cli, Command, CompareArgs, CompiledArgs, ProcessArgs, RenameArgs};
use crate::domain::{FitConfig, SamplePoint};
use crate::error::AppError;
use crate::fit::{MAX_DEGREE, MIN_DEGREE};

pub mod pipeline;

/// Entry point for the `rank` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Process(args) => handle_process(args),
        Command::Validate(args) => handle_validate(args),
        Command::Predictions(args) => handle_predictions(args),
        Command::Trend(args) => handle_trend(args),
        Command::Compare(args) => handle_compare(args),
        Command::Rename(args) => handle_rename(args),
    }
}

fn handle_process(args: ProcessArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_process(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &run.models,
            &run.skipped,
            &run.warnings,
            run.files_read,
            &config
        )
    );

    crate::io::write_compiled(&config.output_path, &run.models)?;
    println!("Result saved to {}", config.output_path.display());
    println!("Processed datasets: {}", run.models.len());

    Ok(())
}

fn handle_validate(args: CompiledArgs) -> Result<(), AppError> {
    let models = crate::io::read_compiled(&args.compiled)?;
    println!("{}", crate::report::format_validation(&models));
    Ok(())
}

fn handle_predictions(args: CompiledArgs) -> Result<(), AppError> {
    let models = crate::io::read_compiled(&args.compiled)?;
    println!("{}", crate::report::format_predictions(&models));
    Ok(())
}

fn handle_trend(args: CompiledArgs) -> Result<(), AppError> {
    let models = crate::io::read_compiled(&args.compiled)?;
    println!("{}", crate::report::format_trend(&models));
    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let models = crate::io::read_compiled(&args.compiled)?;
    let model = models.get(&args.dataset).ok_or_else(|| {
        AppError::input(format!(
            "Dataset {} not found in '{}'.",
            args.dataset,
            args.compiled.display()
        ))
    })?;

    // Refit from the stored points so every candidate degree starts from the
    // same inputs the original model saw.
    let points: Vec<SamplePoint> = model
        .data
        .iter()
        .map(|p| SamplePoint {
            score: p.score,
            percent: p.percent,
        })
        .collect();

    let comparisons = crate::report::compare_degrees(&points, MIN_DEGREE..=MAX_DEGREE, args.score)?;
    println!(
        "{}",
        crate::report::format_degree_comparison(args.dataset, points.len(), args.score, &comparisons)
    );

    Ok(())
}

fn handle_rename(args: RenameArgs) -> Result<(), AppError> {
    let renamed = crate::io::rename_dataset_files(&args.data_dir, args.dataset)?;
    for r in &renamed {
        println!("{} -> {}", r.from, r.to);
    }
    println!("\nRenamed {} files.", renamed.len());
    Ok(())
}

pub fn fit_config_from_args(args: &ProcessArgs) -> FitConfig {
    FitConfig {
        data_dir: args.data_dir.clone(),
        output_path: args.out.clone(),
        degree: args.degree,
        reference_score: args.score,
    }
}
