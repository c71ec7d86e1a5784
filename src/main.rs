//! Ratesim Analyzer CLI
//!
//! Parses ratesim simulation traces and writes section reports,
//! plot series and reusable parsed artifacts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use ratesim_analyzer::commands::{
    execute_analyze, execute_convert, inspect_summary, load_input, validate_args, AnalyzeArgs,
    ConvertArgs,
};
use ratesim_analyzer::utils::config::{
    ParserConfig, ReportConfig, ARTIFACT_VERSION, DEFAULT_PERCENTILES, SERIES_VERSION,
};

/// Ratesim Analyzer - rate and latency analysis for ratesim traces
#[derive(Parser, Debug)]
#[command(name = "ratesim-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a trace or artifact and write the section report
    Analyze {
        /// Input trace (.log, .log.gz) or artifact (.dat, .dat.gz)
        input: PathBuf,

        /// Output path for the section report
        #[arg(short, long, default_value = "report.txt")]
        report: PathBuf,

        /// Output path for plot series JSON (optional)
        #[arg(long)]
        series: Option<PathBuf>,

        /// Save the parsed data as an artifact (.dat or .dat.gz)
        #[arg(short = 'o', long)]
        save: Option<PathBuf>,

        /// Smoothing radius applied to rate series
        #[arg(short, long, default_value = "0")]
        smooth: usize,

        /// Report section as MIN:MAX ticks (repeatable, replaces the defaults)
        #[arg(long = "section", value_parser = parse_section)]
        sections: Vec<(u64, u64)>,

        /// Fail on unrecognized lines in the data section
        #[arg(long)]
        strict: bool,
    },

    /// Parse a raw trace and save it as an artifact
    Convert {
        /// Input trace (.log or .log.gz)
        input: PathBuf,

        /// Output artifact (.dat or .dat.gz)
        output: PathBuf,

        /// Fail on unrecognized lines in the data section
        #[arg(long)]
        strict: bool,
    },

    /// Print a summary of a trace or artifact
    Inspect {
        /// Input trace or artifact
        input: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            report,
            series,
            save,
            smooth,
            sections,
            strict,
        } => {
            let mut report_config = ReportConfig::new();
            if !sections.is_empty() {
                report_config = report_config.with_sections(sections);
            }

            let args = AnalyzeArgs {
                input,
                report,
                series,
                save,
                smooth,
                parser: ParserConfig::new().with_strict(strict),
                report_config,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Convert {
            input,
            output,
            strict,
        } => {
            execute_convert(ConvertArgs {
                input,
                output,
                parser: ParserConfig::new().with_strict(strict),
            })?;
        }

        Commands::Inspect { input } => {
            let raw = load_input(&input, &ParserConfig::new())
                .context("Failed to load input for inspection")?;
            println!("{}", inspect_summary(&raw));
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Parse a `MIN:MAX` section argument
fn parse_section(value: &str) -> Result<(u64, u64), String> {
    let (min, max) = value
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{}'", value))?;
    let min = min.trim().parse::<u64>().map_err(|e| e.to_string())?;
    let max = max.trim().parse::<u64>().map_err(|e| e.to_string())?;
    Ok((min, max))
}

/// Display version information
fn display_version() {
    println!("Ratesim Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Artifact Schema: v{}", ARTIFACT_VERSION);
    println!("Plot Series Schema: v{}", SERIES_VERSION);
    println!(
        "Reported percentiles: {}",
        DEFAULT_PERCENTILES
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
