//! Analyze and convert command implementations.
//!
//! The analyze command:
//! 1. Loads the input (parsing a raw trace or reading an artifact)
//! 2. Optionally saves the parsed data as an artifact
//! 3. Computes section statistics and writes the report
//! 4. Optionally exports plot series

use super::models::{AnalyzeArgs, ConvertArgs};
use super::utils::load_input;
use crate::output::{build_report, build_series, save, write_report, write_series, InputKind};
use crate::parser::parse_trace_file;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/4: Loading input...");
    let raw = load_input(&args.input, &args.parser)?;

    if let Some(path) = &args.save {
        info!("Step 2/4: Saving artifact...");
        save(&raw, path).context("Failed to save artifact")?;
        info!("✓ Artifact written to: {}", path.display());
    } else {
        info!("Step 2/4: Skipping artifact (not requested)");
    }

    info!("Step 3/4: Computing section report...");
    let sections = build_report(&raw, &args.report_config).context("Failed to compute report")?;
    for section in &sections {
        debug!(
            "  Section #{} [{}, {}]: overhead {:.3}, {} samples",
            section.number,
            section.bounds.0,
            section.bounds.1,
            section.bandwidth_overhead,
            section.samples
        );
    }
    write_report(&sections, &args.report).context("Failed to write report")?;
    info!("✓ Report written to: {}", args.report.display());

    if let Some(path) = &args.series {
        info!("Step 4/4: Exporting plot series...");
        let export = build_series(&raw, &args.report_config, args.smooth)
            .context("Failed to derive plot series")?;
        write_series(&export, path).context("Failed to write plot series")?;
        info!("✓ Plot series written to: {}", path.display());
    } else {
        info!("Step 4/4: Skipping plot series (not requested)");
    }

    info!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Execute the convert command: parse a raw trace and save it as an artifact
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let compressed = match InputKind::from_path(&args.input)? {
        InputKind::Trace { compressed } => compressed,
        InputKind::Artifact { .. } => bail!(
            "{} is already an artifact; convert expects a .log or .log.gz trace",
            args.input.display()
        ),
    };

    let raw = parse_trace_file(&args.input, compressed, &args.parser)
        .with_context(|| format!("Failed to parse trace {}", args.input.display()))?;
    save(&raw, &args.output).context("Failed to save artifact")?;

    info!("✓ Artifact written to: {}", args.output.display());
    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    InputKind::from_path(&args.input)?;

    if let Some(path) = &args.save {
        if !matches!(InputKind::from_path(path)?, InputKind::Artifact { .. }) {
            bail!("--save path must end in .dat or .dat.gz");
        }
    }

    let config = &args.report_config;
    if config.sections.is_empty() {
        bail!("at least one report section is required");
    }
    for &(min, max) in &config.sections {
        if min > max {
            bail!("section [{}, {}] has min greater than max", min, max);
        }
    }
    for &p in &config.percentiles {
        if !(p > 0.0 && p <= 1.0) {
            bail!("percentile {} is not in (0, 1]", p);
        }
    }

    Ok(())
}
