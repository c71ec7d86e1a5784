//! Per-section text report.
//!
//! Each section is a tick window of the run. For every section the report
//! gives the mean bandwidth overhead (receive traffic not landing on receiver
//! nodes) and tail percentiles of total transaction latency:
//!
//! ```text
//! Section #1
//! bandwidth overhead = 0.37
//! 99%ile latency = 112
//! 99.9%ile latency = 140
//!
//! ```

use super::{ensure_parent_dir, validate_path};
use crate::aggregator::{cdf, extract_latencies, extract_rate, to_f64, LatencyMode};
use crate::parser::{Direction, RawData};
use crate::utils::config::ReportConfig;
use crate::utils::error::{ExtractError, OutputError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Statistics for one reported time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    /// 1-based section number
    pub number: usize,

    /// Inclusive tick window
    pub bounds: (u64, u64),

    /// Mean overhead receive rate over the window, NaN if the window lies past the run
    pub bandwidth_overhead: f64,

    /// `(percentile, latency)` pairs
    pub percentiles: Vec<(f64, i64)>,

    /// Number of latency samples in the window
    pub samples: usize,
}

/// Receive rate of all nodes minus the receive rate of receiver nodes
pub fn overhead_series(
    raw: &RawData,
    config: &ReportConfig,
    total_ticks: u64,
) -> Result<Vec<f64>, ExtractError> {
    let total = extract_rate(raw, &config.total_patterns, Direction::Recv, total_ticks)?;
    let receivers = extract_rate(raw, &config.receiver_patterns, Direction::Recv, total_ticks)?;

    Ok(to_f64(&total)
        .into_iter()
        .zip(to_f64(&receivers))
        .map(|(t, r)| t - r)
        .collect())
}

/// Compute every configured section
///
/// **Public** - main entry point for report generation
///
/// # Errors
/// * `ExtractError::MissingStat` - The run length is unknown
/// * Any rate or latency extraction error
///
/// A section in which no transaction completed is kept with no percentiles.
pub fn build_report(
    raw: &RawData,
    config: &ReportConfig,
) -> Result<Vec<SectionReport>, ExtractError> {
    let total_ticks = raw.total_ticks()?;
    let overhead = overhead_series(raw, config, total_ticks)?;

    let mut sections = Vec::with_capacity(config.sections.len());
    for (index, &(min, max)) in config.sections.iter().enumerate() {
        let samples = extract_latencies(raw, LatencyMode::Total, Some((min, max)))?;
        let percentiles = match cdf(&samples.latencies) {
            Ok(dist) => config
                .percentiles
                .iter()
                .map(|&p| dist.percentile(p).map(|latency| (p, latency)))
                .collect::<Result<Vec<_>, _>>()?,
            Err(ExtractError::EmptyInput) => {
                warn!("Section #{} [{}, {}] has no completed transactions", index + 1, min, max);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        debug!("Section #{} [{}, {}]: {} samples", index + 1, min, max, samples.len());
        sections.push(SectionReport {
            number: index + 1,
            bounds: (min, max),
            bandwidth_overhead: window_mean(&overhead, min, max),
            percentiles,
            samples: samples.len(),
        });
    }

    Ok(sections)
}

/// Mean of `series[min..=max]`, with the window clipped to the series end
fn window_mean(series: &[f64], min: u64, max: u64) -> f64 {
    let start = usize::try_from(min).unwrap_or(usize::MAX);
    let end = usize::try_from(max)
        .unwrap_or(usize::MAX)
        .min(series.len().saturating_sub(1));

    if series.is_empty() || start > end {
        return f64::NAN;
    }
    let window = &series[start..=end];
    window.iter().sum::<f64>() / window.len() as f64
}

/// Percentile as a percentage label, e.g. `0.999` -> `99.9`
pub fn percentile_label(p: f64) -> String {
    let label = format!("{:.6}", p * 100.0);
    label.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render sections in the report text format
pub fn render_report(sections: &[SectionReport]) -> String {
    let mut out = String::new();
    for section in sections {
        // Writing to a String cannot fail
        let _ = writeln!(out, "Section #{}", section.number);
        let _ = writeln!(out, "bandwidth overhead = {:?}", section.bandwidth_overhead);
        for (p, latency) in &section.percentiles {
            let _ = writeln!(out, "{}%ile latency = {}", percentile_label(*p), latency);
        }
        out.push('\n');
    }
    out
}

/// Write a rendered report to a file
pub fn write_report(
    sections: &[SectionReport],
    path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    info!("Writing report to: {}", path.display());

    validate_path(path)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, render_report(sections))?;
    Ok(())
}
