//! Plot-series JSON export.
//!
//! Charts are drawn by an external plotting step. This writer hands it every
//! derived series in one versioned JSON document.

use super::report::overhead_series;
use super::{ensure_parent_dir, validate_path};
use crate::aggregator::{
    cdf, extract_latencies, extract_rate, smooth, to_f64, Cdf, LatencyMode, LatencySamples,
};
use crate::parser::{Direction, RawData};
use crate::utils::config::{ReportConfig, SERIES_VERSION};
use crate::utils::error::{ExtractError, OutputError};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Latency CDF of one report section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCdf {
    pub bounds: (u64, u64),

    /// `None` when no transaction completed inside the window
    pub cdf: Option<Cdf<i64>>,
}

/// Everything the plotting step draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesExport {
    /// Schema version for compatibility checking
    pub version: String,

    pub generated_at: String,

    pub total_ticks: u64,

    /// Configured injection rate limit, drawn as a reference line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<f64>,

    /// Radius the rate series were smoothed with
    pub smoothing_radius: usize,

    /// Smoothed rate series keyed by name
    pub rates: BTreeMap<String, Vec<f64>>,

    pub total_latency: LatencySamples,

    pub on_wire_latency: LatencySamples,

    pub sections: Vec<SectionCdf>,
}

/// Derive all plot series from parsed data
pub fn build_series(
    raw: &RawData,
    config: &ReportConfig,
    radius: usize,
) -> Result<SeriesExport, ExtractError> {
    let total_ticks = raw.total_ticks()?;

    let rate = |patterns: &[String], direction: Direction| -> Result<Vec<f64>, ExtractError> {
        let series = extract_rate(raw, patterns, direction, total_ticks)?;
        Ok(smooth(&to_f64(&series), radius))
    };

    let mut rates = BTreeMap::new();
    rates.insert(
        "senders_send".to_string(),
        rate(&config.sender_patterns, Direction::Send)?,
    );
    rates.insert(
        "senders_recv".to_string(),
        rate(&config.sender_patterns, Direction::Recv)?,
    );
    rates.insert(
        "receivers_recv".to_string(),
        rate(&config.receiver_patterns, Direction::Recv)?,
    );
    rates.insert(
        "overhead_recv".to_string(),
        smooth(&overhead_series(raw, config, total_ticks)?, radius),
    );

    let sections = config
        .sections
        .iter()
        .map(|&bounds| {
            let samples = extract_latencies(raw, LatencyMode::Total, Some(bounds))?;
            let dist = match cdf(&samples.latencies) {
                Ok(dist) => Some(dist),
                Err(ExtractError::EmptyInput) => None,
                Err(e) => return Err(e),
            };
            Ok(SectionCdf { bounds, cdf: dist })
        })
        .collect::<Result<Vec<_>, ExtractError>>()?;

    debug!("Built {} rate series and {} section CDFs", rates.len(), sections.len());

    Ok(SeriesExport {
        version: SERIES_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        total_ticks,
        rate_limit: raw.rate_limit(),
        smoothing_radius: radius,
        rates,
        total_latency: extract_latencies(raw, LatencyMode::Total, None)?,
        on_wire_latency: extract_latencies(raw, LatencyMode::OnWire, None)?,
        sections,
    })
}

/// Write plot series to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_series(
    export: &SeriesExport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing plot series to: {}", output_path.display());
    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, export)?;
    Ok(())
}

/// Read plot series back from a JSON file
pub fn read_series(input_path: impl AsRef<Path>) -> Result<SeriesExport, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading plot series from: {}", input_path.display());

    let file = File::open(input_path)?;
    let export: SeriesExport = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_trace_str;
    use crate::utils::config::ParserConfig;

    const TRACE: &str = "{\n}\n\
        [2:0]Sender_0:handle_sendMessage:|size=2 trans=1 type=0\n\
        [3:0]Sender_0:handle_send:|src=0 dst=1 size=2 trans=1 type=0\n\
        [8:0]Receiver_1:handle_recv:|src=0 dst=1 size=2 trans=1 type=0\n\
        \n\
        Total simulation ticks: 10\n";

    #[test]
    fn test_empty_section_has_no_cdf() {
        let raw = parse_trace_str(TRACE, &ParserConfig::new()).unwrap();
        let config = ReportConfig::new().with_sections(vec![(0, 5), (5, 10)]);

        let export = build_series(&raw, &config, 0).unwrap();
        assert!(export.sections[0].cdf.is_none());
        assert_eq!(export.sections[1].cdf.as_ref().map(|c| c.values.clone()), Some(vec![4]));
        assert_eq!(export.rate_limit, None);
        assert_eq!(export.rates["senders_send"][3..5], [1.0, 1.0]);
    }
}
