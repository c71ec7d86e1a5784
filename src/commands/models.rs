use crate::utils::config::{ParserConfig, ReportConfig};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace (`.log`, `.log.gz`) or artifact (`.dat`, `.dat.gz`) to analyze
    pub input: PathBuf,

    /// Output path for the section report
    pub report: PathBuf,

    /// Output path for plot series JSON (optional)
    pub series: Option<PathBuf>,

    /// Save the parsed trace as an artifact (optional)
    pub save: Option<PathBuf>,

    /// Moving-average radius applied to rate series
    pub smooth: usize,

    pub parser: ParserConfig,

    pub report_config: ReportConfig,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            report: PathBuf::from("report.txt"),
            series: None,
            save: None,
            smooth: 0,
            parser: ParserConfig::default(),
            report_config: ReportConfig::default(),
        }
    }
}

/// Arguments for the convert command
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Raw trace to parse
    pub input: PathBuf,

    /// Artifact to write
    pub output: PathBuf,

    pub parser: ParserConfig,
}
