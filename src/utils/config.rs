//! Configuration and constants for parsing and reporting.

/// Format tag written into every persisted artifact
pub const ARTIFACT_FORMAT: &str = "ratesim-rawdata";

/// Current artifact schema version
pub const ARTIFACT_VERSION: u32 = 1;

/// Current plot-series export schema version
pub const SERIES_VERSION: &str = "1.0.0";

/// Stat line holding the length of the simulation
pub const TOTAL_TICKS_STAT: &str = "Total simulation ticks";

/// Settings key holding the configured injection rate limit
pub const RATE_LIMIT_SETTING: &str = "rate_limit";

// Node name patterns used by the standard report
pub const SENDER_PATTERN: &str = "Sender_.*";
pub const RECEIVER_PATTERN: &str = "Receiver_.*";
pub const ALL_NODES_PATTERN: &str = ".*";

/// Default time windows reported as sections, inclusive on both ends
pub const DEFAULT_SECTIONS: &[(u64, u64)] =
    &[(10_000, 50_000), (50_000, 90_000), (90_000, 130_000)];

/// Default latency percentiles reported per section
pub const DEFAULT_PERCENTILES: &[f64] = &[0.99, 0.999, 0.9999, 0.99999];

/// Trace parser configuration
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Reject Data-phase lines that do not start with `[` instead of skipping them
    pub strict: bool,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Section report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Inclusive `[min, max]` tick windows, one report section each
    pub sections: Vec<(u64, u64)>,

    /// Percentiles in (0, 1] queried per section
    pub percentiles: Vec<f64>,

    /// Patterns selecting the sender nodes
    pub sender_patterns: Vec<String>,

    /// Patterns selecting every node for total receive traffic
    pub total_patterns: Vec<String>,

    /// Patterns selecting the receiver nodes whose traffic is not overhead
    pub receiver_patterns: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sections: DEFAULT_SECTIONS.to_vec(),
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            sender_patterns: vec![SENDER_PATTERN.to_string()],
            total_patterns: vec![ALL_NODES_PATTERN.to_string()],
            receiver_patterns: vec![RECEIVER_PATTERN.to_string()],
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sections(mut self, sections: Vec<(u64, u64)>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_percentiles(mut self, percentiles: Vec<f64>) -> Self {
        self.percentiles = percentiles;
        self
    }
}
