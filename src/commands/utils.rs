use crate::output::{load, InputKind};
use crate::parser::{parse_trace_file, RawData};
use crate::utils::config::ParserConfig;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::time::Instant;

/// Load parsed data from a raw trace or a saved artifact, by file name
pub fn load_input(path: &Path, parser: &ParserConfig) -> Result<RawData> {
    let start = Instant::now();

    let raw = match InputKind::from_path(path)? {
        InputKind::Trace { compressed } => {
            info!("Parsing trace: {}", path.display());
            parse_trace_file(path, compressed, parser)
                .with_context(|| format!("Failed to parse trace {}", path.display()))?
        }
        InputKind::Artifact { .. } => {
            info!("Loading artifact: {}", path.display());
            load(path).with_context(|| format!("Failed to load artifact {}", path.display()))?
        }
    };

    info!(
        "Loaded {} nodes and {} transactions in {:.2}s",
        raw.actions().len(),
        raw.transactions().len(),
        start.elapsed().as_secs_f64()
    );
    Ok(raw)
}

/// Summarize parsed data for the inspect command
pub fn inspect_summary(raw: &RawData) -> String {
    let complete = raw.transactions().values().filter(|t| t.is_complete()).count();
    let sends: usize = raw.actions().values().map(|r| r.send.len()).sum();
    let recvs: usize = raw.actions().values().map(|r| r.recv.len()).sum();

    let mut lines = vec![
        format!(
            "Settings: {}",
            raw.settings().keys().cloned().collect::<Vec<_>>().join(", ")
        ),
        format!("Nodes: {} ({} sends, {} receives)", raw.actions().len(), sends, recvs),
        format!(
            "Transactions: {} ({} complete, {} pending)",
            raw.transactions().len(),
            complete,
            raw.transactions().len() - complete
        ),
        "Stats:".to_string(),
    ];
    lines.extend(
        raw.stats()
            .iter()
            .map(|(name, value)| format!("  {}: {}", name, value)),
    );
    lines.join("\n")
}
