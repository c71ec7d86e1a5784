//! Transaction latency extraction.

use crate::parser::schema::{RawData, Transaction};
use crate::utils::error::ExtractError;
use log::debug;
use serde::{Deserialize, Serialize};

/// Which interval of a transaction is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyMode {
    /// First send to last receive, minus the transfer duration
    OnWire,
    /// Creation to last receive, minus the transfer duration
    Total,
}

/// Latency scatter points: completion tick and latency per transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySamples {
    pub times: Vec<u64>,
    pub latencies: Vec<i64>,
}

impl LatencySamples {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Latency of one transaction, `None` if it cannot be measured yet
///
/// Transactions that were never received are incomplete. In `OnWire` mode a
/// transaction without any send has no start either.
pub fn transaction_latency(trans: &Transaction, mode: LatencyMode) -> Option<i64> {
    let end = i128::from(trans.end_tick?);
    let begin = match mode {
        LatencyMode::OnWire => i128::from(trans.start_tick?),
        LatencyMode::Total => i128::from(trans.create_tick),
    };
    i64::try_from(end - begin - i128::from(trans.size)).ok()
}

/// Collect latencies of completed transactions, in transaction id order
///
/// **Public** - main entry point for latency extraction
///
/// With `bounds = Some((min, max))` only transactions whose end tick lies in
/// `[min, max]` are included.
///
/// # Errors
/// * `ExtractError::InvalidBounds` - `min > max`
pub fn extract_latencies(
    raw: &RawData,
    mode: LatencyMode,
    bounds: Option<(u64, u64)>,
) -> Result<LatencySamples, ExtractError> {
    if let Some((min, max)) = bounds {
        if min > max {
            return Err(ExtractError::InvalidBounds { min, max });
        }
    }

    let mut samples = LatencySamples::default();
    let mut incomplete = 0usize;

    for trans in raw.transactions().values() {
        let (Some(end), Some(latency)) = (trans.end_tick, transaction_latency(trans, mode)) else {
            incomplete += 1;
            continue;
        };
        if let Some((min, max)) = bounds {
            if end < min || end > max {
                continue;
            }
        }
        samples.times.push(end);
        samples.latencies.push(latency);
    }

    debug!(
        "Extracted {} {:?} latencies ({} transactions not measurable)",
        samples.len(),
        mode,
        incomplete
    );
    Ok(samples)
}
