//! Injection and reception rate reconstruction.
//!
//! Every logged action of `size` phits occupies the link for `size` ticks at
//! one phit per tick. Sends occupy `[tick, tick + size)` and receives occupy
//! `(tick - size, tick]`. The rate at a tick is the number of occupancies
//! covering it, summed over the selected nodes.

use super::matcher::NodeMatcher;
use crate::parser::schema::{Action, Direction, RawData};
use crate::utils::error::ExtractError;
use log::debug;

/// Phits per tick, indexed by tick
pub type RateSeries = Vec<u64>;

/// Rate series over every node claimed by any of `patterns`
///
/// **Public** - main entry point for rate extraction
///
/// Returns `total_ticks + 1` entries.
///
/// # Errors
/// * `ExtractError::InvalidPattern` - A pattern does not compile
/// * `ExtractError::Range` - An action covers a tick outside `[0, total_ticks]`
pub fn extract_rate<S: AsRef<str>>(
    raw: &RawData,
    patterns: &[S],
    direction: Direction,
    total_ticks: u64,
) -> Result<RateSeries, ExtractError> {
    let matcher = NodeMatcher::new(patterns)?;
    let mut series = vec![0; series_len(total_ticks)];
    extract_rate_into(raw, &matcher, direction, &mut series)?;
    Ok(series)
}

/// Add the rate of every matched node onto an existing series
///
/// The series spans ticks `0..series.len()`.
pub fn extract_rate_into(
    raw: &RawData,
    matcher: &NodeMatcher,
    direction: Direction,
    series: &mut [u64],
) -> Result<(), ExtractError> {
    let mut spans = SpanCounter::new(series.len());
    for_each_span(raw, matcher, direction, series.len(), |_, first, last| {
        spans.add(first, last)
    })?;
    spans.accumulate(series);
    Ok(())
}

/// One rate series per pattern, each node counted under its first matching pattern
pub fn extract_grouped_rates<S: AsRef<str>>(
    raw: &RawData,
    patterns: &[S],
    direction: Direction,
    total_ticks: u64,
) -> Result<Vec<RateSeries>, ExtractError> {
    let matcher = NodeMatcher::new(patterns)?;
    let len = series_len(total_ticks);
    let mut groups: Vec<SpanCounter> = (0..matcher.len()).map(|_| SpanCounter::new(len)).collect();

    for_each_span(raw, &matcher, direction, len, |group, first, last| {
        groups[group].add(first, last)
    })?;

    Ok(groups
        .into_iter()
        .map(|spans| {
            let mut series = vec![0; len];
            spans.accumulate(&mut series);
            series
        })
        .collect())
}

/// Rate series as floating point, for smoothing and averaging
pub fn to_f64(series: &[u64]) -> Vec<f64> {
    series.iter().map(|&v| v as f64).collect()
}

fn series_len(total_ticks: u64) -> usize {
    usize::try_from(total_ticks).map_or(usize::MAX, |t| t.saturating_add(1))
}

/// Visit the inclusive tick span of every action of every matched node
fn for_each_span(
    raw: &RawData,
    matcher: &NodeMatcher,
    direction: Direction,
    len: usize,
    mut visit: impl FnMut(usize, usize, usize),
) -> Result<(), ExtractError> {
    let mut nodes = 0;

    for (name, record) in raw.actions() {
        let Some(group) = matcher.first_match(name) else {
            continue;
        };
        nodes += 1;

        for action in record.actions(direction) {
            if let Some((first, last)) = occupancy(action, direction, len, name)? {
                visit(group, first, last);
            }
        }
    }

    debug!("Extracted {:?} rate over {} nodes", direction, nodes);
    Ok(())
}

/// Inclusive span of ticks an action occupies, `None` for zero-size actions
fn occupancy(
    action: &Action,
    direction: Direction,
    len: usize,
    node: &str,
) -> Result<Option<(usize, usize)>, ExtractError> {
    if action.size == 0 {
        return Ok(None);
    }

    let tick = i128::from(action.tick);
    let size = i128::from(action.size);
    let (first, last) = match direction {
        Direction::Send => (tick, tick + size - 1),
        Direction::Recv => (tick - size + 1, tick),
    };

    let out_of_range = |index: i128| ExtractError::Range {
        index,
        total_ticks: len.saturating_sub(1) as u64,
        node: node.to_string(),
    };
    if first < 0 {
        return Err(out_of_range(first));
    }
    if last >= len as i128 {
        return Err(out_of_range(last));
    }

    Ok(Some((first as usize, last as usize)))
}

/// Difference array of span start/end markers
struct SpanCounter {
    deltas: Vec<i64>,
}

impl SpanCounter {
    fn new(len: usize) -> Self {
        Self {
            deltas: vec![0; len + 1],
        }
    }

    fn add(&mut self, first: usize, last: usize) {
        self.deltas[first] += 1;
        self.deltas[last + 1] -= 1;
    }

    fn accumulate(&self, series: &mut [u64]) {
        let mut running = 0i64;
        for (value, delta) in series.iter_mut().zip(&self.deltas) {
            running += delta;
            *value += running as u64;
        }
    }
}
