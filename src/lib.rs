//! Ratesim Analyzer
//!
//! Turns the text traces of the ratesim network simulator into structured
//! per-node action logs, transaction records and run statistics, and derives
//! rate series and latency distributions from them.
//!
//! ## Getting Started
//!
//! ```ignore
//! use ratesim_analyzer::aggregator::{extract_latencies, extract_rate, LatencyMode};
//! use ratesim_analyzer::parser::{parse_trace_file, Direction};
//! use ratesim_analyzer::utils::config::ParserConfig;
//!
//! let raw = parse_trace_file("run.log", false, &ParserConfig::new())?;
//! let ticks = raw.total_ticks()?;
//! let injected = extract_rate(&raw, &["Sender_.*"], Direction::Send, ticks)?;
//! let latencies = extract_latencies(&raw, LatencyMode::Total, None)?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
