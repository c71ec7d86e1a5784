//! Metrics derived from parsed trace data.
//!
//! This module turns a `RawData` into:
//! - Injection/reception rate series (interval marking over node actions)
//! - Transaction latency samples
//! - Empirical CDFs, percentiles and smoothed series

pub mod distribution;
pub mod latency;
pub mod matcher;
pub mod rate;
pub mod smooth;

// Re-export main types and functions
pub use distribution::{cdf, percentile, Cdf};
pub use latency::{extract_latencies, transaction_latency, LatencyMode, LatencySamples};
pub use matcher::NodeMatcher;
pub use rate::{extract_grouped_rates, extract_rate, extract_rate_into, to_f64, RateSeries};
pub use smooth::smooth;
