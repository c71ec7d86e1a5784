//! Trace parsing and data model.
//!
//! This module handles:
//! - Parsing the three-section ratesim trace format
//! - Correlating send/receive events into transactions
//! - Defining the `RawData` aggregate every metric is derived from

pub mod event;
pub mod number;
pub mod schema;
pub mod trace;

// Re-export main types
pub use event::{Event, Function};
pub use number::{parse_number, Number};
pub use schema::{Action, ActionRecord, Direction, RawData, Settings, Stats, Transaction};
pub use trace::{parse_trace, parse_trace_file, parse_trace_str};
