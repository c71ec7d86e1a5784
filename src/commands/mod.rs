//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, execute_convert, validate_args};
pub use models::{AnalyzeArgs, ConvertArgs};
pub use utils::{inspect_summary, load_input};
