//! Ordered node-name matching.
//!
//! Patterns are tried in order and the first one that matches a node name
//! claims that node. A node is therefore counted under at most one pattern.

use crate::utils::error::ExtractError;
use regex::Regex;

/// An ordered list of node name patterns
///
/// Each pattern must match at the start of the node name, so `Sender_.*`
/// selects `Sender_3` but not `Relay_Sender_3`.
#[derive(Debug, Clone)]
pub struct NodeMatcher {
    patterns: Vec<Regex>,
}

impl NodeMatcher {
    /// Compile an ordered list of patterns
    ///
    /// # Errors
    /// * `ExtractError::InvalidPattern` - A pattern is not a valid regex
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ExtractError> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(&format!("^(?:{})", p.as_ref())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Index of the first pattern matching `name`
    pub fn first_match(&self, name: &str) -> Option<usize> {
        self.patterns.iter().position(|re| re.is_match(name))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.first_match(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
