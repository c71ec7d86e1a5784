//! Data-phase line grammar.
//!
//! Each event line has the fixed shape
//!
//! ```text
//! [<tick>:<epsilon>]<node>:<function>:|<key>=<value> <key>=<value> ...
//! ```

use super::number::{parse_number, Number};
use crate::utils::error::ParseError;
use std::collections::BTreeMap;

/// Simulator handler that produced an event line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Send,
    Recv,
    SendMessage,
}

impl Function {
    /// Map a handler name to a tracked function, `None` for any other handler
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "handle_send" => Some(Function::Send),
            "handle_recv" => Some(Function::Recv),
            "handle_sendMessage" => Some(Function::SendMessage),
            _ => None,
        }
    }
}

/// One parsed data line
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub tick: u64,
    pub epsilon: u64,
    pub node: String,
    pub function: Function,
    pub fields: BTreeMap<String, Number>,
}

impl Event {
    /// Read a required non-negative integer field
    pub fn field(&self, key: &str, line: usize) -> Result<u64, ParseError> {
        let value = self
            .fields
            .get(key)
            .ok_or_else(|| ParseError::format(line, format!("missing field '{}'", key)))?;

        value
            .as_i64()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| {
                ParseError::format(
                    line,
                    format!("field '{}' must be a non-negative integer, got {}", key, value),
                )
            })
    }
}

/// Parse a data line starting with `[`
///
/// Lines from handlers other than send, recv and sendMessage still have their
/// prefix validated but yield `Ok(None)`.
pub fn parse_event(text: &str, line: usize) -> Result<Option<Event>, ParseError> {
    let rest = text
        .strip_prefix('[')
        .ok_or_else(|| ParseError::format(line, "event line must start with '['"))?;

    let (stamp, rest) = rest
        .split_once(']')
        .ok_or_else(|| ParseError::format(line, "unterminated '[tick:epsilon]' prefix"))?;
    let (tick, epsilon) = stamp
        .split_once(':')
        .ok_or_else(|| ParseError::format(line, "time prefix must be 'tick:epsilon'"))?;
    let tick = parse_u64(tick, "tick", line)?;
    let epsilon = parse_u64(epsilon, "epsilon", line)?;

    let (node, rest) = rest
        .split_once(':')
        .ok_or_else(|| ParseError::format(line, "missing node name"))?;
    let (function, rest) = rest
        .split_once(':')
        .ok_or_else(|| ParseError::format(line, "missing function name"))?;

    let Some(function) = Function::from_name(function.trim()) else {
        return Ok(None);
    };

    let (_, message) = rest
        .split_once('|')
        .ok_or_else(|| ParseError::format(line, "missing '|' before key=value fields"))?;

    Ok(Some(Event {
        tick,
        epsilon,
        node: node.trim().to_string(),
        function,
        fields: parse_fields(message, line)?,
    }))
}

/// Parse whitespace separated `key=value` pairs
pub fn parse_fields(message: &str, line: usize) -> Result<BTreeMap<String, Number>, ParseError> {
    let mut fields = BTreeMap::new();

    for pair in message.split_whitespace() {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ParseError::format(line, format!("expected key=value, got '{}'", pair))
        })?;
        let value = parse_number(value).ok_or_else(|| {
            ParseError::format(line, format!("field '{}' has non-numeric value '{}'", key, value))
        })?;
        fields.insert(key.to_string(), value);
    }

    Ok(fields)
}

fn parse_u64(text: &str, what: &str, line: usize) -> Result<u64, ParseError> {
    text.trim()
        .parse::<u64>()
        .map_err(|e| ParseError::format(line, format!("invalid {} '{}': {}", what, text, e)))
}
