//! Streaming parser for ratesim trace files.
//!
//! A trace has three sections, always in this order:
//!
//! ```text
//! {                                   <- JSON settings header, closed by a line
//!   "rate_limit": 2                      that is exactly "}" (or as soon as the
//! }                                      text so far is a complete JSON object)
//! [10:0]Sender_0:handle_sendMessage:|size=4 trans=7 type=0
//! [12:0]Sender_0:handle_send:|src=0 dst=3 size=4 trans=7 type=0
//! [20:1]Receiver_3:handle_recv:|src=0 dst=3 size=4 trans=7 type=0
//!                                     <- blank line ends the data section
//! Total simulation ticks: 100
//! ```
//!
//! The parser walks the lines once, as a state machine with one transition
//! function per phase.

use super::event::{parse_event, Event, Function};
use super::number::parse_number;
use super::schema::{Action, ActionRecord, Direction, RawData, Settings, Stats, Transaction};
use crate::utils::config::ParserConfig;
use crate::utils::error::ParseError;
use flate2::read::GzDecoder;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Parser phase, strictly advancing Settings -> Data -> Stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Settings,
    Data,
    Stats,
}

/// Accumulates parsed records while the trace is read
struct TraceBuilder<'a> {
    config: &'a ParserConfig,
    phase: Phase,
    header: String,
    settings: Settings,
    actions: BTreeMap<String, ActionRecord>,
    transactions: BTreeMap<u64, Transaction>,
    stats: Stats,
    skipped_lines: usize,
}

impl<'a> TraceBuilder<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            phase: Phase::Settings,
            header: String::new(),
            settings: Settings::new(),
            actions: BTreeMap::new(),
            transactions: BTreeMap::new(),
            stats: Stats::new(),
            skipped_lines: 0,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        self.phase = match self.phase {
            Phase::Settings => self.settings_line(line_no, line)?,
            Phase::Data => self.data_line(line_no, line)?,
            Phase::Stats => self.stats_line(line_no, line)?,
        };
        Ok(())
    }

    fn settings_line(&mut self, line_no: usize, line: &str) -> Result<Phase, ParseError> {
        self.header.push_str(line);
        self.header.push('\n');

        let header = if line == "}" {
            serde_json::from_str::<serde_json::Value>(&self.header)?
        } else if line.trim_end().ends_with('}') {
            // A header written on fewer lines may already be complete
            match serde_json::from_str::<serde_json::Value>(&self.header) {
                Ok(value @ serde_json::Value::Object(_)) => value,
                _ => return Ok(Phase::Settings),
            }
        } else {
            return Ok(Phase::Settings);
        };

        match header {
            serde_json::Value::Object(settings) => {
                debug!("Parsed settings header with {} keys", settings.len());
                self.settings = settings;
                Ok(Phase::Data)
            }
            other => Err(ParseError::format(
                line_no,
                format!("settings header must be a JSON object, found {}", other),
            )),
        }
    }

    fn data_line(&mut self, line_no: usize, line: &str) -> Result<Phase, ParseError> {
        if line.trim().is_empty() {
            debug!(
                "Data section ended at line {} ({} nodes, {} transactions)",
                line_no,
                self.actions.len(),
                self.transactions.len()
            );
            return Ok(Phase::Stats);
        }

        if !line.starts_with('[') {
            if self.config.strict {
                return Err(ParseError::format(line_no, "unrecognized line in data section"));
            }
            trace!("Skipping non-event line {}", line_no);
            self.skipped_lines += 1;
            return Ok(Phase::Data);
        }

        if let Some(event) = parse_event(line, line_no)? {
            self.apply_event(line_no, event)?;
        }
        Ok(Phase::Data)
    }

    fn stats_line(&mut self, line_no: usize, line: &str) -> Result<Phase, ParseError> {
        if line.trim().is_empty() {
            return Ok(Phase::Stats);
        }
        if line.starts_with('[') {
            return Err(ParseError::format(
                line_no,
                "event line after the end of the data section (stray blank line in the log?)",
            ));
        }

        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::format(line_no, "stat line must be 'name: value'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::format(line_no, "stat line has an empty name"));
        }
        let value = parse_number(value).ok_or_else(|| {
            ParseError::format(line_no, format!("stat '{}' has non-numeric value", name))
        })?;

        self.stats.insert(name.to_string(), value);
        Ok(Phase::Stats)
    }

    fn apply_event(&mut self, line_no: usize, event: Event) -> Result<(), ParseError> {
        let size = event.field("size", line_no)?;
        let trans = event.field("trans", line_no)?;
        let kind = event.field("type", line_no)?;

        let direction = match event.function {
            Function::SendMessage => return self.open_transaction(line_no, trans, event.tick, size),
            Function::Send => Direction::Send,
            Function::Recv => Direction::Recv,
        };

        let src = event.field("src", line_no)?;
        let dst = event.field("dst", line_no)?;
        let (own, peer) = match direction {
            Direction::Send => (src, dst),
            Direction::Recv => (dst, src),
        };

        self.actions
            .entry(event.node)
            .or_insert_with(|| ActionRecord::new(own))
            .push(
                direction,
                Action {
                    tick: event.tick,
                    peer,
                    size,
                    transaction: trans,
                    kind,
                },
            );

        if trans == 0 {
            return Ok(());
        }

        let transaction = self.transactions.get_mut(&trans).ok_or_else(|| ParseError::Correlation {
            line: line_no,
            transaction: trans,
            message: "event references a transaction that was never created".to_string(),
        })?;
        match direction {
            Direction::Send => transaction.record_send(event.tick),
            Direction::Recv => transaction.record_recv(event.tick),
        }
        Ok(())
    }

    fn open_transaction(
        &mut self,
        line_no: usize,
        trans: u64,
        tick: u64,
        size: u64,
    ) -> Result<(), ParseError> {
        if trans == 0 {
            return Ok(());
        }
        if self.transactions.contains_key(&trans) {
            return Err(ParseError::Correlation {
                line: line_no,
                transaction: trans,
                message: "transaction created twice".to_string(),
            });
        }
        self.transactions.insert(trans, Transaction::new(trans, tick, size));
        Ok(())
    }

    fn finish(self, lines: usize) -> Result<RawData, ParseError> {
        if self.phase == Phase::Settings {
            return Err(ParseError::format(
                lines,
                "settings header was never closed by a '}' line",
            ));
        }
        if self.skipped_lines > 0 {
            debug!("Skipped {} non-event lines in data section", self.skipped_lines);
        }

        Ok(RawData::new(
            self.settings,
            self.actions,
            self.transactions,
            self.stats,
        ))
    }
}

/// Parse a trace from any buffered reader
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::Json` - Settings header is not valid JSON
/// * `ParseError::Format` - A line violates the grammar of its section
/// * `ParseError::Correlation` - An event references an unknown transaction
/// * `ParseError::Io` - The reader failed or the text is not UTF-8
pub fn parse_trace<R: BufRead>(reader: R, config: &ParserConfig) -> Result<RawData, ParseError> {
    let mut builder = TraceBuilder::new(config);
    let mut count = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        count = index + 1;
        builder.feed(count, &line)?;
    }

    let raw = builder.finish(count)?;
    debug!(
        "Parsed {} lines: {} nodes, {} transactions, {} stats",
        count,
        raw.actions().len(),
        raw.transactions().len(),
        raw.stats().len()
    );
    Ok(raw)
}

/// Parse a trace held in memory
pub fn parse_trace_str(text: &str, config: &ParserConfig) -> Result<RawData, ParseError> {
    parse_trace(text.as_bytes(), config)
}

/// Parse a trace file, decompressing it first when `compressed` is set
pub fn parse_trace_file(
    path: impl AsRef<Path>,
    compressed: bool,
    config: &ParserConfig,
) -> Result<RawData, ParseError> {
    let path = path.as_ref();
    debug!("Parsing trace file: {}", path.display());

    let file = File::open(path)?;
    let reader: Box<dyn Read> = if compressed {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(file)
    };
    parse_trace(BufReader::new(reader), config)
}
