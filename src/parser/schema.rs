//! Structured trace data.
//!
//! `RawData` is the single product of parsing a trace (or loading a saved
//! artifact). It is built once and only ever read afterwards; every metric in
//! `aggregator` is a query against it.

use super::number::Number;
use crate::utils::config::{RATE_LIMIT_SETTING, TOTAL_TICKS_STAT};
use crate::utils::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings header of a trace, parsed from its leading JSON object
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// Trailing `name: value` run statistics
pub type Stats = BTreeMap<String, Number>;

/// Traffic direction of a logged action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Send,
    Recv,
}

/// One send or receive performed by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Tick the action was logged at
    pub tick: u64,

    /// Node id on the other end (destination for sends, source for receives)
    pub peer: u64,

    /// Payload size in phits
    pub size: u64,

    /// Transaction id, 0 for untracked traffic
    pub transaction: u64,

    /// Simulator message type
    pub kind: u64,
}

/// All actions logged by a single node, in trace order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Numeric id of the node
    pub id: u64,

    pub send: Vec<Action>,

    pub recv: Vec<Action>,
}

impl ActionRecord {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            send: Vec::new(),
            recv: Vec::new(),
        }
    }

    /// Actions for one direction
    pub fn actions(&self, direction: Direction) -> &[Action] {
        match direction {
            Direction::Send => &self.send,
            Direction::Recv => &self.recv,
        }
    }

    pub(crate) fn push(&mut self, direction: Direction, action: Action) {
        match direction {
            Direction::Send => self.send.push(action),
            Direction::Recv => self.recv.push(action),
        }
    }
}

/// A logical message exchange correlated by transaction id
///
/// `start_tick` is `None` until the first send is seen and `end_tick` is
/// `None` until the first receive is seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,

    /// Tick of the originating `sendMessage`
    pub create_tick: u64,

    /// Earliest send tick
    pub start_tick: Option<u64>,

    /// Latest receive tick
    pub end_tick: Option<u64>,

    /// Number of sends belonging to this transaction
    pub message_count: u64,

    /// Message size in phits
    pub size: u64,
}

impl Transaction {
    pub fn new(id: u64, create_tick: u64, size: u64) -> Self {
        Self {
            id,
            create_tick,
            start_tick: None,
            end_tick: None,
            message_count: 0,
            size,
        }
    }

    pub(crate) fn record_send(&mut self, tick: u64) {
        self.message_count += 1;
        self.start_tick = Some(self.start_tick.map_or(tick, |start| start.min(tick)));
    }

    pub(crate) fn record_recv(&mut self, tick: u64) {
        self.end_tick = Some(self.end_tick.map_or(tick, |end| end.max(tick)));
    }

    /// A transaction is complete once any of its messages has been received
    pub fn is_complete(&self) -> bool {
        self.end_tick.is_some()
    }
}

/// Fully parsed trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawData {
    settings: Settings,
    actions: BTreeMap<String, ActionRecord>,
    transactions: BTreeMap<u64, Transaction>,
    stats: Stats,
}

impl RawData {
    pub fn new(
        settings: Settings,
        actions: BTreeMap<String, ActionRecord>,
        transactions: BTreeMap<u64, Transaction>,
        stats: Stats,
    ) -> Self {
        Self {
            settings,
            actions,
            transactions,
            stats,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Action records keyed by node name
    pub fn actions(&self) -> &BTreeMap<String, ActionRecord> {
        &self.actions
    }

    /// Transactions keyed by id
    pub fn transactions(&self) -> &BTreeMap<u64, Transaction> {
        &self.transactions
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Length of the run, from the `Total simulation ticks` stat
    pub fn total_ticks(&self) -> Result<u64, ExtractError> {
        self.stats
            .get(TOTAL_TICKS_STAT)
            .and_then(Number::as_i64)
            .and_then(|ticks| u64::try_from(ticks).ok())
            .ok_or_else(|| ExtractError::MissingStat(TOTAL_TICKS_STAT.to_string()))
    }

    /// Configured injection rate limit, if the settings carry one
    pub fn rate_limit(&self) -> Option<f64> {
        self.settings.get(RATE_LIMIT_SETTING).and_then(|v| v.as_f64())
    }
}
