#![allow(dead_code)]

use ratesim_analyzer::parser::{parse_trace_str, RawData};
use ratesim_analyzer::utils::config::ParserConfig;

/// Small run: two tracked transactions from Sender_0 to Receiver_3 plus one
/// untracked reply. Every span fits inside the 30 tick run.
pub const SAMPLE_TRACE: &str = r#"{
  "rate_limit": 2,
  "num_senders": 1
}
[10:0]Sender_0:handle_sendMessage:|size=4 trans=7 type=1
[12:0]Sender_0:handle_send:|src=0 dst=3 size=4 trans=7 type=1
[14:0]Sender_0:handle_sendMessage:|size=2 trans=8 type=1
[15:0]Sender_0:handle_send:|src=0 dst=3 size=2 trans=8 type=1
[16:0]Router_9:handle_route:|port=2
[20:1]Receiver_3:handle_recv:|src=0 dst=3 size=4 trans=7 type=1
[25:0]Receiver_3:handle_recv:|src=0 dst=3 size=2 trans=8 type=1
[26:0]Receiver_3:handle_send:|src=3 dst=0 size=1 trans=0 type=3
[27:0]Sender_0:handle_recv:|src=3 dst=0 size=1 trans=0 type=3

Total simulation ticks: 30
Offered load: 0.25
"#;

pub fn sample() -> RawData {
    parse_trace_str(SAMPLE_TRACE, &ParserConfig::new()).unwrap()
}
