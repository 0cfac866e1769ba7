//! Incremental Server-Sent Events parser.
//!
//! Bytes arrive in arbitrary chunks; a chunk may end in the middle of a line,
//! a UTF-8 sequence, or between the CR and LF of a CRLF pair. The parser
//! buffers partial lines and emits complete events as blank lines arrive.

use std::time::Duration;

/// Event type used when the server sends no `event:` field.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// Longest line kept; the rest of a longer line is discarded.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEvent {
    /// Event type (`message` unless the server named one).
    pub event: String,
    /// Data lines joined by `\n`.
    pub data: String,
    /// Last event id seen on the stream when this event was dispatched.
    pub id: Option<String>,
}

/// Line-oriented SSE state machine.
#[derive(Debug, Default)]
pub struct EventParser {
    line: Vec<u8>,
    /// A CR ended the previous line; swallow an LF that follows it.
    skip_lf: bool,
    /// The first line of the connection has been checked for a BOM.
    bom_checked: bool,
    /// The current line passed [`MAX_LINE_BYTES`]; drop bytes until it ends.
    overflowed: bool,
    data: String,
    event: String,
    last_event_id: Option<String>,
    retry: Option<Duration>,
}

impl EventParser {
    /// Creates an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a chunk and returns the events it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        for &byte in chunk {
            if self.skip_lf {
                self.skip_lf = false;
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\n' => self.end_line(&mut events),
                b'\r' => {
                    self.skip_lf = true;
                    self.end_line(&mut events);
                }
                _ if self.overflowed => {}
                _ if self.line.len() >= MAX_LINE_BYTES => {
                    tracing::warn!("discarding stream line longer than {} bytes", MAX_LINE_BYTES);
                    self.line.clear();
                    self.overflowed = true;
                }
                _ => self.line.push(byte),
            }
        }
        events
    }

    /// Id from the most recent `id:` field.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    /// Reconnection delay requested by the server via `retry:`.
    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Drops any half-received line or event and readies the parser for a
    /// new connection. The last event id and retry delay survive, since they
    /// apply across connections.
    pub fn reset_pending(&mut self) {
        self.line.clear();
        self.skip_lf = false;
        self.bom_checked = false;
        self.overflowed = false;
        self.data.clear();
        self.event.clear();
    }

    fn end_line(&mut self, events: &mut Vec<ServerEvent>) {
        let first_line = !self.bom_checked;
        self.bom_checked = true;
        if self.overflowed {
            self.overflowed = false;
            self.line.clear();
            return;
        }

        let mut bytes = self.line.as_slice();
        if first_line {
            bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
        }
        let line = String::from_utf8_lossy(bytes).into_owned();
        self.line.clear();

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line.as_str(), ""),
        };
        match field {
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "event" => self.event = value.to_string(),
            "id" if !value.contains('\0') => self.last_event_id = Some(value.to_string()),
            "retry" if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(Duration::from_millis(ms));
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<ServerEvent> {
        let event = std::mem::take(&mut self.event);
        if self.data.is_empty() {
            return None;
        }
        let mut data = std::mem::take(&mut self.data);
        if data.ends_with('\n') {
            data.pop();
        }
        Some(ServerEvent {
            event: if event.is_empty() {
                DEFAULT_EVENT_TYPE.to_string()
            } else {
                event
            },
            data,
            id: self.last_event_id.clone(),
        })
    }
}
