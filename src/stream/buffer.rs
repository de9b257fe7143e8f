// src/stream/buffer.rs

//! Append-only line buffer for one job's output.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tracing::warn;

use crate::types::LogRetention;

/// Mutable buffer state, guarded by one mutex with short critical sections.
pub(super) struct BufferState {
    /// Retained lines. `lines[0]` is absolute line number `start`.
    pub(super) lines: VecDeque<Arc<str>>,
    /// Absolute line number of the front of `lines`; > 0 once capped
    /// retention has evicted something.
    pub(super) start: u64,
    pub(super) closed: bool,
}

/// Append-only, single-writer / multi-reader log of one job's output lines.
///
/// - `append` adds a line to the end and wakes waiting observers; it never
///   blocks on the presence, absence, or speed of readers.
/// - `close` marks the end of the stream. Idempotent; content stays
///   readable afterwards, further appends are discarded.
/// - With capped retention the oldest lines are evicted from the front and
///   the eviction count is kept, so a lagging observer can be told exactly
///   what it missed instead of silently losing lines.
pub struct LogBuffer {
    pub(super) state: Mutex<BufferState>,
    pub(super) notify: Notify,
    retention: LogRetention,
}

/// Point-in-time copy of a buffer's content.
#[derive(Debug, Clone)]
pub struct LogSnapshot {
    /// Retained lines, oldest first.
    pub lines: Vec<Arc<str>>,
    /// Lines evicted before the front of `lines` by capped retention.
    pub evicted: u64,
    pub closed: bool,
}

impl LogBuffer {
    pub fn new(retention: LogRetention) -> Self {
        Self {
            state: Mutex::new(BufferState {
                lines: VecDeque::new(),
                start: 0,
                closed: false,
            }),
            notify: Notify::new(),
            retention,
        }
    }

    /// Append one line to the end of the buffer.
    pub fn append(&self, line: impl Into<Arc<str>>) {
        let line = line.into();
        {
            let mut state = self.state.lock().expect("log buffer lock poisoned");
            if state.closed {
                warn!("discarding append to closed log buffer");
                return;
            }
            if let LogRetention::Capped(max) = self.retention {
                while state.lines.len() >= max.max(1) {
                    state.lines.pop_front();
                    state.start += 1;
                }
            }
            state.lines.push_back(line);
        }
        self.notify.notify_waiters();
    }

    /// Mark the buffer closed: no further lines will ever be appended.
    ///
    /// Wakes every waiting observer so they can observe end-of-stream.
    pub fn close(&self) {
        {
            let mut state = self.state.lock().expect("log buffer lock poisoned");
            if state.closed {
                return;
            }
            state.closed = true;
        }
        self.notify.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.state
            .lock()
            .expect("log buffer lock poisoned")
            .closed
    }

    /// Copy of the full retained content so far.
    ///
    /// Never blocks future appends beyond the duration of the copy.
    pub fn snapshot(&self) -> LogSnapshot {
        let state = self.state.lock().expect("log buffer lock poisoned");
        LogSnapshot {
            lines: state.lines.iter().cloned().collect(),
            evicted: state.start,
            closed: state.closed,
        }
    }

    /// Total number of lines ever appended (retained + evicted).
    pub fn total_appended(&self) -> u64 {
        let state = self.state.lock().expect("log buffer lock poisoned");
        state.start + state.lines.len() as u64
    }
}
