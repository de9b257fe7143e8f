// src/stream/observer.rs

//! Per-consumer cursor into a job's log buffer.

use std::sync::Arc;

use crate::stream::buffer::LogBuffer;

/// One delivery to an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// Capped retention evicted `dropped` lines before the observer's
    /// cursor reached them. Delivered at most once per lag, always before
    /// the next retained line.
    Truncated { dropped: u64 },
    /// One log line, in append order.
    Line(Arc<str>),
}

/// An attached log consumer.
///
/// Holds a cursor into the buffer; `recv` yields the backlog from the
/// beginning, then live lines as they arrive, then `None` once the buffer
/// is closed and fully drained. Dropping the observer detaches it; the
/// buffer and other observers are unaffected.
pub struct LogObserver {
    buffer: Arc<LogBuffer>,
    /// Absolute line number of the next line to deliver.
    cursor: u64,
}

impl LogObserver {
    /// Attach to a buffer with the cursor at the beginning of the stream
    /// (absolute line 0), so the full backlog is replayed first.
    pub fn attach(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Wait for and return the next event, or `None` at end-of-stream.
    ///
    /// Ordering guarantee: every line appended to the buffer is returned
    /// exactly once, in append order, with gaps reported as
    /// [`LogEvent::Truncated`], never silently skipped.
    pub async fn recv(&mut self) -> Option<LogEvent> {
        loop {
            // Register with the notifier before inspecting state, so an
            // append or close between the check and the await still wakes
            // this task.
            let notified = self.buffer.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let state = self
                    .buffer
                    .state
                    .lock()
                    .expect("log buffer lock poisoned");

                if self.cursor < state.start {
                    let dropped = state.start - self.cursor;
                    self.cursor = state.start;
                    return Some(LogEvent::Truncated { dropped });
                }

                let idx = (self.cursor - state.start) as usize;
                if idx < state.lines.len() {
                    let line = state.lines[idx].clone();
                    self.cursor += 1;
                    return Some(LogEvent::Line(line));
                }

                if state.closed {
                    return None;
                }
            }

            notified.await;
        }
    }
}
