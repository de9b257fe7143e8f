// src/stream/mod.rs

//! Log capture and fan-out for one job.
//!
//! The broadcast primitive is an append-only line log plus one cursor per
//! observer, never a shared queue:
//!
//! - [`buffer`] owns the lines. The job's process runner is the only writer;
//!   appends never block on readers.
//! - [`observer`] is a per-consumer cursor into the buffer. Each observer
//!   replays the backlog from the beginning, then streams live lines, then
//!   sees end-of-stream when the buffer closes. A slow or vanished observer
//!   costs nobody anything; dropping it is detach.

pub mod buffer;
pub mod observer;

pub use buffer::{LogBuffer, LogSnapshot};
pub use observer::{LogEvent, LogObserver};
