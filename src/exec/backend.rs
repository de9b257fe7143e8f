// src/exec/backend.rs

//! Pluggable job backend abstraction.
//!
//! The manager hands each submitted job to a `JobBackend` instead of
//! spawning a process itself. This makes it easy to swap in a scripted
//! backend in tests while keeping the production runner in [`runner`].
//!
//! - `ProcessBackend` is the default implementation used by `jobcast`. It
//!   runs the job's command as a real OS process via [`runner::run_job`].
//! - Tests can provide their own `JobBackend` that, for example, records
//!   which commands were submitted and drives the record through its
//!   lifecycle directly.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::job::record::JobHandle;

use super::runner;

/// Trait abstracting how a submitted job is executed.
///
/// Production code uses [`ProcessBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait JobBackend: Send + Sync + 'static {
    /// Drive the job to a terminal state.
    ///
    /// Runs inside its own Tokio task. The implementation is free to:
    /// - spawn the record's command as an OS process (production)
    /// - simulate output and completion against the record (tests)
    ///
    /// Whatever it does, it must leave the record terminal and the log
    /// buffer closed, never stuck in `started`.
    fn run(&self, handle: Arc<JobHandle>) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
}

/// Real process backend used in production.
pub struct ProcessBackend;

impl JobBackend for ProcessBackend {
    fn run(&self, handle: Arc<JobHandle>) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        Box::pin(runner::run_job(handle))
    }
}
