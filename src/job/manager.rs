// src/job/manager.rs

//! The job submission façade.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::errors::{JobcastError, Result};
use crate::exec::{JobBackend, ProcessBackend};
use crate::job::record::{JobHandle, JobSnapshot};
use crate::job::registry::JobRegistry;
use crate::job::{CommandSpec, JobId};
use crate::stream::LogObserver;
use crate::types::LogRetention;

/// Single entry point for submitting jobs and observing them.
///
/// Generic over the [`JobBackend`] so tests can drive job lifecycles
/// without spawning OS processes; production uses [`ProcessBackend`].
///
/// `submit` returns the job identity synchronously; it never waits for
/// the process to produce output or reach any further state.
pub struct JobManager<B = ProcessBackend> {
    registry: Arc<JobRegistry>,
    backend: Arc<B>,
    retention: LogRetention,
}

impl JobManager<ProcessBackend> {
    /// Manager running real processes with unbounded log retention.
    pub fn new() -> Self {
        Self::with_retention(LogRetention::Unbounded)
    }

    /// Manager running real processes with the given log retention.
    pub fn with_retention(retention: LogRetention) -> Self {
        Self::with_backend(ProcessBackend, retention)
    }
}

impl Default for JobManager<ProcessBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: JobBackend> JobManager<B> {
    pub fn with_backend(backend: B, retention: LogRetention) -> Self {
        Self {
            registry: Arc::new(JobRegistry::new()),
            backend: Arc::new(backend),
            retention,
        }
    }

    /// Allocate an identity, register the record in `started`, hand the job
    /// to the backend asynchronously, and return the identity immediately.
    ///
    /// Every submission yields a new identity and a new process; a prior
    /// job's process is never reused or restarted.
    pub fn submit(&self, command: CommandSpec) -> Result<JobId> {
        let id = Uuid::new_v4();
        let handle = JobHandle::new(id, command, self.retention);

        self.registry.insert(Arc::clone(&handle))?;
        info!(job = %id, command = %handle.command(), "job submitted");

        // One supervised task per job; its completion path writes the
        // terminal state back into the record.
        tokio::spawn(self.backend.run(handle));

        Ok(id)
    }

    /// Current snapshot of a job record.
    pub fn get(&self, id: JobId) -> Result<JobSnapshot> {
        self.registry
            .get(id)
            .map(|handle| handle.snapshot())
            .ok_or(JobcastError::UnknownJob(id))
    }

    /// Attach a log observer to a job.
    ///
    /// Succeeds for running and completed jobs alike: the observer replays
    /// the full backlog first, then streams live lines, then sees
    /// end-of-stream.
    pub fn attach(&self, id: JobId) -> Result<LogObserver> {
        self.registry
            .get(id)
            .map(|handle| handle.subscribe())
            .ok_or(JobcastError::UnknownJob(id))
    }

    pub fn registry(&self) -> &Arc<JobRegistry> {
        &self.registry
    }
}
