// src/job/record.rs

//! The authoritative state for one job.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::job::{CommandSpec, JobId, JobStatus};
use crate::stream::{LogBuffer, LogObserver};
use crate::types::LogRetention;

/// Mutable part of a job record.
///
/// Guarded by one lock so that status, exit code, and finish time are
/// always read and written together; a reader can never observe a
/// terminal status without its exit code.
struct MutableState {
    status: JobStatus,
    exit_code: Option<i32>,
    finished_at: Option<DateTime<Utc>>,
}

/// One job's record: identity, command, timestamps, status, and the log
/// buffer its process runner writes into.
///
/// Exactly one runner ever drives a given record; everything else holds it
/// behind `Arc` and only reads snapshots or subscribes to the log.
pub struct JobHandle {
    id: JobId,
    command: CommandSpec,
    started_at: DateTime<Utc>,
    state: RwLock<MutableState>,
    buffer: Arc<LogBuffer>,
}

/// Point-in-time copy of a job record, as surfaced to status callers.
///
/// Field names follow the service's wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub command: String,
    pub status: JobStatus,
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobHandle {
    pub fn new(id: JobId, command: CommandSpec, retention: LogRetention) -> Arc<Self> {
        Arc::new(Self {
            id,
            command,
            started_at: Utc::now(),
            state: RwLock::new(MutableState {
                status: JobStatus::Started,
                exit_code: None,
                finished_at: None,
            }),
            buffer: Arc::new(LogBuffer::new(retention)),
        })
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    pub fn buffer(&self) -> &Arc<LogBuffer> {
        &self.buffer
    }

    /// Attach a log observer that replays the backlog from the beginning.
    pub fn subscribe(&self) -> LogObserver {
        LogObserver::attach(Arc::clone(&self.buffer))
    }

    /// Atomic copy of the record's current state.
    pub fn snapshot(&self) -> JobSnapshot {
        let state = self.state.read().expect("job record lock poisoned");
        JobSnapshot {
            job_id: self.id,
            command: self.command.to_string(),
            status: state.status,
            exit_code: state.exit_code,
            started_at: self.started_at,
            finished_at: state.finished_at,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.state.read().expect("job record lock poisoned").status
    }

    /// Record that the process has been observed alive.
    ///
    /// A no-op if the record has already advanced past `Started`.
    pub fn mark_running(&self) {
        let mut state = self.state.write().expect("job record lock poisoned");
        if !state.status.can_advance_to(JobStatus::Running) {
            debug!(job = %self.id, status = %state.status, "ignoring running transition");
            return;
        }
        state.status = JobStatus::Running;
        debug!(job = %self.id, "job running");
    }

    /// Drive the record to its terminal state from the process exit code:
    /// zero means `Success`, anything else `Failed`.
    ///
    /// Status, exit code, and finish time are set under one lock. A record
    /// that is already terminal refuses the transition.
    pub fn complete(&self, exit_code: i32) {
        let status = if exit_code == 0 {
            JobStatus::Success
        } else {
            JobStatus::Failed
        };

        let mut state = self.state.write().expect("job record lock poisoned");
        if !state.status.can_advance_to(status) {
            warn!(
                job = %self.id,
                status = %state.status,
                exit_code,
                "refusing completion on already-terminal job"
            );
            return;
        }
        state.status = status;
        state.exit_code = Some(exit_code);
        state.finished_at = Some(Utc::now());
        debug!(job = %self.id, status = %status, exit_code, "job completed");
    }
}
