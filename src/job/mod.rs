// src/job/mod.rs

//! Job identity, state machine, and the submission façade.
//!
//! A job is one invocation of an external command, tracked from submission
//! to a terminal state:
//!
//! - [`JobStatus`] is the monotonic state machine
//!   (`started → running → {success, failed}`).
//! - [`record`] holds the authoritative per-job state behind a per-record
//!   lock, plus the job's log buffer.
//! - [`registry`] is the process-wide identity → record map.
//! - [`manager`] is the façade the API layer calls: `submit`, `get`,
//!   `attach`.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod manager;
pub mod record;
pub mod registry;

pub use manager::JobManager;
pub use record::{JobHandle, JobSnapshot};
pub use registry::JobRegistry;

/// Canonical job identity: an opaque, collision-free token minted at
/// submission time and used as the sole lookup key.
pub type JobId = uuid::Uuid;

/// Lifecycle state of a job.
///
/// `Started` is recorded synchronously at submission, before the process is
/// confirmed alive. Transitions never move backward, and `Success`/`Failed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Started,
    Running,
    Success,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Failed)
    }

    /// Whether moving to `next` advances the state machine.
    ///
    /// Terminal states have equal rank, so `Success` and `Failed` can never
    /// replace one another.
    pub fn can_advance_to(self, next: JobStatus) -> bool {
        next.rank() > self.rank()
    }

    fn rank(self) -> u8 {
        match self {
            JobStatus::Started => 0,
            JobStatus::Running => 1,
            JobStatus::Success | JobStatus::Failed => 2,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Started => "started",
            JobStatus::Running => "running",
            JobStatus::Success => "success",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A resolved, launchable command descriptor.
///
/// The program is a fixed, pre-approved executable path; `args` is the
/// complete argument vector and `envs` the environment overrides applied on
/// top of the inherited environment. The descriptor is launched directly,
/// never interpreted by a shell, and the core never builds one by
/// concatenating untrusted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            envs: Vec::new(),
        }
    }

    pub fn with_envs(mut self, envs: Vec<(String, String)>) -> Self {
        self.envs = envs;
        self
    }
}

/// Human-readable command line, for display and job snapshots only.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
