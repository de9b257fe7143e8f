// src/job/registry.rs

//! Process-wide mapping from job identity to job record.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::{JobcastError, Result};
use crate::job::record::JobHandle;
use crate::job::JobId;

/// Identity → record map shared by the submission path and all readers.
///
/// Lookups take the read lock, so concurrent status polls and log attaches
/// never serialize against each other; only submissions take the write
/// lock, and per-record mutation is guarded inside [`JobHandle`] itself.
/// Entries are never removed: job volume is low-frequency and
/// human-triggered, and history lives for the life of the process.
#[derive(Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, Arc<JobHandle>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created record.
    ///
    /// Identity generation makes collisions practically unreachable, but an
    /// occupied identity still fails loudly rather than overwriting an
    /// existing record.
    pub fn insert(&self, handle: Arc<JobHandle>) -> Result<()> {
        let mut jobs = self.jobs.write().expect("job registry lock poisoned");
        match jobs.entry(handle.id()) {
            Entry::Occupied(_) => Err(JobcastError::DuplicateJob(handle.id())),
            Entry::Vacant(slot) => {
                slot.insert(handle);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: JobId) -> Option<Arc<JobHandle>> {
        self.jobs
            .read()
            .expect("job registry lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.jobs.read().expect("job registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
