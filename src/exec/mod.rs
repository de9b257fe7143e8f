// src/exec/mod.rs

//! Process execution layer.
//!
//! This module owns the lifetime of each job's external command, using
//! `tokio::process::Command`, and writes progress back into the job record
//! and its log buffer.
//!
//! - [`runner`] drives a single job process: spawn, pump output, record the
//!   exit.
//! - [`backend`] provides the `JobBackend` trait and the concrete
//!   `ProcessBackend` that the manager uses in production, and which tests
//!   can replace with a scripted implementation.

pub mod backend;
pub mod runner;

pub use backend::{JobBackend, ProcessBackend};
