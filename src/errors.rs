// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::job::JobId;

#[derive(Error, Debug)]
pub enum JobcastError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown job: {0}")]
    UnknownJob(JobId),

    #[error("Duplicate job identity: {0}")]
    DuplicateJob(JobId),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, JobcastError>;
