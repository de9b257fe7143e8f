// src/config/validate.rs

use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{JobcastError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::JobcastError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.command))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_commands(cfg)?;
    validate_global_config(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn ensure_has_commands(cfg: &RawConfigFile) -> Result<()> {
    if cfg.command.is_empty() {
        return Err(JobcastError::ConfigError(
            "catalog must contain at least one [command.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.max_log_lines == Some(0) {
        return Err(JobcastError::ConfigError(
            "[config].max_log_lines must be >= 1 when set (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (name, command) in cfg.command.iter() {
        if command.program.trim().is_empty() {
            return Err(JobcastError::ConfigError(format!(
                "command '{}' has an empty `program`",
                name
            )));
        }

        // Pre-approved executables are addressed absolutely, never resolved
        // through PATH.
        if !Path::new(&command.program).is_absolute() {
            return Err(JobcastError::ConfigError(format!(
                "command '{}' program must be an absolute path (got '{}')",
                name, command.program
            )));
        }

        for key in command.env.keys() {
            if key.trim().is_empty() {
                return Err(JobcastError::ConfigError(format!(
                    "command '{}' has an empty environment variable name",
                    name
                )));
            }
        }
    }
    Ok(())
}
