// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{JobcastError, Result};
use crate::job::CommandSpec;
use crate::types::LogRetention;

/// Top-level catalog as read from a TOML file.
///
/// ```toml
/// [config]
/// max_log_lines = 4000
///
/// [command.system-upgrade]
/// program = "/usr/bin/sudo"
/// args = ["-n", "/usr/local/bin/system-upgrade.sh"]
/// allow_extra_args = true
/// ```
///
/// All sections are optional except the catalog itself; defaults are
/// handled by `serde`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All pre-approved commands from `[command.<name>]`.
    ///
    /// Keys are the *command names* (e.g. `"system-upgrade"`).
    #[serde(default)]
    pub command: BTreeMap<String, CommandConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// Maximum retained log lines per job.
    ///
    /// Absent means every line is retained for the life of the job. When
    /// set, the oldest lines are evicted and late-attaching observers are
    /// told how many lines they missed.
    #[serde(default)]
    pub max_log_lines: Option<usize>,
}

/// `[command.<name>]` section: one pre-approved executable.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    /// Absolute path of the executable to launch. Never passed through a
    /// shell.
    pub program: String,

    /// Base argument vector.
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment overrides applied on top of the inherited environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Whether caller-supplied flags may be appended to `args`.
    #[serde(default)]
    pub allow_extra_args: bool,
}

/// Validated catalog.
///
/// Constructed via `TryFrom<RawConfigFile>` (see `validate.rs`), which is
/// the only path from on-disk TOML to a usable catalog.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub command: BTreeMap<String, CommandConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        command: BTreeMap<String, CommandConfig>,
    ) -> Self {
        Self { config, command }
    }

    /// Resolve a catalog command name plus caller-supplied extra flags into
    /// a launchable [`CommandSpec`].
    pub fn resolve(&self, name: &str, extra_args: &[String]) -> Result<CommandSpec> {
        let entry = self
            .command
            .get(name)
            .ok_or_else(|| JobcastError::UnknownCommand(name.to_string()))?;

        if !extra_args.is_empty() && !entry.allow_extra_args {
            return Err(JobcastError::ConfigError(format!(
                "command '{name}' does not accept extra arguments"
            )));
        }

        let args = entry
            .args
            .iter()
            .chain(extra_args.iter())
            .cloned()
            .collect();

        let envs = entry
            .env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(CommandSpec {
            program: PathBuf::from(&entry.program),
            args,
            envs,
        })
    }

    /// Log retention policy derived from `[config].max_log_lines`.
    pub fn retention(&self) -> LogRetention {
        LogRetention::from_max_lines(self.config.max_log_lines)
    }
}
