// src/config/mod.rs

//! Command catalog configuration.
//!
//! The catalog is the only source of launchable command descriptors for the
//! CLI: named, pre-approved executables with fixed base arguments and
//! environment overrides, loaded from TOML and validated before use.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CommandConfig, ConfigFile, ConfigSection, RawConfigFile};
