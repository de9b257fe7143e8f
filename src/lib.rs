// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod job;
pub mod logging;
pub mod stream;
pub mod types;

use std::path::PathBuf;

use anyhow::anyhow;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::job::JobManager;
use crate::stream::LogEvent;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - catalog loading
/// - the job manager
/// - one submission + an attached log observer printing to stdout
///
/// Returns the job's exit code once its log stream ends. This binary is a
/// reference consumer of the core; a network-facing service would call the
/// same `submit`/`get`/`attach` surface.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(0);
    }

    let name = args
        .command
        .ok_or_else(|| anyhow!("a command name is required unless --dry-run is given"))?;
    let spec = cfg.resolve(&name, &args.args)?;

    let manager = JobManager::with_retention(cfg.retention());
    let id = manager.submit(spec)?;
    info!(job = %id, "job submitted; streaming log");

    let mut observer = manager.attach(id)?;
    while let Some(event) = observer.recv().await {
        match event {
            LogEvent::Truncated { dropped } => {
                eprintln!("... {dropped} earlier log lines truncated ...");
            }
            LogEvent::Line(line) => println!("{line}"),
        }
    }

    // End-of-stream implies the record is terminal, so the snapshot has a
    // coherent status + exit code pair.
    let snapshot = manager.get(id)?;
    let code = snapshot.exit_code.unwrap_or(1);
    info!(
        job = %id,
        status = %snapshot.status,
        exit_code = code,
        "job finished"
    );

    Ok(code)
}

/// Simple dry-run output: print the validated catalog.
fn print_dry_run(cfg: &ConfigFile) {
    println!("jobcast dry-run");
    match cfg.config.max_log_lines {
        Some(n) => println!("  config.max_log_lines = {n}"),
        None => println!("  config.max_log_lines = unbounded"),
    }
    println!();

    println!("commands ({}):", cfg.command.len());
    for (name, command) in cfg.command.iter() {
        println!("  - {name}");
        println!("      program: {}", command.program);
        if !command.args.is_empty() {
            println!("      args: {:?}", command.args);
        }
        if !command.env.is_empty() {
            let env: Vec<String> = command
                .env
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            println!("      env: {:?}", env);
        }
        if command.allow_extra_args {
            println!("      allow_extra_args: true");
        }
    }
}
