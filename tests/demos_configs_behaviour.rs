// tests/demos_configs_behaviour.rs
//
// The demo catalogs must stay wired the way the README describes, and the
// loader/validator must reject malformed catalogs.

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use jobcast::config::load_and_validate;
use jobcast::errors::JobcastError;
use jobcast::types::LogRetention;
use jobcast_test_utils::builders::CatalogToml;

type TestResult = Result<(), Box<dyn Error>>;

fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn write_catalog(contents: &str) -> Result<tempfile::NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn host_management_demo_catalog_is_parsed_correctly() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo_path("jobcast.toml"))?;

    assert_eq!(cfg.config.max_log_lines, Some(4000));
    assert_eq!(cfg.retention(), LogRetention::Capped(4000));
    assert_eq!(cfg.command.len(), 3);

    let upgrade = cfg
        .command
        .get("system-upgrade")
        .expect("system-upgrade must exist");
    assert_eq!(upgrade.program, "/usr/bin/sudo");
    assert_eq!(upgrade.args, vec!["-n", "/usr/local/bin/system-upgrade.sh"]);
    assert!(upgrade.allow_extra_args);

    let enable = cfg.command.get("samba-enable").expect("samba-enable");
    assert_eq!(
        enable.args,
        vec!["-n", "/usr/local/bin/manage-samba.sh", "enable"]
    );
    assert!(!enable.allow_extra_args);

    Ok(())
}

#[test]
fn local_echo_demo_catalog_is_parsed_correctly() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo_path("local-echo.toml"))?;

    assert_eq!(cfg.config.max_log_lines, None);
    assert_eq!(cfg.retention(), LogRetention::Unbounded);

    let greet = cfg.command.get("greet").expect("greet must exist");
    assert_eq!(greet.program, "/bin/sh");
    assert_eq!(
        greet.env.get("JOBCAST_DEMO_NAME").map(String::as_str),
        Some("jobcast")
    );

    Ok(())
}

#[test]
fn resolve_appends_extra_args_only_when_allowed() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo_path("jobcast.toml"))?;

    let dry = cfg.resolve("system-upgrade", &["--dry-run".to_string()])?;
    assert_eq!(dry.program, PathBuf::from("/usr/bin/sudo"));
    assert_eq!(
        dry.args,
        vec!["-n", "/usr/local/bin/system-upgrade.sh", "--dry-run"]
    );

    // samba-enable has a fixed vector; extra flags are refused.
    let refused = cfg.resolve("samba-enable", &["disable".to_string()]);
    assert!(matches!(refused, Err(JobcastError::ConfigError(_))));

    // Unknown names are their own error kind.
    let unknown = cfg.resolve("wifi-join", &[]);
    assert!(matches!(unknown, Err(JobcastError::UnknownCommand(name)) if name == "wifi-join"));

    Ok(())
}

#[test]
fn empty_catalog_is_rejected() -> TestResult {
    init_tracing();

    let file = write_catalog("[config]\nmax_log_lines = 10\n")?;
    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(JobcastError::ConfigError(_))));

    Ok(())
}

#[test]
fn zero_log_cap_is_rejected() -> TestResult {
    init_tracing();

    let toml = CatalogToml::new()
        .max_log_lines(0)
        .command("noop", "/bin/true", &[])
        .build();
    let file = write_catalog(&toml)?;

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(JobcastError::ConfigError(msg)) if msg.contains("max_log_lines")));

    Ok(())
}

#[test]
fn relative_program_paths_are_rejected() -> TestResult {
    init_tracing();

    let toml = CatalogToml::new().command("sneaky", "true", &[]).build();
    let file = write_catalog(&toml)?;

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(JobcastError::ConfigError(msg)) if msg.contains("absolute")));

    Ok(())
}

#[test]
fn malformed_toml_surfaces_as_a_parse_error() -> TestResult {
    init_tracing();

    let file = write_catalog("[command.broken\nprogram = /bin/true")?;
    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(JobcastError::TomlError(_))));

    Ok(())
}

#[test]
fn builder_catalogs_round_trip_through_the_loader() -> TestResult {
    init_tracing();

    let toml = CatalogToml::new()
        .max_log_lines(100)
        .command("list", "/bin/ls", &["-l", "/tmp"])
        .build();
    let file = write_catalog(&toml)?;

    let cfg = load_and_validate(file.path())?;
    let spec = cfg.resolve("list", &[])?;
    assert_eq!(spec.program, PathBuf::from("/bin/ls"));
    assert_eq!(spec.args, vec!["-l", "/tmp"]);
    assert_eq!(cfg.retention(), LogRetention::Capped(100));

    Ok(())
}
