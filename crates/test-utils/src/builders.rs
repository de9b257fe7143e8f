#![allow(dead_code)]

use jobcast::job::CommandSpec;

/// A `CommandSpec` that runs `script` under `/bin/sh -c`.
///
/// The shell here is part of the *test fixture* (a convenient way to write
/// multi-step scripts), not of the core, which always launches the
/// descriptor's program directly.
pub fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

/// Like [`sh`], with environment overrides applied on top of the inherited
/// environment.
pub fn sh_with_env(script: &str, envs: &[(&str, &str)]) -> CommandSpec {
    sh(script).with_envs(
        envs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

/// A `CommandSpec` whose program does not exist on any host.
pub fn missing_program() -> CommandSpec {
    CommandSpec::new("/nonexistent/jobcast-no-such-binary", Vec::new())
}

/// Builder for catalog TOML, for loader/validate tests.
pub struct CatalogToml {
    max_log_lines: Option<usize>,
    commands: Vec<String>,
}

impl CatalogToml {
    pub fn new() -> Self {
        Self {
            max_log_lines: None,
            commands: Vec::new(),
        }
    }

    pub fn max_log_lines(mut self, n: usize) -> Self {
        self.max_log_lines = Some(n);
        self
    }

    pub fn command(mut self, name: &str, program: &str, args: &[&str]) -> Self {
        let args = args
            .iter()
            .map(|a| format!("{a:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.commands.push(format!(
            "[command.{name}]\nprogram = {program:?}\nargs = [{args}]\n"
        ));
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        if let Some(n) = self.max_log_lines {
            out.push_str(&format!("[config]\nmax_log_lines = {n}\n\n"));
        }
        for command in &self.commands {
            out.push_str(command);
            out.push('\n');
        }
        out
    }
}

impl Default for CatalogToml {
    fn default() -> Self {
        Self::new()
    }
}
