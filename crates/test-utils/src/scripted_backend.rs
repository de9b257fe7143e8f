use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jobcast::exec::JobBackend;
use jobcast::job::JobHandle;

/// What a [`ScriptedBackend`] does to every job it is handed.
#[derive(Debug, Clone)]
pub struct ScriptedRun {
    /// Lines appended to the job's log buffer, in order.
    pub lines: Vec<String>,
    /// Exit code recorded on completion.
    pub exit_code: i32,
    /// Optional pause before each line, to exercise live delivery.
    pub line_delay: Option<Duration>,
}

impl ScriptedRun {
    pub fn new(lines: &[&str], exit_code: i32) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            exit_code,
            line_delay: None,
        }
    }

    pub fn with_line_delay(mut self, delay: Duration) -> Self {
        self.line_delay = Some(delay);
        self
    }
}

/// A fake job backend that:
/// - records which commands were "run"
/// - drives each record through running → terminal with scripted output,
///   without spawning any OS process.
pub struct ScriptedBackend {
    run: ScriptedRun,
    executed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    pub fn new(run: ScriptedRun, executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self { run, executed }
    }
}

impl JobBackend for ScriptedBackend {
    fn run(&self, handle: Arc<JobHandle>) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        let run = self.run.clone();
        let executed = Arc::clone(&self.executed);

        Box::pin(async move {
            {
                let mut guard = executed.lock().unwrap();
                guard.push(handle.command().to_string());
            }

            handle.mark_running();

            for line in &run.lines {
                if let Some(delay) = run.line_delay {
                    tokio::time::sleep(delay).await;
                }
                handle.buffer().append(line.as_str());
            }

            handle.complete(run.exit_code);
            handle.buffer().close();
        })
    }
}
