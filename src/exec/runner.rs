// src/exec/runner.rs

//! Individual job process runner.

use std::process::Stdio;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::job::record::JobHandle;
use crate::stream::LogBuffer;

/// Exit code recorded when the process never produced one: spawn failure or
/// death by signal.
pub const SYNTHETIC_EXIT_CODE: i32 = -1;

/// Run one job's command as an OS process and drive the record to a
/// terminal state.
///
/// Infrastructure failures (executable missing, permission denied) are
/// converted into a normal `failed` completion with [`SYNTHETIC_EXIT_CODE`]
/// and one explanatory log line; the record is never left stuck in
/// `started`, and nothing propagates back to the submission caller.
pub async fn run_job(handle: Arc<JobHandle>) {
    let id = handle.id();
    if let Err(err) = run_job_inner(&handle).await {
        error!(job = %id, error = %err, "job execution error");
        handle
            .buffer()
            .append(format!("failed to start: {err:#}"));
        handle.complete(SYNTHETIC_EXIT_CODE);
        handle.buffer().close();
    }
}

async fn run_job_inner(handle: &Arc<JobHandle>) -> Result<()> {
    let spec = handle.command();
    info!(
        job = %handle.id(),
        command = %spec,
        "starting job process"
    );

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .envs(spec.envs.iter().cloned())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning {}", spec.program.display()))?;

    // Post-spawn check: the OS accepted the process, so the record leaves
    // `started` before any output arrives.
    handle.mark_running();

    // Pump stdout and stderr concurrently so lines land in the buffer in
    // real-time arrival order, merged across the two streams. The runner
    // never waits for process exit before delivering output.
    let stdout_pump = spawn_line_pump(handle, "stdout", child.stdout.take());
    let stderr_pump = spawn_line_pump(handle, "stderr", child.stderr.take());

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for {}", spec.program.display()))?;

    // Drain both pipes to EOF before recording completion, so no observer
    // can see end-of-stream ahead of buffered output.
    let _ = stdout_pump.await;
    let _ = stderr_pump.await;

    let code = status.code().unwrap_or(SYNTHETIC_EXIT_CODE);
    info!(
        job = %handle.id(),
        exit_code = code,
        success = status.success(),
        "job process exited"
    );

    handle.complete(code);
    handle.buffer().close();

    Ok(())
}

/// Forward one pipe of the child process into the job's log buffer,
/// line by line, as output arrives.
///
/// Bytes are decoded lossily so a misbehaving script can't stall the log,
/// and blank lines are skipped.
fn spawn_line_pump<R>(
    handle: &Arc<JobHandle>,
    stream: &'static str,
    pipe: Option<R>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let job = handle.id();
    let buffer: Arc<LogBuffer> = Arc::clone(handle.buffer());

    tokio::spawn(async move {
        let Some(pipe) = pipe else {
            return;
        };

        let mut reader = BufReader::new(pipe);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            match reader.read_until(b'\n', &mut raw).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&raw);
                    let line = line.trim_end_matches(['\n', '\r']);
                    if line.is_empty() {
                        continue;
                    }
                    buffer.append(line);
                }
                Err(err) => {
                    debug!(job = %job, stream, error = %err, "pipe read error; stopping pump");
                    break;
                }
            }
        }

        debug!(job = %job, stream, "pipe drained");
    })
}
