// src/exec/runner.rs

//! Single-command process runner.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::{Result, WslctlError};
use crate::exec::drain::spawn_reader;
use crate::exec::result::ProcessResult;
use crate::exec::spec::CommandSpec;

/// How long we wait for a killed child to be reaped before giving up on it.
const KILL_GRACE: Duration = Duration::from_secs(2);

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Run `spec` as a child process and wait for it, at most `timeout`.
///
/// Start failures and timeouts come back as a [`ProcessResult`]; only
/// failures of the OS while waiting on an already running child are
/// returned as `Err`.
///
/// - Both streams are drained by independent tasks, so a child filling its
///   stderr pipe while we are waiting on stdout cannot stall.
/// - Output is assembled only once the child has exited and both readers
///   reached EOF.
/// - On timeout the child is killed unless it already exited; kill failures
///   are logged, not returned. `kill_on_drop` covers every other exit path.
pub async fn run_process(spec: CommandSpec, timeout: Duration) -> Result<ProcessResult> {
    if timeout.is_zero() {
        return Err(WslctlError::InvalidTimeout(spec.to_string()));
    }

    info!(
        program = %spec.program(),
        args = %spec.command_line(),
        timeout_ms = timeout.as_millis() as u64,
        shell_execute = spec.uses_shell_execute(),
        "starting process"
    );

    let mut child = match build_command(&spec).spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!(program = %spec.program(), error = %e, "failed to start process");
            return Ok(ProcessResult::start_failure(format!(
                "failed to start '{}': {e}",
                spec.program()
            )));
        }
    };

    let mut stdout_reader = spawn_reader(child.stdout.take(), spec.encoding(), "stdout");
    let mut stderr_reader = spawn_reader(child.stderr.take(), spec.encoding(), "stderr");

    let finished = tokio::time::timeout(timeout, async {
        let (status, stdout, stderr) =
            tokio::join!(child.wait(), &mut stdout_reader, &mut stderr_reader);
        (status, stdout, stderr)
    })
    .await;

    match finished {
        Ok((status, stdout, stderr)) => {
            let status = status?;
            let reader_failed = |source| WslctlError::ReaderFailed {
                program: spec.program().to_string(),
                source,
            };
            let stdout = stdout.map_err(reader_failed)?;
            let stderr = stderr.map_err(reader_failed)?;

            let exit_code = exit_code_of(status);
            info!(
                program = %spec.program(),
                exit_code,
                success = status.success(),
                "process exited"
            );

            Ok(ProcessResult::exited(exit_code, stdout, stderr))
        }
        Err(_elapsed) => {
            warn!(
                program = %spec.program(),
                args = %spec.command_line(),
                timeout_ms = timeout.as_millis() as u64,
                "process timed out; killing"
            );
            kill_unless_exited(&mut child, spec.program()).await;
            stdout_reader.abort();
            stderr_reader.abort();

            Ok(ProcessResult::timed_out())
        }
    }
}

fn build_command(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(spec.program());
    cmd.args(spec.arguments()).stdin(Stdio::null()).kill_on_drop(true);

    if spec.redirects_output() {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    #[cfg(windows)]
    if spec.creates_no_window() {
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    cmd
}

/// Signal-terminated children on Unix have no exit code; report them as -1.
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Kill policy for the timeout path: a child that exited in the race window
/// is left alone, anything else is killed and reaped for at most
/// [`KILL_GRACE`]. Failures are logged only.
async fn kill_unless_exited(child: &mut Child, program: &str) {
    match child.try_wait() {
        Ok(Some(status)) => {
            debug!(
                program,
                exit_code = exit_code_of(status),
                "process exited while timing out; nothing to kill"
            );
        }
        Ok(None) | Err(_) => match tokio::time::timeout(KILL_GRACE, child.kill()).await {
            Ok(Ok(())) => debug!(program, "timed out process killed"),
            Ok(Err(e)) => warn!(program, error = %e, "failed to kill timed out process"),
            Err(_) => warn!(program, "timed out process did not exit after kill"),
        },
    }
}
