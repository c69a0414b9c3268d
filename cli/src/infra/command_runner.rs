//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed timeout and kill on all platforms.

use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::ports::{CommandRunner, Invocation};

/// Default timeout for version and import checks.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `CommandRunner`.
///
/// Checks are killed explicitly when the timeout fires: dropping the future
/// alone does not terminate the OS process on Windows. The service process
/// has no timeout.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

fn command(invocation: &Invocation) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&invocation.program);
    cmd.args(&invocation.args);
    for (key, value) in &invocation.envs {
        cmd.env(key, value);
    }
    if let Some(dir) = &invocation.cwd {
        cmd.current_dir(dir);
    }
    cmd
}

impl CommandRunner for TokioCommandRunner {
    async fn output(&self, invocation: &Invocation) -> Result<Output> {
        let program = invocation.program.display().to_string();
        tracing::debug!(command = %invocation.display(), "running check");

        let mut child = command(invocation)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(self.timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{program} timed out after {}s", self.timeout.as_secs())
            }
        }
    }

    async fn status(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let program = invocation.program.display().to_string();
        let mut child = command(invocation)
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        // Ctrl+C reaches the child through the terminal's process group.
        // Keep waiting so its exit status is still reported.
        loop {
            tokio::select! {
                status = child.wait() => {
                    return status.with_context(|| format!("waiting for {program}"));
                }
                signal = tokio::signal::ctrl_c() => {
                    match signal {
                        Ok(()) => tracing::info!("interrupt received, waiting for {program} to exit"),
                        Err(e) => {
                            tracing::warn!(error = %e, "cannot listen for interrupts");
                            return child
                                .wait()
                                .await
                                .with_context(|| format!("waiting for {program}"));
                        }
                    }
                }
            }
        }
    }
}
