//! Best-effort shell command execution.
//!
//! Every fact source that is a command goes through [`run_shell`]: run the
//! command line through `sh -c`, wait up to [`COMMAND_TIMEOUT_MS`], and hand
//! back trimmed stdout. Timeout, non-zero exit, kill-by-signal, and spawn
//! failure all collapse into the same empty result — this is a fire-and-forget
//! probe, not a reliable RPC, and callers fall through to the next source in
//! their chain rather than inspect what went wrong.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::{ProbeError, Result};

/// How long a probed command may run before it is abandoned.
pub const COMMAND_TIMEOUT_MS: u64 = 2000;

/// Run a shell command line and return its trimmed stdout, or an empty
/// string if anything at all went wrong.
pub async fn run_shell(command: &str) -> String {
    match try_run_shell(command).await {
        Ok(stdout) => stdout,
        Err(err) => {
            tracing::debug!(command, %err, "probe command yielded nothing");
            String::new()
        }
    }
}

/// Run a shell command line, keeping the failure reason.
///
/// Only [`run_shell`] and the tests look at the `Err` side; fact resolution
/// treats every failure identically.
pub async fn try_run_shell(command: &str) -> Result<String> {
    let child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    let timeout = Duration::from_millis(COMMAND_TIMEOUT_MS);
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ProbeError::Timeout(COMMAND_TIMEOUT_MS))??;

    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_and_trims_stdout() {
        let out = run_shell("echo '  hello  '").await;
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn nonzero_exit_is_empty() {
        let out = run_shell("echo partial; exit 3").await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn missing_command_is_empty() {
        let out = run_shell("definitely-not-a-real-command-9f2c").await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn timeout_is_empty_like_any_other_failure() {
        let out = run_shell("sleep 5; echo too-late").await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn timeout_error_variant() {
        let err = try_run_shell("sleep 5").await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout(COMMAND_TIMEOUT_MS)));
    }
}
