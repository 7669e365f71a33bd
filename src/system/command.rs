use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

/// Run `program` and collect its stdout, giving up after `timeout`.
///
/// The child is killed when the deadline passes. Spawn failures, a non-zero
/// exit and timeouts all come back as `None`.
pub async fn stdout_within(program: &str, args: &[String], timeout: Duration) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, output).await {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(Ok(output)) => {
            debug!(program, status = %output.status, "command exited unsuccessfully");
            None
        }
        Ok(Err(err)) => {
            debug!(program, %err, "command failed to run");
            None
        }
        Err(_) => {
            debug!(program, ?timeout, "command timed out");
            None
        }
    }
}
