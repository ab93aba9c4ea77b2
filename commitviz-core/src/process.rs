//! Blocking external-process runner with a hard timeout.

use crate::error::{Error, Result};
use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl ProcessOutput {
    /// Human-readable exit status (`exit code 1`, `signal`)
    pub fn describe_status(&self) -> String {
        match self.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".to_string(),
        }
    }
}

/// Run `command` to completion, killing it once `timeout` has elapsed.
///
/// Stdout and stderr are drained on helper threads so a chatty child can
/// never block on a full pipe while we poll for its exit.
pub fn run(mut command: Command, timeout: Duration) -> Result<ProcessOutput> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let start = Instant::now();
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if start.elapsed() > timeout => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(%program, timeout_secs = timeout.as_secs(), "process timed out");
                return Err(Error::Timeout { program, after: timeout });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let stdout = stdout.join().unwrap_or_default();
    let stderr = String::from_utf8_lossy(&stderr.join().unwrap_or_default())
        .trim()
        .to_string();
    tracing::debug!(%program, ?status, bytes = stdout.len(), "process finished");

    Ok(ProcessOutput { status, stdout, stderr })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_output() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo err >&2"]);

        let output = run(cmd, Duration::from_secs(10)).unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "out\n");
        assert_eq!(output.stderr, "err");
    }

    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exit 3"]);

        let output = run(cmd, Duration::from_secs(10)).unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(output.describe_status(), "exit code 3");
    }

    #[test]
    fn test_timeout_kills_child() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 5"]);

        let err = run(cmd, Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let cmd = Command::new("definitely-not-a-real-program-xyz");
        let err = run(cmd, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
