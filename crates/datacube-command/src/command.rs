//! Command execution utilities.

use thiserror::Error;
use tokio::process::Command;

/// Error type for command execution.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to execute {command}: {error}")]
    Execution { command: String, error: String },
    #[error("Command {command} failed with exit code {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Execute a command and return stdout as a string.
///
/// A non-zero exit is an error carrying the trimmed stderr of the command,
/// so callers can report what the external tool said without it having been
/// interleaved with our own output.
pub async fn run_command(cmd: &mut Command, name: &str) -> Result<String, CommandError> {
    tracing::debug!(command = name, "running {:?}", cmd.as_std());

    let output = cmd.output().await.map_err(|e| CommandError::Execution {
        command: name.to_string(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CommandError::Failed {
            command: name.to_string(),
            code: crate::exit::exit_code(output.status),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_command_success() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");
        let result = run_command(&mut cmd, "echo").await.unwrap();
        assert_eq!(result.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_command_not_found() {
        let mut cmd = Command::new("nonexistent_command_12345");
        let result = run_command(&mut cmd, "nonexistent").await;
        assert!(matches!(result, Err(CommandError::Execution { .. })));
    }

    #[tokio::test]
    async fn test_run_command_failure_captures_stderr() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo 'queue not found' >&2; exit 3"]);
        let err = run_command(&mut cmd, "sh").await.unwrap_err();
        match err {
            CommandError::Failed {
                command,
                code,
                stderr,
            } => {
                assert_eq!(command, "sh");
                assert_eq!(code, 3);
                assert_eq!(stderr, "queue not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
