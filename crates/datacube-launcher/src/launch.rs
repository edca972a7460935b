//! Run the conversion program with the entrypoint's arguments.

use crate::config::LauncherConfig;
use crate::python_path::{PYTHONPATH, extend_python_path};
use camino::Utf8PathBuf;
use datacube_command::{exit_code, spawn_failure_code};
use std::env::JoinPathsError;
use std::ffi::{OsStr, OsString};
use std::io;
use std::process;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Cannot add {dir} to PYTHONPATH: {source}")]
    PythonPath {
        dir: Utf8PathBuf,
        #[source]
        source: JoinPathsError,
    },
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Exit code the entrypoint reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::PythonPath { .. } => 1,
            LaunchError::Spawn { source, .. } => spawn_failure_code(source),
        }
    }
}

/// A prepared invocation of the conversion program.
#[derive(Debug, Clone)]
pub struct Launcher {
    config: LauncherConfig,
    args: Vec<OsString>,
    python_path: OsString,
}

impl Launcher {
    /// Prepare a launch, extending the current process's `PYTHONPATH`.
    pub fn new<I, S>(config: LauncherConfig, args: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let existing = std::env::var_os(PYTHONPATH);
        Self::with_python_path(config, args, existing.as_deref())
    }

    /// Prepare a launch, extending the given `PYTHONPATH` value.
    pub fn with_python_path<I, S>(
        config: LauncherConfig,
        args: I,
        existing: Option<&OsStr>,
    ) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let python_path = extend_python_path(existing, config.program_dir.as_std_path())
            .map_err(|source| LaunchError::PythonPath {
                dir: config.program_dir.clone(),
                source,
            })?;

        Ok(Self {
            config,
            args: args.into_iter().map(Into::into).collect(),
            python_path,
        })
    }

    /// Arguments forwarded to the script, in order.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// `PYTHONPATH` value the program runs with.
    pub fn python_path(&self) -> &OsStr {
        &self.python_path
    }

    fn std_command(&self) -> process::Command {
        let mut cmd = process::Command::new(&self.config.python);
        cmd.arg(self.config.script_path());
        cmd.args(&self.args);
        cmd.env(PYTHONPATH, &self.python_path);
        cmd
    }

    /// The interpreter invocation, inheriting stdio.
    pub fn command(&self) -> tokio::process::Command {
        tokio::process::Command::from(self.std_command())
    }

    fn spawn_error(&self, source: io::Error) -> LaunchError {
        LaunchError::Spawn {
            program: self.config.python.clone(),
            source,
        }
    }

    /// Run the program to completion and return the exit code to propagate.
    pub async fn run(&self) -> Result<i32, LaunchError> {
        tracing::debug!(
            python = %self.config.python,
            script = %self.config.script_path(),
            args = self.args.len(),
            "launching conversion program"
        );

        let status = self
            .command()
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        let code = exit_code(status);
        if code != 0 {
            tracing::debug!(code, "conversion program exited with failure");
        }
        Ok(code)
    }

    /// Replace the current process with the program.
    ///
    /// Only returns if the exec itself failed.
    #[cfg(unix)]
    pub fn exec(&self) -> LaunchError {
        use std::os::unix::process::CommandExt;

        tracing::debug!(
            python = %self.config.python,
            script = %self.config.script_path(),
            "exec conversion program"
        );
        let err = self.std_command().exec();
        self.spawn_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use std::fs;
    use tempfile::TempDir;

    /// A config that runs `script_body` with `sh` from a scratch program dir.
    fn shell_config(temp: &TempDir, script_body: &str) -> LauncherConfig {
        let program_dir = Utf8Path::from_path(temp.path()).unwrap().to_path_buf();
        fs::write(program_dir.join("convert.sh"), script_body).unwrap();
        LauncherConfig {
            program_dir,
            python: "sh".to_string(),
            script: Utf8PathBuf::from("convert.sh"),
        }
    }

    const ECHO_ARGS: &str = "printf '%s\\n' \"$#\"\n\
                             for arg in \"$@\"; do printf '[%s]\\n' \"$arg\"; done\n\
                             printf 'PYTHONPATH=%s\\n' \"$PYTHONPATH\"\n";

    #[tokio::test]
    async fn test_arguments_forwarded_verbatim() {
        let temp = TempDir::new().unwrap();
        let config = shell_config(&temp, ECHO_ARGS);
        let program_dir = config.program_dir.clone();
        let args = [
            "--input",
            "s3://its-live-data/cube.zarr",
            "with space",
            "  padded  ",
            "quote\"d 'arg'",
            "",
            "$HOME",
        ];

        let launcher =
            Launcher::with_python_path(config, args, Some(OsStr::new("/opt/lib"))).unwrap();
        let output = launcher.command().output().await.unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let expected = format!(
            "7\n[--input]\n[s3://its-live-data/cube.zarr]\n[with space]\n[  padded  ]\n\
             [quote\"d 'arg']\n[]\n[$HOME]\nPYTHONPATH=/opt/lib:{}\n",
            program_dir
        );
        assert_eq!(stdout, expected);
    }

    #[tokio::test]
    async fn test_no_arguments() {
        let temp = TempDir::new().unwrap();
        let config = shell_config(&temp, ECHO_ARGS);
        let program_dir = config.program_dir.clone();

        let launcher = Launcher::with_python_path(config, Vec::<OsString>::new(), None).unwrap();
        let output = launcher.command().output().await.unwrap();

        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(stdout, format!("0\nPYTHONPATH={}\n", program_dir));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_argument() {
        use std::os::unix::ffi::OsStringExt;

        let temp = TempDir::new().unwrap();
        let config = shell_config(&temp, "printf '[%s]' \"$1\"");
        let arg = OsString::from_vec(vec![b'f', 0xff, b'o']);

        let launcher = Launcher::with_python_path(config, [arg], None).unwrap();
        let output = launcher.command().output().await.unwrap();
        assert_eq!(output.stdout, vec![b'[', b'f', 0xff, b'o', b']']);
    }

    #[tokio::test]
    async fn test_exit_code_propagates() {
        for code in [0, 1, 2, 42, 255] {
            let temp = TempDir::new().unwrap();
            let config = shell_config(&temp, &format!("exit {}", code));
            let launcher = Launcher::with_python_path(config, ["x"], None).unwrap();
            assert_eq!(launcher.run().await.unwrap(), code);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_exit_code() {
        let temp = TempDir::new().unwrap();
        let config = shell_config(&temp, "kill -TERM $$");
        let launcher = Launcher::with_python_path(config, Vec::<OsString>::new(), None).unwrap();
        assert_eq!(launcher.run().await.unwrap(), 128 + 15);
    }

    #[tokio::test]
    async fn test_missing_interpreter() {
        let temp = TempDir::new().unwrap();
        let mut config = shell_config(&temp, "exit 0");
        config.python = "nonexistent_python_12345".to_string();

        let launcher = Launcher::with_python_path(config, Vec::<OsString>::new(), None).unwrap();
        let err = launcher.run().await.unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert_eq!(err.exit_code(), 127);
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_program_dir() {
        let config = LauncherConfig {
            program_dir: Utf8PathBuf::from("/app:/other"),
            ..LauncherConfig::default()
        };
        let err = Launcher::with_python_path(config, Vec::<OsString>::new(), None).unwrap_err();
        assert!(matches!(err, LaunchError::PythonPath { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
