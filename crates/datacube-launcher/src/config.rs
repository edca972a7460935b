//! Launcher configuration from the container environment.

use camino::Utf8PathBuf;
use datacube_command::non_empty_string;

/// Directory holding the conversion program inside the container.
pub const DEFAULT_PROGRAM_DIR: &str = "/app";

/// Interpreter used to run the conversion program.
pub const DEFAULT_PYTHON: &str = "python";

/// Conversion program, relative to the program directory.
pub const DEFAULT_SCRIPT: &str = "zarr_to_netcdf.py";

pub const ENV_PROGRAM_DIR: &str = "DATACUBE_PROGRAM_DIR";
pub const ENV_PYTHON: &str = "DATACUBE_PYTHON";
pub const ENV_SCRIPT: &str = "DATACUBE_SCRIPT";

/// Where the conversion program lives and how to run it.
///
/// Configuration only ever comes from the environment: every command-line
/// argument of the entrypoint belongs to the conversion program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Directory appended to `PYTHONPATH`.
    pub program_dir: Utf8PathBuf,
    /// Interpreter executable.
    pub python: String,
    /// Script to run; relative paths resolve against `program_dir`.
    pub script: Utf8PathBuf,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            program_dir: Utf8PathBuf::from(DEFAULT_PROGRAM_DIR),
            python: DEFAULT_PYTHON.to_string(),
            script: Utf8PathBuf::from(DEFAULT_SCRIPT),
        }
    }
}

impl LauncherConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from a variable lookup. Unset and blank values keep the
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).as_deref().and_then(non_empty_string);
        let defaults = Self::default();

        Self {
            program_dir: get(ENV_PROGRAM_DIR)
                .map(Utf8PathBuf::from)
                .unwrap_or(defaults.program_dir),
            python: get(ENV_PYTHON).unwrap_or(defaults.python),
            script: get(ENV_SCRIPT)
                .map(Utf8PathBuf::from)
                .unwrap_or(defaults.script),
        }
    }

    /// Absolute location of the script.
    pub fn script_path(&self) -> Utf8PathBuf {
        if self.script.is_absolute() {
            self.script.clone()
        } else {
            self.program_dir.join(&self.script)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LauncherConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LauncherConfig::default());
        assert_eq!(config.script_path(), "/app/zarr_to_netcdf.py");
    }

    #[test]
    fn test_overrides() {
        let config = LauncherConfig::from_lookup(lookup(&[
            (ENV_PROGRAM_DIR, "/opt/itslive"),
            (ENV_PYTHON, "python3"),
            (ENV_SCRIPT, "tools/convert.py"),
        ]));
        assert_eq!(config.program_dir, "/opt/itslive");
        assert_eq!(config.python, "python3");
        assert_eq!(config.script_path(), "/opt/itslive/tools/convert.py");
    }

    #[test]
    fn test_absolute_script() {
        let config =
            LauncherConfig::from_lookup(lookup(&[(ENV_SCRIPT, "/usr/local/bin/convert.py")]));
        assert_eq!(config.script_path(), "/usr/local/bin/convert.py");
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config =
            LauncherConfig::from_lookup(lookup(&[(ENV_PROGRAM_DIR, "  "), (ENV_PYTHON, "")]));
        assert_eq!(config, LauncherConfig::default());
    }
}
