//! `PYTHONPATH` manipulation.

use std::env::{self, JoinPathsError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Name of the module search path variable.
pub const PYTHONPATH: &str = "PYTHONPATH";

/// Append `dir` to an existing `PYTHONPATH` value.
///
/// An unset or empty value yields `dir` alone; an empty entry would put the
/// working directory on the module search path. Fails when `dir` contains
/// the platform path separator.
pub fn extend_python_path(
    existing: Option<&OsStr>,
    dir: &Path,
) -> Result<OsString, JoinPathsError> {
    let mut entries: Vec<PathBuf> = existing
        .filter(|value| !value.is_empty())
        .map(|value| env::split_paths(value).collect())
        .unwrap_or_default();
    entries.push(dir.to_path_buf());
    env::join_paths(entries)
}
