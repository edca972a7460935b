//! Translate process outcomes into shell-style exit codes.

use std::io;
use std::process::ExitStatus;

/// Exit code a shell reports when the program could not be found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code a shell reports when the program exists but could not be run.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Exit code for a finished process.
///
/// A process terminated by signal `N` maps to `128 + N`, as in POSIX shells.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Exit code for a program that failed to start.
pub fn spawn_failure_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        _ => EXIT_NOT_EXECUTABLE,
    }
}
