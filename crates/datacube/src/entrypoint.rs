//! Container entrypoint for the datacube conversion image.
//!
//! Adds the program directory to `PYTHONPATH` and runs `zarr_to_netcdf.py`
//! with every argument this process received. The exit code is the
//! program's own.

use datacube_cli::{ENTRYPOINT_LOG_LEVEL, init_logging};
use datacube_launcher::{LaunchError, Launcher, LauncherConfig};
use miette::miette;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging(ENTRYPOINT_LOG_LEVEL);

    let config = LauncherConfig::from_env();
    let launcher = match Launcher::new(config, std::env::args_os().skip(1)) {
        Ok(launcher) => launcher,
        Err(e) => return fail(e),
    };
    tracing::debug!(
        args = launcher.args().len(),
        python_path = ?launcher.python_path(),
        "prepared conversion launch"
    );

    #[cfg(unix)]
    return fail(launcher.exec());

    #[cfg(not(unix))]
    match launcher.run().await {
        Ok(code) => exit_with(code),
        Err(e) => fail(e),
    }
}

fn fail(err: LaunchError) -> ExitCode {
    let code = err.exit_code();
    eprintln!("{:?}", miette!("{}", err));
    exit_with(code)
}

/// Process exit status for a shell-style code.
fn exit_with(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
