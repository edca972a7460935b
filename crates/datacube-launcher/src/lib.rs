//! Launch the datacube conversion program.
//!
//! The container entrypoint extends `PYTHONPATH` with the program directory
//! and hands every argument it received, untouched, to the conversion script.

pub mod config;
pub mod launch;
pub mod python_path;

pub use config::LauncherConfig;
pub use launch::{LaunchError, Launcher};
pub use python_path::{PYTHONPATH, extend_python_path};
