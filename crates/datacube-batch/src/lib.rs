//! AWS Batch integration for the datacube tools.
//!
//! List and terminate jobs via the `aws batch` command-line interface.

pub mod aws_cli;
pub mod client;
pub mod purge;
pub mod types;

pub use aws_cli::AwsCli;
pub use client::{BatchApi, BatchError};
pub use purge::{DEFAULT_QUEUE, DEFAULT_REASON, PurgeError, PurgeOptions, PurgeReport, purge_jobs};
pub use types::{JobStatus, ParseStatusError};
