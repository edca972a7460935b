//! CLI argument parsing and logging setup for the datacube tools.

use clap::Parser;
use datacube_batch::{AwsCli, DEFAULT_QUEUE, DEFAULT_REASON, JobStatus, PurgeOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "datacube-purge-queue")]
#[command(about = "Terminate running jobs in the datacube conversion AWS Batch queue")]
pub struct PurgeArgs {
    /// AWS Batch job queue
    #[arg(long, default_value = DEFAULT_QUEUE)]
    pub queue: String,

    /// Status of the jobs to terminate
    #[arg(long, default_value_t = JobStatus::Running)]
    pub status: JobStatus,

    /// Reason recorded with each termination request
    #[arg(long, default_value = DEFAULT_REASON)]
    pub reason: String,

    /// AWS region passed to the aws CLI (the CLI reads AWS_REGION itself)
    #[arg(long)]
    pub region: Option<String>,

    /// AWS named profile passed to the aws CLI (the CLI reads AWS_PROFILE itself)
    #[arg(long)]
    pub profile: Option<String>,

    /// aws CLI executable
    #[arg(long, default_value = "aws")]
    pub aws_cli: String,

    /// List the jobs that would be terminated without terminating them
    #[arg(long)]
    pub dry_run: bool,
}

impl PurgeArgs {
    pub fn purge_options(&self) -> PurgeOptions {
        PurgeOptions {
            queue: self.queue.clone(),
            status: self.status,
            reason: self.reason.clone(),
            dry_run: self.dry_run,
        }
    }

    pub fn aws_cli(&self) -> AwsCli {
        AwsCli::new()
            .with_program(self.aws_cli.clone())
            .with_region(self.region.clone())
            .with_profile(self.profile.clone())
    }
}

/// Default log level of the entrypoint; the conversion program owns the output.
pub const ENTRYPOINT_LOG_LEVEL: &str = "warn";

/// Default log level of the purge tool; only failures reach stderr.
pub const PURGE_LOG_LEVEL: &str = "warn";

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides `default_level`. Stdout is left to the tools' own
/// output.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be set when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
