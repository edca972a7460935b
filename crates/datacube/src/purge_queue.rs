//! Terminate every running job in the datacube conversion queue.

use clap::Parser;
use datacube_batch::purge_jobs;
use datacube_cli::{PURGE_LOG_LEVEL, PurgeArgs, init_logging};
use miette::{IntoDiagnostic, Result};
use std::io;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = PurgeArgs::parse();
    init_logging(PURGE_LOG_LEVEL);

    let api = args.aws_cli();
    let options = args.purge_options();
    let mut stdout = io::stdout().lock();

    let report = purge_jobs(&api, &options, &mut stdout)
        .await
        .into_diagnostic()?;

    tracing::debug!(
        queue = %options.queue,
        "terminated {} of {} job(s)",
        report.terminated.len(),
        report.listed.len()
    );

    if !report.is_clean() {
        for (job_id, err) in &report.failed {
            tracing::error!(job_id = %job_id, "not terminated: {}", err);
        }
        tracing::error!(
            queue = %options.queue,
            "{} of {} job(s) could not be terminated",
            report.failed.len(),
            report.listed.len()
        );
    }

    Ok(ExitCode::from(report.exit_code()))
}
