//! Terminate every job of a given status in a queue.
//!
//! One sequential pass: list the matching job identifiers once, then
//! terminate them in list order. Jobs that reach the status while the pass
//! runs are not picked up.

use crate::client::{BatchApi, BatchError};
use crate::types::JobStatus;
use std::io::{self, Write};
use thiserror::Error;

/// Queue holding the datacube conversion jobs.
pub const DEFAULT_QUEUE: &str = "datacube-convert-4vCPU-32GB";

/// Reason recorded with every termination request.
pub const DEFAULT_REASON: &str = "Terminating job.";

#[derive(Error, Debug)]
pub enum PurgeError {
    #[error("Failed to list {status} jobs in queue {queue}: {source}")]
    List {
        queue: String,
        status: JobStatus,
        #[source]
        source: BatchError,
    },
    #[error("Failed to write progress: {0}")]
    Output(#[from] io::Error),
}

/// What to purge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeOptions {
    pub queue: String,
    pub status: JobStatus,
    pub reason: String,
    /// List and report the jobs without terminating them.
    pub dry_run: bool,
}

impl Default for PurgeOptions {
    fn default() -> Self {
        Self {
            queue: DEFAULT_QUEUE.to_string(),
            status: JobStatus::Running,
            reason: DEFAULT_REASON.to_string(),
            dry_run: false,
        }
    }
}

/// Outcome of a purge pass.
#[derive(Debug, Default)]
pub struct PurgeReport {
    /// Every identifier returned by the list call, in order.
    pub listed: Vec<String>,
    /// Identifiers whose termination request succeeded.
    pub terminated: Vec<String>,
    /// Identifiers whose termination request failed.
    pub failed: Vec<(String, BatchError)>,
}

impl PurgeReport {
    /// True when no termination request failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Process exit code for the pass: 0 when clean, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_clean() { 0 } else { 1 }
    }
}

/// Run one purge pass, writing progress lines to `out`.
///
/// A failed list call is fatal and no job is touched. A failed termination
/// is logged and recorded in the report, and the pass moves on to the next
/// job.
pub async fn purge_jobs<A, W>(
    api: &A,
    options: &PurgeOptions,
    out: &mut W,
) -> Result<PurgeReport, PurgeError>
where
    A: BatchApi,
    W: Write,
{
    let listed = api
        .list_job_ids(&options.queue, options.status)
        .await
        .map_err(|source| PurgeError::List {
            queue: options.queue.clone(),
            status: options.status,
            source,
        })?;

    tracing::debug!(
        queue = %options.queue,
        status = %options.status,
        "found {} job(s)",
        listed.len()
    );

    let mut report = PurgeReport::default();

    for job_id in &listed {
        if options.dry_run {
            writeln!(out, "Would delete Job: {}", job_id)?;
            out.flush()?;
            continue;
        }

        writeln!(out, "Deleting Job: {}", job_id)?;
        out.flush()?;

        match api.terminate_job(job_id, &options.reason).await {
            Ok(()) => {
                writeln!(out, "Job {} deleted", job_id)?;
                out.flush()?;
                report.terminated.push(job_id.clone());
            }
            Err(e) => {
                tracing::warn!(job_id = %job_id, "termination failed: {}", e);
                report.failed.push((job_id.clone(), e));
            }
        }
    }

    report.listed = listed;
    Ok(report)
}
