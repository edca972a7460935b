//! The batch service operations the purge pass depends on.

use crate::types::JobStatus;
use datacube_command::CommandError;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Failed to parse {operation} output: {message}")]
    Parse {
        operation: &'static str,
        message: String,
    },
}

/// A batch job service that can list and terminate jobs.
pub trait BatchApi {
    /// Identifiers of the jobs in `queue` with `status`, in service order.
    fn list_job_ids(
        &self,
        queue: &str,
        status: JobStatus,
    ) -> impl Future<Output = Result<Vec<String>, BatchError>> + Send;

    /// Request termination of a single job.
    fn terminate_job(
        &self,
        job_id: &str,
        reason: &str,
    ) -> impl Future<Output = Result<(), BatchError>> + Send;
}
