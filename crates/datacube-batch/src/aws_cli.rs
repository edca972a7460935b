//! `BatchApi` backed by the `aws` command-line interface.

use crate::client::{BatchApi, BatchError};
use crate::types::JobStatus;
use datacube_command::run_command;
use tokio::process::Command;

/// JMESPath expression restricting `list-jobs` output to job identifiers.
const JOB_ID_QUERY: &str = "jobSummaryList[].jobId";

/// Parse `list-jobs` output produced with [`JOB_ID_QUERY`] and `--output json`.
///
/// The CLI prints `null` (or nothing) when the queue holds no matching jobs.
fn parse_job_ids(stdout: &str) -> Result<Vec<String>, BatchError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Option<Vec<String>>>(trimmed)
        .map(Option::unwrap_or_default)
        .map_err(|e| BatchError::Parse {
            operation: "list-jobs",
            message: format!("{}: {}", e, trimmed),
        })
}

/// Runs `aws batch` subcommands.
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
    region: Option<String>,
    profile: Option<String>,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self {
            program: "aws".to_string(),
            region: None,
            profile: None,
        }
    }
}

impl AwsCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different `aws` executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Base command for `aws batch <operation>` with global options applied.
    fn batch_command(&self, operation: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["batch", operation]);
        if let Some(region) = &self.region {
            cmd.args(["--region", region]);
        }
        if let Some(profile) = &self.profile {
            cmd.args(["--profile", profile]);
        }
        // CLI v2 pipes output through a pager unless told otherwise.
        cmd.env("AWS_PAGER", "");
        cmd.kill_on_drop(true);
        cmd
    }
}

impl BatchApi for AwsCli {
    async fn list_job_ids(
        &self,
        queue: &str,
        status: JobStatus,
    ) -> Result<Vec<String>, BatchError> {
        let mut cmd = self.batch_command("list-jobs");
        cmd.args([
            "--job-queue",
            queue,
            "--job-status",
            status.as_str(),
            "--query",
            JOB_ID_QUERY,
            "--output",
            "json",
        ]);

        let stdout = run_command(&mut cmd, "aws batch list-jobs").await?;
        let ids = parse_job_ids(&stdout)?;
        tracing::debug!(queue, %status, count = ids.len(), "listed jobs");
        Ok(ids)
    }

    async fn terminate_job(&self, job_id: &str, reason: &str) -> Result<(), BatchError> {
        let mut cmd = self.batch_command("terminate-job");
        cmd.args(["--job-id", job_id, "--reason", reason]);

        run_command(&mut cmd, "aws batch terminate-job").await?;
        Ok(())
    }
}
