//! Submission collaborator.
//!
//! The transformer never talks to the cluster itself. Callers that want the
//! job launched pass a [`Submitter`]; the pipeline calls it at most once with
//! the finished spec.

use crate::spec::JobSpec;

use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Handle to a submitted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub name: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The resource manager refused the job
    #[error("job '{name}' was rejected: {reason}")]
    Rejected { name: String, reason: String },
}

/// Launches a finished job spec on the cluster.
pub trait Submitter {
    fn submit(&self, spec: &JobSpec, timeout: Duration) -> Result<JobHandle, SubmitError>;
}

/// Stand-in used by the CLI until a real resource-manager client exists.
///
/// It only records the request; the job is launched later with
/// `yarn app -launch <spec>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderSubmitter;

impl Submitter for PlaceholderSubmitter {
    fn submit(&self, spec: &JobSpec, timeout: Duration) -> Result<JobHandle, SubmitError> {
        info!(job = %spec.name, ?timeout, "submit job to YARN");
        Ok(JobHandle {
            name: spec.name.clone(),
        })
    }
}
