//! Error types for the job spec transformation.

use std::path::PathBuf;
use thiserror::Error;

use crate::submit::SubmitError;

/// Result type alias for transformation operations
pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors that abort the transformation pipeline.
///
/// None of these are retried: the pipeline either emits the full document or
/// nothing at all.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input spec file could not be read
    #[error("cannot read job spec {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input spec file is not a valid job spec document
    #[error("cannot parse job spec {}: {source}", path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Distributed mode without a usable master/worker/ps layout
    #[error("invalid distributed topology: {0}")]
    InvalidTopology(String),

    /// A component has no docker image after annotation
    #[error(
        "docker image for component '{component}' is not set, either set it in the input spec \
         or pass --docker-image <image-name>"
    )]
    MissingArtifact { component: String },

    /// A user-supplied environment override is not `key=value`
    #[error("malformed environment entry {entry:?}, expected key=value")]
    MalformedEnvEntry { entry: String },

    /// Encoding the topology descriptor or the output document failed
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// The submission collaborator rejected the job
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl TransformError {
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology(message.into())
    }

    /// True for failures that happen before any transformation runs.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputRead { .. } | Self::InputParse { .. })
    }
}
