use std::path::PathBuf;

use crate::core::dataset::DatasetSplit;
use crate::core::taxonomy::TargetClass;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error taxonomy for the preparation pipeline.
///
/// Every variant is fatal to the operation it occurs in; nothing here is
/// downgraded to a warning.
#[derive(Debug)]
pub enum PipelineError {
    /// Raw root (or another required input directory) does not exist
    SourceNotFound(PathBuf),
    /// Balancer was pointed at a nonexistent class directory
    TargetNotFound(PathBuf),
    /// The scan matched zero image files across all classes
    EmptyCorpus(PathBuf),
    /// Ratios don't sum to 1.0, are negative, or the config file is unusable
    InvalidConfiguration(String),
    /// Destination naming collision could not be resolved within the suffix space
    CollisionExhausted {
        source: PathBuf,
        dest: PathBuf,
        split: DatasetSplit,
        class: TargetClass,
    },
    /// A single file transfer failed mid-pipeline
    TransferFailed {
        source: PathBuf,
        dest: PathBuf,
        split: DatasetSplit,
        class: TargetClass,
        error: std::io::Error,
    },
    /// Count mismatch between scanned and materialized files
    PartialTransfer { expected: usize, transferred: usize },
    /// Raw I/O error without pipeline-specific context
    Io(std::io::Error),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::SourceNotFound(path) => {
                write!(f, "Source directory does not exist: {:?}", path)
            }
            PipelineError::TargetNotFound(path) => {
                write!(f, "Target directory does not exist: {:?}", path)
            }
            PipelineError::EmptyCorpus(path) => {
                write!(f, "No images found under {:?}", path)
            }
            PipelineError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            PipelineError::CollisionExhausted {
                source,
                dest,
                split,
                class,
            } => write!(
                f,
                "Could not resolve filename collision for {:?} -> {:?} ({}/{})",
                source,
                dest,
                split.as_str(),
                class.as_str()
            ),
            PipelineError::TransferFailed {
                source,
                dest,
                split,
                class,
                error,
            } => write!(
                f,
                "Failed to transfer {:?} -> {:?} ({}/{}): {}",
                source,
                dest,
                split.as_str(),
                class.as_str(),
                error
            ),
            PipelineError::PartialTransfer {
                expected,
                transferred,
            } => write!(
                f,
                "Partial transfer: expected {} files, materialized {}",
                expected, transferred
            ),
            PipelineError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::TransferFailed { error, .. } => Some(error),
            PipelineError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        PipelineError::Io(error)
    }
}
