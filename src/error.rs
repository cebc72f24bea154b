//! Error types for preprocessing and classification.

use thiserror::Error;

/// Failures while turning a photo into model input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreprocessError {
    #[error("Cannot crop a {width}x{height} image")]
    CropFailed { width: u32, height: u32 },

    #[error("Invalid target size {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },
}

/// Failures reported by, or about, the classification service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationError {
    #[error("Classification service failed: {0}")]
    ServiceFailure(String),

    #[error("Classification produced no results")]
    NoResult,
}

/// Any failure of a single capture's trip through the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),
}
