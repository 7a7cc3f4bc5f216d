use thiserror::Error;

/// Errors originating from the sampling and inverse-iteration pipelines.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("cannot rasterize an empty point list")]
    EmptyPointSet,

    #[error(transparent)]
    Core(#[from] juliascope_core::CoreError),
}
