use thiserror::Error;

/// Errors originating from the core iteration engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid polynomial: degree {0} (must be >= 2)")]
    DegreeTooLow(usize),

    #[error("invalid polynomial: leading coefficient has zero magnitude")]
    ZeroLeadingCoefficient,

    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("invalid resolution: {0} (must be positive and finite)")]
    InvalidResolution(f64),

    #[error("unsupported map: {reason}")]
    UnsupportedMap { reason: String },
}
