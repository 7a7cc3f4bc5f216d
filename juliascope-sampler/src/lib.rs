pub mod cancel;
pub mod error;
pub mod inverse;
pub mod raster;
pub mod sampler;

pub use cancel::SampleCancel;
pub use error::SamplerError;
pub use inverse::{
    default_seed, inverse_iteration, modified_inverse_iteration, PointSetResult,
};
pub use raster::rasterize;
pub use sampler::{sample_default_region, sample_grid, SampleResult};

/// Convenience result type for the sampler crate.
pub type Result<T> = std::result::Result<T, SamplerError>;
