pub mod color;
pub mod complex;
pub mod error;
pub mod grid;
pub mod lattice;
pub mod map;

// Re-export primary types for convenience.
pub use color::{ColorFn, DistanceEstimate, EscapeTime, INTERIOR_SENTINEL};
pub use complex::Complex;
pub use error::CoreError;
pub use grid::{GridSpec, ScalarField};
pub use lattice::{round_to_lattice, LatticeKey};
pub use map::JuliaMap;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
