use crate::complex::Complex;

/// Snap a point to the nearest lattice point of spacing `resolution`.
///
/// Component-wise `round(x / resolution) · resolution`, using `f64::round`:
/// ties round half away from zero, so `round_to_lattice(0.05, 0.1)` is
/// `0.1` and `round_to_lattice(-0.05, 0.1)` is `-0.1`. Idempotent for any
/// `resolution > 0`.
#[inline]
pub fn round_to_lattice(z: Complex, resolution: f64) -> Complex {
    Complex::new(
        (z.re / resolution).round() * resolution,
        (z.im / resolution).round() * resolution,
    )
}

/// Integer lattice coordinates of a point at a given resolution.
///
/// Two points are the same lattice cell iff their keys are equal. Hashing
/// the integer pair instead of the rounded floats sidesteps `f64` equality
/// and `-0.0`/`0.0` hash instability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeKey(pub i64, pub i64);

impl LatticeKey {
    #[inline]
    pub fn of(z: Complex, resolution: f64) -> Self {
        Self(
            (z.re / resolution).round() as i64,
            (z.im / resolution).round() as i64,
        )
    }

    /// The lattice point this key names.
    #[inline]
    pub fn to_complex(self, resolution: f64) -> Complex {
        Complex::new(self.0 as f64 * resolution, self.1 as f64 * resolution)
    }
}
