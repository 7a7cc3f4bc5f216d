use crate::complex::Complex;
use crate::map::JuliaMap;

/// Scalar assigned by [`DistanceEstimate`] to points whose orbit never
/// escapes. Legitimate distance estimates are `>= 0`, so a negative value
/// gives the interior contrast against near-boundary cells.
pub const INTERIOR_SENTINEL: f64 = -2.0;

/// A colour function: maps one starting point to one scalar.
///
/// This is the plug-in seam of the forward path. The sampler is generic
/// over `C: ColorFn` for **static dispatch** — the compiler inlines the
/// orbit loop into the per-row worker, the same way the renderer in a
/// tiled pipeline is generic over its fractal type.
///
/// `bound` is precomputed once per sampling run via [`ColorFn::bound`] and
/// passed back in, so per-cell calls never re-derive it.
pub trait ColorFn {
    /// The escape bound this colour function iterates against.
    ///
    /// Fails when the map variant is unsupported (distance estimation on a
    /// general polynomial).
    fn bound(&self, map: &JuliaMap) -> crate::Result<f64>;

    /// Evaluate the scalar for starting point `z0`. Pure; no side effects.
    fn color(&self, map: &JuliaMap, z0: Complex, max_iterations: u32, bound: f64) -> f64;
}

/// Level-set colouring: the 0-based index of the first iterate whose
/// magnitude reaches the escape bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeTime;

impl EscapeTime {
    /// The saturation scalar returned when no escape occurs within
    /// `max_iterations` steps.
    ///
    /// Deliberately `max_iterations − 1`, the last valid escape index,
    /// rather than `max_iterations`, so interior cells share the colour of
    /// the slowest-escaping exterior cells. Callers that need to tell the
    /// two apart should compare against this value.
    pub fn saturation_value(max_iterations: u32) -> f64 {
        max_iterations.saturating_sub(1) as f64
    }
}

impl ColorFn for EscapeTime {
    fn bound(&self, map: &JuliaMap) -> crate::Result<f64> {
        Ok(map.escape_bound())
    }

    fn color(&self, map: &JuliaMap, z0: Complex, max_iterations: u32, bound: f64) -> f64 {
        let bound_sq = bound * bound;
        let mut z = z0;
        for i in 0..max_iterations {
            z = map.apply(z);
            // Overflow note: if the orbit blows past f64 range, norm_sq
            // becomes infinity and still compares as escaped.
            if z.norm_sq() >= bound_sq {
                return i as f64;
            }
        }
        Self::saturation_value(max_iterations)
    }
}

/// Distance estimation for the quadratic family: tracks the orbit and its
/// derivative `dzₙ = 2·zₙ₋₁·dzₙ₋₁` in lockstep and returns the Koebe
/// estimate `|z|·ln|z| / |dz|` of the distance to the set's boundary.
///
/// Quadratic maps only: [`ColorFn::bound`] rejects general polynomials, so
/// a sampling run is gated before any cell is evaluated. Interior points
/// (no escape) get [`INTERIOR_SENTINEL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceEstimate;

impl ColorFn for DistanceEstimate {
    fn bound(&self, map: &JuliaMap) -> crate::Result<f64> {
        map.distance_bound()
    }

    fn color(&self, map: &JuliaMap, z0: Complex, max_iterations: u32, bound: f64) -> f64 {
        let JuliaMap::Quadratic { c } = map else {
            // Unreachable through the sampler: bound() refuses polynomials.
            return INTERIOR_SENTINEL;
        };
        let bound_sq = bound * bound;
        let mut z = z0;
        let mut dz = Complex::ONE;
        for _ in 0..max_iterations {
            let next = Complex::new(
                z.re * z.re - z.im * z.im + c.re,
                2.0 * z.re * z.im + c.im,
            );
            dz = z * dz * 2.0;
            z = next;
            if z.norm_sq() >= bound_sq {
                let norm = z.norm();
                return norm * norm.ln() / dz.norm();
            }
        }
        INTERIOR_SENTINEL
    }
}
