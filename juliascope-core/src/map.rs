use crate::complex::Complex;
use crate::error::CoreError;

/// The polynomial map whose Julia set is being approximated.
///
/// The quadratic family `z ↦ z² + c` is the common case and the only one
/// with closed-form inverse branches. General polynomials are described by
/// their coefficients in leading-first order:
/// `coeffs[0]·z^d + coeffs[1]·z^(d−1) + … + coeffs[d]`.
///
/// Polynomial invariants (degree ≥ 2, non-zero leading coefficient) are
/// enforced at construction and re-enforced on deserialization, so
/// parameters loaded from bookmarks or config files stay consistent.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum JuliaMap {
    Quadratic { c: Complex },
    Polynomial { coeffs: Vec<Complex> },
}

/// Helper for deserialization — re-runs constructor validation on load.
impl<'de> serde::Deserialize<'de> for JuliaMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        enum Raw {
            Quadratic { c: Complex },
            Polynomial { coeffs: Vec<Complex> },
        }
        match Raw::deserialize(deserializer)? {
            Raw::Quadratic { c } => Ok(Self::quadratic(c)),
            Raw::Polynomial { coeffs } => {
                Self::polynomial(coeffs).map_err(serde::de::Error::custom)
            }
        }
    }
}

impl JuliaMap {
    /// The quadratic map `z ↦ z² + c`.
    pub fn quadratic(c: Complex) -> Self {
        Self::Quadratic { c }
    }

    /// A general polynomial map from leading-first coefficients.
    ///
    /// Fails when the degree is below 2 or the leading coefficient has zero
    /// magnitude, both of which break the escape-bound formula.
    pub fn polynomial(coeffs: Vec<Complex>) -> crate::Result<Self> {
        let degree = coeffs.len().saturating_sub(1);
        if degree < 2 {
            return Err(CoreError::DegreeTooLow(degree));
        }
        if coeffs[0].norm() == 0.0 {
            return Err(CoreError::ZeroLeadingCoefficient);
        }
        Ok(Self::Polynomial { coeffs })
    }

    /// A visually interesting default: `c = 0.3 + 0.55i`, a dendrite-like
    /// connected set that exercises both iteration paths well.
    pub fn default_c() -> Complex {
        Complex::new(0.3, 0.55)
    }

    /// Polynomial degree (2 for the quadratic variant).
    pub fn degree(&self) -> usize {
        match self {
            Self::Quadratic { .. } => 2,
            Self::Polynomial { coeffs } => coeffs.len() - 1,
        }
    }

    /// Apply the forward map `f(z)`.
    ///
    /// Quadratic expands `z² + c` component-wise; polynomials use Horner's
    /// scheme on the leading-first coefficients.
    #[inline]
    pub fn apply(&self, z: Complex) -> Complex {
        match self {
            Self::Quadratic { c } => Complex::new(
                z.re * z.re - z.im * z.im + c.re,
                2.0 * z.re * z.im + c.im,
            ),
            Self::Polynomial { coeffs } => {
                let mut acc = coeffs[0];
                for &coeff in &coeffs[1..] {
                    acc = acc * z + coeff;
                }
                acc
            }
        }
    }

    /// Escape bound: any orbit point with `|z| ≥ bound` diverges to
    /// infinity, and the disc of this radius contains the whole bounded set
    /// (so `[−bound, bound]²` is a safe default plot region).
    ///
    /// Quadratic: `max(2, √(2|c|))`. Polynomial: once `|z|` exceeds
    /// `max(1, (4/|c₀|)^(1/(d−1)), (2/|c₀|)·Σ|cᵢ|)` the leading term
    /// dominates and `|f(z)| > |z|`.
    pub fn escape_bound(&self) -> f64 {
        match self {
            Self::Quadratic { c } => 2.0_f64.max((2.0 * c.norm()).sqrt()),
            Self::Polynomial { coeffs } => {
                let leading = coeffs[0].norm();
                let degree = (coeffs.len() - 1) as f64;
                let coeff_sum: f64 = coeffs.iter().map(|c| c.norm()).sum();
                1.0_f64
                    .max((4.0 / leading).powf(1.0 / (degree - 1.0)))
                    .max(2.0 / leading * coeff_sum)
            }
        }
    }

    /// Escape bound for derivative-tracking iteration (distance
    /// estimation). The larger floor of 4 keeps the derivative term from
    /// underflowing before escape is detected. Quadratic maps only.
    pub fn distance_bound(&self) -> crate::Result<f64> {
        match self {
            Self::Quadratic { c } => Ok(4.0_f64.max((2.0 * c.norm()).sqrt())),
            Self::Polynomial { .. } => Err(CoreError::UnsupportedMap {
                reason: "distance estimation requires a quadratic map".into(),
            }),
        }
    }

    /// The two preimages `±√(w − c)` of a point under the quadratic map.
    ///
    /// General polynomials have no closed-form inverse here.
    pub fn preimages(&self, w: Complex) -> crate::Result<[Complex; 2]> {
        match self {
            Self::Quadratic { c } => Ok((w - *c).sqrt_branches()),
            Self::Polynomial { .. } => Err(CoreError::UnsupportedMap {
                reason: "inverse iteration requires a quadratic map".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn quadratic_apply() {
        // f(1 + i) with c = 0.3: (1+i)² = 2i, so f = 0.3 + 2i.
        let map = JuliaMap::quadratic(Complex::new(0.3, 0.0));
        let z = map.apply(Complex::new(1.0, 1.0));
        assert!((z.re - 0.3).abs() < EPSILON);
        assert!((z.im - 2.0).abs() < EPSILON);
    }

    #[test]
    fn polynomial_apply_matches_horner() {
        // z² + 0.25 written as a general polynomial.
        let map = JuliaMap::polynomial(vec![
            Complex::ONE,
            Complex::ZERO,
            Complex::new(0.25, 0.0),
        ])
        .unwrap();
        let z = Complex::new(2.0, 1.0);
        let direct = z * z + Complex::new(0.25, 0.0);
        let horner = map.apply(z);
        assert!((horner.re - direct.re).abs() < EPSILON);
        assert!((horner.im - direct.im).abs() < EPSILON);
        assert_eq!(map.degree(), 2);
    }

    #[test]
    fn quadratic_escape_bound_floors_at_two() {
        let map = JuliaMap::quadratic(Complex::new(0.3, 0.0));
        // √(2·0.3) ≈ 0.775 < 2, so the floor wins.
        assert!((map.escape_bound() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn quadratic_escape_bound_grows_with_c() {
        let map = JuliaMap::quadratic(Complex::new(8.0, 0.0));
        assert!((map.escape_bound() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn quadratic_distance_bound_floors_at_four() {
        let map = JuliaMap::quadratic(Complex::new(0.3, 0.55));
        assert!((map.distance_bound().unwrap() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn polynomial_escape_bound() {
        // z² + 0.25: max(1, (4/1)^(1/1), 2·(1 + 0 + 0.25)) = 4.
        let map = JuliaMap::polynomial(vec![
            Complex::ONE,
            Complex::ZERO,
            Complex::new(0.25, 0.0),
        ])
        .unwrap();
        assert!((map.escape_bound() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn polynomial_bound_at_least_one() {
        // Huge leading coefficient pushes both formula terms below 1.
        let map = JuliaMap::polynomial(vec![
            Complex::new(1000.0, 0.0),
            Complex::ZERO,
            Complex::ZERO,
            Complex::new(0.001, 0.0),
        ])
        .unwrap();
        assert!(map.escape_bound() >= 1.0);
    }

    #[test]
    fn degenerate_polynomials_rejected() {
        assert!(matches!(
            JuliaMap::polynomial(vec![Complex::ONE, Complex::ZERO]),
            Err(CoreError::DegreeTooLow(1))
        ));
        assert!(matches!(
            JuliaMap::polynomial(vec![]),
            Err(CoreError::DegreeTooLow(0))
        ));
        assert!(matches!(
            JuliaMap::polynomial(vec![Complex::ZERO, Complex::ONE, Complex::ONE]),
            Err(CoreError::ZeroLeadingCoefficient)
        ));
    }

    #[test]
    fn distance_bound_rejects_polynomial() {
        let map =
            JuliaMap::polynomial(vec![Complex::ONE, Complex::ZERO, Complex::ZERO]).unwrap();
        assert!(map.distance_bound().is_err());
    }

    #[test]
    fn preimages_square_back_to_input() {
        let c = Complex::new(0.3, 0.55);
        let map = JuliaMap::quadratic(c);
        let w = Complex::new(1.0, -0.5);
        for p in map.preimages(w).unwrap() {
            let back = map.apply(p);
            assert!((back.re - w.re).abs() < EPSILON);
            assert!((back.im - w.im).abs() < EPSILON);
        }
    }

    #[test]
    fn serde_round_trip_preserves_map() {
        let map = JuliaMap::quadratic(Complex::new(-0.7, 0.27015));
        let json = serde_json::to_string(&map).unwrap();
        let back: JuliaMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }

    #[test]
    fn deserialization_revalidates() {
        // A degenerate polynomial must not sneak in through serde.
        let json = r#"{"Polynomial":{"coeffs":[{"re":0.0,"im":0.0},{"re":1.0,"im":0.0},{"re":1.0,"im":0.0}]}}"#;
        assert!(serde_json::from_str::<JuliaMap>(json).is_err());
    }
}
