use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A complex number represented as two `f64` components.
///
/// This is a lightweight, `Copy` value type: arithmetic produces new values
/// and never mutates in place. We roll our own instead of using
/// `num::Complex` to keep the dependency graph minimal and retain full
/// control over the square-root branch behaviour the inverse engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Returns `re² + im²` without taking the square root.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Returns `√(re² + im²)`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// The complex conjugate `re − im·i`.
    #[inline]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Principal square root.
    ///
    /// Branch cut along the negative real axis; the result always has
    /// `re ≥ 0`, with the imaginary sign following the input's. Computed
    /// component-wise from `|z|` rather than via polar form, which keeps
    /// conjugate inputs producing exactly conjugate outputs.
    pub fn sqrt(self) -> Self {
        let r = self.norm();
        let re = ((r + self.re) / 2.0).sqrt();
        let im = ((r - self.re) / 2.0).sqrt();
        if self.im.is_sign_negative() {
            Self { re, im: -im }
        } else {
            Self { re, im }
        }
    }

    /// Both square roots `±√z`, principal branch first.
    #[inline]
    pub fn sqrt_branches(self) -> [Self; 2] {
        let principal = self.sqrt();
        [principal, -principal]
    }
}

// -- Arithmetic operators --

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl SubAssign for Complex {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.re -= rhs.re;
        self.im -= rhs.im;
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl MulAssign for Complex {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

/// Scalar multiplication: `Complex * f64`.
impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn addition_and_subtraction() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -4.0);
        let sum = a + b;
        let diff = a - b;
        assert!(approx_eq(sum.re, 4.0) && approx_eq(sum.im, -2.0));
        assert!(approx_eq(diff.re, -2.0) && approx_eq(diff.im, 6.0));
    }

    #[test]
    fn multiplication() {
        // (1 + 2i)(3 + 4i) = -5 + 10i
        let c = Complex::new(1.0, 2.0) * Complex::new(3.0, 4.0);
        assert!(approx_eq(c.re, -5.0));
        assert!(approx_eq(c.im, 10.0));
    }

    #[test]
    fn squaring() {
        // (1 + i)² = 2i
        let z = Complex::new(1.0, 1.0);
        let z2 = z * z;
        assert!(approx_eq(z2.re, 0.0));
        assert!(approx_eq(z2.im, 2.0));
    }

    #[test]
    fn norm_of_three_four() {
        let z = Complex::new(3.0, 4.0);
        assert!(approx_eq(z.norm_sq(), 25.0));
        assert!(approx_eq(z.norm(), 5.0));
    }

    #[test]
    fn conjugate_flips_imaginary() {
        let z = Complex::new(0.5, -1.5);
        let c = z.conj();
        assert!(approx_eq(c.re, 0.5));
        assert!(approx_eq(c.im, 1.5));
    }

    #[test]
    fn sqrt_of_positive_real() {
        let r = Complex::new(4.0, 0.0).sqrt();
        assert!(approx_eq(r.re, 2.0));
        assert!(approx_eq(r.im, 0.0));
    }

    #[test]
    fn sqrt_of_negative_real_is_positive_imaginary() {
        // Principal branch: √(−1) = +i.
        let r = Complex::new(-1.0, 0.0).sqrt();
        assert!(approx_eq(r.re, 0.0));
        assert!(approx_eq(r.im, 1.0));
    }

    #[test]
    fn sqrt_squares_back() {
        let z = Complex::new(-0.7, 0.3);
        let r = z.sqrt();
        let back = r * r;
        assert!(approx_eq(back.re, z.re));
        assert!(approx_eq(back.im, z.im));
    }

    #[test]
    fn sqrt_principal_branch_has_nonnegative_real_part() {
        for &(re, im) in &[(2.0, 3.0), (-2.0, 3.0), (-2.0, -3.0), (2.0, -3.0)] {
            let r = Complex::new(re, im).sqrt();
            assert!(r.re >= 0.0, "principal √({re} + {im}i) has re {}", r.re);
        }
    }

    #[test]
    fn sqrt_branches_are_negatives() {
        let [a, b] = Complex::new(1.0, 2.0).sqrt_branches();
        assert!(approx_eq(a.re, -b.re));
        assert!(approx_eq(a.im, -b.im));
    }

    #[test]
    fn sqrt_of_conjugate_is_conjugate_of_sqrt() {
        let z = Complex::new(-1.3, 0.8);
        let a = z.conj().sqrt();
        let b = z.sqrt().conj();
        // Bit-exact: both sides evaluate the same component formulas.
        assert_eq!(a, b);
    }

    #[test]
    fn serde_round_trip() {
        let z = Complex::new(0.3, 0.55);
        let json = serde_json::to_string(&z).unwrap();
        let back: Complex = serde_json::from_str(&json).unwrap();
        assert_eq!(z, back);
    }
}
