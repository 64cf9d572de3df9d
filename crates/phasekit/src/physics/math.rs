//! Scalar type, phase-space state and small numeric helpers

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// Magnitude substituted for denominators that collapse toward zero
pub const EPSILON: Scalar = 1e-6;

pub const TAU: Scalar = std::f64::consts::TAU;

/// A point in 2-D phase space: generalized position `q` and momentum `p`.
///
/// The same pair doubles as a time derivative `(dq/dt, dp/dt)` when returned
/// from a vector field, which is what lets integrators combine stages with
/// plain vector arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    pub q: Scalar,
    pub p: Scalar,
}

impl PhaseState {
    pub const ZERO: Self = Self { q: 0.0, p: 0.0 };

    #[inline]
    pub const fn new(q: Scalar, p: Scalar) -> Self {
        Self { q, p }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.q.is_finite() && self.p.is_finite()
    }

    #[inline]
    pub fn length(&self) -> Scalar {
        libm::hypot(self.q, self.p)
    }

    /// Shoelace cross term `q₁·p₂ − q₂·p₁`
    #[inline]
    pub fn cross(&self, other: PhaseState) -> Scalar {
        self.q * other.p - other.q * self.p
    }
}

impl Add for PhaseState {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.p + rhs.p)
    }
}

impl AddAssign for PhaseState {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.q += rhs.q;
        self.p += rhs.p;
    }
}

impl Sub for PhaseState {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.p - rhs.p)
    }
}

impl Mul<Scalar> for PhaseState {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Scalar) -> Self {
        Self::new(self.q * rhs, self.p * rhs)
    }
}

impl Neg for PhaseState {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.q, -self.p)
    }
}

/// Divide, substituting a signed epsilon for a near-zero denominator
#[inline]
pub fn safe_div(numerator: Scalar, denominator: Scalar) -> Scalar {
    numerator / guard_denominator(denominator)
}

#[inline]
pub fn guard_denominator(denominator: Scalar) -> Scalar {
    if denominator.abs() < EPSILON {
        if denominator.is_sign_negative() {
            -EPSILON
        } else {
            EPSILON
        }
    } else {
        denominator
    }
}

/// Periodic wrap onto `[0, period)`
#[inline]
pub fn wrap_period(x: Scalar, period: Scalar) -> Scalar {
    let wrapped = x.rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negative inputs
    if wrapped >= period { 0.0 } else { wrapped }
}

/// Periodic wrap of an angle onto `[0, 2π)`
#[inline]
pub fn wrap_angle(angle: Scalar) -> Scalar {
    wrap_period(angle, TAU)
}

#[inline]
pub fn lerp(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    a + (b - a) * t
}

/// `n` evenly spaced samples covering `[start, end]` inclusive
pub fn linspace(start: Scalar, end: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Scalar;
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_state_arithmetic() {
        let a = PhaseState::new(1.0, 2.0);
        let b = PhaseState::new(0.5, -1.0);

        assert_eq!(a + b, PhaseState::new(1.5, 1.0));
        assert_eq!(a - b, PhaseState::new(0.5, 3.0));
        assert_eq!(a * 2.0, PhaseState::new(2.0, 4.0));
        assert_eq!(-a, PhaseState::new(-1.0, -2.0));
        assert_eq!(a.cross(b), 1.0 * -1.0 - 0.5 * 2.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(PhaseState::new(1.0, -3.0).is_finite());
        assert!(!PhaseState::new(Scalar::NAN, 0.0).is_finite());
        assert!(!PhaseState::new(0.0, Scalar::INFINITY).is_finite());
    }

    #[test]
    fn test_safe_div_guards_zero() {
        assert_eq!(safe_div(1.0, 0.0), 1.0 / EPSILON);
        assert_eq!(safe_div(1.0, -0.0), -1.0 / EPSILON);
        assert_eq!(safe_div(1.0, 1e-9), 1.0 / EPSILON);
        assert_eq!(safe_div(3.0, 2.0), 1.5);
        assert!(safe_div(1.0, 0.0).is_finite());
    }

    #[test]
    fn test_wrap_period() {
        assert_eq!(wrap_period(0.25, 1.0), 0.25);
        assert_eq!(wrap_period(1.25, 1.0), 0.25);
        assert!((wrap_period(-0.25, 1.0) - 0.75).abs() < 1e-15);
        assert_eq!(wrap_period(1.0, 1.0), 0.0);
        assert!((0.0..1.0).contains(&wrap_period(-1e-18, 1.0)));
        assert_eq!(wrap_period(-1.0, 700.0), 699.0);
        assert!((0.0..700.0).contains(&wrap_period(-1e-14, 700.0)));
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert!(wrap_angle(-1e-18) < TAU);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(-1.0, 1.0, 3), vec![-1.0, 0.0, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
