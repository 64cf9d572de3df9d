use super::VectorField;
use crate::physics::math::{PhaseState, Scalar};
use serde::{Deserialize, Serialize};

/// Van der Pol oscillator `ẍ − μ(1 − x²)ẋ + x = 0` written as a first order system.
///
/// Not Hamiltonian: trajectories settle onto a limit cycle. The reported energy
/// is the harmonic part `(q² + p²)/2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanDerPol {
    pub mu: Scalar,
}

impl VanDerPol {
    pub fn new(mu: Scalar) -> Self {
        Self { mu }
    }
}

impl Default for VanDerPol {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl VectorField for VanDerPol {
    #[inline]
    fn derivative(&self, state: PhaseState) -> PhaseState {
        let PhaseState { q: x, p: y } = state;
        PhaseState::new(y, self.mu * (1.0 - x * x) * y - x)
    }

    #[inline]
    fn hamiltonian(&self, state: PhaseState) -> Scalar {
        0.5 * (state.q * state.q + state.p * state.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduces_to_harmonic_when_mu_is_zero() {
        let d = VanDerPol::new(0.0).derivative(PhaseState::new(1.5, -0.5));
        assert_eq!(d, PhaseState::new(-0.5, -1.5));
    }

    #[test]
    fn test_negative_damping_inside_unit_band() {
        // |x| < 1 pumps energy in
        let field = VanDerPol::new(1.0);
        let d = field.derivative(PhaseState::new(0.0, 1.0));
        assert!(d.p > 0.0);

        // |x| > 1 drains it
        let d = field.derivative(PhaseState::new(2.0, 1.0));
        assert!(d.p < -2.0);
    }
}
