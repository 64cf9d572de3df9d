use super::VectorField;
use crate::physics::math::{PhaseState, Scalar, safe_div};
use serde::{Deserialize, Serialize};

/// Undamped mass on a spring: `H = p²/2m + k·q²/2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicOscillator {
    pub mass: Scalar,
    pub stiffness: Scalar,
}

impl HarmonicOscillator {
    pub fn new(mass: Scalar, stiffness: Scalar) -> Self {
        Self { mass, stiffness }
    }

    /// Angular frequency `√(k/m)`
    pub fn angular_frequency(&self) -> Scalar {
        libm::sqrt(safe_div(self.stiffness, self.mass))
    }
}

impl Default for HarmonicOscillator {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl VectorField for HarmonicOscillator {
    #[inline]
    fn derivative(&self, state: PhaseState) -> PhaseState {
        PhaseState::new(safe_div(state.p, self.mass), -self.stiffness * state.q)
    }

    #[inline]
    fn hamiltonian(&self, state: PhaseState) -> Scalar {
        safe_div(state.p * state.p, 2.0 * self.mass) + 0.5 * self.stiffness * state.q * state.q
    }
}

/// Harmonic oscillator with linear drag on the momentum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DampedOscillator {
    pub mass: Scalar,
    pub stiffness: Scalar,
    pub damping: Scalar,
}

impl DampedOscillator {
    pub fn new(mass: Scalar, stiffness: Scalar, damping: Scalar) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    fn undamped(&self) -> HarmonicOscillator {
        HarmonicOscillator::new(self.mass, self.stiffness)
    }
}

impl VectorField for DampedOscillator {
    #[inline]
    fn derivative(&self, state: PhaseState) -> PhaseState {
        let conservative = self.undamped().derivative(state);
        PhaseState::new(conservative.q, conservative.p - self.damping * state.p)
    }

    #[inline]
    fn hamiltonian(&self, state: PhaseState) -> Scalar {
        self.undamped().hamiltonian(state)
    }
}
