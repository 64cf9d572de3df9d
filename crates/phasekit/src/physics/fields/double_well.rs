use super::VectorField;
use crate::physics::math::{PhaseState, Scalar};
use serde::{Deserialize, Serialize};

/// Quartic potential `V(q) = q⁴/4` with unit mass.
///
/// Used by the Liouville widget: the flow is nonlinear, so an initially
/// circular blob shears into a filament while keeping its area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DoubleWell;

impl VectorField for DoubleWell {
    #[inline]
    fn derivative(&self, state: PhaseState) -> PhaseState {
        PhaseState::new(state.p, -state.q * state.q * state.q)
    }

    #[inline]
    fn hamiltonian(&self, state: PhaseState) -> Scalar {
        let q2 = state.q * state.q;
        0.5 * state.p * state.p + 0.25 * q2 * q2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_restoring_force() {
        let d = DoubleWell.derivative(PhaseState::new(2.0, 0.5));
        assert_eq!(d, PhaseState::new(0.5, -8.0));
    }

    #[test]
    fn test_energy() {
        assert_eq!(DoubleWell.hamiltonian(PhaseState::new(2.0, 1.0)), 4.5);
    }
}
