use super::Integrator;
use crate::physics::fields::VectorField;
use crate::physics::math::{PhaseState, Scalar};

/// Semi-implicit Euler: update momentum first, then position with the new momentum.
///
/// For separable fields (`dq` depends only on `p`, `dp` only on `q`) this is
/// symplectic, so energy oscillates around its true value instead of drifting.
/// For general fields it is a first order splitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymplecticEuler;

impl Integrator for SymplecticEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, state: PhaseState, field: &dyn VectorField, dt: Scalar) -> PhaseState {
        let p = state.p + field.derivative(state).p * dt;
        let q = state.q + field.derivative(PhaseState::new(state.q, p)).q * dt;
        PhaseState::new(q, p)
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "symplectic_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["semi_implicit_euler"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::fields::HarmonicOscillator;

    #[test]
    fn test_uses_updated_momentum_for_position() {
        let field = HarmonicOscillator::default();
        let next = SymplecticEuler.step(PhaseState::new(1.0, 0.0), &field, 0.1);
        assert!((next.p + 0.1).abs() < 1e-15);
        assert!((next.q - (1.0 - 0.01)).abs() < 1e-15);
    }

    #[test]
    fn test_energy_bounded_on_oscillator() {
        let field = HarmonicOscillator::default();
        let mut state = PhaseState::new(1.0, 0.0);
        let initial = field.hamiltonian(state);
        for _ in 0..10_000 {
            state = SymplecticEuler.step(state, &field, 0.05);
        }
        let drift = (field.hamiltonian(state) - initial).abs() / initial;
        assert!(drift < 0.05, "energy drift {drift}");
    }
}
