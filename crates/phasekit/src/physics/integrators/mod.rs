//! Numerical integration methods for 2-D phase-space flows
//!
//! Every integrator is a stateless unit struct. Widgets look one up through
//! the [`IntegratorRegistry`] by name; the explicit midpoint method is the
//! default for all of them.

use crate::physics::fields::VectorField;
use crate::physics::math::{PhaseState, Scalar};
use bevy::log::debug;

pub mod explicit_euler;
pub mod registry;
pub mod runge_kutta;
pub mod symplectic_euler;

pub use explicit_euler::ExplicitEuler;
pub use registry::IntegratorRegistry;
pub use runge_kutta::{ExplicitMidpoint, RungeKuttaFourthOrder};
pub use symplectic_euler::SymplecticEuler;

/// Name of the integrator every widget uses unless configured otherwise
pub const DEFAULT_INTEGRATOR: &str = "midpoint";

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Create a boxed clone of this integrator
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance `state` by one step of size `dt` along `field`.
    ///
    /// No clamping of `dt` happens here.
    fn step(&self, state: PhaseState, field: &dyn VectorField, dt: Scalar) -> PhaseState;

    /// Global convergence order of the method
    fn convergence_order(&self) -> usize;

    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry
    fn aliases(&self) -> Vec<&'static str> {
        vec![]
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Step once, keeping the previous state if the result is not finite
pub fn advance(
    integrator: &dyn Integrator,
    state: PhaseState,
    field: &dyn VectorField,
    dt: Scalar,
) -> PhaseState {
    let next = integrator.step(state, field, dt);
    if next.is_finite() {
        next
    } else {
        debug!(
            "Rejected non-finite {} step from ({}, {}) with dt={dt}",
            integrator.name(),
            state.q,
            state.p
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::fields::HarmonicOscillator;

    struct Explosive;

    impl VectorField for Explosive {
        fn derivative(&self, _state: PhaseState) -> PhaseState {
            PhaseState::new(Scalar::INFINITY, 0.0)
        }

        fn hamiltonian(&self, _state: PhaseState) -> Scalar {
            0.0
        }
    }

    #[test]
    fn test_advance_rejects_non_finite_results() {
        let state = PhaseState::new(0.5, 0.25);
        let next = advance(&ExplicitMidpoint, state, &Explosive, 0.01);
        assert_eq!(next, state);
    }

    #[test]
    fn test_advance_passes_finite_results_through() {
        let field = HarmonicOscillator::default();
        let state = PhaseState::new(1.0, 0.0);
        assert_eq!(
            advance(&ExplicitMidpoint, state, &field, 0.01),
            ExplicitMidpoint.step(state, &field, 0.01)
        );
    }

    #[test]
    fn test_boxed_clone_keeps_identity() {
        let boxed: Box<dyn Integrator> = Box::new(RungeKuttaFourthOrder);
        let cloned = boxed.clone();
        assert_eq!(cloned.name(), boxed.name());
        assert_eq!(cloned.convergence_order(), 4);
    }
}
