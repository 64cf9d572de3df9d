use super::Integrator;
use crate::physics::fields::VectorField;
use crate::physics::math::{PhaseState, Scalar};

/// Forward Euler: `y' = y + dt·f(y)`.
///
/// First order and energy-gaining on oscillators; kept as the baseline the
/// other methods are compared against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, state: PhaseState, field: &dyn VectorField, dt: Scalar) -> PhaseState {
        state + field.derivative(state) * dt
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["euler", "forward_euler"]
    }
}
