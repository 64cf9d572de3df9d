//! Runge-Kutta integration methods

use super::Integrator;
use crate::physics::fields::VectorField;
use crate::physics::math::{PhaseState, Scalar};

/// Explicit midpoint method (RK2), the default for every widget.
///
/// Algorithm:
/// - k1 = f(y)
/// - k2 = f(y + k1·dt/2)
/// - y_new = y + k2·dt
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitMidpoint;

impl Integrator for ExplicitMidpoint {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, state: PhaseState, field: &dyn VectorField, dt: Scalar) -> PhaseState {
        let k1 = field.derivative(state);
        let mid = state + k1 * (dt * 0.5);
        let k2 = field.derivative(mid);
        state + k2 * dt
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "midpoint"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["rk2", "explicit_midpoint"]
    }
}

/// Classic fourth-order Runge-Kutta
///
/// y_new = y + dt/6 · (k1 + 2·k2 + 2·k3 + k4)
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Integrator for RungeKuttaFourthOrder {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, state: PhaseState, field: &dyn VectorField, dt: Scalar) -> PhaseState {
        let k1 = field.derivative(state);
        let k2 = field.derivative(state + k1 * (dt * 0.5));
        let k3 = field.derivative(state + k2 * (dt * 0.5));
        let k4 = field.derivative(state + k3 * dt);
        state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
    }

    fn convergence_order(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["runge_kutta_4"]
    }
}
