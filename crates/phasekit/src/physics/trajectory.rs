//! Whole trajectories computed ahead of time

use crate::physics::fields::{VanDerPol, VectorField};
use crate::physics::integrators::{ExplicitMidpoint, Integrator, advance};
use crate::physics::math::{PhaseState, Scalar};

/// Integrate `steps` steps from `initial`; the result holds `steps + 1` states
pub fn trajectory(
    integrator: &dyn Integrator,
    field: &dyn VectorField,
    initial: PhaseState,
    dt: Scalar,
    steps: usize,
) -> Vec<PhaseState> {
    let mut states = Vec::with_capacity(steps + 1);
    let mut state = initial;
    states.push(state);
    for _ in 0..steps {
        state = advance(integrator, state, field, dt);
        states.push(state);
    }
    states
}

/// Flatten states into `[q0, p0, q1, p1, ...]`
pub fn flatten(states: &[PhaseState]) -> Vec<Scalar> {
    states.iter().flat_map(|s| [s.q, s.p]).collect()
}

/// Van der Pol orbit as interleaved `x, y` pairs, starting at `(x0, y0)`
pub fn vdp_trajectory(mu: Scalar, x0: Scalar, y0: Scalar, dt: Scalar, steps: usize) -> Vec<Scalar> {
    let states = trajectory(
        &ExplicitMidpoint,
        &VanDerPol::new(mu),
        PhaseState::new(x0, y0),
        dt,
        steps,
    );
    flatten(&states)
}
