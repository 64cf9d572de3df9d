//! JavaScript bindings for the trajectory kernel

use crate::physics::math::Scalar;
use crate::physics::trajectory;
use wasm_bindgen::prelude::*;

/// Van der Pol trajectory from `(x0, y0)` as a flat `[x0, y0, x1, y1, ...]` array
#[wasm_bindgen]
pub fn vdp_trajectory(mu: Scalar, x0: Scalar, y0: Scalar, dt: Scalar, steps: usize) -> Vec<Scalar> {
    trajectory::vdp_trajectory(mu, x0, y0, dt, steps)
}
