//! Static phase-portrait overlays: arrow grids and energy contours

use crate::physics::boundary::Domain;
use crate::physics::fields::{Projected, Projection, VectorField};
use crate::physics::math::{EPSILON, PhaseState, Scalar, TAU, linspace, safe_div};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub at: PhaseState,
    pub direction: PhaseState,
}

/// Field directions sampled on a regular lattice over a domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowGrid {
    pub arrows: Vec<Arrow>,
    /// Largest arrow magnitude, floored at [`EPSILON`]
    pub max_magnitude: Scalar,
}

impl FlowGrid {
    /// Sample `n_q × n_p` points spanning `[-q_max, q_max] × [-p_max, p_max]`
    pub fn sample<F: VectorField>(
        field: F,
        projection: Projection,
        domain: &Domain,
        n_q: usize,
        n_p: usize,
    ) -> Self {
        let projected = Projected::new(field, projection);
        let ps = linspace(-domain.p_max, domain.p_max, n_p);

        let arrows: Vec<Arrow> = linspace(-domain.q_max, domain.q_max, n_q)
            .into_iter()
            .flat_map(|q| ps.iter().map(move |p| PhaseState::new(q, *p)))
            .map(|at| Arrow {
                at,
                direction: projected.derivative(at),
            })
            .collect();

        let max_magnitude = arrows
            .iter()
            .map(|arrow| arrow.direction.length())
            .fold(EPSILON, Scalar::max);

        Self {
            arrows,
            max_magnitude,
        }
    }

    /// Multiplier that draws the longest arrow at `target_length`
    pub fn scale(&self, target_length: Scalar) -> Scalar {
        target_length / self.max_magnitude
    }
}

/// Closed curve `H = E` of a harmonic oscillator, `steps + 1` points.
///
/// `q = √(2E/k)·cos t`, `p = √(2mE)·sin t`.
pub fn harmonic_energy_contour(
    mass: Scalar,
    stiffness: Scalar,
    energy: Scalar,
    steps: usize,
) -> Vec<PhaseState> {
    let q_amplitude = libm::sqrt(safe_div(2.0 * energy, stiffness).max(0.0));
    let p_amplitude = libm::sqrt((2.0 * mass * energy).max(0.0));
    let steps = steps.max(1);

    (0..=steps)
        .map(|i| {
            let t = TAU * i as Scalar / steps as Scalar;
            PhaseState::new(q_amplitude * libm::cos(t), p_amplitude * libm::sin(t))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::fields::HarmonicOscillator;

    #[test]
    fn test_grid_shape() {
        let grid = FlowGrid::sample(
            HarmonicOscillator::default(),
            Projection::Full,
            &Domain::square(3.2),
            15,
            9,
        );
        assert_eq!(grid.arrows.len(), 135);
        assert_eq!(grid.arrows[0].at, PhaseState::new(-3.2, -3.2));

        // corner arrows are the longest for a harmonic field
        let corner = libm::hypot(3.2, 3.2);
        assert!((grid.max_magnitude - corner).abs() < 1e-12);
        assert!((grid.scale(24.0) * corner - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_vanishing_field_scale_is_finite() {
        struct Still;
        impl VectorField for Still {
            fn derivative(&self, _state: PhaseState) -> PhaseState {
                PhaseState::ZERO
            }
            fn hamiltonian(&self, _state: PhaseState) -> Scalar {
                0.0
            }
        }

        let grid = FlowGrid::sample(Still, Projection::Full, &Domain::default(), 3, 3);
        assert_eq!(grid.max_magnitude, EPSILON);
        assert!(grid.scale(24.0).is_finite());
    }

    #[test]
    fn test_projection_zeroes_component() {
        let grid = FlowGrid::sample(
            HarmonicOscillator::default(),
            Projection::PositionOnly,
            &Domain::default(),
            5,
            5,
        );
        assert!(grid.arrows.iter().all(|arrow| arrow.direction.p == 0.0));
    }

    #[test]
    fn test_contour_lies_on_energy_level() {
        let field = HarmonicOscillator::new(1.5, 0.8);
        for energy in [0.8, 1.6, 2.6, 3.8] {
            let contour = harmonic_energy_contour(1.5, 0.8, energy, 260);
            assert_eq!(contour.len(), 261);
            for point in contour {
                assert!((field.hamiltonian(point) - energy).abs() < 1e-9);
            }
        }
    }
}
