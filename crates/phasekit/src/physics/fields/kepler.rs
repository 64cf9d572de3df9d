use super::VectorField;
use crate::physics::math::{PhaseState, Scalar, safe_div};
use serde::{Deserialize, Serialize};

/// Uniform advance of the mean anomaly along a bound Kepler orbit.
///
/// `q` carries the mean anomaly `M`; `p` is unused. The mean anomaly grows
/// linearly at the mean motion `n = √(μ/a³)`, which is what lets the orbit
/// widget drive its clock through the same integrator as every other panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerMotion {
    pub gravitational_parameter: Scalar,
    pub semi_major_axis: Scalar,
}

impl KeplerMotion {
    pub fn new(gravitational_parameter: Scalar, semi_major_axis: Scalar) -> Self {
        Self {
            gravitational_parameter,
            semi_major_axis,
        }
    }

    pub fn mean_motion(&self) -> Scalar {
        let a = self.semi_major_axis;
        libm::sqrt(safe_div(self.gravitational_parameter, a * a * a).max(0.0))
    }
}

impl VectorField for KeplerMotion {
    #[inline]
    fn derivative(&self, _state: PhaseState) -> PhaseState {
        PhaseState::new(self.mean_motion(), 0.0)
    }

    /// Specific orbital energy `−μ/(2a)`, independent of the anomaly
    #[inline]
    fn hamiltonian(&self, _state: PhaseState) -> Scalar {
        -safe_div(self.gravitational_parameter, 2.0 * self.semi_major_axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_orbit_mean_motion() {
        let field = KeplerMotion::new(1.0, 1.0);
        assert_eq!(field.mean_motion(), 1.0);
        assert_eq!(field.derivative(PhaseState::new(2.0, 0.0)), PhaseState::new(1.0, 0.0));
        assert_eq!(field.hamiltonian(PhaseState::ZERO), -0.5);
    }

    #[test]
    fn test_third_law_scaling() {
        let inner = KeplerMotion::new(1.0, 1.0).mean_motion();
        let outer = KeplerMotion::new(1.0, 4.0).mean_motion();
        assert!((inner / outer - 8.0).abs() < 1e-12);
    }
}
