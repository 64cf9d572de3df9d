//! Kepler's equation and the quantities derived from a bound two-body orbit

use crate::physics::math::{EPSILON, PhaseState, Scalar, TAU, guard_denominator, safe_div, wrap_angle};
use serde::{Deserialize, Serialize};

/// Newton iterations spent on every solve
pub const KEPLER_ITERATIONS: usize = 8;

/// Eccentric anomaly `E` satisfying `E − e·sin E = M`.
///
/// Seeds `E₀ = M` and runs exactly [`KEPLER_ITERATIONS`] Newton steps with no
/// convergence check; the result is returned even if it has not converged.
/// Only meaningful for `0 ≤ e < 1`.
pub fn solve_kepler(mean_anomaly: Scalar, eccentricity: Scalar) -> Scalar {
    let mut e_anom = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        let f = e_anom - eccentricity * libm::sin(e_anom) - mean_anomaly;
        let f_prime = 1.0 - eccentricity * libm::cos(e_anom);
        e_anom -= f / guard_denominator(f_prime);
    }
    e_anom
}

/// Shape and scale of a bound orbit with the attracting body at the focus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis: Scalar,
    pub eccentricity: Scalar,
    pub gravitational_parameter: Scalar,
}

/// Everything the orbit panel displays for one mean anomaly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    pub mean_anomaly: Scalar,
    pub eccentric_anomaly: Scalar,
    /// Position in the orbital plane, focus at the origin
    pub position: PhaseState,
    pub radius: Scalar,
    pub speed_squared: Scalar,
    pub kinetic: Scalar,
    pub potential: Scalar,
    pub total: Scalar,
}

impl OrbitalElements {
    pub fn new(semi_major_axis: Scalar, eccentricity: Scalar, gravitational_parameter: Scalar) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            gravitational_parameter,
        }
    }

    pub fn semi_minor_axis(&self) -> Scalar {
        let e = self.eccentricity;
        self.semi_major_axis * libm::sqrt((1.0 - e * e).max(0.0))
    }

    /// `n = √(μ/a³)`
    pub fn mean_motion(&self) -> Scalar {
        let a = self.semi_major_axis;
        libm::sqrt(safe_div(self.gravitational_parameter, a * a * a).max(0.0))
    }

    pub fn period(&self) -> Scalar {
        safe_div(TAU, self.mean_motion())
    }

    /// Specific orbital energy `−μ/(2a)`
    pub fn specific_energy(&self) -> Scalar {
        -safe_div(self.gravitational_parameter, 2.0 * self.semi_major_axis)
    }

    pub fn perihelion(&self) -> Scalar {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn aphelion(&self) -> Scalar {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Point on the ellipse at eccentric anomaly `E`
    pub fn position_at(&self, eccentric_anomaly: Scalar) -> PhaseState {
        PhaseState::new(
            self.semi_major_axis * (libm::cos(eccentric_anomaly) - self.eccentricity),
            self.semi_minor_axis() * libm::sin(eccentric_anomaly),
        )
    }

    /// Mean anomaly after `dt`, wrapped to `[0, 2π)`
    pub fn advance_mean_anomaly(&self, mean_anomaly: Scalar, dt: Scalar) -> Scalar {
        wrap_angle(mean_anomaly + self.mean_motion() * dt)
    }

    /// Solve for `E` and evaluate the vis-viva energy split
    pub fn state_at(&self, mean_anomaly: Scalar) -> OrbitState {
        let mu = self.gravitational_parameter;
        let eccentric_anomaly = solve_kepler(mean_anomaly, self.eccentricity);
        let position = self.position_at(eccentric_anomaly);
        let radius = position.length().max(EPSILON);

        let speed_squared = mu * (2.0 / radius - safe_div(1.0, self.semi_major_axis));
        let kinetic = 0.5 * speed_squared;
        let potential = -mu / radius;

        OrbitState {
            mean_anomaly,
            eccentric_anomaly,
            position,
            radius,
            speed_squared,
            kinetic,
            potential,
            total: kinetic + potential,
        }
    }

    /// Upper bound for the energy gauges: the perihelion values padded by 15%
    pub fn gauge_max(&self) -> Scalar {
        let mu = self.gravitational_parameter;
        let r_peri = self.perihelion().max(EPSILON);
        let potential_peri = mu / r_peri;
        let kinetic_peri = 0.5 * mu * (2.0 / r_peri - safe_div(1.0, self.semi_major_axis));
        potential_peri
            .max(kinetic_peri)
            .max(self.specific_energy().abs())
            * 1.15
    }

    /// `samples + 1` points around the ellipse, first and last coinciding
    pub fn outline(&self, samples: usize) -> Vec<PhaseState> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| self.position_at(TAU * i as Scalar / samples as Scalar))
            .collect()
    }
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self::new(1.0, 0.55, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mean_anomaly() {
        for e in [0.0, 0.3, 0.55, 0.85] {
            assert_eq!(solve_kepler(0.0, e), 0.0);
        }
    }

    #[test]
    fn test_circular_orbit_is_identity() {
        for m in [0.0, 0.5, 1.7, 3.0, 6.2] {
            assert_eq!(solve_kepler(m, 0.0), m);
        }
    }

    #[test]
    fn test_residual_small_for_moderate_eccentricity() {
        for e in [0.1, 0.55, 0.85] {
            for i in 0..32 {
                let m = TAU * i as Scalar / 32.0;
                let e_anom = solve_kepler(m, e);
                let residual = e_anom - e * libm::sin(e_anom) - m;
                assert!(residual.abs() < 1e-9, "M={m} e={e} residual={residual}");
            }
        }
    }

    #[test]
    fn test_never_errors_for_degenerate_input() {
        assert!(solve_kepler(0.0, 1.0).is_finite());
        assert!(solve_kepler(1.0, 1.0).is_finite());
    }

    #[test]
    fn test_vis_viva_conserves_energy() {
        let elements = OrbitalElements::default();
        for i in 0..16 {
            let state = elements.state_at(TAU * i as Scalar / 16.0);
            assert!((state.total - elements.specific_energy()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_apsides() {
        let elements = OrbitalElements::default();
        let peri = elements.state_at(0.0);
        assert!((peri.radius - elements.perihelion()).abs() < 1e-12);
        assert!((peri.position.q - 0.45).abs() < 1e-12);

        let apo = elements.state_at(std::f64::consts::PI);
        assert!((apo.radius - elements.aphelion()).abs() < 1e-9);
    }

    #[test]
    fn test_mean_anomaly_wraps() {
        let elements = OrbitalElements::default();
        let next = elements.advance_mean_anomaly(TAU - 0.01, 0.03);
        assert!((next - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_outline_closes() {
        let outline = OrbitalElements::default().outline(360);
        assert_eq!(outline.len(), 361);
        assert!((outline[0] - outline[360]).length() < 1e-12);
    }

    #[test]
    fn test_gauge_covers_energy_split() {
        let elements = OrbitalElements::default();
        let gauge = elements.gauge_max();
        for i in 0..16 {
            let state = elements.state_at(TAU * i as Scalar / 16.0);
            assert!(state.kinetic <= gauge);
            assert!(state.potential.abs() <= gauge);
        }
    }
}
