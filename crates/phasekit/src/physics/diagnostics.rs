//! Conservation diagnostics: energy, phase-space area, drift reports

use crate::physics::fields::VectorField;
use crate::physics::math::{PhaseState, Scalar};
use serde::{Deserialize, Serialize};

/// Relative error beyond which a conserved quantity is flagged as drifting
pub const DRIFT_WARNING_THRESHOLD: Scalar = 0.10;

/// Baselines smaller than this are compared absolutely
const BASELINE_FLOOR: Scalar = 1e-12;

/// Hamiltonian of `state` under `field`
pub fn energy(state: PhaseState, field: &dyn VectorField) -> Scalar {
    field.hamiltonian(state)
}

/// Shoelace area of a closed polygon, wrapping from the last vertex to the first
pub fn polygon_area(vertices: &[PhaseState]) -> Scalar {
    if vertices.len() < 3 {
        return 0.0;
    }
    let twice_signed: Scalar = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.cross(*b))
        .sum();
    0.5 * twice_signed.abs()
}

/// Mean of the vertices
pub fn centroid(vertices: &[PhaseState]) -> PhaseState {
    if vertices.is_empty() {
        return PhaseState::ZERO;
    }
    let sum = vertices
        .iter()
        .fold(PhaseState::ZERO, |acc, vertex| acc + *vertex);
    sum * (1.0 / vertices.len() as Scalar)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftStatus {
    Conserved,
    Drifting,
}

/// Initial value of a quantity that should be conserved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConservationBaseline {
    pub baseline: Scalar,
}

/// How far a conserved quantity has moved from its baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConservationReport {
    pub baseline: Scalar,
    pub current: Scalar,
    /// `current / baseline`, or 1 when the baseline vanishes
    pub ratio: Scalar,
    /// `|current − baseline| / |baseline|`, absolute for a vanishing baseline
    pub relative_error: Scalar,
    pub status: DriftStatus,
}

impl ConservationBaseline {
    pub fn new(baseline: Scalar) -> Self {
        Self { baseline }
    }

    pub fn check(&self, current: Scalar) -> ConservationReport {
        let difference = (current - self.baseline).abs();
        let (ratio, relative_error) = if self.baseline.abs() > BASELINE_FLOOR {
            (current / self.baseline, difference / self.baseline.abs())
        } else {
            (1.0, difference)
        };

        let status = if relative_error > DRIFT_WARNING_THRESHOLD || !relative_error.is_finite() {
            DriftStatus::Drifting
        } else {
            DriftStatus::Conserved
        };

        ConservationReport {
            baseline: self.baseline,
            current,
            ratio,
            relative_error,
            status,
        }
    }
}

impl ConservationReport {
    pub fn is_drifting(&self) -> bool {
        self.status == DriftStatus::Drifting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::fields::HarmonicOscillator;
    use crate::physics::math::TAU;

    fn regular_polygon(n: usize, radius: Scalar) -> Vec<PhaseState> {
        (0..n)
            .map(|i| {
                let t = TAU * i as Scalar / n as Scalar;
                PhaseState::new(radius * libm::cos(t), radius * libm::sin(t))
            })
            .collect()
    }

    #[test]
    fn test_unit_square() {
        let square = [
            PhaseState::new(0.0, 0.0),
            PhaseState::new(1.0, 0.0),
            PhaseState::new(1.0, 1.0),
            PhaseState::new(0.0, 1.0),
        ];
        assert_eq!(polygon_area(&square), 1.0);

        let mut clockwise = square;
        clockwise.reverse();
        assert_eq!(polygon_area(&clockwise), 1.0);
    }

    #[test]
    fn test_degenerate_polygons() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(
            polygon_area(&[PhaseState::new(1.0, 1.0), PhaseState::new(2.0, 2.0)]),
            0.0
        );
    }

    #[test]
    fn test_polygon_area_approaches_disc() {
        let radius = 0.45;
        let disc = std::f64::consts::PI * radius * radius;
        let mut previous_error = Scalar::INFINITY;
        for n in [8, 16, 32, 90, 360] {
            let error = (disc - polygon_area(&regular_polygon(n, radius))).abs();
            assert!(error < previous_error);
            previous_error = error;
        }
        assert!(previous_error / disc < 1e-4);
    }

    #[test]
    fn test_centroid() {
        let polygon = regular_polygon(12, 1.0)
            .into_iter()
            .map(|v| v + PhaseState::new(1.2, -0.5))
            .collect::<Vec<_>>();
        let c = centroid(&polygon);
        assert!((c - PhaseState::new(1.2, -0.5)).length() < 1e-12);
        assert_eq!(centroid(&[]), PhaseState::ZERO);
    }

    #[test]
    fn test_energy_reads_hamiltonian() {
        let field = HarmonicOscillator::new(2.0, 3.0);
        assert_eq!(energy(PhaseState::new(1.0, 2.0), &field), 2.5);
    }

    #[test]
    fn test_report_flags_drift_beyond_threshold() {
        let baseline = ConservationBaseline::new(2.0);

        let steady = baseline.check(2.1);
        assert_eq!(steady.status, DriftStatus::Conserved);
        assert!((steady.ratio - 1.05).abs() < 1e-12);

        let drifted = baseline.check(1.6);
        assert!(drifted.is_drifting());
        assert!((drifted.relative_error - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_vanishing_baseline_compares_absolutely() {
        let report = ConservationBaseline::new(0.0).check(0.05);
        assert_eq!(report.ratio, 1.0);
        assert_eq!(report.relative_error, 0.05);
        assert_eq!(report.status, DriftStatus::Conserved);
    }

    #[test]
    fn test_non_finite_current_is_drifting() {
        assert!(ConservationBaseline::new(1.0).check(Scalar::NAN).is_drifting());
    }
}
