use crate::animation::Simulation;
use crate::config::LiouvilleConfig;
use crate::physics::blob::Blob;
use crate::physics::boundary::{BoundaryPolicy, Domain};
use crate::physics::diagnostics::{ConservationBaseline, ConservationReport};
use crate::physics::fields::DoubleWell;
use crate::physics::integrators::Integrator;
use crate::physics::math::{PhaseState, Scalar};
use crate::simulations::ParameterUpdate;
use bevy::log::debug;

/// Centers are kept this far inside the window so the blob starts fully visible
const CENTER_LIMIT: Scalar = 0.7;

/// A disc of initial conditions sheared by the quartic flow.
///
/// Vertices that reach the window edge are clamped, which breaks area
/// conservation; the area report makes that visible.
pub struct LiouvilleBlob {
    config: LiouvilleConfig,
    blob: Blob,
    area: ConservationBaseline,
    time: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlobSnapshot {
    pub vertices: Vec<PhaseState>,
    pub centroid: PhaseState,
    pub area: ConservationReport,
    pub time: Scalar,
}

impl LiouvilleBlob {
    pub fn new(config: LiouvilleConfig) -> Self {
        let mut simulation = Self {
            config,
            blob: Blob { vertices: Vec::new() },
            area: ConservationBaseline::new(0.0),
            time: 0.0,
        };
        simulation.reset();
        simulation
    }

    pub fn domain(&self) -> Domain {
        Domain::square(self.config.domain)
    }

    /// Configured center pulled into the inner part of the window
    pub fn center(&self) -> PhaseState {
        let limit = self.config.domain * CENTER_LIMIT;
        PhaseState::new(
            self.config.center_q.clamp(-limit, limit),
            self.config.center_p.clamp(-limit, limit),
        )
    }

    pub fn blob(&self) -> &Blob {
        &self.blob
    }
}

impl Simulation for LiouvilleBlob {
    type Snapshot = BlobSnapshot;
    type Update = ParameterUpdate;

    fn name(&self) -> &'static str {
        "liouville_blob"
    }

    fn max_dt(&self) -> Scalar {
        self.config.max_dt
    }

    fn advance(&mut self, dt: Scalar, integrator: &dyn Integrator) {
        let step = dt * self.config.speed;
        if step <= 0.0 {
            return;
        }
        let domain = self.domain();
        self.blob
            .step(integrator, &DoubleWell, step, BoundaryPolicy::Clamp, &domain);
        self.time += step;
    }

    fn reset(&mut self) {
        self.blob = Blob::circle(self.center(), self.config.radius, self.config.vertices);
        self.area = ConservationBaseline::new(self.blob.area());
        self.time = 0.0;
    }

    fn snapshot(&self) -> BlobSnapshot {
        BlobSnapshot {
            vertices: self.blob.vertices.clone(),
            centroid: self.blob.centroid(),
            area: self.area.check(self.blob.area()),
            time: self.time,
        }
    }

    fn apply(&mut self, update: ParameterUpdate) -> bool {
        match update {
            ParameterUpdate::Speed(speed) => self.config.speed = speed.max(0.0),
            ParameterUpdate::BlobRadius(radius) => self.config.radius = radius.max(0.0),
            ParameterUpdate::InitialState(center) => {
                self.config.center_q = center.q;
                self.config.center_p = center.p;
            }
            other => {
                debug!("Liouville blob ignores {other:?}");
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::integrators::ExplicitMidpoint;

    #[test]
    fn test_initial_blob() {
        let simulation = LiouvilleBlob::new(LiouvilleConfig::default());
        let snapshot = simulation.snapshot();
        assert_eq!(snapshot.vertices.len(), 90);
        assert!((snapshot.centroid - PhaseState::new(1.2, 0.0)).length() < 1e-12);
        assert_eq!(snapshot.area.ratio, 1.0);
    }

    #[test]
    fn test_center_is_clamped_inside_window() {
        let config = LiouvilleConfig {
            center_q: 2.0,
            center_p: -2.0,
            domain: 2.0,
            ..Default::default()
        };
        let simulation = LiouvilleBlob::new(config);
        assert_eq!(simulation.center(), PhaseState::new(1.4, -1.4));
    }

    #[test]
    fn test_area_tracked_under_flow() {
        let mut simulation = LiouvilleBlob::new(LiouvilleConfig::default());
        for _ in 0..100 {
            simulation.advance(0.016, &ExplicitMidpoint);
        }
        let snapshot = simulation.snapshot();
        assert!(snapshot.area.relative_error < 0.05, "{:?}", snapshot.area);
        assert!(snapshot.vertices.iter().all(|v| simulation.domain().contains(*v)));
    }

    #[test]
    fn test_radius_update() {
        let mut simulation = LiouvilleBlob::new(LiouvilleConfig::default());
        simulation.apply(ParameterUpdate::BlobRadius(0.2));
        simulation.reset();
        let area = simulation.blob().area();
        let disc = std::f64::consts::PI * 0.04;
        assert!((area - disc).abs() / disc < 1e-3);
    }
}
