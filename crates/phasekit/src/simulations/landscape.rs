use crate::animation::Simulation;
use crate::config::LandscapeConfig;
use crate::physics::integrators::Integrator;
use crate::physics::landscape::{PotentialKind, RollingBall, SampledPotential};
use crate::physics::math::Scalar;
use crate::simulations::ParameterUpdate;
use bevy::log::debug;

/// A ball rolling in a 1-D potential at fixed total energy.
///
/// Motion is kinematic: the speed comes straight from energy conservation and
/// the ball mirrors at the turning points, so no integrator is involved.
pub struct EnergyLandscape {
    config: LandscapeConfig,
    sampled: SampledPotential,
    ball: RollingBall,
    turning_points: Vec<Scalar>,
    time: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeSnapshot {
    pub potential: PotentialKind,
    pub energy: Scalar,
    pub x: Scalar,
    pub potential_energy: Scalar,
    pub kinetic_energy: Scalar,
    pub direction: Scalar,
    pub turning_points: Vec<Scalar>,
    /// Allowed interval the ball moves in
    pub interval: (Scalar, Scalar),
    pub time: Scalar,
}

impl EnergyLandscape {
    pub fn new(config: LandscapeConfig) -> Self {
        let sampled = SampledPotential::new(config.potential.potential());
        let mut simulation = Self {
            config,
            sampled,
            ball: RollingBall::new(0.0, 0.0, 0.0),
            turning_points: Vec::new(),
            time: 0.0,
        };
        simulation.reset();
        simulation
    }

    pub fn ball(&self) -> &RollingBall {
        &self.ball
    }

    /// The origin when it lies inside the allowed interval, else the well bottom
    fn start_position(&self, left: Scalar, right: Scalar) -> Scalar {
        if left < 0.0 && 0.0 < right {
            0.0
        } else {
            self.sampled
                .minimum_within(left, right)
                .unwrap_or(0.5 * (left + right))
        }
    }
}

impl Simulation for EnergyLandscape {
    type Snapshot = LandscapeSnapshot;
    type Update = ParameterUpdate;

    fn name(&self) -> &'static str {
        "energy_landscape"
    }

    fn max_dt(&self) -> Scalar {
        self.config.max_dt
    }

    fn advance(&mut self, dt: Scalar, _integrator: &dyn Integrator) {
        if dt <= 0.0 {
            return;
        }
        self.ball.step(
            &self.sampled.potential,
            self.config.energy,
            self.config.mass,
            dt,
        );
        self.time += dt;
    }

    fn reset(&mut self) {
        self.sampled = SampledPotential::new(self.config.potential.potential());
        self.turning_points = self.sampled.turning_points(self.config.energy);
        let (left, right) = self.sampled.allowed_interval(self.config.energy);
        self.ball = RollingBall::new(self.start_position(left, right), left, right);
        self.time = 0.0;
    }

    fn snapshot(&self) -> LandscapeSnapshot {
        let potential_energy = self.sampled.potential.value(self.ball.x);
        LandscapeSnapshot {
            potential: self.config.potential,
            energy: self.config.energy,
            x: self.ball.x,
            potential_energy,
            kinetic_energy: (self.config.energy - potential_energy).max(0.0),
            direction: self.ball.direction,
            turning_points: self.turning_points.clone(),
            interval: (self.ball.left, self.ball.right),
            time: self.time,
        }
    }

    fn apply(&mut self, update: ParameterUpdate) -> bool {
        match update {
            ParameterUpdate::Potential(kind) => self.config.potential = kind,
            ParameterUpdate::Energy(energy) => self.config.energy = energy.max(0.0),
            other => {
                debug!("Energy landscape ignores {other:?}");
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
    fn test_harmonic_starts_at_origin() {
        let landscape = EnergyLandscape::new(LandscapeConfig::default());
        let snapshot = landscape.snapshot();
        assert_eq!(snapshot.x, 0.0);
        assert_eq!(snapshot.turning_points.len(), 2);
        assert_eq!(snapshot.kinetic_energy, 2.0);
    }

    #[test]
    fn test_double_well_starts_inside_left_well() {
        let config = LandscapeConfig {
            potential: PotentialKind::DoubleWell,
            ..Default::default()
        };
        let mut landscape = EnergyLandscape::new(config);
        let snapshot = landscape.snapshot();
        assert_eq!(snapshot.turning_points.len(), 4);
        assert!(snapshot.x < 0.0);
        assert!(snapshot.kinetic_energy > 0.0);

        let before = snapshot.x;
        landscape.advance(0.03, &ExplicitMidpoint);
        assert_ne!(landscape.snapshot().x, before);
    }

    #[test]
    fn test_ball_oscillates_within_interval() {
        let mut landscape = EnergyLandscape::new(LandscapeConfig::default());
        let (left, right) = landscape.snapshot().interval;
        let mut directions = std::collections::HashSet::new();
        for _ in 0..1000 {
            landscape.advance(0.03, &ExplicitMidpoint);
            let snapshot = landscape.snapshot();
            assert!((left..=right).contains(&snapshot.x));
            directions.insert(snapshot.direction as i8);
        }
        assert_eq!(directions.len(), 2);
    }

    #[test]
    fn test_energy_update_moves_turning_points() {
        let mut landscape = EnergyLandscape::new(LandscapeConfig::default());
        landscape.apply(ParameterUpdate::Energy(0.5));
        landscape.reset();
        let snapshot = landscape.snapshot();
        assert!((snapshot.turning_points[1] - 1.0).abs() < 1e-3);
    }
}
