use crate::animation::Simulation;
use crate::config::OrbitConfig;
use crate::physics::fields::{FieldParameters, KeplerMotion};
use crate::physics::integrators::{Integrator, advance};
use crate::physics::kepler::{OrbitState, OrbitalElements};
use crate::physics::math::{PhaseState, Scalar, wrap_angle};
use crate::simulations::ParameterUpdate;
use bevy::log::debug;

/// A body on a bound Kepler orbit, exchanging kinetic and potential energy
pub struct KeplerOrbit {
    config: OrbitConfig,
    parameters: FieldParameters,
    elements: OrbitalElements,
    field: KeplerMotion,
    /// `q` is the mean anomaly
    clock: PhaseState,
    time: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSnapshot {
    pub elements: OrbitalElements,
    pub orbit: OrbitState,
    pub semi_minor_axis: Scalar,
    pub perihelion: Scalar,
    pub aphelion: Scalar,
    pub specific_energy: Scalar,
    /// Kinetic, |potential| and |total| energy as fractions of the gauge range
    pub gauges: [Scalar; 3],
    pub outline: Vec<PhaseState>,
    pub time: Scalar,
}

impl KeplerOrbit {
    pub fn new(config: OrbitConfig, parameters: FieldParameters) -> Self {
        let elements = Self::elements_from(&parameters);
        let field = KeplerMotion::new(parameters.gravitational_parameter, parameters.semi_major_axis);
        Self {
            config,
            parameters,
            elements,
            field,
            clock: PhaseState::ZERO,
            time: 0.0,
        }
    }

    fn elements_from(parameters: &FieldParameters) -> OrbitalElements {
        OrbitalElements::new(
            parameters.semi_major_axis,
            parameters.eccentricity,
            parameters.gravitational_parameter,
        )
    }

    pub fn mean_anomaly(&self) -> Scalar {
        self.clock.q
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }
}

impl Simulation for KeplerOrbit {
    type Snapshot = OrbitSnapshot;
    type Update = ParameterUpdate;

    fn name(&self) -> &'static str {
        "kepler_orbit"
    }

    fn max_dt(&self) -> Scalar {
        self.config.max_dt
    }

    fn advance(&mut self, dt: Scalar, integrator: &dyn Integrator) {
        let step = dt * self.config.speed;
        if step <= 0.0 {
            return;
        }
        let next = advance(integrator, self.clock, &self.field, step);
        self.clock = PhaseState::new(wrap_angle(next.q), 0.0);
        self.time += step;
    }

    fn reset(&mut self) {
        self.elements = Self::elements_from(&self.parameters);
        self.field = KeplerMotion::new(
            self.parameters.gravitational_parameter,
            self.parameters.semi_major_axis,
        );
        self.clock = PhaseState::ZERO;
        self.time = 0.0;
    }

    fn snapshot(&self) -> OrbitSnapshot {
        let orbit = self.elements.state_at(self.mean_anomaly());
        let specific_energy = self.elements.specific_energy();
        let gauge = self.elements.gauge_max();
        let fraction = |value: Scalar| (value / gauge).clamp(0.0, 1.0);

        OrbitSnapshot {
            elements: self.elements,
            orbit,
            semi_minor_axis: self.elements.semi_minor_axis(),
            perihelion: self.elements.perihelion(),
            aphelion: self.elements.aphelion(),
            specific_energy,
            gauges: [
                fraction(orbit.kinetic),
                fraction(orbit.potential.abs()),
                fraction(specific_energy.abs()),
            ],
            outline: self.elements.outline(self.config.outline_samples),
            time: self.time,
        }
    }

    fn apply(&mut self, update: ParameterUpdate) -> bool {
        match update {
            ParameterUpdate::Fields(parameters) => self.parameters = parameters,
            ParameterUpdate::Speed(speed) => self.config.speed = speed.max(0.0),
            other => {
                debug!("Kepler orbit ignores {other:?}");
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
    use crate::physics::math::TAU;

    fn orbit() -> KeplerOrbit {
        KeplerOrbit::new(OrbitConfig::default(), FieldParameters::default())
    }

    #[test]
    fn test_starts_at_perihelion() {
        let snapshot = orbit().snapshot();
        assert_eq!(snapshot.orbit.mean_anomaly, 0.0);
        assert!((snapshot.orbit.radius - 0.45).abs() < 1e-12);
        assert_eq!(snapshot.outline.len(), 361);
    }

    #[test]
    fn test_mean_anomaly_advances_at_mean_motion() {
        let mut orbit = orbit();
        orbit.advance(0.03, &ExplicitMidpoint);
        assert!((orbit.mean_anomaly() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_mean_anomaly_stays_wrapped() {
        let mut orbit = orbit();
        for _ in 0..1000 {
            orbit.advance(0.03, &ExplicitMidpoint);
            assert!((0.0..TAU).contains(&orbit.mean_anomaly()));
        }
    }

    #[test]
    fn test_total_energy_constant_along_orbit() {
        let mut orbit = orbit();
        for _ in 0..200 {
            orbit.advance(0.03, &ExplicitMidpoint);
            let snapshot = orbit.snapshot();
            assert!((snapshot.orbit.total - snapshot.specific_energy).abs() < 1e-9);
            assert!(snapshot.gauges.iter().all(|g| (0.0..=1.0).contains(g)));
        }
    }

    #[test]
    fn test_eccentricity_change_applies_after_reset() {
        let mut orbit = orbit();
        orbit.advance(0.03, &ExplicitMidpoint);

        let parameters = FieldParameters {
            eccentricity: 0.0,
            ..Default::default()
        };
        orbit.apply(ParameterUpdate::Fields(parameters));
        orbit.reset();

        assert_eq!(orbit.mean_anomaly(), 0.0);
        let snapshot = orbit.snapshot();
        assert_eq!(snapshot.perihelion, snapshot.aphelion);
    }
}
