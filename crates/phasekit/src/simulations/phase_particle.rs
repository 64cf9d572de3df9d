use crate::animation::Simulation;
use crate::components::Trail;
use crate::config::PhaseParticleConfig;
use crate::physics::boundary::Domain;
use crate::physics::diagnostics::{ConservationBaseline, ConservationReport};
use crate::physics::fields::{FieldKind, FieldMode, FieldParameters, Projected, VectorField};
use crate::physics::integrators::{Integrator, advance};
use crate::physics::math::{PhaseState, Scalar};
use crate::simulations::ParameterUpdate;
use bevy::log::{debug, info};

/// A single point flowing through phase space, with its recent history
pub struct PhaseParticle {
    config: PhaseParticleConfig,
    parameters: FieldParameters,
    field: FieldKind,
    initial: PhaseState,
    state: PhaseState,
    trail: Trail,
    energy: ConservationBaseline,
    time: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSnapshot {
    pub mode: FieldMode,
    pub state: PhaseState,
    pub time: Scalar,
    pub trail: Vec<PhaseState>,
    pub energy: ConservationReport,
}

impl PhaseParticle {
    pub fn new(config: PhaseParticleConfig, parameters: FieldParameters, initial: PhaseState) -> Self {
        let field = FieldKind::new(config.field, &parameters);
        let mut particle = Self {
            trail: Trail::new(config.trail_capacity),
            energy: ConservationBaseline::new(field.hamiltonian(initial)),
            config,
            parameters,
            field,
            initial,
            state: initial,
            time: 0.0,
        };
        particle.reset();
        particle
    }

    /// Initial condition from the configuration
    pub fn from_config(config: PhaseParticleConfig, parameters: FieldParameters) -> Self {
        let initial = PhaseState::new(config.initial_q, config.initial_p);
        Self::new(config, parameters, initial)
    }

    pub fn domain(&self) -> Domain {
        Domain::square(self.config.domain)
    }

    pub fn field(&self) -> &FieldKind {
        &self.field
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    fn rebuild_field(&mut self) {
        self.field = FieldKind::new(self.config.field, &self.parameters);
    }
}

impl Simulation for PhaseParticle {
    type Snapshot = PhaseSnapshot;
    type Update = ParameterUpdate;

    fn name(&self) -> &'static str {
        "phase_particle"
    }

    fn max_dt(&self) -> Scalar {
        self.config.max_dt
    }

    fn advance(&mut self, dt: Scalar, integrator: &dyn Integrator) {
        let step = dt * self.config.speed;
        if step <= 0.0 {
            return;
        }

        let projected = Projected::new(&self.field, self.config.projection);
        let next = advance(integrator, self.state, &projected, step);
        self.state = self.config.boundary.apply(next, &self.domain());
        self.time += step;
        self.trail.push(self.state);
    }

    fn reset(&mut self) {
        self.state = self.config.boundary.apply(self.initial, &self.domain());
        self.time = 0.0;
        self.trail = Trail::new(self.config.trail_capacity);
        self.trail.push(self.state);
        self.energy = ConservationBaseline::new(self.field.hamiltonian(self.state));
    }

    fn snapshot(&self) -> PhaseSnapshot {
        PhaseSnapshot {
            mode: self.field.mode(),
            state: self.state,
            time: self.time,
            trail: self.trail.to_vec(),
            energy: self.energy.check(self.field.hamiltonian(self.state)),
        }
    }

    fn apply(&mut self, update: ParameterUpdate) -> bool {
        match update {
            ParameterUpdate::Fields(parameters) => {
                self.parameters = parameters;
                self.rebuild_field();
            }
            ParameterUpdate::FieldMode(mode) => {
                if mode != self.config.field {
                    info!("Switching phase particle field from {} to {}", self.config.field, mode);
                }
                self.config.field = mode;
                self.rebuild_field();
            }
            ParameterUpdate::Projection(projection) => self.config.projection = projection,
            ParameterUpdate::Speed(speed) => self.config.speed = speed.max(0.0),
            ParameterUpdate::InitialState(initial) => self.initial = initial,
            other => {
                debug!("Phase particle ignores {other:?}");
                return false;
            }
        }
        true
    }
}
