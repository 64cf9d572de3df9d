use crate::animation::Simulation;
use crate::config::CoffeeConfig;
use crate::physics::advection::{AdvectionField, ScalarField, VelocityProfile};
use crate::physics::diagnostics::{ConservationBaseline, ConservationReport};
use crate::physics::fields::FieldParameters;
use crate::physics::integrators::Integrator;
use crate::physics::math::Scalar;
use crate::simulations::ParameterUpdate;
use bevy::log::debug;

/// Cream stirred into coffee: a Gaussian bump carried by a 1-D flow.
///
/// Steps with the configured fixed time step on every frame with a non-zero
/// delta; the frame delta itself only gates stepping.
pub struct CoffeeAdvection {
    config: CoffeeConfig,
    parameters: FieldParameters,
    advection: AdvectionField,
    mass: ConservationBaseline,
    steps: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvectionSnapshot {
    pub profile: VelocityProfile,
    pub concentration: Vec<Scalar>,
    pub velocity: Vec<Scalar>,
    pub mass: ConservationReport,
    pub peak: Scalar,
    pub steps: u64,
}

impl CoffeeAdvection {
    pub fn new(config: CoffeeConfig, parameters: FieldParameters) -> Self {
        let advection = AdvectionField::new(
            ScalarField::zeros(config.resolution),
            config.profile,
            parameters.advection_speed,
            parameters.diffusion,
        );
        let mut simulation = Self {
            config,
            parameters,
            advection,
            mass: ConservationBaseline::new(0.0),
            steps: 0,
        };
        simulation.reset();
        simulation
    }

    pub fn advection(&self) -> &AdvectionField {
        &self.advection
    }
}

impl Simulation for CoffeeAdvection {
    type Snapshot = AdvectionSnapshot;
    type Update = ParameterUpdate;

    fn name(&self) -> &'static str {
        "coffee_advection"
    }

    fn max_dt(&self) -> Scalar {
        self.config.max_dt
    }

    fn advance(&mut self, dt: Scalar, _integrator: &dyn Integrator) {
        if dt <= 0.0 {
            return;
        }
        self.advection.step(self.config.time_step);
        self.steps += 1;
    }

    fn reset(&mut self) {
        self.advection.profile = self.config.profile;
        self.advection.speed = self.parameters.advection_speed;
        self.advection.diffusion = self.parameters.diffusion;
        self.advection.replace_field(ScalarField::gaussian(
            self.config.resolution,
            self.config.bump_center,
            self.config.bump_width,
        ));
        self.mass = ConservationBaseline::new(self.advection.field().total_mass());
        self.steps = 0;
    }

    fn snapshot(&self) -> AdvectionSnapshot {
        let field = self.advection.field();
        AdvectionSnapshot {
            profile: self.advection.profile,
            concentration: field.samples().to_vec(),
            velocity: self.advection.velocity().to_vec(),
            mass: self.mass.check(field.total_mass()),
            peak: field.max(),
            steps: self.steps,
        }
    }

    fn apply(&mut self, update: ParameterUpdate) -> bool {
        match update {
            ParameterUpdate::Fields(mut parameters) => {
                for field in parameters.clamp_to_ranges() {
                    debug!("Clamped field parameter {field} for coffee advection");
                }
                self.parameters = parameters;
            }
            ParameterUpdate::Speed(speed) => self.parameters.advection_speed = speed.max(0.0),
            ParameterUpdate::Profile(profile) => self.config.profile = profile,
            ParameterUpdate::Diffusion(enabled) => self.parameters.diffusion = enabled,
            other => {
                debug!("Coffee advection ignores {other:?}");
                return false;
            }
        }
        true
    }
}
