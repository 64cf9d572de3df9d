use crate::physics::boundary::Domain;
use crate::physics::integrators::{ExplicitMidpoint, Integrator};
use crate::physics::math::PhaseState;
use crate::simulations::WidgetKind;
use bevy::prelude::*;
use rand::Rng;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

/// Fraction of the domain random initial conditions are drawn from
const INITIAL_SPREAD: f64 = 0.7;

#[derive(Resource, Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }

    /// Uniform point in the inner 70% of `domain`
    pub fn initial_state(&mut self, domain: &Domain) -> PhaseState {
        let q_max = domain.q_max * INITIAL_SPREAD;
        let p_max = domain.p_max * INITIAL_SPREAD;
        PhaseState::new(
            self.random_range(-q_max..=q_max),
            self.random_range(-p_max..=p_max),
        )
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// Integrator handed to newly mounted widgets
#[derive(Resource, Deref, DerefMut)]
pub struct CurrentIntegrator(pub Box<dyn Integrator>);

impl Default for CurrentIntegrator {
    fn default() -> Self {
        Self(Box::new(ExplicitMidpoint))
    }
}

/// Widget kinds the host mounts at startup and on restart
#[derive(Resource, Deref, Debug, Clone, PartialEq, Eq)]
pub struct MountedWidgets(pub Vec<WidgetKind>);

impl Default for MountedWidgets {
    fn default() -> Self {
        Self(WidgetKind::ALL.to_vec())
    }
}
