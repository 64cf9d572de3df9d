use super::VectorField;
use crate::physics::math::{PhaseState, Scalar};
use serde::{Deserialize, Serialize};

/// Which components of a field's derivative to keep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    #[default]
    Full,
    /// Keep `dq/dt`, zero `dp/dt`
    PositionOnly,
    /// Keep `dp/dt`, zero `dq/dt`
    MomentumOnly,
}

impl Projection {
    #[inline]
    pub fn apply(&self, derivative: PhaseState) -> PhaseState {
        match self {
            Projection::Full => derivative,
            Projection::PositionOnly => PhaseState::new(derivative.q, 0.0),
            Projection::MomentumOnly => PhaseState::new(0.0, derivative.p),
        }
    }
}

/// A field seen through a [`Projection`]
#[derive(Debug, Clone, Copy)]
pub struct Projected<F> {
    pub field: F,
    pub projection: Projection,
}

impl<F: VectorField> Projected<F> {
    pub fn new(field: F, projection: Projection) -> Self {
        Self { field, projection }
    }
}

impl<F: VectorField> VectorField for Projected<F> {
    #[inline]
    fn derivative(&self, state: PhaseState) -> PhaseState {
        self.projection.apply(self.field.derivative(state))
    }

    #[inline]
    fn hamiltonian(&self, state: PhaseState) -> Scalar {
        self.field.hamiltonian(state)
    }
}
