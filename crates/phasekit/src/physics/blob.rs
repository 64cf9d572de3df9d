//! A closed curve of phase-space points carried by a flow

use crate::physics::boundary::{BoundaryPolicy, Domain};
use crate::physics::diagnostics::{centroid, polygon_area};
use crate::physics::fields::VectorField;
use crate::physics::integrators::{Integrator, advance};
use crate::physics::math::{PhaseState, Scalar, TAU};
use serde::{Deserialize, Serialize};

/// Ordered boundary vertices; each one is integrated on its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub vertices: Vec<PhaseState>,
}

impl Blob {
    /// `n` points evenly spaced on a circle, counter-clockwise from angle 0
    pub fn circle(center: PhaseState, radius: Scalar, n: usize) -> Self {
        let vertices = (0..n)
            .map(|i| {
                let t = TAU * i as Scalar / n as Scalar;
                center + PhaseState::new(radius * libm::cos(t), radius * libm::sin(t))
            })
            .collect();
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn area(&self) -> Scalar {
        polygon_area(&self.vertices)
    }

    pub fn centroid(&self) -> PhaseState {
        centroid(&self.vertices)
    }

    /// Advance every vertex one step, then apply the boundary policy
    pub fn step(
        &mut self,
        integrator: &dyn Integrator,
        field: &dyn VectorField,
        dt: Scalar,
        boundary: BoundaryPolicy,
        domain: &Domain,
    ) {
        for vertex in &mut self.vertices {
            let next = advance(integrator, *vertex, field, dt);
            *vertex = boundary.apply(next, domain);
        }
    }
}
