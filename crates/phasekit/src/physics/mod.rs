//! Numerical core: fields, integrators, solvers and diagnostics

pub mod advection;
pub mod blob;
pub mod boundary;
pub mod diagnostics;
pub mod fields;
pub mod integrators;
pub mod kepler;
pub mod landscape;
pub mod math;
pub mod portrait;
pub mod trajectory;
