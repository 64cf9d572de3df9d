//! phasekit library
//!
//! Numerical core of the phase-space teaching widgets: vector fields,
//! integrators, boundary policies, the Kepler solver, 1-D advection and the
//! conservation diagnostics, plus the animation driver that steps each widget
//! once per display frame. A headless Bevy host drives the widgets from the
//! command line.

pub mod animation;
pub mod cli;
pub mod components;
pub mod config;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod simulations;
pub mod states;

#[cfg(test)]
pub mod test_utils;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used items
pub use config::SimulationConfig;
pub use events::SimulationCommand;
pub use physics::{
    fields::{FieldKind, FieldMode, FieldParameters, VectorField},
    integrators,
    math::{PhaseState, Scalar},
};
pub use plugins::{diagnostics::SimulationDiagnosticsPlugin, simulation::SimulationPlugin};
pub use states::AppState;
