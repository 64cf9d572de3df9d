//! phasekit prelude module
//!
//! Re-exports the types most systems and tests reach for.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - States and events
pub use crate::events::SimulationCommand;
pub use crate::states::AppState;

// Internal re-exports - Resources
pub use crate::resources::SharedRng;

// Internal re-exports - Components
pub use crate::components::{WidgetDriver, WidgetTag};

// Internal re-exports - Simulation
pub use crate::animation::{AnimationDriver, DriverState, Simulation};
pub use crate::physics::integrators::{Integrator, IntegratorRegistry};
pub use crate::physics::math::{PhaseState, Scalar};
pub use crate::simulations::{ParameterUpdate, Snapshot, Widget, WidgetKind};
