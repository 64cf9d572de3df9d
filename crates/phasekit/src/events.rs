//! Centralized event definitions
//!
//! Widget control goes through a single command event so the host (CLI loop,
//! tests, or an embedding page) never touches a driver directly. Commands are
//! handled before the tick system, which is what makes parameter changes land
//! between frames.

use crate::simulations::{ParameterUpdate, WidgetKind};
use bevy::prelude::*;

#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimulationCommand {
    /// Return every mounted widget to its initial condition
    Restart,
    TogglePause,
    /// Unmount every widget; stopped drivers never step again
    Stop,
    /// Change parameters of one widget kind
    Apply {
        widget: WidgetKind,
        update: ParameterUpdate,
    },
    /// Swap the integrator of every mounted widget by registry name
    SetIntegrator(String),
}
