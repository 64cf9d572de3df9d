//! Frame scheduling glue between the host loop and the simulations

mod clock;
mod driver;

pub use clock::FrameClock;
pub use driver::{AnimationDriver, DriverState, Simulation};
