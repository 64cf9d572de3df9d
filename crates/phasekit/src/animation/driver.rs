use super::FrameClock;
use crate::physics::integrators::Integrator;
use crate::physics::math::Scalar;
use bevy::log::{debug, trace};

/// Something the driver can step once per frame
pub trait Simulation {
    type Snapshot: Clone;
    type Update;

    fn name(&self) -> &'static str;

    /// Largest frame delta this simulation accepts
    fn max_dt(&self) -> Scalar;

    fn advance(&mut self, dt: Scalar, integrator: &dyn Integrator);

    /// Return to the initial condition for the current parameters
    fn reset(&mut self);

    fn snapshot(&self) -> Self::Snapshot;

    /// Change parameters. Returns `false` when the update does not concern
    /// this simulation; the driver resets only on `true`.
    fn apply(&mut self, update: Self::Update) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Paused,
    Stopped,
}

/// Owns a simulation and steps it from host timestamps
pub struct AnimationDriver<S: Simulation> {
    simulation: S,
    integrator: Box<dyn Integrator>,
    clock: FrameClock,
    state: DriverState,
    frames: u64,
}

impl<S: Simulation> AnimationDriver<S> {
    pub fn new(simulation: S, integrator: Box<dyn Integrator>) -> Self {
        let clock = FrameClock::new(simulation.max_dt());
        Self {
            simulation,
            integrator,
            clock,
            state: DriverState::Running,
            frames: 0,
        }
    }

    /// Start paused
    pub fn paused(mut self) -> Self {
        self.state = DriverState::Paused;
        self
    }

    /// Step once for the frame at `timestamp` (seconds).
    ///
    /// Returns the delta the simulation was advanced by, or `None` when paused
    /// or stopped.
    pub fn tick(&mut self, timestamp: Scalar) -> Option<Scalar> {
        if self.state != DriverState::Running {
            return None;
        }
        let dt = self.clock.tick(timestamp);
        self.simulation.advance(dt, self.integrator.as_ref());
        self.frames += 1;
        trace!("{} advanced by {dt}", self.simulation.name());
        Some(dt)
    }

    pub fn pause(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Paused;
        }
    }

    /// Continue from the paused state; the paused interval is not integrated
    pub fn resume(&mut self) {
        if self.state == DriverState::Paused {
            self.clock.reset();
            self.state = DriverState::Running;
        }
    }

    /// Unsubscribe from the host loop for good
    pub fn stop(&mut self) {
        if self.state != DriverState::Stopped {
            debug!("Stopping {} after {} frames", self.simulation.name(), self.frames);
            self.state = DriverState::Stopped;
        }
    }

    /// Apply a parameter change between frames, then reset if it was taken
    pub fn apply(&mut self, update: S::Update) -> bool {
        let accepted = self.simulation.apply(update);
        if accepted {
            self.reset();
        }
        accepted
    }

    pub fn reset(&mut self) {
        self.simulation.reset();
        self.clock = FrameClock::new(self.simulation.max_dt());
    }

    pub fn set_integrator(&mut self, integrator: Box<dyn Integrator>) {
        debug!(
            "{} switching integrator to {}",
            self.simulation.name(),
            integrator.name()
        );
        self.integrator = integrator;
        self.reset();
    }

    pub fn snapshot(&self) -> S::Snapshot {
        self.simulation.snapshot()
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Frames stepped since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
