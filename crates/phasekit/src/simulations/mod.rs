//! The teaching widgets: state-owning simulations stepped by an [`AnimationDriver`]
//!
//! [`AnimationDriver`]: crate::animation::AnimationDriver

use crate::animation::Simulation;
use crate::config::SimulationConfig;
use crate::physics::advection::VelocityProfile;
use crate::physics::fields::{FieldMode, FieldParameters, Projection};
use crate::physics::integrators::Integrator;
use crate::physics::landscape::PotentialKind;
use crate::physics::math::{PhaseState, Scalar};
use crate::resources::SharedRng;
use serde::{Deserialize, Serialize};
use std::fmt;

mod coffee;
mod comparison;
mod landscape;
mod liouville;
mod orbit;
mod phase_particle;

pub use coffee::{AdvectionSnapshot, CoffeeAdvection};
pub use comparison::{ComparisonSnapshot, DissipationComparison};
pub use landscape::{EnergyLandscape, LandscapeSnapshot};
pub use liouville::{BlobSnapshot, LiouvilleBlob};
pub use orbit::{KeplerOrbit, OrbitSnapshot};
pub use phase_particle::{PhaseParticle, PhaseSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    PhaseParticle,
    Comparison,
    Liouville,
    Orbit,
    Coffee,
    Landscape,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::PhaseParticle,
        WidgetKind::Comparison,
        WidgetKind::Liouville,
        WidgetKind::Orbit,
        WidgetKind::Coffee,
        WidgetKind::Landscape,
    ];
}

/// A slider or selector change, applied between frames.
///
/// Widgets ignore updates that do not concern them.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterUpdate {
    Fields(FieldParameters),
    FieldMode(FieldMode),
    Projection(Projection),
    /// The widget's own speed slider
    Speed(Scalar),
    /// Particle start or blob center
    InitialState(PhaseState),
    BlobRadius(Scalar),
    Profile(VelocityProfile),
    Diffusion(bool),
    Potential(PotentialKind),
    Energy(Scalar),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    PhaseParticle(PhaseSnapshot),
    Comparison(ComparisonSnapshot),
    Liouville(BlobSnapshot),
    Orbit(OrbitSnapshot),
    Coffee(AdvectionSnapshot),
    Landscape(LandscapeSnapshot),
}

/// Any widget, dispatched statically
pub enum Widget {
    PhaseParticle(PhaseParticle),
    Comparison(DissipationComparison),
    Liouville(LiouvilleBlob),
    Orbit(KeplerOrbit),
    Coffee(CoffeeAdvection),
    Landscape(EnergyLandscape),
}

impl Widget {
    /// Build the widget of `kind` from configuration.
    ///
    /// Only the phase particle draws on `rng`, and only when its configuration
    /// asks for a random initial state.
    pub fn from_config(kind: WidgetKind, config: &SimulationConfig, rng: &mut SharedRng) -> Self {
        let fields = config.fields.clone();
        match kind {
            WidgetKind::PhaseParticle => {
                let phase = config.phase.clone();
                let particle = if phase.randomize_initial {
                    let domain = crate::physics::boundary::Domain::square(phase.domain);
                    let initial = rng.initial_state(&domain);
                    PhaseParticle::new(phase, fields, initial)
                } else {
                    PhaseParticle::from_config(phase, fields)
                };
                Widget::PhaseParticle(particle)
            }
            WidgetKind::Comparison => {
                Widget::Comparison(DissipationComparison::new(config.comparison.clone(), fields))
            }
            WidgetKind::Liouville => Widget::Liouville(LiouvilleBlob::new(config.liouville.clone())),
            WidgetKind::Orbit => Widget::Orbit(KeplerOrbit::new(config.orbit.clone(), fields)),
            WidgetKind::Coffee => Widget::Coffee(CoffeeAdvection::new(config.coffee.clone(), fields)),
            WidgetKind::Landscape => {
                Widget::Landscape(EnergyLandscape::new(config.landscape.clone()))
            }
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::PhaseParticle(_) => WidgetKind::PhaseParticle,
            Widget::Comparison(_) => WidgetKind::Comparison,
            Widget::Liouville(_) => WidgetKind::Liouville,
            Widget::Orbit(_) => WidgetKind::Orbit,
            Widget::Coffee(_) => WidgetKind::Coffee,
            Widget::Landscape(_) => WidgetKind::Landscape,
        }
    }
}

macro_rules! dispatch {
    ($widget:expr, $inner:ident => $body:expr) => {
        match $widget {
            Widget::PhaseParticle($inner) => $body,
            Widget::Comparison($inner) => $body,
            Widget::Liouville($inner) => $body,
            Widget::Orbit($inner) => $body,
            Widget::Coffee($inner) => $body,
            Widget::Landscape($inner) => $body,
        }
    };
}

impl Simulation for Widget {
    type Snapshot = Snapshot;
    type Update = ParameterUpdate;

    fn name(&self) -> &'static str {
        dispatch!(self, widget => widget.name())
    }

    fn max_dt(&self) -> Scalar {
        dispatch!(self, widget => widget.max_dt())
    }

    fn advance(&mut self, dt: Scalar, integrator: &dyn Integrator) {
        dispatch!(self, widget => widget.advance(dt, integrator))
    }

    fn reset(&mut self) {
        dispatch!(self, widget => widget.reset())
    }

    fn snapshot(&self) -> Snapshot {
        match self {
            Widget::PhaseParticle(widget) => Snapshot::PhaseParticle(widget.snapshot()),
            Widget::Comparison(widget) => Snapshot::Comparison(widget.snapshot()),
            Widget::Liouville(widget) => Snapshot::Liouville(widget.snapshot()),
            Widget::Orbit(widget) => Snapshot::Orbit(widget.snapshot()),
            Widget::Coffee(widget) => Snapshot::Coffee(widget.snapshot()),
            Widget::Landscape(widget) => Snapshot::Landscape(widget.snapshot()),
        }
    }

    fn apply(&mut self, update: ParameterUpdate) -> bool {
        dispatch!(self, widget => widget.apply(update))
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::PhaseParticle(s) => write!(
                f,
                "phase_particle [{}] t={:.3} q={:.6} p={:.6} energy={:.6} (drift {:.3}%)",
                s.mode,
                s.time,
                s.state.q,
                s.state.p,
                s.energy.current,
                s.energy.relative_error * 100.0
            ),
            Snapshot::Comparison(s) => write!(
                f,
                "comparison t={:.3} conservative H={:.6} damped H={:.6} (dissipated {:.1}%)",
                s.conservative.time,
                s.conservative.energy.current,
                s.dissipative.energy.current,
                s.dissipated * 100.0
            ),
            Snapshot::Liouville(s) => write!(
                f,
                "liouville t={:.3} vertices={} area={:.6} ratio={:.4} centroid=({:.4}, {:.4})",
                s.time,
                s.vertices.len(),
                s.area.current,
                s.area.ratio,
                s.centroid.q,
                s.centroid.p
            ),
            Snapshot::Orbit(s) => write!(
                f,
                "orbit t={:.3} M={:.4} E={:.4} r={:.4} T={:.4} V={:.4} H={:.6}",
                s.time,
                s.orbit.mean_anomaly,
                s.orbit.eccentric_anomaly,
                s.orbit.radius,
                s.orbit.kinetic,
                s.orbit.potential,
                s.orbit.total
            ),
            Snapshot::Coffee(s) => write!(
                f,
                "coffee [{:?}] steps={} mass={:.6} ratio={:.6} peak={:.4}",
                s.profile, s.steps, s.mass.current, s.mass.ratio, s.peak
            ),
            Snapshot::Landscape(s) => write!(
                f,
                "landscape [{:?}] t={:.3} x={:.4} V={:.4} K={:.4} turning points={:?}",
                s.potential, s.time, s.x, s.potential_energy, s.kinetic_energy, s.turning_points
            ),
        }
    }
}
