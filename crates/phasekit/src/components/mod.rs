use crate::animation::AnimationDriver;
use crate::simulations::Widget;
use bevy::prelude::*;

pub mod trail;

pub use trail::Trail;

/// A mounted teaching widget: its driver owns the simulation
#[derive(Component)]
pub struct WidgetDriver(pub AnimationDriver<Widget>);

/// Which widget an entity hosts, for lookups by kind
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetTag(pub crate::simulations::WidgetKind);
