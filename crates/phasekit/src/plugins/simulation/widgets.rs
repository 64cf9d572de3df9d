//! Mounting and stepping the widget entities

use crate::prelude::*;
use crate::resources::{CurrentIntegrator, MountedWidgets};

pub fn spawn_widgets(
    mut commands: Commands,
    mut rng: ResMut<SharedRng>,
    config: Res<SimulationConfig>,
    integrator: Res<CurrentIntegrator>,
    mounted: Res<MountedWidgets>,
    state: Res<State<AppState>>,
) {
    mount_widgets(
        &mut commands,
        &mut rng,
        &config,
        &integrator,
        &mounted,
        *state.get() == AppState::Paused,
    );
}

pub(super) fn mount_widgets(
    commands: &mut Commands,
    rng: &mut SharedRng,
    config: &SimulationConfig,
    integrator: &CurrentIntegrator,
    mounted: &MountedWidgets,
    paused: bool,
) {
    for &kind in mounted.iter() {
        let widget = Widget::from_config(kind, config, rng);
        let mut driver = AnimationDriver::new(widget, integrator.0.clone());
        if paused {
            driver = driver.paused();
        }
        debug!("Mounting {} with {}", driver.simulation(), driver.integrator().name());
        commands.spawn((
            Name::new(driver.simulation().to_string()),
            WidgetTag(kind),
            WidgetDriver(driver),
        ));
    }
}

/// Step every running driver with the host's elapsed time as the frame timestamp
pub fn tick_drivers(time: Res<Time>, mut drivers: Query<&mut WidgetDriver>) {
    let timestamp = time.elapsed_secs_f64();
    for mut driver in &mut drivers {
        driver.0.tick(timestamp);
    }
}

pub fn pause_drivers(mut drivers: Query<&mut WidgetDriver>) {
    for mut driver in &mut drivers {
        driver.0.pause();
    }
}

pub fn resume_drivers(mut drivers: Query<&mut WidgetDriver>) {
    for mut driver in &mut drivers {
        driver.0.resume();
    }
}

/// A despawned widget is stopped before its driver is dropped
pub fn stop_removed_driver(trigger: Trigger<OnRemove, WidgetDriver>, mut drivers: Query<&mut WidgetDriver>) {
    if let Ok(mut driver) = drivers.get_mut(trigger.target()) {
        driver.0.stop();
    }
}
