//! Action handlers for simulation commands
//!
//! Each handler reads the shared `SimulationCommand` stream and reacts only to
//! its own variant.

use super::widgets::mount_widgets;
use crate::prelude::*;
use crate::resources::{CurrentIntegrator, MountedWidgets};

/// Unmount every widget and mount fresh ones from configuration
#[allow(clippy::too_many_arguments)]
pub fn handle_restart_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut commands: Commands,
    widgets: Query<Entity, With<WidgetDriver>>,
    mut rng: ResMut<SharedRng>,
    config: Res<SimulationConfig>,
    integrator: Res<CurrentIntegrator>,
    mounted: Res<MountedWidgets>,
    state: Res<State<AppState>>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::Restart) {
            continue;
        }
        info!("Restarting {} widgets", widgets.iter().count());

        widgets.iter().for_each(|entity| {
            commands.entity(entity).despawn();
        });

        mount_widgets(
            &mut commands,
            &mut rng,
            &config,
            &integrator,
            &mounted,
            *state.get() == AppState::Paused,
        );
    }
}

pub fn handle_toggle_pause_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    current_state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::TogglePause) {
            continue;
        }
        match current_state.get() {
            AppState::Running => next_state.set(AppState::Paused),
            AppState::Paused => next_state.set(AppState::Running),
        }
    }
}

pub fn handle_apply_parameters_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut drivers: Query<(&WidgetTag, &mut WidgetDriver)>,
) {
    for command in commands_reader.read() {
        let SimulationCommand::Apply { widget, update } = command else {
            continue;
        };
        for (tag, mut driver) in &mut drivers {
            if tag.0 == *widget && driver.0.apply(update.clone()) {
                debug!("Applied {:?} to {}", update, driver.0.simulation());
            }
        }
    }
}

pub fn handle_set_integrator_event(
    mut commands_reader: EventReader<SimulationCommand>,
    registry: Res<IntegratorRegistry>,
    mut current: ResMut<CurrentIntegrator>,
    mut drivers: Query<&mut WidgetDriver>,
) {
    for command in commands_reader.read() {
        let SimulationCommand::SetIntegrator(name) = command else {
            continue;
        };
        match registry.create(name) {
            Ok(integrator) => {
                info!("Switching integrator to {}", integrator.name());
                for mut driver in &mut drivers {
                    driver.0.set_integrator(integrator.clone());
                }
                current.0 = integrator;
            }
            Err(e) => warn!("Ignoring integrator change: {}", e),
        }
    }
}

/// Stop and unmount every widget
pub fn handle_stop_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut commands: Commands,
    mut drivers: Query<(Entity, &mut WidgetDriver)>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::Stop) {
            continue;
        }
        for (entity, mut driver) in &mut drivers {
            driver.0.stop();
            commands.entity(entity).despawn();
        }
    }
}
