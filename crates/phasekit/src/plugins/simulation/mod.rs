//! Simulation plugin - Self-contained plugin pattern
//!
//! Mounts one entity per teaching widget, each carrying an
//! [`AnimationDriver`] that owns its simulation. Commands are handled in
//! `Update` before the tick system so parameter changes always land between
//! frames, and `AppState` transitions pause or resume every driver.

use crate::prelude::*;
use crate::resources::{CurrentIntegrator, MountedWidgets};

mod actions;
mod widgets;

use crate::physics::integrators::ExplicitMidpoint;
use actions::{
    handle_apply_parameters_event, handle_restart_simulation_event, handle_set_integrator_event,
    handle_stop_simulation_event, handle_toggle_pause_simulation_event,
};
use widgets::{pause_drivers, resume_drivers, spawn_widgets, stop_removed_driver, tick_drivers};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Tick,
}

pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
    widgets: Option<Vec<WidgetKind>>,
}

impl SimulationPlugin {
    pub fn new() -> Self {
        Self {
            config: None,
            widgets: None,
        }
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
            widgets: None,
        }
    }

    /// Mount only `widgets` instead of every kind
    pub fn with_widgets(mut self, widgets: Vec<WidgetKind>) -> Self {
        self.widgets = Some(widgets);
        self
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let registry = IntegratorRegistry::default();
        let integrator = match registry.create(&config.driver.integrator) {
            Ok(integrator) => integrator,
            Err(e) => {
                warn!(
                    "Failed to create integrator '{}': {}. Falling back to midpoint",
                    config.driver.integrator, e
                );
                Box::new(ExplicitMidpoint)
            }
        };
        info!("Integrating with {}", integrator.name());

        app.insert_resource(SharedRng::from_optional_seed(config.driver.seed));
        app.insert_resource(CurrentIntegrator(integrator));
        app.insert_resource(registry);
        app.insert_resource(
            self.widgets
                .clone()
                .map(MountedWidgets)
                .unwrap_or_default(),
        );

        if config.driver.start_paused {
            app.insert_state(AppState::Paused);
        } else {
            app.init_state::<AppState>();
        }
        app.insert_resource(config);

        app.add_event::<SimulationCommand>();

        app.configure_sets(Update, (SimulationSet::Commands, SimulationSet::Tick).chain());

        app.add_systems(Startup, spawn_widgets);
        app.add_systems(
            Update,
            (
                (
                    handle_restart_simulation_event,
                    handle_toggle_pause_simulation_event,
                    handle_apply_parameters_event,
                    handle_set_integrator_event,
                    handle_stop_simulation_event,
                )
                    .chain()
                    .in_set(SimulationSet::Commands),
                tick_drivers
                    .in_set(SimulationSet::Tick)
                    .run_if(in_state(AppState::Running)),
            ),
        );
        app.add_systems(OnEnter(AppState::Paused), pause_drivers);
        app.add_systems(OnEnter(AppState::Running), resume_drivers);
        app.add_observer(stop_removed_driver);
    }
}
