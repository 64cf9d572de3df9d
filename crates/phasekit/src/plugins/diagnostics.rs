//! Simulation diagnostics module.
//!
//! Publishes the conserved quantities each widget reports through Bevy's
//! diagnostic store:
//!
//! - **Phase particle energy** relative error against the initial energy
//! - **Dissipated energy** share lost by the damped comparison particle
//! - **Liouville blob area** as a ratio of the initial area
//! - **Orbit radius** of the Kepler widget
//! - **Advection mass** ratio of the coffee widget
//!
//! Measurements are taken on a fixed interval while the host is running.
//!
//! ```rust,ignore
//! app.add_plugins(SimulationDiagnosticsPlugin::default());
//! ```

use crate::components::WidgetDriver;
use crate::simulations::Snapshot;
use crate::states::AppState;
use bevy::diagnostic::DEFAULT_MAX_HISTORY_LENGTH;
use bevy::diagnostic::Diagnostic;
use bevy::diagnostic::DiagnosticPath;
use bevy::diagnostic::Diagnostics;
use bevy::diagnostic::RegisterDiagnostic;
use bevy::prelude::*;
use core::time::Duration;

#[derive(Resource)]
pub struct SimulationDiagnosticsState {
    update_timer: Timer,
}

pub struct SimulationDiagnosticsPlugin {
    max_history_length: usize,
    smoothing_factor: f64,
    update_interval: Duration,
}

impl Default for SimulationDiagnosticsPlugin {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            smoothing_factor: 0.0,
            update_interval: Duration::from_secs_f64(1_f64 / 60_f64),
        }
    }
}

impl SimulationDiagnosticsPlugin {
    pub const ENERGY_DRIFT_PATH: DiagnosticPath = DiagnosticPath::const_new("phase/energy_drift");
    pub const DISSIPATED_ENERGY_PATH: DiagnosticPath =
        DiagnosticPath::const_new("comparison/dissipated");
    pub const AREA_RATIO_PATH: DiagnosticPath = DiagnosticPath::const_new("liouville/area_ratio");
    pub const ORBIT_RADIUS_PATH: DiagnosticPath = DiagnosticPath::const_new("orbit/radius");
    pub const ADVECTION_MASS_PATH: DiagnosticPath = DiagnosticPath::const_new("advection/mass_ratio");

    const DIAGNOSTIC_PATHS: &'static [DiagnosticPath] = &[
        Self::ENERGY_DRIFT_PATH,
        Self::DISSIPATED_ENERGY_PATH,
        Self::AREA_RATIO_PATH,
        Self::ORBIT_RADIUS_PATH,
        Self::ADVECTION_MASS_PATH,
    ];

    fn register_diagnostics(&self, app: &mut App) {
        for path in Self::DIAGNOSTIC_PATHS {
            app.register_diagnostic(
                Diagnostic::new(path.clone())
                    .with_max_history_length(self.max_history_length)
                    .with_smoothing_factor(self.smoothing_factor),
            );
        }
    }

    fn update_timer_ticks(mut state: ResMut<SimulationDiagnosticsState>, time: Res<Time>) {
        state.update_timer.tick(time.delta());
    }

    fn update_widget_diagnostics(
        drivers: Query<&WidgetDriver>,
        mut diagnostics: Diagnostics,
        state: Res<SimulationDiagnosticsState>,
    ) {
        if !state.update_timer.finished() {
            return;
        }

        for driver in &drivers {
            match driver.0.snapshot() {
                Snapshot::PhaseParticle(s) => {
                    diagnostics.add_measurement(&Self::ENERGY_DRIFT_PATH, || s.energy.relative_error);
                    if s.energy.is_drifting() {
                        debug!("{} energy drifted by {:.3}", s.mode, s.energy.relative_error);
                    }
                }
                Snapshot::Comparison(s) => {
                    diagnostics.add_measurement(&Self::DISSIPATED_ENERGY_PATH, || s.dissipated);
                }
                Snapshot::Liouville(s) => {
                    diagnostics.add_measurement(&Self::AREA_RATIO_PATH, || s.area.ratio);
                }
                Snapshot::Orbit(s) => {
                    diagnostics.add_measurement(&Self::ORBIT_RADIUS_PATH, || s.orbit.radius);
                }
                Snapshot::Coffee(s) => {
                    diagnostics.add_measurement(&Self::ADVECTION_MASS_PATH, || s.mass.ratio);
                }
                Snapshot::Landscape(_) => {}
            }
        }
    }
}

impl Plugin for SimulationDiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationDiagnosticsState {
            update_timer: Timer::new(self.update_interval, TimerMode::Repeating),
        });

        self.register_diagnostics(app);

        app.add_systems(
            PostUpdate,
            (Self::update_timer_ticks, Self::update_widget_diagnostics)
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::test_utils::{create_test_app, run_frames};
    use bevy::diagnostic::DiagnosticsStore;

    #[test]
    fn test_measurements_are_recorded() {
        let mut app = create_test_app(SimulationConfig::default());
        app.add_plugins(SimulationDiagnosticsPlugin::default());
        run_frames(&mut app, 20);

        let store = app.world().resource::<DiagnosticsStore>();
        for path in SimulationDiagnosticsPlugin::DIAGNOSTIC_PATHS {
            let diagnostic = store.get(path).unwrap();
            assert!(diagnostic.measurement().is_some(), "{path} has no measurement");
        }

        let area = store
            .get_measurement(&SimulationDiagnosticsPlugin::AREA_RATIO_PATH)
            .unwrap();
        assert!((area.value - 1.0).abs() < 0.05);
    }
}
