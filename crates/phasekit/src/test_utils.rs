//! Test utilities for plugin testing

use crate::plugins::simulation::SimulationPlugin;
use crate::prelude::*;
use bevy::time::TimeUpdateStrategy;
use core::time::Duration;

/// Frame duration the test host advances by on every update
pub const TEST_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Creates a headless app hosting every widget, with time advancing by a
/// fixed frame duration per update
pub fn create_test_app(config: SimulationConfig) -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        bevy::state::app::StatesPlugin,
        bevy::diagnostic::DiagnosticsPlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_FRAME));
    app.add_plugins(SimulationPlugin::with_config(config));

    app
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Snapshot of the first mounted widget of `kind`
pub fn snapshot_of(app: &mut App, kind: WidgetKind) -> Snapshot {
    let mut query = app.world_mut().query::<(&WidgetTag, &WidgetDriver)>();
    query
        .iter(app.world())
        .find(|(tag, _)| tag.0 == kind)
        .map(|(_, driver)| driver.0.snapshot())
        .unwrap_or_else(|| panic!("no {kind:?} widget mounted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_app() {
        let mut app = create_test_app(SimulationConfig::default());
        app.update();
        assert!(app.world().contains_resource::<Time>());
        assert!(app.world().contains_resource::<SharedRng>());
        assert!(app.world().contains_resource::<State<AppState>>());
    }

    #[test]
    fn test_time_advances_by_fixed_frame() {
        let mut app = create_test_app(SimulationConfig::default());
        run_frames(&mut app, 3);
        let elapsed = app.world().resource::<Time>().elapsed();
        assert!(elapsed >= TEST_FRAME * 2);
        assert!(elapsed <= TEST_FRAME * 3);
    }
}
