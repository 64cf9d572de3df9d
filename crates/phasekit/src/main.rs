use bevy::diagnostic::DiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use core::time::Duration;
use phasekit::cli::{self, Args};
use phasekit::prelude::*;
use phasekit::{SimulationDiagnosticsPlugin, SimulationPlugin};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_integrators {
        cli::handle_list_integrators();
        return ExitCode::SUCCESS;
    }

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let frames = config.driver.frames;
    let frame_duration = Duration::from_secs_f64(1.0 / config.driver.fps);

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        LogPlugin {
            level: if args.verbose { Level::DEBUG } else { Level::INFO },
            ..default()
        },
        DiagnosticsPlugin,
        SimulationDiagnosticsPlugin::default(),
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(frame_duration));

    let mut simulation = SimulationPlugin::with_config(config);
    if let Some(widget) = args.widget {
        simulation = simulation.with_widgets(vec![widget]);
    }
    app.add_plugins(simulation);

    app.finish();
    app.cleanup();

    for _ in 0..frames {
        app.update();
    }

    let integrator = app.world().resource::<phasekit::resources::CurrentIntegrator>().name();
    println!("Ran {frames} frames of {frame_duration:?} with {integrator}");

    let mut query = app.world_mut().query::<(&WidgetTag, &WidgetDriver)>();
    let mut snapshots: Vec<(WidgetKind, Snapshot)> = query
        .iter(app.world())
        .map(|(tag, driver)| (tag.0, driver.0.snapshot()))
        .collect();
    snapshots.sort_by_key(|(kind, _)| WidgetKind::ALL.iter().position(|k| k == kind));

    for (_, snapshot) in snapshots {
        println!("{snapshot}");
    }

    ExitCode::SUCCESS
}
