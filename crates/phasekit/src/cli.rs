//! Command line interface for phasekit

use clap::Parser;
use std::fmt;

use crate::config::SimulationConfig;
use crate::physics::fields::FieldMode;
use crate::physics::integrators::IntegratorRegistry;
use crate::simulations::WidgetKind;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
    /// A numeric override is outside what the host accepts
    InvalidValue(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
            CliError::InvalidValue(msg) => write!(f, "Invalid value: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// phasekit - headless host for the phase-space teaching widgets
#[derive(Parser, Debug)]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Mount only this widget (all widgets by default)
    #[arg(short, long, value_enum)]
    pub widget: Option<WidgetKind>,

    /// Vector field for the phase particle (overrides config file)
    #[arg(short, long, value_enum)]
    pub field: Option<FieldMode>,

    /// Integrator type (e.g., midpoint, rk4, symplectic_euler)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Number of frames to run before printing snapshots
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub frames: Option<u32>,

    /// Simulated display refresh rate
    #[arg(long, value_name = "HZ")]
    pub fps: Option<f64>,

    /// Random seed for random initial conditions
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,
}

/// Handles the --list-integrators flag by printing available integrators and exiting
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new().with_standard_integrators();
    println!("Available integrators:");
    for name in registry.list_available() {
        if let Ok(integrator) = registry.create(&name) {
            println!("  - {name} (order {})", integrator.convergence_order());
        }
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        if !std::path::Path::new(config_path).exists() {
            return Err(CliError::ConfigLoad(format!("{config_path} does not exist")));
        }
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(field) = args.field {
        println!("Using field: {field}");
        config.phase.field = field;
    }

    if let Some(integrator_type) = &args.integrator {
        // Validate integrator name against registry
        let registry = IntegratorRegistry::new().with_standard_integrators();
        let integrator = registry
            .create(integrator_type)
            .map_err(CliError::InvalidIntegrator)?;

        println!("Using integrator: {}", integrator.name());
        config.driver.integrator = integrator.name().to_string();
    }

    if let Some(frames) = args.frames {
        if frames == 0 {
            return Err(CliError::InvalidValue("frame count must be positive".to_string()));
        }
        config.driver.frames = frames;
    }

    if let Some(fps) = args.fps {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(CliError::InvalidValue(format!("fps must be positive, got {fps}")));
        }
        config.driver.fps = fps;
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.driver.seed = Some(seed);
        config.phase.randomize_initial = true;
    }

    if args.paused {
        config.driver.start_paused = true;
    }

    for field in config.clamp_all() {
        println!("Clamped {field} into its allowed range");
    }

    Ok(config)
}
