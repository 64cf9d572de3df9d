use crate::physics::advection::{DEFAULT_RESOLUTION, DEFAULT_TIME_STEP, VelocityProfile};
use crate::physics::boundary::BoundaryPolicy;
use crate::physics::fields::{FieldMode, FieldParameters, Projection};
use crate::physics::landscape::PotentialKind;
use crate::physics::math::Scalar;
use bevy::prelude::*;
use phasekit_macros::ConfigDefaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `PHASEKIT__FIELDS__MASS=2.0`
pub const ENV_PREFIX: &str = "PHASEKIT";

#[derive(Resource, ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    #[param(default = 1)]
    pub version: u32,

    #[param(default = DriverConfig::default())]
    pub driver: DriverConfig,

    #[param(default = FieldParameters::default())]
    pub fields: FieldParameters,

    #[param(default = PhaseParticleConfig::default())]
    pub phase: PhaseParticleConfig,

    #[param(default = ComparisonConfig::default())]
    pub comparison: ComparisonConfig,

    #[param(default = LiouvilleConfig::default())]
    pub liouville: LiouvilleConfig,

    #[param(default = OrbitConfig::default())]
    pub orbit: OrbitConfig,

    #[param(default = CoffeeConfig::default())]
    pub coffee: CoffeeConfig,

    #[param(default = LandscapeConfig::default())]
    pub landscape: LandscapeConfig,
}

/// Host loop and integrator selection
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    #[param(default = "midpoint")]
    pub integrator: String,

    #[param(default = false)]
    pub start_paused: bool,

    /// Frames the headless host runs before exiting
    #[param(default = 600, range = 1..=1_000_000)]
    pub frames: u32,

    /// Simulated display refresh rate
    #[param(default = 60.0, range = 1.0..=240.0)]
    pub fps: Scalar,

    #[param(default = None)]
    pub seed: Option<u64>,
}

/// Flow-field particle panel
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhaseParticleConfig {
    #[param(default = FieldMode::Harmonic)]
    pub field: FieldMode,

    #[param(default = Projection::Full)]
    pub projection: Projection,

    #[param(default = BoundaryPolicy::Reflect)]
    pub boundary: BoundaryPolicy,

    #[param(default = 1.2, range = -3.2..=3.2)]
    pub initial_q: Scalar,

    #[param(default = 1.2, range = -3.2..=3.2)]
    pub initial_p: Scalar,

    /// Draw the initial state from the seeded generator instead
    #[param(default = false)]
    pub randomize_initial: bool,

    #[param(default = 1.0, range = 0.2..=8.0)]
    pub speed: Scalar,

    #[param(default = 0.05, range = 0.001..=0.1)]
    pub max_dt: Scalar,

    #[param(default = 3.2, range = 0.5..=10.0)]
    pub domain: Scalar,

    #[param(default = 240, range = 50..=240)]
    pub trail_capacity: usize,
}

/// Conservative and damped particles side by side from one start
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ComparisonConfig {
    #[param(default = 2.2, range = -3.2..=3.2)]
    pub initial_q: Scalar,

    #[param(default = 0.0, range = -3.2..=3.2)]
    pub initial_p: Scalar,

    #[param(default = 1.2, range = 0.3..=6.0)]
    pub speed: Scalar,

    #[param(default = 0.03, range = 0.001..=0.1)]
    pub max_dt: Scalar,

    #[param(default = 3.2, range = 0.5..=10.0)]
    pub domain: Scalar,

    #[param(default = 240, range = 50..=240)]
    pub trail_capacity: usize,
}

/// Liouville blob panel
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LiouvilleConfig {
    #[param(default = 1.2, range = 0.2..=6.0)]
    pub speed: Scalar,

    #[param(default = 0.45, range = 0.15..=0.75)]
    pub radius: Scalar,

    #[param(default = 1.2, range = -2.0..=2.0)]
    pub center_q: Scalar,

    #[param(default = 0.0, range = -2.0..=2.0)]
    pub center_p: Scalar,

    #[param(default = 90, range = 3..=4096)]
    pub vertices: usize,

    #[param(default = 0.025, range = 0.001..=0.1)]
    pub max_dt: Scalar,

    #[param(default = 3.2, range = 0.5..=10.0)]
    pub domain: Scalar,
}

/// Orbit energy-exchange panel
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    #[param(default = 1.0, range = 0.2..=4.0)]
    pub speed: Scalar,

    #[param(default = 0.03, range = 0.001..=0.1)]
    pub max_dt: Scalar,

    #[param(default = 360, range = 8..=4096)]
    pub outline_samples: usize,
}

/// Coffee advection panel
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CoffeeConfig {
    #[param(default = VelocityProfile::Shear)]
    pub profile: VelocityProfile,

    #[param(default = DEFAULT_RESOLUTION, range = 16..=20_000)]
    pub resolution: usize,

    /// Advection step taken on every non-zero frame
    #[param(default = DEFAULT_TIME_STEP, range = 0.0001..=0.05)]
    pub time_step: Scalar,

    #[param(default = 0.28, range = 0.0..=1.0)]
    pub bump_center: Scalar,

    #[param(default = 0.045, range = 0.005..=0.5)]
    pub bump_width: Scalar,

    #[param(default = 0.05, range = 0.001..=0.1)]
    pub max_dt: Scalar,
}

/// Energy landscape panel
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LandscapeConfig {
    #[param(default = PotentialKind::Harmonic)]
    pub potential: PotentialKind,

    #[param(default = 2.0, range = 0.1..=8.0)]
    pub energy: Scalar,

    #[param(default = 1.0, range = 0.1..=5.0)]
    pub mass: Scalar,

    #[param(default = 0.03, range = 0.001..=0.1)]
    pub max_dt: Scalar,
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        };
        config.enforce_ranges();
        config
    }

    /// Layer the user config file and `PHASEKIT__*` environment variables over defaults
    pub fn load_from_user_config() -> Self {
        let mut builder = config::Config::builder();

        if let Some(path) = Self::user_config_path() {
            debug!("Reading user configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let mut config = match builder
            .build()
            .and_then(|layered| layered.try_deserialize::<Self>())
        {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load user configuration: {}. Using defaults.", e);
                Self::default()
            }
        };
        config.enforce_ranges();
        config
    }

    /// `<config dir>/phasekit/config.toml` for the current platform
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "phasekit", "phasekit")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamp every section to its slider ranges; returns `section.field` names touched
    pub fn clamp_all(&mut self) -> Vec<String> {
        let sections: [(&str, Vec<&'static str>); 9] = [
            ("", self.clamp_to_ranges()),
            ("driver", self.driver.clamp_to_ranges()),
            ("fields", self.fields.clamp_to_ranges()),
            ("phase", self.phase.clamp_to_ranges()),
            ("comparison", self.comparison.clamp_to_ranges()),
            ("liouville", self.liouville.clamp_to_ranges()),
            ("orbit", self.orbit.clamp_to_ranges()),
            ("coffee", self.coffee.clamp_to_ranges()),
            ("landscape", self.landscape.clamp_to_ranges()),
        ];

        sections
            .into_iter()
            .flat_map(|(section, fields)| {
                fields.into_iter().map(move |field| {
                    if section.is_empty() {
                        field.to_string()
                    } else {
                        format!("{section}.{field}")
                    }
                })
            })
            .collect()
    }

    fn enforce_ranges(&mut self) {
        for field in self.clamp_all() {
            warn!("Configuration value {} was out of range and has been clamped", field);
        }
    }
}
