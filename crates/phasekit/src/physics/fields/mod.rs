//! Vector fields: the right-hand sides the integrators advance
//!
//! Every field is a pure function of the phase state and the parameters it
//! was built from. Widgets never pass closures around; they hold a
//! [`FieldKind`], built explicitly from a [`FieldMode`] and the current
//! [`FieldParameters`], and rebuild it (resetting state) whenever either
//! changes.

use crate::physics::math::{PhaseState, Scalar};
use phasekit_macros::ConfigDefaults;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod double_well;
pub mod harmonic;
pub mod kepler;
pub mod projection;
pub mod van_der_pol;

pub use double_well::DoubleWell;
pub use harmonic::{DampedOscillator, HarmonicOscillator};
pub use kepler::KeplerMotion;
pub use projection::{Projected, Projection};
pub use van_der_pol::VanDerPol;

/// A time-independent vector field on 2-D phase space
pub trait VectorField: Send + Sync {
    /// Time derivative `(dq/dt, dp/dt)` at `state`
    fn derivative(&self, state: PhaseState) -> PhaseState;

    /// Energy function associated with the system.
    ///
    /// Conserved by the exact flow of Hamiltonian fields; for dissipative or
    /// driven fields it is the oscillator energy the widgets display.
    fn hamiltonian(&self, state: PhaseState) -> Scalar;
}

impl<F: VectorField + ?Sized> VectorField for &F {
    fn derivative(&self, state: PhaseState) -> PhaseState {
        (**self).derivative(state)
    }

    fn hamiltonian(&self, state: PhaseState) -> Scalar {
        (**self).hamiltonian(state)
    }
}

/// Which physical system a widget is simulating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    Harmonic,
    Damped,
    DoubleWell,
    VanDerPol,
    Kepler,
}

impl FieldMode {
    pub const ALL: [FieldMode; 5] = [
        FieldMode::Harmonic,
        FieldMode::Damped,
        FieldMode::DoubleWell,
        FieldMode::VanDerPol,
        FieldMode::Kepler,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldMode::Harmonic => "harmonic",
            FieldMode::Damped => "damped",
            FieldMode::DoubleWell => "double_well",
            FieldMode::VanDerPol => "van_der_pol",
            FieldMode::Kepler => "kepler",
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named physical constants bound to the UI sliders.
///
/// Ranges mirror the slider limits; values loaded from configuration are
/// clamped into them.
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FieldParameters {
    #[param(default = 1.0, range = 0.5..=2.5)]
    pub mass: Scalar,

    #[param(default = 1.0, range = 0.5..=2.5)]
    pub stiffness: Scalar,

    #[param(default = 0.35, range = 0.0..=1.2)]
    pub damping: Scalar,

    #[param(default = 2.0, range = 0.0..=5.0)]
    pub van_der_pol_mu: Scalar,

    #[param(default = 1.0, range = 0.1..=5.0)]
    pub gravitational_parameter: Scalar,

    #[param(default = 1.0, range = 0.5..=3.0)]
    pub semi_major_axis: Scalar,

    #[param(default = 0.55, range = 0.0..=0.85)]
    pub eccentricity: Scalar,

    #[param(default = 0.9, range = 0.0..=2.0)]
    pub advection_speed: Scalar,

    #[param(default = false)]
    pub diffusion: bool,
}

/// Tagged union over every supported field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Harmonic(HarmonicOscillator),
    Damped(DampedOscillator),
    DoubleWell(DoubleWell),
    VanDerPol(VanDerPol),
    Kepler(KeplerMotion),
}

impl FieldKind {
    /// Build the field for `mode` from the current parameter set
    pub fn new(mode: FieldMode, parameters: &FieldParameters) -> Self {
        match mode {
            FieldMode::Harmonic => FieldKind::Harmonic(HarmonicOscillator::new(
                parameters.mass,
                parameters.stiffness,
            )),
            FieldMode::Damped => FieldKind::Damped(DampedOscillator::new(
                parameters.mass,
                parameters.stiffness,
                parameters.damping,
            )),
            FieldMode::DoubleWell => FieldKind::DoubleWell(DoubleWell),
            FieldMode::VanDerPol => FieldKind::VanDerPol(VanDerPol::new(parameters.van_der_pol_mu)),
            FieldMode::Kepler => FieldKind::Kepler(KeplerMotion::new(
                parameters.gravitational_parameter,
                parameters.semi_major_axis,
            )),
        }
    }

    pub fn mode(&self) -> FieldMode {
        match self {
            FieldKind::Harmonic(_) => FieldMode::Harmonic,
            FieldKind::Damped(_) => FieldMode::Damped,
            FieldKind::DoubleWell(_) => FieldMode::DoubleWell,
            FieldKind::VanDerPol(_) => FieldMode::VanDerPol,
            FieldKind::Kepler(_) => FieldMode::Kepler,
        }
    }

    fn as_field(&self) -> &dyn VectorField {
        match self {
            FieldKind::Harmonic(field) => field,
            FieldKind::Damped(field) => field,
            FieldKind::DoubleWell(field) => field,
            FieldKind::VanDerPol(field) => field,
            FieldKind::Kepler(field) => field,
        }
    }
}

impl VectorField for FieldKind {
    #[inline]
    fn derivative(&self, state: PhaseState) -> PhaseState {
        self.as_field().derivative(state)
    }

    #[inline]
    fn hamiltonian(&self, state: PhaseState) -> Scalar {
        self.as_field().hamiltonian(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_follows_mode() {
        let parameters = FieldParameters::default();
        for mode in FieldMode::ALL {
            assert_eq!(FieldKind::new(mode, &parameters).mode(), mode);
        }
    }

    #[test]
    fn test_field_kind_dispatches_to_variant() {
        let parameters = FieldParameters {
            mass: 2.0,
            stiffness: 0.5,
            ..Default::default()
        };
        let field = FieldKind::new(FieldMode::Harmonic, &parameters);
        let derivative = field.derivative(PhaseState::new(1.0, 4.0));

        assert_eq!(derivative, PhaseState::new(2.0, -0.5));
    }

    #[test]
    fn test_derivative_is_pure() {
        let field = FieldKind::new(FieldMode::Damped, &FieldParameters::default());
        let state = PhaseState::new(0.7, -1.3);
        assert_eq!(field.derivative(state), field.derivative(state));
    }

    #[test]
    fn test_parameters_clamped_to_slider_ranges() {
        let mut parameters = FieldParameters {
            eccentricity: 1.4,
            damping: -0.2,
            ..Default::default()
        };

        let adjusted = parameters.clamp_to_ranges();

        assert_eq!(adjusted, vec!["damping", "eccentricity"]);
        assert_eq!(parameters.eccentricity, 0.85);
        assert_eq!(parameters.damping, 0.0);
    }

    #[test]
    fn test_mode_names_round_trip_through_serde() {
        for mode in FieldMode::ALL {
            let encoded = toml::to_string(&ModeHolder { mode }).unwrap();
            assert!(encoded.contains(mode.name()));
            let decoded: ModeHolder = toml::from_str(&encoded).unwrap();
            assert_eq!(decoded.mode, mode);
        }
    }

    #[derive(Serialize, Deserialize)]
    struct ModeHolder {
        mode: FieldMode,
    }
}
