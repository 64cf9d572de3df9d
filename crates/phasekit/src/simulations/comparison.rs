use super::phase_particle::{PhaseParticle, PhaseSnapshot};
use crate::animation::Simulation;
use crate::config::{ComparisonConfig, PhaseParticleConfig};
use crate::physics::boundary::BoundaryPolicy;
use crate::physics::fields::{FieldMode, FieldParameters, Projection};
use crate::physics::integrators::Integrator;
use crate::physics::math::{PhaseState, Scalar};
use crate::simulations::ParameterUpdate;
use bevy::log::debug;

/// Two particles released from the same state, one on the undamped
/// oscillator and one on the damped oscillator.
///
/// Both share mass, stiffness and the speed slider; only the damped panel
/// sees the damping coefficient.
pub struct DissipationComparison {
    config: ComparisonConfig,
    conservative: PhaseParticle,
    dissipative: PhaseParticle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSnapshot {
    pub conservative: PhaseSnapshot,
    pub dissipative: PhaseSnapshot,
    /// Share of the starting energy the damped particle has lost
    pub dissipated: Scalar,
}

fn panel(config: &ComparisonConfig, field: FieldMode) -> PhaseParticleConfig {
    PhaseParticleConfig {
        field,
        projection: Projection::Full,
        boundary: BoundaryPolicy::Reflect,
        initial_q: config.initial_q,
        initial_p: config.initial_p,
        randomize_initial: false,
        speed: config.speed,
        max_dt: config.max_dt,
        domain: config.domain,
        trail_capacity: config.trail_capacity,
    }
}

impl DissipationComparison {
    pub fn new(config: ComparisonConfig, parameters: FieldParameters) -> Self {
        let initial = PhaseState::new(config.initial_q, config.initial_p);
        let conservative =
            PhaseParticle::new(panel(&config, FieldMode::Harmonic), parameters.clone(), initial);
        let dissipative = PhaseParticle::new(panel(&config, FieldMode::Damped), parameters, initial);
        Self {
            config,
            conservative,
            dissipative,
        }
    }

    pub fn conservative(&self) -> &PhaseParticle {
        &self.conservative
    }

    pub fn dissipative(&self) -> &PhaseParticle {
        &self.dissipative
    }
}

impl Simulation for DissipationComparison {
    type Snapshot = ComparisonSnapshot;
    type Update = ParameterUpdate;

    fn name(&self) -> &'static str {
        "dissipation_comparison"
    }

    fn max_dt(&self) -> Scalar {
        self.config.max_dt
    }

    fn advance(&mut self, dt: Scalar, integrator: &dyn Integrator) {
        self.conservative.advance(dt, integrator);
        self.dissipative.advance(dt, integrator);
    }

    fn reset(&mut self) {
        self.conservative.reset();
        self.dissipative.reset();
    }

    fn snapshot(&self) -> ComparisonSnapshot {
        let conservative = self.conservative.snapshot();
        let dissipative = self.dissipative.snapshot();
        ComparisonSnapshot {
            dissipated: 1.0 - dissipative.energy.ratio,
            conservative,
            dissipative,
        }
    }

    fn apply(&mut self, update: ParameterUpdate) -> bool {
        match &update {
            ParameterUpdate::Fields(_) | ParameterUpdate::Speed(_) => {}
            ParameterUpdate::InitialState(initial) => {
                self.config.initial_q = initial.q;
                self.config.initial_p = initial.p;
            }
            // Each panel's field is fixed
            other => {
                debug!("Dissipation comparison ignores {other:?}");
                return false;
            }
        }
        self.conservative.apply(update.clone());
        self.dissipative.apply(update);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::integrators::ExplicitMidpoint;

    fn comparison() -> DissipationComparison {
        DissipationComparison::new(ComparisonConfig::default(), FieldParameters::default())
    }

    fn run(comparison: &mut DissipationComparison, frames: usize) {
        for _ in 0..frames {
            comparison.advance(0.016, &ExplicitMidpoint);
        }
    }

    #[test]
    fn test_both_panels_share_the_start() {
        let snapshot = comparison().snapshot();
        let start = PhaseState::new(2.2, 0.0);
        assert_eq!(snapshot.conservative.state, start);
        assert_eq!(snapshot.dissipative.state, start);
        assert_eq!(snapshot.conservative.mode, FieldMode::Harmonic);
        assert_eq!(snapshot.dissipative.mode, FieldMode::Damped);
        assert_eq!(snapshot.conservative.energy.baseline, snapshot.dissipative.energy.baseline);
        assert_eq!(snapshot.dissipated, 0.0);
    }

    #[test]
    fn test_only_the_damped_panel_loses_energy() {
        let mut comparison = comparison();
        run(&mut comparison, 1500);

        let snapshot = comparison.snapshot();
        assert!(!snapshot.conservative.energy.is_drifting());
        assert!(snapshot.dissipative.energy.ratio < 0.5);
        assert!(snapshot.dissipated > 0.5);
        assert_eq!(snapshot.conservative.trail.len(), 240);
        assert_eq!(snapshot.dissipative.trail.len(), 240);
    }

    #[test]
    fn test_zero_damping_keeps_panels_together() {
        let parameters = FieldParameters {
            damping: 0.0,
            ..Default::default()
        };
        let mut comparison = DissipationComparison::new(ComparisonConfig::default(), parameters);
        run(&mut comparison, 200);

        let snapshot = comparison.snapshot();
        assert_eq!(snapshot.conservative.state, snapshot.dissipative.state);
    }

    #[test]
    fn test_initial_state_update_moves_both_panels() {
        let mut comparison = comparison();
        let start = PhaseState::new(-1.0, 0.5);
        assert!(comparison.apply(ParameterUpdate::InitialState(start)));
        comparison.reset();

        assert_eq!(comparison.conservative().state(), start);
        assert_eq!(comparison.dissipative().state(), start);
    }

    #[test]
    fn test_field_mode_update_is_refused() {
        let mut comparison = comparison();
        assert!(!comparison.apply(ParameterUpdate::FieldMode(FieldMode::VanDerPol)));
        assert_eq!(comparison.conservative().field().mode(), FieldMode::Harmonic);
        assert_eq!(comparison.dissipative().field().mode(), FieldMode::Damped);
    }
}
