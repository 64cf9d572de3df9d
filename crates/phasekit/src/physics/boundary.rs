//! Keeping bounded widgets inside their phase-space window

use crate::physics::math::{PhaseState, Scalar, wrap_period};
use serde::{Deserialize, Serialize};

/// Symmetric rectangular window `[-q_max, q_max] × [-p_max, p_max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub q_max: Scalar,
    pub p_max: Scalar,
}

impl Domain {
    pub const fn new(q_max: Scalar, p_max: Scalar) -> Self {
        Self { q_max, p_max }
    }

    pub const fn square(max: Scalar) -> Self {
        Self::new(max, max)
    }

    pub fn contains(&self, state: PhaseState) -> bool {
        state.q.abs() <= self.q_max && state.p.abs() <= self.p_max
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::square(3.2)
    }
}

/// What happens to a state that leaves its [`Domain`]. Axes are handled independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Mirror the overshoot back inside.
    ///
    /// Momentum is not inverted: this is a positional mirror, not an elastic
    /// collision. A single mirror only lands inside the window when the
    /// overshoot is smaller than one domain width.
    #[default]
    Reflect,
    Clamp,
    /// Periodic: fold back into `[-max, max)`
    Wrap,
    Unbounded,
}

impl BoundaryPolicy {
    pub fn apply(&self, state: PhaseState, domain: &Domain) -> PhaseState {
        PhaseState::new(
            self.apply_axis(state.q, domain.q_max),
            self.apply_axis(state.p, domain.p_max),
        )
    }

    fn apply_axis(&self, x: Scalar, max: Scalar) -> Scalar {
        match self {
            BoundaryPolicy::Reflect => {
                if x > max {
                    max - (x - max)
                } else if x < -max {
                    -max + (-max - x)
                } else {
                    x
                }
            }
            BoundaryPolicy::Clamp => x.clamp(-max, max),
            BoundaryPolicy::Wrap => {
                if (-max..=max).contains(&x) || max <= 0.0 {
                    x
                } else {
                    let width = 2.0 * max;
                    let folded = wrap_period(x + max, width) - max;
                    if folded >= max { -max } else { folded }
                }
            }
            BoundaryPolicy::Unbounded => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BoundaryPolicy; 4] = [
        BoundaryPolicy::Reflect,
        BoundaryPolicy::Clamp,
        BoundaryPolicy::Wrap,
        BoundaryPolicy::Unbounded,
    ];

    #[test]
    fn test_reflect_mirrors_position_only() {
        let domain = Domain::square(3.2);
        let state = PhaseState::new(3.5, 1.0);
        let reflected = BoundaryPolicy::Reflect.apply(state, &domain);

        assert!((reflected.q - 2.9).abs() < 1e-12);
        assert_eq!(reflected.p, 1.0, "momentum must keep its sign");
    }

    #[test]
    fn test_reflect_lower_bound() {
        let domain = Domain::new(1.0, 2.0);
        let reflected = BoundaryPolicy::Reflect.apply(PhaseState::new(0.0, -2.5), &domain);
        assert_eq!(reflected, PhaseState::new(0.0, -1.5));
    }

    #[test]
    fn test_clamp() {
        let domain = Domain::square(1.0);
        let clamped = BoundaryPolicy::Clamp.apply(PhaseState::new(4.0, -4.0), &domain);
        assert_eq!(clamped, PhaseState::new(1.0, -1.0));
    }

    #[test]
    fn test_wrap_is_periodic() {
        let domain = Domain::square(1.0);
        let wrapped = BoundaryPolicy::Wrap.apply(PhaseState::new(1.5, -1.25), &domain);
        assert!((wrapped.q + 0.5).abs() < 1e-12);
        assert!((wrapped.p - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_in_bounds_states_are_untouched() {
        let domain = Domain::new(3.2, 2.0);
        let states = [
            PhaseState::ZERO,
            PhaseState::new(3.2, -2.0),
            PhaseState::new(-3.2, 2.0),
            PhaseState::new(1.1, -0.4),
        ];
        for policy in ALL {
            for state in states {
                assert_eq!(policy.apply(state, &domain), state, "{policy:?}");
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let domain = Domain::square(3.2);
        let states = [
            PhaseState::new(3.9, 0.1),
            PhaseState::new(-4.0, -5.0),
            PhaseState::new(0.2, 6.1),
        ];
        for policy in ALL {
            for state in states {
                let once = policy.apply(state, &domain);
                assert_eq!(policy.apply(once, &domain), once, "{policy:?}");
            }
        }
    }
}
