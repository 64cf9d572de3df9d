//! One-dimensional potentials, their turning points, and a ball rolling in them

use crate::physics::math::{Scalar, linspace};
use serde::{Deserialize, Serialize};

/// Samples used to scan for turning points
pub const LANDSCAPE_SAMPLES: usize = 700;

pub const LANDSCAPE_X_MIN: Scalar = -4.0;
pub const LANDSCAPE_X_MAX: Scalar = 4.0;

/// Turning points closer than this are the same root found twice
const ROOT_MERGE_DISTANCE: Scalar = 1e-2;

/// Visual slowdown applied to the physical speed
pub const SPEED_SCALE: Scalar = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Potential {
    /// `½·k·x²`
    Harmonic { stiffness: Scalar },
    /// `a·(x² − b²)²`
    DoubleWell { depth: Scalar, width: Scalar },
}

impl Potential {
    pub const fn harmonic() -> Self {
        Potential::Harmonic { stiffness: 1.0 }
    }

    pub const fn double_well() -> Self {
        Potential::DoubleWell {
            depth: 0.15,
            width: 2.0,
        }
    }

    pub fn value(&self, x: Scalar) -> Scalar {
        match *self {
            Potential::Harmonic { stiffness } => 0.5 * stiffness * x * x,
            Potential::DoubleWell { depth, width } => {
                let u = x * x - width * width;
                depth * u * u
            }
        }
    }
}

impl Default for Potential {
    fn default() -> Self {
        Self::harmonic()
    }
}

/// Potential choice as it appears in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialKind {
    #[default]
    Harmonic,
    DoubleWell,
}

impl PotentialKind {
    pub fn potential(&self) -> Potential {
        match self {
            PotentialKind::Harmonic => Potential::harmonic(),
            PotentialKind::DoubleWell => Potential::double_well(),
        }
    }
}

/// A potential tabulated on a fixed grid
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPotential {
    pub potential: Potential,
    pub xs: Vec<Scalar>,
    pub values: Vec<Scalar>,
}

impl SampledPotential {
    pub fn new(potential: Potential) -> Self {
        let xs = linspace(LANDSCAPE_X_MIN, LANDSCAPE_X_MAX, LANDSCAPE_SAMPLES);
        let values = xs.iter().map(|x| potential.value(*x)).collect();
        Self {
            potential,
            xs,
            values,
        }
    }

    /// Sorted roots of `V(x) = E`, by sign change and linear interpolation
    pub fn turning_points(&self, energy: Scalar) -> Vec<Scalar> {
        let mut roots = Vec::new();
        for i in 0..self.xs.len().saturating_sub(1) {
            let f0 = self.values[i] - energy;
            let f1 = self.values[i + 1] - energy;
            if f0 == 0.0 {
                roots.push(self.xs[i]);
            }
            if f0 * f1 < 0.0 {
                let t = f0 / (f0 - f1);
                roots.push(self.xs[i] + t * (self.xs[i + 1] - self.xs[i]));
            }
        }
        roots.sort_by(Scalar::total_cmp);
        roots.dedup_by(|later, kept| (*later - *kept).abs() <= ROOT_MERGE_DISTANCE);
        roots
    }

    /// Classically allowed interval containing the ball.
    ///
    /// Uses the first two turning points; without two of them, falls back to
    /// the first run of samples with `V ≤ E`, or the whole grid.
    pub fn allowed_interval(&self, energy: Scalar) -> (Scalar, Scalar) {
        let roots = self.turning_points(energy);
        if roots.len() >= 2 {
            return (roots[0], roots[1]);
        }

        let mut left = LANDSCAPE_X_MIN;
        let mut right = LANDSCAPE_X_MAX;
        let mut found = false;
        for (x, v) in self.xs.iter().zip(&self.values) {
            if !found && *v <= energy {
                left = *x;
                found = true;
            }
            if found && *v > energy {
                right = *x;
                break;
            }
        }
        (left, right)
    }

    /// Grid point with the lowest potential inside `[left, right]`
    pub fn minimum_within(&self, left: Scalar, right: Scalar) -> Option<Scalar> {
        self.xs
            .iter()
            .zip(&self.values)
            .filter(|(x, _)| (left..=right).contains(*x))
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(x, _)| *x)
    }
}

/// Ball sliding along a potential at fixed total energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingBall {
    pub x: Scalar,
    /// `+1` moving right, `−1` moving left
    pub direction: Scalar,
    pub left: Scalar,
    pub right: Scalar,
}

impl RollingBall {
    /// Place the ball at rest position `start` clamped into the allowed interval
    pub fn new(start: Scalar, left: Scalar, right: Scalar) -> Self {
        Self {
            x: start.clamp(left.min(right), right.max(left)),
            direction: 1.0,
            left,
            right,
        }
    }

    /// `√(2(E − V)/m)`, zero outside the allowed region
    pub fn speed(potential: &Potential, energy: Scalar, mass: Scalar, x: Scalar) -> Scalar {
        let v2 = (2.0 / mass) * (energy - potential.value(x));
        libm::sqrt(v2.max(0.0))
    }

    /// Move one frame; mirror and flip direction past a turning point
    pub fn step(&mut self, potential: &Potential, energy: Scalar, mass: Scalar, dt: Scalar) {
        let v = Self::speed(potential, energy, mass, self.x);
        let mut next = self.x + self.direction * v * SPEED_SCALE * dt;

        if next > self.right {
            next = self.right - (next - self.right);
            self.direction = -self.direction;
        } else if next < self.left {
            next = self.left + (self.left - next);
            self.direction = -self.direction;
        }

        self.x = next.clamp(self.left.min(self.right), self.right.max(self.left));
    }
}
