//! 1-D periodic semi-Lagrangian transport of a scalar concentration
//!
//! Each step traces every grid point backward along the velocity profile and
//! linearly interpolates the previous field there. The backward trace runs
//! in grid-index units so a zero velocity lands exactly on the source sample.

use crate::physics::math::{Scalar, TAU, lerp, wrap_period};
use bevy::log::debug;
use serde::{Deserialize, Serialize};

/// Grid resolution used by the coffee widget
pub const DEFAULT_RESOLUTION: usize = 700;

/// Fixed time step taken on every non-zero frame
pub const DEFAULT_TIME_STEP: Scalar = 0.002;

/// Velocity presets over the unit interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityProfile {
    Uniform,
    #[default]
    Shear,
    Sine,
}

impl VelocityProfile {
    /// Velocity at position `x ∈ [0, 1)` before the speed multiplier
    pub fn velocity(&self, x: Scalar) -> Scalar {
        match self {
            VelocityProfile::Uniform => 0.65,
            VelocityProfile::Shear => (2.0 * x - 1.0) * 0.85,
            VelocityProfile::Sine => libm::sin(TAU * x) * 0.85,
        }
    }
}

/// Periodic samples over `[0, 1)`; sample `i` sits at `x = i/N`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    samples: Vec<Scalar>,
}

impl ScalarField {
    pub fn zeros(resolution: usize) -> Self {
        Self {
            samples: vec![0.0; resolution],
        }
    }

    pub fn from_samples(samples: Vec<Scalar>) -> Self {
        Self { samples }
    }

    /// Gaussian bump measured with the periodic distance to `center`
    pub fn gaussian(resolution: usize, center: Scalar, sigma: Scalar) -> Self {
        let two_sigma_sq = 2.0 * sigma * sigma;
        let samples = (0..resolution)
            .map(|i| {
                let x = i as Scalar / resolution as Scalar;
                let d = (x - center).abs();
                let d = d.min(1.0 - d);
                libm::exp(-(d * d) / two_sigma_sq)
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Scalar] {
        &self.samples
    }

    /// Sample with wraparound
    pub fn get(&self, index: isize) -> Scalar {
        let n = self.samples.len() as isize;
        self.samples[index.rem_euclid(n) as usize]
    }

    /// Linear interpolation at fractional grid position `s`, wrapping periodically
    pub fn sample_at_index(&self, s: Scalar) -> Scalar {
        let n = self.samples.len();
        let floor = libm::floor(s);
        let t = s - floor;
        let i0 = (floor as isize).rem_euclid(n as isize) as usize;
        let i1 = (i0 + 1) % n;
        if t == 0.0 {
            self.samples[i0]
        } else {
            lerp(self.samples[i0], self.samples[i1], t)
        }
    }

    /// Riemann sum `Σ c·(1/N)`
    pub fn total_mass(&self) -> Scalar {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<Scalar>() / self.samples.len() as Scalar
    }

    pub fn max(&self) -> Scalar {
        self.samples.iter().copied().fold(Scalar::NEG_INFINITY, Scalar::max)
    }
}

/// Scalar field plus the flow that transports it
#[derive(Debug, Clone, PartialEq)]
pub struct AdvectionField {
    field: ScalarField,
    velocity: Vec<Scalar>,
    scratch: Vec<Scalar>,
    pub profile: VelocityProfile,
    pub speed: Scalar,
    pub diffusion: bool,
}

impl AdvectionField {
    pub fn new(field: ScalarField, profile: VelocityProfile, speed: Scalar, diffusion: bool) -> Self {
        let n = field.len();
        let mut advection = Self {
            field,
            velocity: vec![0.0; n],
            scratch: vec![0.0; n],
            profile,
            speed,
            diffusion,
        };
        advection.sample_velocity();
        advection
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Velocity at each grid point as of the last step
    pub fn velocity(&self) -> &[Scalar] {
        &self.velocity
    }

    pub fn replace_field(&mut self, field: ScalarField) {
        let n = field.len();
        self.field = field;
        self.velocity.resize(n, 0.0);
        self.scratch.resize(n, 0.0);
        self.sample_velocity();
    }

    fn sample_velocity(&mut self) {
        let n = self.velocity.len() as Scalar;
        for (i, v) in self.velocity.iter_mut().enumerate() {
            *v = self.profile.velocity(i as Scalar / n) * self.speed;
        }
    }

    /// One semi-Lagrangian step of size `dt`, then optional smoothing.
    ///
    /// A step that would leave any sample non-finite is dropped and the field
    /// is kept as it was.
    pub fn step(&mut self, dt: Scalar) {
        if self.field.is_empty() {
            return;
        }
        self.sample_velocity();

        let n = self.field.len();
        let n_scalar = n as Scalar;
        for i in 0..n {
            let s = wrap_period(i as Scalar - self.velocity[i] * dt * n_scalar, n_scalar);
            self.scratch[i] = self.field.sample_at_index(s);
        }
        if !self.commit_scratch("transport", dt) {
            return;
        }

        if self.diffusion {
            self.smooth();
        }
    }

    /// Three-point 0.25/0.5/0.25 filter with periodic neighbours
    fn smooth(&mut self) {
        for i in 0..self.field.len() {
            let i = i as isize;
            self.scratch[i as usize] =
                0.25 * self.field.get(i - 1) + 0.5 * self.field.get(i) + 0.25 * self.field.get(i + 1);
        }
        self.commit_scratch("smoothing", 0.0);
    }

    /// Swap `scratch` in as the field if every sample is finite
    fn commit_scratch(&mut self, stage: &str, dt: Scalar) -> bool {
        if !self.scratch.iter().all(|c| c.is_finite()) {
            debug!(
                "Rejected non-finite advection {stage} with speed={} dt={dt}",
                self.speed
            );
            return false;
        }
        std::mem::swap(&mut self.field.samples, &mut self.scratch);
        true
    }
}
