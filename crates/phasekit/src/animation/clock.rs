use crate::physics::math::Scalar;

/// Turns host timestamps (seconds) into clamped frame deltas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last: Option<Scalar>,
    max_dt: Scalar,
}

impl FrameClock {
    pub fn new(max_dt: Scalar) -> Self {
        Self {
            last: None,
            max_dt: max_dt.max(0.0),
        }
    }

    pub fn max_dt(&self) -> Scalar {
        self.max_dt
    }

    /// Delta since the previous tick in `[0, max_dt]`.
    ///
    /// The first tick after construction or [`reset`](Self::reset) yields 0, as
    /// does any non-finite or backwards delta.
    pub fn tick(&mut self, timestamp: Scalar) -> Scalar {
        let previous = self.last.replace(timestamp);
        match previous {
            None => 0.0,
            Some(last) => {
                let delta = timestamp - last;
                if delta.is_finite() {
                    delta.clamp(0.0, self.max_dt)
                } else {
                    0.0
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new(0.03);
        assert_eq!(clock.tick(12.5), 0.0);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new(0.03);
        clock.tick(1.0);
        assert!((clock.tick(1.016) - 0.016).abs() < 1e-12);
        assert_eq!(clock.tick(3.0), 0.03);
    }

    #[test]
    fn test_backwards_time_yields_zero() {
        let mut clock = FrameClock::new(0.03);
        clock.tick(2.0);
        assert_eq!(clock.tick(1.5), 0.0);
    }

    #[test]
    fn test_non_finite_timestamps_yield_zero() {
        let mut clock = FrameClock::new(0.05);
        clock.tick(1.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
        assert_eq!(clock.tick(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_reset_restarts_from_zero() {
        let mut clock = FrameClock::new(0.03);
        clock.tick(1.0);
        clock.tick(1.01);
        clock.reset();
        assert_eq!(clock.tick(50.0), 0.0);
        assert!((clock.tick(50.02) - 0.02).abs() < 1e-12);
    }
}
