use crate::physics::math::PhaseState;
use std::collections::VecDeque;

/// Smallest and largest number of samples a trail may hold
pub const TRAIL_CAPACITY_RANGE: std::ops::RangeInclusive<usize> = 50..=240;

/// Bounded history of past states, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<PhaseState>,
    capacity: usize,
}

impl Trail {
    /// Create an empty trail; `capacity` is clamped to [`TRAIL_CAPACITY_RANGE`]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(*TRAIL_CAPACITY_RANGE.start(), *TRAIL_CAPACITY_RANGE.end());
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: PhaseState) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseState> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&PhaseState> {
        self.points.back()
    }

    pub fn to_vec(&self) -> Vec<PhaseState> {
        self.points.iter().copied().collect()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(*TRAIL_CAPACITY_RANGE.end())
    }
}
