//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Copy> Interval<T> {
    /// Creates a zero-length interval containing only `value`.
    pub const fn around(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval contains the value.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T: Float> Interval<T> {
    /// Grows the interval just enough to contain `value`.
    pub fn extend(&mut self, value: T) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Clamps `value` to lie within the interval.
    pub fn clamp(&self, value: T) -> T {
        value.max(self.min).min(self.max)
    }

    pub fn lerp(&self, t: T) -> T {
        self.min + t * (self.max - self.min)
    }

    pub fn inv_lerp(&self, value: T) -> T {
        (value - self.min) / (self.max - self.min)
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod test {
    use super::Interval;

    #[test]
    fn extend_covers_all_values() {
        let mut range = Interval::around(3.0);
        for x in [5.0, -2.0, 4.0] {
            range.extend(x);
        }
        assert_eq!(range, Interval::new(-2.0, 5.0));
        assert_eq!(range.length(), 7.0);
    }

    #[test]
    fn clamp_and_lerp() {
        let unit = Interval::new(0.0, 1.0);
        assert_eq!(unit.clamp(-0.5), 0.0);
        assert_eq!(unit.clamp(1.5), 1.0);
        assert_eq!(unit.clamp(0.25), 0.25);
        assert!(unit.contains(1.0));
        assert!(!unit.contains(1.01));

        let range = Interval::new(10.0, 20.0);
        assert_eq!(range.lerp(0.5), 15.0);
        assert_eq!(range.inv_lerp(12.5), 0.25);
        assert_eq!(range.inv_lerp(range.lerp(0.75)), 0.75);
    }
}
