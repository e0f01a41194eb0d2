use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// The parameter range of a segment, from start to end.
const UNIT: Interval<f64> = Interval::new(0.0, 1.0);

/// A straight line segment in 2D space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSegment2d {
    pub start: Point2d,
    pub end: Point2d,
}

impl LineSegment2d {
    /// Creates a line segment from its two end points.
    pub const fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self { start, end }
    }

    /// The vector from the start of the segment to its end.
    pub fn direction(&self) -> Vector2d {
        self.end - self.start
    }

    /// The length of the segment.
    pub fn length(&self) -> f64 {
        self.direction().magnitude()
    }

    /// Returns true if both ends of the segment coincide.
    pub fn is_degenerate(&self) -> bool {
        self.direction().magnitude2() == 0.0
    }

    /// Samples the segment at parameter `t`.
    ///
    /// `t` is not clamped: values outside `[0, 1]` extrapolate along the line.
    /// The endpoints are reproduced exactly at `t = 0` and `t = 1`.
    pub fn sample(&self, t: f64) -> Point2d {
        Point2d::from_vec(self.start.to_vec() * (1.0 - t) + self.end.to_vec() * t)
    }

    /// Finds the parameter of the point on the segment closest to `point`,
    /// clamped to `[0, 1]`. Returns `None` for a degenerate segment.
    pub fn project(&self, point: Point2d) -> Option<f64> {
        let dir = self.direction();
        let len2 = dir.magnitude2();
        if len2 == 0.0 {
            return None;
        }
        Some(UNIT.clamp((point - self.start).dot(dir) / len2))
    }

    /// The Euclidean distance from `point` to the closest point on the segment.
    pub fn distance(&self, point: Point2d) -> f64 {
        match self.project(point) {
            Some(t) => point.distance(self.sample(t)),
            None => point.distance(self.start),
        }
    }
}

/// Computes the distance between a point and a line segment.
///
/// A zero-length segment falls back to the point-to-point distance.
pub fn distance_to_segment(point: Point2d, seg_start: Point2d, seg_end: Point2d) -> f64 {
    LineSegment2d::from_ends(seg_start, seg_end).distance(point)
}

/// Computes the clamped projection parameter of a point onto a line segment.
///
/// A zero-length segment has no direction to project onto, so its midpoint
/// parameter (0.5) is returned.
pub fn project_onto_segment(point: Point2d, seg_start: Point2d, seg_end: Point2d) -> f64 {
    LineSegment2d::from_ends(seg_start, seg_end)
        .project(point)
        .unwrap_or(0.5)
}
