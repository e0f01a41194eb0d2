//! Fixed-step interpolation of graph-relative locations.
//!
//! Nothing in here knows about screens or timers. A renderer pulls locations
//! out one step at a time and maps them to coordinates through the graph.

use crate::graph::LaneLocation;
use crate::util::Interval;

/// Computes the location at `step` of `steps` between two locations.
///
/// The ends are returned exactly. Locations on the same lane are interpolated
/// by position. Between different lanes there is nothing to interpolate along,
/// so the marker holds at `from` and hops to `to` on the last step.
fn interpolate_step(from: LaneLocation, to: LaneLocation, step: usize, steps: usize) -> LaneLocation {
    match step {
        0 => from,
        s if s >= steps => to,
        _ if from.lane == to.lane => {
            let t = step as f64 / steps as f64;
            LaneLocation::new(from.lane, Interval::new(from.pos, to.pos).lerp(t))
        }
        _ => from,
    }
}

/// Returns the `steps + 1` locations from `start` to `end` inclusive.
///
/// A step count of zero is treated as one.
pub fn interpolate(
    start: LaneLocation,
    end: LaneLocation,
    steps: usize,
) -> impl Iterator<Item = LaneLocation> {
    let steps = steps.max(1);
    (0..=steps).map(move |step| interpolate_step(start, end, step, steps))
}

/// Walks a marker along a path of waypoints, one segment after another,
/// taking a fixed number of steps per segment.
pub struct PathAnimation {
    /// The waypoints, including the starting location.
    waypoints: Vec<LaneLocation>,
    /// The number of steps per segment.
    steps: usize,
    /// The index of the waypoint the current segment starts from.
    segment: usize,
    /// The next step within the current segment.
    step: usize,
    /// Called with the segment index whenever a segment is completed.
    on_segment_complete: Option<Box<dyn FnMut(usize)>>,
}

impl PathAnimation {
    /// Creates an animation along `waypoints`.
    ///
    /// The first waypoint is taken to be where the marker already is,
    /// so it is never yielded.
    pub fn new(waypoints: Vec<LaneLocation>, steps: usize) -> Self {
        Self {
            waypoints,
            steps: steps.max(1),
            segment: 0,
            step: 1,
            on_segment_complete: None,
        }
    }

    /// Sets a callback to run each time a segment of the path is completed.
    pub fn on_segment_complete(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_segment_complete = Some(Box::new(callback));
        self
    }

    /// Gets the final waypoint, if there is one.
    pub fn destination(&self) -> Option<LaneLocation> {
        self.waypoints.last().copied()
    }

    /// Gets the number of segments in the path.
    pub fn num_segments(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Returns true once every segment has been walked.
    pub fn is_finished(&self) -> bool {
        self.segment >= self.num_segments()
    }

    /// Advances the animation by one step and returns the new location,
    /// or `None` if the animation has finished.
    pub fn advance(&mut self) -> Option<LaneLocation> {
        if self.is_finished() {
            return None;
        }

        let from = self.waypoints[self.segment];
        let to = self.waypoints[self.segment + 1];
        let location = interpolate_step(from, to, self.step, self.steps);

        if self.step >= self.steps {
            if let Some(callback) = &mut self.on_segment_complete {
                callback(self.segment);
            }
            self.segment += 1;
            self.step = 1;
        } else {
            self.step += 1;
        }

        Some(location)
    }
}

impl Iterator for PathAnimation {
    type Item = LaneLocation;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl std::fmt::Debug for PathAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathAnimation")
            .field("waypoints", &self.waypoints)
            .field("steps", &self.steps)
            .field("segment", &self.segment)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}
