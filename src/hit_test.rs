//! Turning a point on the canvas into a location on the graph.

use crate::graph::{LaneLocation, NavGraph};
use crate::math::Point2d;
use log::warn;
use serde::{Deserialize, Serialize};

/// How [nearest_lane] chooses between several lanes within the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitMode {
    /// The first lane in declaration order within the threshold.
    ///
    /// This is not necessarily the closest lane where lanes meet or cross,
    /// but it is how clicks have always been resolved.
    #[default]
    FirstMatch,
    /// The closest lane within the threshold. Ties go to the lane declared first.
    Closest,
}

/// A lane found under a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneHit {
    /// The lane index.
    pub lane: usize,
    /// The position along the lane of the point's projection, in `[0, 1]`.
    pub pos: f64,
    /// The distance from the point to the lane.
    pub distance: f64,
}

impl LaneHit {
    /// The graph-relative location of the hit.
    pub fn location(&self) -> LaneLocation {
        LaneLocation::new(self.lane, self.pos)
    }
}

/// Finds a lane within `threshold` of `point`.
///
/// Lanes whose vertices cannot be resolved are skipped.
pub fn nearest_lane(
    graph: &NavGraph,
    point: Point2d,
    threshold: f64,
    mode: HitMode,
) -> Option<LaneHit> {
    let mut hits = (0..graph.lanes().len())
        .filter_map(|lane| match graph.lane_segment(lane) {
            Ok(segment) => Some((lane, segment)),
            Err(err) => {
                warn!("skipping lane {} in hit test: {}", lane, err);
                None
            }
        })
        .map(|(lane, segment)| LaneHit {
            lane,
            pos: segment.project(point).unwrap_or(0.5),
            distance: segment.distance(point),
        })
        .filter(|hit| hit.distance <= threshold);

    match mode {
        HitMode::FirstMatch => hits.next(),
        HitMode::Closest => hits.min_by(|a, b| a.distance.total_cmp(&b.distance)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::Lane;
    use assert_approx_eq::assert_approx_eq;

    /// Two parallel horizontal lanes 4 units apart, declared bottom first.
    fn parallel_lanes() -> NavGraph {
        let mut graph = NavGraph::new();
        graph.add_vertex("a", Point2d::new(0.0, 4.0));
        graph.add_vertex("b", Point2d::new(10.0, 4.0));
        graph.add_vertex("c", Point2d::new(0.0, 0.0));
        graph.add_vertex("d", Point2d::new(10.0, 0.0));
        graph.add_lane(Lane::new("a", "b"));
        graph.add_lane(Lane::new("c", "d"));
        graph
    }

    #[test]
    fn first_match_keeps_declaration_order() {
        let graph = parallel_lanes();
        let hit = nearest_lane(&graph, Point2d::new(5.0, 1.0), 5.0, HitMode::FirstMatch).unwrap();
        assert_eq!(hit.lane, 0);
        assert_approx_eq!(hit.distance, 3.0);
    }

    #[test]
    fn closest_picks_minimum_distance() {
        let graph = parallel_lanes();
        let hit = nearest_lane(&graph, Point2d::new(5.0, 1.0), 5.0, HitMode::Closest).unwrap();
        assert_eq!(hit.lane, 1);
        assert_approx_eq!(hit.distance, 1.0);
        assert_approx_eq!(hit.pos, 0.5);
    }

    #[test]
    fn closest_breaks_ties_by_declaration_order() {
        let graph = parallel_lanes();
        let hit = nearest_lane(&graph, Point2d::new(5.0, 2.0), 5.0, HitMode::Closest).unwrap();
        assert_eq!(hit.lane, 0);
    }

    #[test]
    fn nothing_within_threshold() {
        let graph = parallel_lanes();
        for mode in [HitMode::FirstMatch, HitMode::Closest] {
            assert_eq!(nearest_lane(&graph, Point2d::new(5.0, 20.0), 5.0, mode), None);
        }
        assert_eq!(nearest_lane(&NavGraph::new(), Point2d::new(0.0, 0.0), 5.0, HitMode::FirstMatch), None);
    }

    #[test]
    fn threshold_is_inclusive() {
        let graph = parallel_lanes();
        let hit = nearest_lane(&graph, Point2d::new(5.0, 9.0), 5.0, HitMode::FirstMatch);
        assert_eq!(hit.map(|h| h.lane), Some(0));
    }

    #[test]
    fn position_is_clamped_past_lane_end() {
        let graph = parallel_lanes();
        let hit = nearest_lane(&graph, Point2d::new(12.0, 0.0), 5.0, HitMode::Closest).unwrap();
        assert_eq!(hit.lane, 1);
        assert_eq!(hit.pos, 1.0);
        assert_approx_eq!(hit.distance, 2.0);
    }

    #[test]
    fn broken_lanes_are_skipped() {
        let mut graph = NavGraph::new();
        graph.add_vertex("a", Point2d::new(0.0, 0.0));
        graph.add_vertex("b", Point2d::new(10.0, 0.0));
        graph.add_lane(Lane::new("a", "missing"));
        graph.add_lane(Lane::new("a", "b"));
        let hit = nearest_lane(&graph, Point2d::new(3.0, 0.0), 5.0, HitMode::FirstMatch).unwrap();
        assert_eq!(hit.lane, 1);
        assert_eq!(hit.location(), LaneLocation::new(1, 0.3));
    }

    #[test]
    fn hit_mode_from_config_names() {
        let mode: HitMode = serde_json::from_str("\"closest\"").unwrap();
        assert_eq!(mode, HitMode::Closest);
        assert_eq!(HitMode::default(), HitMode::FirstMatch);
    }
}
