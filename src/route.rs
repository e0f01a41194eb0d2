use crate::graph::LaneLocation;

/// Builds the waypoints a robot follows from `start` to `end`.
///
/// This does not search the graph and ignores connectivity. A robot staying on
/// its lane goes straight to `end`; otherwise it runs to the end of its lane,
/// jumps to the start of the target lane and runs along it to `end`.
pub fn placeholder_route(start: LaneLocation, end: LaneLocation) -> Vec<LaneLocation> {
    if start.lane == end.lane {
        vec![start, end]
    } else {
        vec![
            start,
            LaneLocation::new(start.lane, 1.0),
            LaneLocation::new(end.lane, 0.0),
            end,
        ]
    }
}
