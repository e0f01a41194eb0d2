//! End-to-end scenarios on small graphs loaded from JSON.

use assert_approx_eq::assert_approx_eq;
use fleet_nav::{
    math::{distance_to_segment, Point2d},
    nearest_lane, placeholder_route, ClickOutcome, EventLog, FleetShell, HitMode, LaneLocation,
    NavGraph, RobotStatus, ShellConfig, VertexId,
};

const TWO_VERTICES: &str = r#"{
    "lanes": [[0, 1, null]],
    "vertex_coords": {"0": [0, 0], "1": [10, 0]}
}"#;

/// Test that the midpoint of a lane lies halfway between its vertices.
#[test]
fn coordinate_of_lane_midpoint() {
    let graph = NavGraph::from_json_str(TWO_VERTICES).unwrap();
    let p = graph.coord_of(0, 0.5).unwrap();
    assert_eq!(p, Point2d::new(5.0, 0.0));
}

/// Test that a click on a lane maps back to its fractional position.
#[test]
fn click_on_lane_gives_position() {
    let graph = NavGraph::from_json_str(TWO_VERTICES).unwrap();
    let hit = nearest_lane(&graph, Point2d::new(3.0, 0.0), 5.0, HitMode::FirstMatch).unwrap();
    assert_eq!(hit.lane, 0);
    assert_approx_eq!(hit.pos, 0.3);
    assert_eq!(hit.distance, 0.0);
}

/// Test that the router only detours via lane ends when changing lanes.
#[test]
fn placeholder_routes() {
    assert_eq!(
        placeholder_route(LaneLocation::new(0, 0.2), LaneLocation::new(0, 0.8)),
        vec![LaneLocation::new(0, 0.2), LaneLocation::new(0, 0.8)]
    );
    assert_eq!(
        placeholder_route(LaneLocation::new(0, 0.2), LaneLocation::new(1, 0.6)),
        vec![
            LaneLocation::new(0, 0.2),
            LaneLocation::new(0, 1.0),
            LaneLocation::new(1, 0.0),
            LaneLocation::new(1, 0.6),
        ]
    );
}

/// Test that every point of a lane is at zero distance from it.
#[test]
fn lane_points_are_on_lane() {
    let graph = NavGraph::from_json_str(TWO_VERTICES).unwrap();
    let segment = graph.lane_segment(0).unwrap();
    for i in 0..=16 {
        let p = graph.coord_of(0, i as f64 / 16.0).unwrap();
        assert_eq!(distance_to_segment(p, segment.start, segment.end), 0.0);
    }
}

/// Test a full session: load, fit, select the robot and send it to another lane.
#[test]
fn select_and_move_robot() {
    let graph = NavGraph::from_json_str(
        r#"{
            "lanes": [[0, 1, null], [1, 2, null], [2, 0, {"name": "back"}]],
            "vertex_coords": {"0": [0, 0], "1": [7, 0], "2": [7, 5]}
        }"#,
    )
    .unwrap();
    let mut shell = FleetShell::new(graph, ShellConfig::default(), EventLog::new(vec![]));
    assert!(shell.graph().is_fitted());
    // Scale is min(700 / 7, 500 / 5) = 100, so vertex 1 lands on (750, 50)
    assert_eq!(
        shell.graph().vertex(&VertexId::from("1")).unwrap(),
        Point2d::new(750.0, 50.0)
    );

    let robot = shell.add_robot("Robot 0", LaneLocation::new(1, 0.0));
    let outcome = shell.click(Point2d::new(752.0, 100.0));
    assert_eq!(outcome, ClickOutcome::Selected(robot));

    let outcome = shell.click(Point2d::new(400.0, 51.0));
    let ClickOutcome::Commanded { target, .. } = outcome else {
        panic!("robot was not commanded: {:?}", outcome);
    };
    assert_eq!(target.lane, 0);
    assert_approx_eq!(target.pos, 0.5);

    let mut steps = 0;
    while shell.is_animating() {
        shell.tick();
        steps += 1;
    }
    assert_eq!(steps, 150);

    let robot = shell.fleet().get(robot).unwrap();
    assert_eq!(robot.status(), RobotStatus::Idle);
    assert_eq!(robot.location(), target);

    let log = String::from_utf8(shell.into_event_log().into_inner()).unwrap();
    let lines = log.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Clicked at (752, 100)");
    assert_eq!(lines[1], "Lane clicked: 1, position: 0.1");
    assert_eq!(lines[2], "Robot 0 is on lane 1");
    assert!(lines.last().unwrap().starts_with("Robot 0 "));
    assert!(lines.last().unwrap().ends_with(" (750, 50) (400, 50) Lane 0"));
}

/// Test that a missing graph file leaves an empty, error-reporting shell.
#[test]
fn missing_graph_file() {
    let graph = NavGraph::load_or_empty("no/such/graph.json");
    let mut shell = FleetShell::new(graph, ShellConfig::default(), EventLog::new(vec![]));
    shell.add_robot("Robot 0", LaneLocation::new(1, 0.0));
    assert_eq!(shell.click(Point2d::new(100.0, 100.0)), ClickOutcome::Missed);

    let log = String::from_utf8(shell.into_event_log().into_inner()).unwrap();
    assert_eq!(
        log,
        "ERROR Error: Invalid or empty graph data.\n\
         ERROR lane 1 not found\n\
         Clicked at (100, 100)\n"
    );
}
