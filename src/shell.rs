use crate::animation::PathAnimation;
use crate::config::ShellConfig;
use crate::error::{NavError, NavResult};
use crate::event_log::EventLog;
use crate::fleet::Fleet;
use crate::graph::{LaneLocation, NavGraph};
use crate::hit_test::{nearest_lane, LaneHit};
use crate::math::Point2d;
use crate::route::placeholder_route;
use crate::scene::{Scene, EMPTY_GRAPH_MESSAGE};
use crate::RobotId;
use log::debug;
use slotmap::SparseSecondaryMap;
use std::io::Write;

/// The result of a click on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickOutcome {
    /// The click was not near any lane.
    Missed,
    /// The click hit a lane, but there was nothing to do with it.
    Ignored(LaneHit),
    /// The robot on the clicked lane was selected.
    Selected(RobotId),
    /// The selected robot was sent to the clicked location.
    Commanded { robot: RobotId, target: LaneLocation },
    /// The selected robot could not be commanded; the error has been logged.
    Dropped(RobotId),
}

/// A headless fleet viewer.
///
/// Owns the graph, the robots and the event log, turns clicks into commands
/// and steps robot animations forward. Drawing is left to whoever consumes
/// [Self::scene]; pacing is left to whoever calls [Self::tick].
pub struct FleetShell<W: Write> {
    /// The navigation graph, already fitted to the canvas.
    graph: NavGraph,
    /// The robots.
    fleet: Fleet,
    /// The event log.
    log: EventLog<W>,
    /// The shell settings.
    config: ShellConfig,
    /// The robot picked by the last click, if any.
    selected: Option<RobotId>,
    /// The in-progress animations.
    animations: SparseSecondaryMap<RobotId, PathAnimation>,
}

impl<W: Write> FleetShell<W> {
    /// Creates a shell, fitting the graph to the configured canvas.
    ///
    /// An empty graph is reported to the log; the shell still works
    /// but no click will ever hit a lane.
    pub fn new(mut graph: NavGraph, config: ShellConfig, mut log: EventLog<W>) -> Self {
        if graph.is_empty() {
            log.error_message(EMPTY_GRAPH_MESSAGE);
        } else {
            graph.fit_to_canvas(
                config.canvas_width,
                config.canvas_height,
                config.margin,
                config.fallback_scale,
            );
        }
        Self {
            graph,
            fleet: Fleet::new(),
            log,
            config,
            selected: None,
            animations: SparseSecondaryMap::new(),
        }
    }

    /// Places a robot on the graph.
    ///
    /// A location that does not resolve to coordinates is reported
    /// but the robot is still added.
    pub fn add_robot(&mut self, name: impl Into<String>, location: LaneLocation) -> RobotId {
        if let Err(err) = self.graph.location_coords(location) {
            self.log.error(&err);
        }
        self.fleet.add_robot(name, location)
    }

    /// Gets the navigation graph.
    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    /// Gets the fleet.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Gets the settings.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Gets the currently selected robot.
    pub fn selected(&self) -> Option<RobotId> {
        self.selected
    }

    /// Gets the event log.
    pub fn event_log(&self) -> &EventLog<W> {
        &self.log
    }

    /// Consumes the shell, returning its event log.
    pub fn into_event_log(self) -> EventLog<W> {
        self.log
    }

    /// Handles a left click at `point`.
    ///
    /// With no robot selected, a click on a lane selects the first robot on
    /// that lane. With a robot selected, a click on a lane sends it to the
    /// clicked position. Clicks away from every lane do nothing.
    pub fn click(&mut self, point: Point2d) -> ClickOutcome {
        self.log.click(point);
        let Some(hit) = nearest_lane(
            &self.graph,
            point,
            self.config.click_threshold,
            self.config.hit_mode,
        ) else {
            return ClickOutcome::Missed;
        };
        self.log.lane_hit(&hit);

        match self.selected.take() {
            None => match self.fleet.robot_on_lane(hit.lane) {
                Some(robot) => {
                    if let Ok(r) = self.fleet.get(robot) {
                        self.log.robot_selected(r.name(), hit.lane);
                    }
                    self.selected = Some(robot);
                    ClickOutcome::Selected(robot)
                }
                None => ClickOutcome::Ignored(hit),
            },
            Some(robot) => match self.command(robot, hit.location()) {
                Ok(()) => ClickOutcome::Commanded {
                    robot,
                    target: hit.location(),
                },
                Err(err) => {
                    self.log.error(&err);
                    ClickOutcome::Dropped(robot)
                }
            },
        }
    }

    /// Sends a robot to `target` along the placeholder route.
    ///
    /// Any animation the robot was running is replaced, starting from
    /// wherever the robot has got to.
    pub fn command(&mut self, robot: RobotId, target: LaneLocation) -> NavResult<()> {
        let r = self.fleet.get(robot)?;
        let name = r.name().to_owned();
        let start = r.location();
        let before = self.graph.location_coords(start)?;
        let after = self.graph.location_coords(target)?;

        self.fleet.assign_task(robot, target)?;
        self.log.movement(&name, before, after, Some(target.lane));

        let animation = PathAnimation::new(
            placeholder_route(start, target),
            self.config.animation_steps,
        )
        .on_segment_complete(move |segment| debug!("{} finished route segment {}", name, segment));
        self.animations.insert(robot, animation);
        Ok(())
    }

    /// Returns true while any robot is still moving.
    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Advances every animation by one step and returns how many robots moved.
    ///
    /// An animation which reaches a location that cannot be resolved, or
    /// whose robot has gone, is reported and stopped. Other robots are unaffected.
    pub fn tick(&mut self) -> usize {
        let mut moved = 0;
        let mut done = vec![];
        let mut failed: Vec<(RobotId, NavError)> = vec![];

        for (robot, animation) in self.animations.iter_mut() {
            let Some(location) = animation.advance() else {
                done.push(robot);
                continue;
            };
            let result = self
                .graph
                .location_coords(location)
                .and_then(|_| self.fleet.set_location(robot, location));
            match result {
                Ok(()) => {
                    moved += 1;
                    if animation.is_finished() {
                        done.push(robot);
                    }
                }
                Err(err) => failed.push((robot, err)),
            }
        }

        for robot in done {
            self.animations.remove(robot);
            if let Err(err) = self.fleet.arrive(robot) {
                self.log.error(&err);
            }
        }
        for (robot, err) in failed {
            self.animations.remove(robot);
            self.log.error(&err);
        }

        moved
    }

    /// Builds the scene for the current frame.
    pub fn scene(&self) -> Scene {
        Scene::build(&self.graph, &self.fleet, &self.config)
    }
}
