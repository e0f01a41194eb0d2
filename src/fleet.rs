use crate::error::{NavError, NavResult};
use crate::graph::LaneLocation;
use crate::RobotId;
use itertools::Itertools;
use log::info;
use slotmap::SlotMap;

/// What a robot is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RobotStatus {
    #[default]
    Idle,
    Moving,
}

/// A robot on the navigation graph.
#[derive(Clone, Debug)]
pub struct Robot {
    /// The robot's ID.
    id: RobotId,
    /// The display name.
    name: String,
    /// Where the robot currently is.
    location: LaneLocation,
    /// Where the robot has been told to go.
    destination: Option<LaneLocation>,
    /// The robot's status.
    status: RobotStatus,
}

impl Robot {
    /// Gets the robot's ID.
    pub fn id(&self) -> RobotId {
        self.id
    }

    /// Gets the robot's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the robot's current location.
    pub fn location(&self) -> LaneLocation {
        self.location
    }

    /// Gets the location the robot is heading to, if it has been given a task.
    pub fn destination(&self) -> Option<LaneLocation> {
        self.destination
    }

    /// Gets the robot's status.
    pub fn status(&self) -> RobotStatus {
        self.status
    }
}

/// The robots on the graph.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    /// The robots, keyed by ID.
    robots: SlotMap<RobotId, Robot>,
    /// The robot IDs in the order they were added.
    /// Slots are reused after removal, so slot order is not insertion order.
    order: Vec<RobotId>,
}

impl Fleet {
    /// Creates an empty fleet.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an idle robot at the given location.
    pub fn add_robot(&mut self, name: impl Into<String>, location: LaneLocation) -> RobotId {
        let name = name.into();
        let id = self.robots.insert_with_key(|id| Robot {
            id,
            name,
            location,
            destination: None,
            status: RobotStatus::Idle,
        });
        self.order.push(id);
        id
    }

    /// Removes a robot from the fleet.
    pub fn remove_robot(&mut self, id: RobotId) -> Option<Robot> {
        let robot = self.robots.remove(id)?;
        self.order.retain(|other| *other != id);
        Some(robot)
    }

    /// Gets a reference to the robot with the given ID.
    pub fn get(&self, id: RobotId) -> NavResult<&Robot> {
        self.robots.get(id).ok_or(NavError::RobotNotFound(id))
    }

    fn get_mut(&mut self, id: RobotId) -> NavResult<&mut Robot> {
        self.robots.get_mut(id).ok_or(NavError::RobotNotFound(id))
    }

    /// Returns an iterator over all the robots, in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Robot> {
        self.order.iter().map(|id| &self.robots[*id])
    }

    /// The number of robots in the fleet.
    pub fn len(&self) -> usize {
        self.robots.len()
    }

    /// Returns true if the fleet has no robots.
    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// Finds the earliest added robot on the given lane.
    pub fn robot_on_lane(&self, lane: usize) -> Option<RobotId> {
        self.iter()
            .find(|robot| robot.location.lane == lane)
            .map(|robot| robot.id)
    }

    /// Sends a robot towards a destination.
    pub fn assign_task(&mut self, id: RobotId, destination: LaneLocation) -> NavResult<()> {
        let robot = self.get_mut(id)?;
        robot.destination = Some(destination);
        robot.status = RobotStatus::Moving;
        info!(
            "{} assigned to lane {} at {:.3}",
            robot.name, destination.lane, destination.pos
        );
        Ok(())
    }

    /// Moves a robot without changing its task.
    pub fn set_location(&mut self, id: RobotId, location: LaneLocation) -> NavResult<()> {
        self.get_mut(id)?.location = location;
        Ok(())
    }

    /// Marks a robot as having reached its destination.
    pub fn arrive(&mut self, id: RobotId) -> NavResult<()> {
        let robot = self.get_mut(id)?;
        if let Some(destination) = robot.destination.take() {
            robot.location = destination;
        }
        robot.status = RobotStatus::Idle;
        Ok(())
    }

    /// Returns true if two robots occupy exactly the same location.
    pub fn has_collision(&self) -> bool {
        has_collision(self.robots.values().map(|robot| robot.location))
    }
}

/// Returns true if any two of the locations are identical.
///
/// Only exact coincidence counts; robots close to each other
/// or on crossing lanes are not detected.
pub fn has_collision(locations: impl IntoIterator<Item = LaneLocation>) -> bool {
    !locations
        .into_iter()
        .map(|location| location.key())
        .all_unique()
}
