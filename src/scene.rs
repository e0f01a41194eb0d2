//! A renderer-agnostic description of what the canvas should show.

use crate::config::ShellConfig;
use crate::fleet::Fleet;
use crate::graph::NavGraph;
use crate::math::Point2d;
use log::warn;
use serde::Serialize;

/// Shown in place of the graph when there is nothing to draw.
pub const EMPTY_GRAPH_MESSAGE: &str = "Error: Invalid or empty graph data.";

/// How far above a robot its label is drawn, in px.
const LABEL_OFFSET: f64 = 15.0;

/// A single thing to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        name: String,
        p1: [f64; 2],
        p2: [f64; 2],
    },
    Circle {
        name: String,
        centre: [f64; 2],
        radius: f64,
    },
    Text {
        name: String,
        at: [f64; 2],
        text: String,
    },
}

/// The draw commands for one frame, in painting order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

fn xy(p: Point2d) -> [f64; 2] {
    [p.x, p.y]
}

impl Scene {
    /// Builds the scene for a graph and the robots on it.
    ///
    /// Lanes and robots whose coordinates cannot be resolved are left out.
    pub fn build(graph: &NavGraph, fleet: &Fleet, config: &ShellConfig) -> Self {
        let mut commands = vec![];

        if graph.is_empty() {
            commands.push(DrawCommand::Text {
                name: "error".into(),
                at: [0.5 * config.canvas_width, 0.5 * config.canvas_height],
                text: EMPTY_GRAPH_MESSAGE.into(),
            });
        }

        for lane in 0..graph.lanes().len() {
            let segment = match graph.lane_segment(lane) {
                Ok(segment) => segment,
                Err(err) => {
                    warn!("not drawing lane {}: {}", lane, err);
                    continue;
                }
            };
            commands.push(DrawCommand::Line {
                name: format!("lane_{}", lane),
                p1: xy(segment.start),
                p2: xy(segment.end),
            });
            commands.push(DrawCommand::Text {
                name: format!("lane_label_{}", lane),
                at: xy(segment.sample(0.5)),
                text: format!("L{}", lane),
            });
        }

        for robot in fleet.iter() {
            let centre = match graph.location_coords(robot.location()) {
                Ok(centre) => centre,
                Err(err) => {
                    warn!("not drawing {}: {}", robot.name(), err);
                    continue;
                }
            };
            commands.push(DrawCommand::Circle {
                name: robot.name().to_owned(),
                centre: xy(centre),
                radius: config.robot_radius,
            });
            commands.push(DrawCommand::Text {
                name: format!("{} label", robot.name()),
                at: [centre.x, centre.y - LABEL_OFFSET],
                text: robot.name().to_owned(),
            });
        }

        Self { commands }
    }

    /// Gets the draw commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Gets the scene as a JSON array of draw commands.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.commands)
    }
}
