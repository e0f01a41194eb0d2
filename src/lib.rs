//! A navigation-graph lane model for a small robot fleet viewer.
//!
//! The graph is a set of vertices joined by lanes. Anything placed on the graph
//! is addressed by a [LaneLocation]: a lane index and a fractional position along
//! that lane. On top of the model sit a lane hit-tester for turning clicks into
//! locations, a placeholder router, a pure animation interpolator and a headless
//! [FleetShell] that wires them together.

pub use animation::{interpolate, PathAnimation};
pub use cgmath;
pub use config::ShellConfig;
pub use error::{NavError, NavResult};
pub use event_log::EventLog;
pub use fleet::{has_collision, Fleet, Robot, RobotStatus};
pub use graph::{Lane, LaneLocation, NavGraph, VertexId};
pub use hit_test::{nearest_lane, HitMode, LaneHit};
pub use route::placeholder_route;
pub use scene::{DrawCommand, Scene};
pub use shell::{ClickOutcome, FleetShell};
use slotmap::new_key_type;
pub use slotmap::{Key, KeyData};
pub use util::Interval;

mod animation;
mod config;
mod error;
mod event_log;
mod fleet;
mod graph;
mod hit_test;
pub mod math;
mod route;
mod scene;
mod shell;
mod util;

new_key_type! {
    /// Unique ID of a [Robot].
    pub struct RobotId;
}
