use crate::error::NavResult;
use crate::hit_test::HitMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for the [FleetShell](crate::FleetShell).
///
/// Every field is optional in a config file; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Canvas width in px.
    pub canvas_width: f64,
    /// Canvas height in px.
    pub canvas_height: f64,
    /// Space left around the graph when fitting it to the canvas, in px.
    pub margin: f64,
    /// Scale used when the graph has no extent along one axis.
    pub fallback_scale: f64,
    /// How close a click must be to a lane to hit it, in px.
    pub click_threshold: f64,
    /// How a click near several lanes is resolved.
    pub hit_mode: HitMode,
    /// Radius of a robot marker in px.
    pub robot_radius: f64,
    /// Number of animation steps per route segment.
    pub animation_steps: usize,
    /// Delay between animation steps in ms.
    pub step_interval_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            margin: 50.0,
            fallback_scale: 40.0,
            click_threshold: 5.0,
            hit_mode: HitMode::FirstMatch,
            robot_radius: 10.0,
            animation_steps: 50,
            step_interval_ms: 20,
        }
    }
}

impl ShellConfig {
    /// Parses a config from JSON.
    pub fn from_json_str(json: &str) -> NavResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> NavResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// The delay between animation steps.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}
