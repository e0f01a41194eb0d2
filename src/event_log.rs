//! An append-only text log of clicks, selections and robot movements.
//!
//! The log is an ordinary value owned by whoever drives the fleet; nothing
//! here touches process-wide logger configuration. Every line written is
//! also forwarded to the `log` facade.

use crate::error::{NavError, NavResult};
use crate::hit_test::LaneHit;
use crate::math::Point2d;
use chrono::{Local, NaiveDateTime};
use log::{error, Level};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// The timestamp format of movement lines.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A line-oriented event log writing to `W`.
#[derive(Debug)]
pub struct EventLog<W: Write> {
    writer: W,
}

impl EventLog<File> {
    /// Opens a log file for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> NavResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> EventLog<W> {
    /// Creates a log writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the log, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Records a click on the canvas.
    pub fn click(&mut self, point: Point2d) {
        self.line(Level::Info, format!("Clicked at ({}, {})", point.x, point.y));
    }

    /// Records which lane a click landed on.
    pub fn lane_hit(&mut self, hit: &LaneHit) {
        self.line(
            Level::Info,
            format!("Lane clicked: {}, position: {}", hit.lane, hit.pos),
        );
    }

    /// Records that the robot on a clicked lane has been selected.
    pub fn robot_selected(&mut self, name: &str, lane: usize) {
        self.line(Level::Info, format!("{} is on lane {}", name, lane));
    }

    /// Records a robot movement, timestamped with the local time.
    ///
    /// The movement is labelled with its target lane, or as a vertex
    /// movement when there is no lane.
    pub fn movement(&mut self, name: &str, before: Point2d, after: Point2d, lane: Option<usize>) {
        self.movement_at(name, Local::now().naive_local(), before, after, lane);
    }

    /// Records a robot movement with an explicit timestamp.
    pub fn movement_at(
        &mut self,
        name: &str,
        timestamp: NaiveDateTime,
        before: Point2d,
        after: Point2d,
        lane: Option<usize>,
    ) {
        let label = match lane {
            Some(lane) => format!("Lane {}", lane),
            None => "Vertex".to_owned(),
        };
        self.line(
            Level::Info,
            format!(
                "{} {} ({}, {}) ({}, {}) {}",
                name,
                timestamp.format(TIMESTAMP_FORMAT),
                before.x,
                before.y,
                after.x,
                after.y,
                label
            ),
        );
    }

    /// Records a free-form error message.
    pub fn error_message(&mut self, message: &str) {
        self.line(Level::Error, format!("ERROR {}", message));
    }

    /// Records an error that caused an operation to be dropped.
    pub fn error(&mut self, err: &NavError) {
        self.error_message(&err.to_string());
    }

    /// Writes and flushes one line. Failures to write are reported to the
    /// `log` facade and otherwise ignored.
    fn line(&mut self, level: Level, line: String) {
        log::log!(level, "{}", line);
        let result = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush());
        if let Err(err) = result {
            error!("failed to write event log: {}", err);
        }
    }
}
