//! Error type shared by the graph model, the fleet and the shell.
//!
//! None of these errors are fatal: the shell reports them to its event log and
//! drops the operation that produced them.

use thiserror::Error;

use crate::{RobotId, VertexId};

/// Errors produced while loading or querying the navigation graph and fleet.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("lane {0} not found")]
    LaneNotFound(usize),

    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("robot {0:?} not found")]
    RobotNotFound(RobotId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for this crate.
pub type NavResult<T> = Result<T, NavError>;
