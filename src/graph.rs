use crate::error::{NavError, NavResult};
use crate::math::{LineSegment2d, Point2d};
use crate::util::Interval;
use log::{error, info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// The key of a vertex in the navigation graph.
///
/// Graph files refer to vertices by number in `lanes` but by string in
/// `vertex_coords`, so both forms deserialize to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VertexId(String);

impl VertexId {
    /// Creates a vertex ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Gets the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for VertexId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(id) => Self(id.to_string()),
            RawId::Text(id) => Self(id),
        })
    }
}

/// A directed lane between two vertices.
///
/// In a graph file a lane is written as a `[start, end, metadata]` triple.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Lane {
    /// The vertex the lane starts at.
    pub start: VertexId,
    /// The vertex the lane ends at.
    pub end: VertexId,
    /// Opaque per-lane data carried through from the graph file.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Lane {
    /// Creates a lane with no metadata.
    pub fn new(start: impl Into<VertexId>, end: impl Into<VertexId>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Returns true if the lane joins `a` and `b`, in either direction.
    pub fn joins(&self, a: &VertexId, b: &VertexId) -> bool {
        (self.start == *a && self.end == *b) || (self.start == *b && self.end == *a)
    }
}

/// A point on the graph: a lane index and a position along that lane,
/// where 0 is the lane's start vertex and 1 its end vertex.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneLocation {
    /// Index of the lane in the graph's lane sequence.
    pub lane: usize,
    /// The fractional position along the lane.
    pub pos: f64,
}

impl LaneLocation {
    /// Creates a new lane location.
    pub const fn new(lane: usize, pos: f64) -> Self {
        Self { lane, pos }
    }

    /// A hashable key which is equal for equal locations.
    pub(crate) fn key(&self) -> (usize, u64) {
        // -0.0 + 0.0 == +0.0
        (self.lane, (self.pos + 0.0).to_bits())
    }
}

/// The on-disk layout of a navigation graph.
#[derive(Deserialize)]
struct GraphDocument {
    #[serde(default)]
    lanes: Vec<Lane>,
    #[serde(default)]
    vertex_coords: HashMap<VertexId, [f64; 2]>,
}

/// A navigation graph of vertices joined by lanes.
#[derive(Clone, Debug, Default)]
pub struct NavGraph {
    /// Vertex coordinates, keyed by vertex ID.
    vertices: HashMap<VertexId, Point2d>,
    /// The lanes; a lane's identity is its index here.
    lanes: Vec<Lane>,
    /// Whether the graph has been fitted to a canvas.
    fitted: bool,
}

impl NavGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses a graph from a JSON document with `lanes` and `vertex_coords` keys.
    pub fn from_json_str(json: &str) -> NavResult<Self> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        let vertices = doc
            .vertex_coords
            .into_iter()
            .map(|(id, [x, y])| (id, Point2d::new(x, y)))
            .collect();
        Ok(Self {
            vertices,
            lanes: doc.lanes,
            fitted: false,
        })
    }

    /// Loads a graph from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> NavResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads a graph from a JSON file, falling back to an empty graph
    /// if the file is missing or invalid.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(graph) => {
                info!(
                    "loaded {} vertices and {} lanes from {}",
                    graph.vertices.len(),
                    graph.lanes.len(),
                    path.display()
                );
                graph
            }
            Err(err) => {
                error!("failed to load graph from {}: {}", path.display(), err);
                Self::new()
            }
        }
    }

    /// Adds a vertex, replacing the coordinates of any vertex with the same ID.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>, coords: Point2d) {
        self.vertices.insert(id.into(), coords);
    }

    /// Appends a lane and returns its index.
    ///
    /// The endpoints are not checked here; lookups through a lane
    /// with a missing vertex fail with [NavError::VertexNotFound].
    pub fn add_lane(&mut self, lane: Lane) -> usize {
        self.lanes.push(lane);
        self.lanes.len() - 1
    }

    /// Returns true if the graph has no lanes.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Gets the lanes in declaration order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Returns an iterator over the vertices and their coordinates.
    pub fn vertices(&self) -> impl Iterator<Item = (&VertexId, Point2d)> {
        self.vertices.iter().map(|(id, coords)| (id, *coords))
    }

    /// Gets the lane with the given index.
    pub fn lane(&self, lane: usize) -> NavResult<&Lane> {
        self.lanes.get(lane).ok_or(NavError::LaneNotFound(lane))
    }

    /// Gets the coordinates of a vertex.
    pub fn vertex(&self, id: &VertexId) -> NavResult<Point2d> {
        self.vertices
            .get(id)
            .copied()
            .ok_or_else(|| NavError::VertexNotFound(id.clone()))
    }

    /// Gets the straight line segment a lane runs along.
    pub fn lane_segment(&self, lane: usize) -> NavResult<LineSegment2d> {
        let lane = self.lane(lane)?;
        Ok(LineSegment2d::from_ends(
            self.vertex(&lane.start)?,
            self.vertex(&lane.end)?,
        ))
    }

    /// Gets the coordinates of the point at `pos` along a lane.
    ///
    /// `pos` is not clamped, so values outside `[0, 1]` extrapolate past the lane's ends.
    pub fn coord_of(&self, lane: usize, pos: f64) -> NavResult<Point2d> {
        Ok(self.lane_segment(lane)?.sample(pos))
    }

    /// Gets the coordinates of a graph-relative location.
    pub fn location_coords(&self, location: LaneLocation) -> NavResult<Point2d> {
        self.coord_of(location.lane, location.pos)
    }

    /// Finds the first lane, in declaration order, joining two vertices in either direction.
    pub fn lane_between(&self, a: &VertexId, b: &VertexId) -> Option<usize> {
        self.lanes.iter().position(|lane| lane.joins(a, b))
    }

    /// Returns true if [Self::fit_to_canvas] has already transformed the graph.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Scales and translates the vertices so the graph fills a `width` by `height`
    /// canvas, leaving `margin` on each side.
    ///
    /// The scale is uniform. If the graph has no extent along either axis,
    /// `fallback_scale` is used instead. The transform is applied at most once;
    /// later calls are ignored. Returns whether the transform was applied.
    pub fn fit_to_canvas(&mut self, width: f64, height: f64, margin: f64, fallback_scale: f64) -> bool {
        if self.fitted {
            warn!("graph has already been fitted to a canvas, ignoring");
            return false;
        }

        let mut points = self.vertices.values();
        let Some(first) = points.next() else {
            return false;
        };
        let mut xs = Interval::around(first.x);
        let mut ys = Interval::around(first.y);
        for point in points {
            xs.extend(point.x);
            ys.extend(point.y);
        }

        let scale = if xs.length() > 0.0 && ys.length() > 0.0 {
            f64::min(
                (width - 2.0 * margin) / xs.length(),
                (height - 2.0 * margin) / ys.length(),
            )
        } else {
            fallback_scale
        };

        for point in self.vertices.values_mut() {
            point.x = (point.x - xs.min) * scale + margin;
            point.y = (point.y - ys.min) * scale + margin;
        }
        self.fitted = true;
        true
    }
}
