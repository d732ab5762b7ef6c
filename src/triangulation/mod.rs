pub mod convexity;
mod ear_clip;

pub use ear_clip::{EarClipper, Step};

use tracing::{debug, warn};

use crate::error::{Result, TriangulationError};
use crate::math::polygon_2d::Winding;
use crate::math::triangle_2d::area;
use crate::math::{Point2, Tolerance, DEFAULT_RELATIVE_TOLERANCE};
use crate::polygon::{BridgeHoles, BridgedRing, Polygon};

/// Which ring vertices the ear test checks as potential occluders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Occluders {
    /// Every live vertex.
    #[default]
    All,
    /// Reflex vertices only. A convex vertex can only lie inside a candidate
    /// ear if a reflex one does too.
    ReflexOnly,
}

/// Parameters controlling triangulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationParams {
    /// Tolerance relative to the outer boundary's bounding-box extent.
    pub relative_tolerance: f64,
    /// Hard ceiling on ear-removal passes.
    pub max_passes: usize,
    /// Vertices checked by the ear test.
    pub occluders: Occluders,
    /// Ring orientation; detected from the outer boundary when `None`.
    pub winding: Option<Winding>,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            max_passes: 8192,
            occluders: Occluders::All,
            winding: None,
        }
    }
}

/// Result of triangulating a polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    /// Vertex positions ordered by stable index.
    vertices: Vec<Point2>,
    /// Flat triangle index buffer (each triple defines a triangle).
    indices: Vec<usize>,
}

impl Triangulation {
    /// Triangulates an already bridged ring.
    ///
    /// # Errors
    ///
    /// Returns an error if ear clipping fails.
    pub fn from_bridged(
        bridged: BridgedRing,
        tolerance: Tolerance,
        params: &TriangulationParams,
    ) -> std::result::Result<Self, TriangulationError> {
        let BridgedRing {
            ring,
            positions,
            winding,
            ..
        } = bridged;
        let indices = EarClipper::new(ring, winding, tolerance, params)?.run()?;
        Ok(Self {
            vertices: positions,
            indices,
        })
    }

    /// Vertex positions ordered by stable index.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Flat triangle index buffer.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Iterates triangles as corner positions.
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point2; 3]> + '_ {
        self.triangles()
            .map(|[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    /// Total area covered by the triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangle_points().map(|[a, b, c]| area(&a, &b, &c)).sum()
    }

    /// Consumes the triangulation, returning `(vertices, indices)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point2>, Vec<usize>) {
        (self.vertices, self.indices)
    }
}

/// Triangulates a polygon with holes.
pub struct TriangulatePolygon<'a> {
    polygon: &'a Polygon,
    params: TriangulationParams,
}

impl<'a> TriangulatePolygon<'a> {
    /// Creates a new `TriangulatePolygon` operation with default parameters.
    #[must_use]
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            params: TriangulationParams::default(),
        }
    }

    /// Sets custom triangulation parameters.
    #[must_use]
    pub fn with_params(mut self, params: TriangulationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns a construction error if the holes cannot be merged into the
    /// outer boundary, or a triangulation error if ear clipping fails.
    pub fn execute(&self) -> Result<Triangulation> {
        let tolerance = self.polygon.tolerance(self.params.relative_tolerance);

        let mut bridge = BridgeHoles::new(self.polygon).with_tolerance(tolerance);
        if let Some(winding) = self.params.winding {
            bridge = bridge.with_winding(winding);
        }
        let bridged = bridge.execute().inspect_err(|e| warn!(%e, "bridging failed"))?;
        debug!(
            holes = bridged.bridges.len(),
            vertices = bridged.positions.len(),
            "merged holes"
        );

        let triangulation = Triangulation::from_bridged(bridged, tolerance, &self.params)
            .inspect_err(|e| warn!(%e, "ear clipping failed"))?;
        Ok(triangulation)
    }
}

impl Polygon {
    /// Triangulates this polygon with default parameters.
    ///
    /// # Errors
    ///
    /// See [`TriangulatePolygon::execute`].
    pub fn triangulate(&self) -> Result<Triangulation> {
        TriangulatePolygon::new(self).execute()
    }
}
