use crate::math::Point2;

/// A vertex record stored in a [`VertexRing`](super::VertexRing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// The 2D position of the vertex.
    pub position: Point2,
    /// Stable index, assigned once and referenced by output triangles.
    pub index: usize,
    /// Whether the interior angle at this vertex is below 180°.
    pub convex: bool,
}

impl Vertex {
    /// Creates a new vertex, initially flagged reflex.
    #[must_use]
    pub fn new(position: Point2, index: usize) -> Self {
        Self {
            position,
            index,
            convex: false,
        }
    }
}
