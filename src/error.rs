use thiserror::Error;

/// Top-level error type for polygon triangulation.
#[derive(Debug, Error)]
pub enum BreachError {
    #[error(transparent)]
    Ring(#[from] RingError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
}

/// Errors raised by the vertex ring itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("ring node not found")]
    NodeNotFound,

    #[error("cannot remove the last node of a ring")]
    LastNode,

    #[error("a ring needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("vertex {index} coincides with its predecessor")]
    DuplicateVertex { index: usize },
}

/// Which boundary of a polygon an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Outer,
    Hole(usize),
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outer => write!(f, "outer boundary"),
            Self::Hole(i) => write!(f, "hole {i}"),
        }
    }
}

/// Errors raised while building the merged (hole-free) ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("{boundary} has {count} vertices, at least 3 are required")]
    TooFewVertices { boundary: Boundary, count: usize },

    #[error("{boundary} encloses no area")]
    Degenerate { boundary: Boundary },

    #[error("no boundary edge crosses the bridge ray of hole {hole}; is it enclosed?")]
    NoBridgeEdge { hole: usize },

    #[error("no intersection found for the bridge ray of hole {hole}")]
    NoIntersection { hole: usize },

    #[error("{boundary}: {source}")]
    Ring {
        boundary: Boundary,
        #[source]
        source: RingError,
    },
}

/// Errors raised by the ear-clipping loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulationError {
    #[error("no ear found with {remaining} vertices left")]
    NoEarFound { remaining: usize },

    #[error("iteration limit of {limit} passes exceeded")]
    IterationLimit { limit: usize },

    #[error(transparent)]
    Ring(#[from] RingError),
}

/// Convenience type alias for results using [`BreachError`].
pub type Result<T> = std::result::Result<T, BreachError>;
