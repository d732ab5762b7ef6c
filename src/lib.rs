pub mod error;
pub mod math;
pub mod polygon;
pub mod ring;
pub mod triangulation;

pub use error::{BreachError, Result};
pub use polygon::Polygon;
pub use triangulation::{TriangulatePolygon, Triangulation, TriangulationParams};
