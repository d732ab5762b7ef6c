mod bridge;

pub use bridge::{Bridge, BridgeHoles, BridgedRing};

use crate::math::polygon_2d::{signed_area_2d, winding, Bounds2, Winding};
use crate::math::{Point2, Tolerance, DEFAULT_RELATIVE_TOLERANCE};

/// A planar polygon: one outer boundary plus zero or more holes.
///
/// Holes are assumed to be simple, fully enclosed by the outer boundary,
/// mutually non-overlapping and wound opposite to it. None of this is
/// verified; an unenclosed hole surfaces as a bridging error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    outer: Vec<Point2>,
    holes: Vec<Vec<Point2>>,
}

impl Polygon {
    /// Creates a polygon without holes.
    #[must_use]
    pub fn new(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Adds a hole, builder style.
    #[must_use]
    pub fn with_hole(mut self, hole: Vec<Point2>) -> Self {
        self.add_hole(hole);
        self
    }

    /// Adds a hole. Holes accumulate: a surface hit repeatedly keeps every
    /// earlier cavity.
    pub fn add_hole(&mut self, hole: Vec<Point2>) {
        self.holes.push(hole);
    }

    /// The outer boundary.
    #[must_use]
    pub fn outer(&self) -> &[Point2] {
        &self.outer
    }

    /// The hole boundaries in insertion order.
    #[must_use]
    pub fn holes(&self) -> &[Vec<Point2>] {
        &self.holes
    }

    /// Enclosed area: the outer boundary's area minus every hole's area.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area_2d(h).abs()).sum();
        signed_area_2d(&self.outer).abs() - holes
    }

    /// Winding of the outer boundary, or `None` if it encloses no area at the
    /// default tolerance.
    #[must_use]
    pub fn winding(&self) -> Option<Winding> {
        winding(&self.outer, self.tolerance(DEFAULT_RELATIVE_TOLERANCE).area)
    }

    /// Tolerances scaled to the outer boundary's bounding box.
    #[must_use]
    pub fn tolerance(&self, relative: f64) -> Tolerance {
        let extent = Bounds2::of(&self.outer).map_or(1.0, |b| b.extent());
        Tolerance::from_extent(extent, relative)
    }
}
