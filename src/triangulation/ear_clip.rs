use tracing::trace;

use crate::error::{RingError, TriangulationError};
use crate::math::polygon_2d::Winding;
use crate::math::triangle_2d::{contains, contains_strictly, signed_area};
use crate::math::Tolerance;
use crate::ring::{NodeId, VertexRing};

use super::convexity::{classify, reclassify};
use super::{Occluders, TriangulationParams};

/// Outcome of one [`EarClipper::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An ear was removed, emitting this triangle.
    Clipped([usize; 3]),
    /// Two vertices remain; the ring's area is consumed.
    Done,
}

/// Reduces a simple ring to triangles by repeatedly removing ears.
///
/// Every pass scans from the ring head and removes the first ear found,
/// emitting `(prev, ear, next)` by stable index. Only the two neighbours of a
/// removed ear have their convexity recomputed.
#[derive(Debug)]
pub struct EarClipper {
    ring: VertexRing,
    winding: Winding,
    tolerance: Tolerance,
    occluders: Occluders,
    max_passes: usize,
    passes: usize,
}

impl EarClipper {
    /// Creates a clipper over `ring`, classifying every vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring's links are inconsistent.
    pub fn new(
        mut ring: VertexRing,
        winding: Winding,
        tolerance: Tolerance,
        params: &TriangulationParams,
    ) -> Result<Self, TriangulationError> {
        classify(&mut ring, winding)?;
        Ok(Self {
            ring,
            winding,
            tolerance,
            occluders: params.occluders,
            max_passes: params.max_passes,
            passes: 0,
        })
    }

    /// Live vertices left in the ring.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.ring.len()
    }

    /// Removes one ear.
    ///
    /// # Errors
    ///
    /// Returns an error if no ear exists or the iteration ceiling is hit.
    pub fn step(&mut self) -> Result<Step, TriangulationError> {
        match self.ring.len() {
            0..=2 => return Ok(Step::Done),
            _ if self.passes >= self.max_passes => {
                return Err(TriangulationError::IterationLimit {
                    limit: self.max_passes,
                })
            }
            3 => {
                self.passes += 1;
                let first = self.ring.head();
                let triangle = self.last_triangle(first)?;
                if self.is_flipped(first)? {
                    return Err(TriangulationError::NoEarFound { remaining: 3 });
                }
                self.ring.remove(first)?;
                trace!(?triangle, "final triangle");
                return Ok(Step::Clipped(triangle));
            }
            _ => self.passes += 1,
        }

        let ear = match self.find_ear(false)? {
            Some(ear) => ear,
            None => self
                .find_ear(true)?
                .ok_or(TriangulationError::NoEarFound {
                    remaining: self.ring.len(),
                })?,
        };

        let prev = self.ring.prev(ear)?;
        let next = self.ring.next(ear)?;
        let triangle = [
            self.ring.vertex(prev)?.index,
            self.ring.vertex(ear)?.index,
            self.ring.vertex(next)?.index,
        ];
        self.ring.remove(ear)?;

        // Removing an ear never makes a convex neighbour reflex.
        if !self.ring.vertex(prev)?.convex {
            reclassify(&mut self.ring, prev, self.winding)?;
        }
        if !self.ring.vertex(next)?.convex {
            reclassify(&mut self.ring, next, self.winding)?;
        }

        trace!(?triangle, remaining = self.ring.len(), "clipped ear");
        Ok(Step::Clipped(triangle))
    }

    /// Runs to completion, returning the flat triangle index buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if no ear exists at some point or the iteration
    /// ceiling is hit; no partial buffer is returned.
    pub fn run(mut self) -> Result<Vec<usize>, TriangulationError> {
        let mut indices = Vec::with_capacity(3 * self.ring.len().saturating_sub(2));
        while let Step::Clipped(triangle) = self.step()? {
            indices.extend_from_slice(&triangle);
        }
        Ok(indices)
    }

    fn last_triangle(&self, first: NodeId) -> Result<[usize; 3], RingError> {
        let second = self.ring.next(first)?;
        let third = self.ring.next(second)?;
        Ok([
            self.ring.vertex(first)?.index,
            self.ring.vertex(second)?.index,
            self.ring.vertex(third)?.index,
        ])
    }

    /// Whether the triangle left at `first` turns against the ring's winding.
    /// A collinear remainder is not flipped.
    fn is_flipped(&self, first: NodeId) -> Result<bool, RingError> {
        if self.ring.vertex(first)?.convex {
            return Ok(false);
        }
        let second = self.ring.next(first)?;
        let third = self.ring.next(second)?;
        let area = signed_area(
            &self.ring.position(first)?,
            &self.ring.position(second)?,
            &self.ring.position(third)?,
        );
        Ok(self.winding.sign() * area < -self.tolerance.area)
    }

    /// First convex vertex from the head whose triangle is unobstructed.
    ///
    /// With `strict` unset, vertices on the triangle's edges obstruct it too;
    /// the strict scan is the fallback when that finds nothing.
    fn find_ear(&self, strict: bool) -> Result<Option<NodeId>, RingError> {
        for (id, vertex) in &self.ring {
            if !vertex.convex {
                continue;
            }
            let prev = self.ring.prev(id)?;
            let next = self.ring.next(id)?;
            if self.is_ear(prev, id, next, strict)? {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    fn is_ear(
        &self,
        prev: NodeId,
        ear: NodeId,
        next: NodeId,
        strict: bool,
    ) -> Result<bool, RingError> {
        let a = self.ring.position(prev)?;
        let b = self.ring.position(ear)?;
        let c = self.ring.position(next)?;
        let inside = if strict { contains_strictly } else { contains };

        for (id, vertex) in &self.ring {
            if id == prev || id == ear || id == next {
                continue;
            }
            if self.occluders == Occluders::ReflexOnly && vertex.convex {
                continue;
            }
            let p = vertex.position;
            // Bridge duplicates share a corner's position without entering
            // the triangle.
            if self.tolerance.coincident(&p, &a)
                || self.tolerance.coincident(&p, &b)
                || self.tolerance.coincident(&p, &c)
            {
                continue;
            }
            if inside(&a, &b, &c, &p, self.tolerance.area) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn clipper(points: &[Point2], params: &TriangulationParams) -> EarClipper {
        let ring = VertexRing::from_points(points).unwrap();
        EarClipper::new(ring, Winding::CounterClockwise, Tolerance::default(), params).unwrap()
    }

    #[test]
    fn square_steps() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let mut clipper = clipper(&square, &TriangulationParams::default());
        assert_eq!(clipper.step().unwrap(), Step::Clipped([3, 0, 1]));
        assert_eq!(clipper.remaining(), 3);
        assert_eq!(clipper.step().unwrap(), Step::Clipped([1, 2, 3]));
        assert_eq!(clipper.step().unwrap(), Step::Done);
        assert_eq!(clipper.step().unwrap(), Step::Done);
    }

    #[test]
    fn reflex_vertex_is_skipped() {
        // Arrow head: the notch at index 3 is reflex.
        let arrow = [p(0.0, 0.0), p(2.0, 1.0), p(0.0, 2.0), p(0.5, 1.0)];
        let indices = clipper(&arrow, &TriangulationParams::default()).run().unwrap();
        assert_eq!(indices, vec![3, 0, 1, 1, 2, 3]);
    }

    #[test]
    fn collinear_vertex_is_reclassified() {
        let pts = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)];
        let indices = clipper(&pts, &TriangulationParams::default()).run().unwrap();
        assert_eq!(indices.len(), 9);
        assert_eq!(&indices[..3], &[4, 0, 1]);
    }

    #[test]
    fn wrong_winding_finds_no_ear() {
        let cw = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        let err = clipper(&cw, &TriangulationParams::default()).run().unwrap_err();
        assert_eq!(err, TriangulationError::NoEarFound { remaining: 4 });
    }

    #[test]
    fn wrong_winding_triangle_finds_no_ear() {
        let cw = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)];
        let mut clipper = clipper(&cw, &TriangulationParams::default());
        let err = clipper.step().unwrap_err();
        assert_eq!(err, TriangulationError::NoEarFound { remaining: 3 });
        assert_eq!(clipper.remaining(), 3);
    }

    #[test]
    fn iteration_ceiling() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let params = TriangulationParams {
            max_passes: 1,
            ..TriangulationParams::default()
        };
        let err = clipper(&square, &params).run().unwrap_err();
        assert_eq!(err, TriangulationError::IterationLimit { limit: 1 });
    }

    #[test]
    fn reflex_only_occluders_agree() {
        let pts = [
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        let all = clipper(&pts, &TriangulationParams::default()).run().unwrap();
        let params = TriangulationParams {
            occluders: Occluders::ReflexOnly,
            ..TriangulationParams::default()
        };
        let reflex = clipper(&pts, &params).run().unwrap();
        assert_eq!(all, reflex);
    }
}
