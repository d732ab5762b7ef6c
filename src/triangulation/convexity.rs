use crate::error::RingError;
use crate::math::angle_2d::full_turn_angle;
use crate::math::polygon_2d::Winding;
use crate::math::Point2;
use crate::ring::{NodeId, VertexRing};

/// Interior angle in degrees at `here`, given its ring neighbours.
///
/// Measured from the outgoing edge to the incoming edge, turning with the
/// ring's winding, so it lies in `[0, 360)`.
#[must_use]
pub fn interior_angle(prev: &Point2, here: &Point2, next: &Point2, winding: Winding) -> f64 {
    let outgoing = next - here;
    let incoming = prev - here;
    match winding {
        Winding::CounterClockwise => full_turn_angle(&outgoing, &incoming),
        Winding::Clockwise => full_turn_angle(&incoming, &outgoing),
    }
}

/// A vertex is convex iff its interior angle is below 180°.
#[must_use]
pub fn is_convex(prev: &Point2, here: &Point2, next: &Point2, winding: Winding) -> bool {
    interior_angle(prev, here, next, winding) < 180.0
}

/// Recomputes the convexity flag of `id` against its current neighbours.
///
/// # Errors
///
/// Returns an error if `id` is not in the ring.
pub fn reclassify(ring: &mut VertexRing, id: NodeId, winding: Winding) -> Result<bool, RingError> {
    let prev = ring.position(ring.prev(id)?)?;
    let next = ring.position(ring.next(id)?)?;
    let vertex = ring.vertex_mut(id)?;
    vertex.convex = is_convex(&prev, &vertex.position, &next, winding);
    Ok(vertex.convex)
}

/// Classifies every vertex of the ring.
///
/// # Errors
///
/// Returns an error if the ring's links are inconsistent.
pub fn classify(ring: &mut VertexRing, winding: Winding) -> Result<(), RingError> {
    let ids: Vec<NodeId> = ring.iter().map(|(id, _)| id).collect();
    for id in ids {
        reclassify(ring, id, winding)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn square_corner_ccw() {
        let angle = interior_angle(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0), Winding::CounterClockwise);
        assert_relative_eq!(angle, 90.0);
    }

    #[test]
    fn square_corner_cw() {
        let angle = interior_angle(&p(1.0, 1.0), &p(1.0, 0.0), &p(0.0, 0.0), Winding::Clockwise);
        assert_relative_eq!(angle, 90.0);
    }

    #[test]
    fn reflex_corner() {
        let angle = interior_angle(&p(0.6, 0.6), &p(0.6, 0.4), &p(0.4, 0.4), Winding::CounterClockwise);
        assert_relative_eq!(angle, 270.0);
        assert!(!is_convex(&p(0.6, 0.6), &p(0.6, 0.4), &p(0.4, 0.4), Winding::CounterClockwise));
    }

    #[test]
    fn straight_vertex_is_reflex() {
        assert!(!is_convex(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0), Winding::CounterClockwise));
    }

    #[test]
    fn classify_l_shape() {
        let pts = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        let mut ring = VertexRing::from_points(&pts).unwrap();
        classify(&mut ring, Winding::CounterClockwise).unwrap();
        let flags: Vec<bool> = ring.iter().map(|(_, v)| v.convex).collect();
        assert_eq!(flags, vec![true, true, true, false, true, true]);
    }

    #[test]
    fn reclassify_after_removal() {
        let pts = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(1.0, 1.0)];
        let mut ring = VertexRing::from_points(&pts).unwrap();
        classify(&mut ring, Winding::CounterClockwise).unwrap();
        let middle = ring.next(ring.head()).unwrap();
        assert!(!ring.vertex(middle).unwrap().convex);

        ring.remove(ring.head()).unwrap();
        // (1, 0) now sits between (1, 1) and (2, 0).
        assert!(reclassify(&mut ring, middle, Winding::CounterClockwise).unwrap());
    }
}
