//! Merging holes into the outer boundary.
//!
//! Each hole is joined to a mutually visible vertex of the working ring by a
//! zero-area bridge: the two connecting vertices are duplicated so the ring
//! walks out to the hole, around it, and back along the same segment. The
//! result is one simple ring enclosing the same area as the polygon.

use tracing::{debug, warn};

use crate::error::{Boundary, ConstructionError, RingError};
use crate::math::angle_2d::angle_between;
use crate::math::intersect_2d::{point_at, ray_segment_intersect_2d};
use crate::math::polygon_2d::{self, x_most, Winding};
use crate::math::triangle_2d::{area, contains, cross};
use crate::math::{Point2, Tolerance, Vector2, DEFAULT_RELATIVE_TOLERANCE, TOLERANCE};
use crate::ring::{NodeId, Vertex, VertexRing};

use super::Polygon;

/// Record of one hole merged into the working ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    /// Position of the hole in [`Polygon::holes`].
    pub hole: usize,
    /// Index of the hole's x-most vertex.
    pub anchor: usize,
    /// Index of the ring vertex the anchor was joined to.
    pub visible: usize,
    /// Index of the duplicate of `anchor`.
    pub anchor_copy: usize,
    /// Index of the duplicate of `visible`.
    pub visible_copy: usize,
}

/// A single hole-free ring equivalent to a polygon with holes.
#[derive(Debug, Clone)]
pub struct BridgedRing {
    /// The merged ring.
    pub ring: VertexRing,
    /// Vertex positions ordered by stable index: outer vertices, then each
    /// hole's vertices in bridging order, then bridge duplicates.
    pub positions: Vec<Point2>,
    /// Orientation of the merged ring.
    pub winding: Winding,
    /// Bridges in the order they were built.
    pub bridges: Vec<Bridge>,
}

/// Merges every hole of a [`Polygon`] into its outer boundary.
pub struct BridgeHoles<'a> {
    polygon: &'a Polygon,
    winding: Option<Winding>,
    tolerance: Tolerance,
}

impl<'a> BridgeHoles<'a> {
    /// Creates a new `BridgeHoles` operation.
    ///
    /// The winding is detected from the outer boundary and tolerances are
    /// scaled to its bounding box unless overridden.
    #[must_use]
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            winding: None,
            tolerance: polygon.tolerance(DEFAULT_RELATIVE_TOLERANCE),
        }
    }

    /// Fixes the ring orientation instead of detecting it.
    #[must_use]
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = Some(winding);
        self
    }

    /// Sets the tolerances used by the visibility search.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the merge, returning one simple ring.
    ///
    /// # Errors
    ///
    /// Returns an error if any boundary has fewer than 3 vertices or repeats
    /// a vertex, if the outer boundary has no area, or if a hole cannot be
    /// bridged (typically because it is not enclosed by the outer boundary).
    pub fn execute(&self) -> Result<BridgedRing, ConstructionError> {
        let outer = self.polygon.outer();
        let holes = self.polygon.holes();

        if outer.len() < 3 {
            return Err(ConstructionError::TooFewVertices {
                boundary: Boundary::Outer,
                count: outer.len(),
            });
        }
        if let Some((i, hole)) = holes.iter().enumerate().find(|(_, h)| h.len() < 3) {
            return Err(ConstructionError::TooFewVertices {
                boundary: Boundary::Hole(i),
                count: hole.len(),
            });
        }

        let winding = match self.winding {
            Some(winding) => winding,
            None => polygon_2d::winding(outer, self.tolerance.area).ok_or(
                ConstructionError::Degenerate {
                    boundary: Boundary::Outer,
                },
            )?,
        };

        let mut ring = VertexRing::from_points(outer).map_err(|source| ConstructionError::Ring {
            boundary: Boundary::Outer,
            source,
        })?;
        let mut positions = outer.to_vec();

        // Right-most hole first; each bridge reshapes the ring later searches scan.
        let mut order: Vec<(usize, usize)> = holes
            .iter()
            .enumerate()
            .filter_map(|(i, h)| x_most(h).map(|anchor| (i, anchor)))
            .collect();
        order.sort_by(|a, b| holes[b.0][b.1].x.total_cmp(&holes[a.0][a.1].x));

        let mut hole_rings = Vec::with_capacity(order.len());
        for (hole, anchor) in order {
            let first = positions.len();
            let hole_ring =
                VertexRing::from_points_indexed(&holes[hole], first).map_err(in_hole(hole))?;
            if polygon_2d::winding(&holes[hole], self.tolerance.area) == Some(winding) {
                warn!(hole, "hole is wound like the outer boundary");
            }
            positions.extend_from_slice(&holes[hole]);
            hole_rings.push((hole, first + anchor, hole_ring));
        }

        let mut bridges = Vec::with_capacity(hole_rings.len());
        for (hole, anchor, hole_ring) in &hole_rings {
            let bridge = merge_hole(
                &mut ring,
                &mut positions,
                *hole,
                *anchor,
                hole_ring,
                winding,
                &self.tolerance,
            )?;
            bridges.push(bridge);
        }

        Ok(BridgedRing {
            ring,
            positions,
            winding,
            bridges,
        })
    }
}

fn in_hole(hole: usize) -> impl Fn(RingError) -> ConstructionError + Copy {
    move |source| ConstructionError::Ring {
        boundary: Boundary::Hole(hole),
        source,
    }
}

/// Splices one hole into `ring` after its mutually visible vertex.
///
/// The ring becomes `M, H, .., H', M', next(M)` where `H` is the hole's
/// x-most vertex walked for one circuit in the hole's own winding and `H'`,
/// `M'` are duplicates.
fn merge_hole(
    ring: &mut VertexRing,
    positions: &mut Vec<Point2>,
    hole: usize,
    anchor: usize,
    hole_ring: &VertexRing,
    winding: Winding,
    tolerance: &Tolerance,
) -> Result<Bridge, ConstructionError> {
    let err = in_hole(hole);
    let (anchor_id, anchor_pos) = hole_ring
        .iter()
        .find(|(_, v)| v.index == anchor)
        .map(|(id, v)| (id, v.position))
        .ok_or(err(RingError::NodeNotFound))?;

    let visible_id = find_visible(ring, &anchor_pos, hole, winding, tolerance)?;
    let visible = *ring.vertex(visible_id).map_err(err)?;

    let visible_copy = positions.len();
    let anchor_copy = visible_copy + 1;

    let mut cursor = visible_id;
    for (_, vertex) in hole_ring.iter_from(anchor_id) {
        cursor = ring.insert_after(cursor, *vertex).map_err(err)?;
    }
    cursor = ring
        .insert_after(cursor, Vertex::new(anchor_pos, anchor_copy))
        .map_err(err)?;
    ring.insert_after(cursor, Vertex::new(visible.position, visible_copy))
        .map_err(err)?;

    positions.push(visible.position);
    positions.push(anchor_pos);

    debug!(
        hole,
        anchor,
        visible = visible.index,
        ring_len = ring.len(),
        "bridged hole"
    );

    Ok(Bridge {
        hole,
        anchor,
        visible: visible.index,
        anchor_copy,
        visible_copy,
    })
}

/// Finds a ring vertex visible from `anchor` along a +x ray.
fn find_visible(
    ring: &VertexRing,
    anchor: &Point2,
    hole: usize,
    winding: Winding,
    tolerance: &Tolerance,
) -> Result<NodeId, ConstructionError> {
    let err = in_hole(hole);
    let ray = Vector2::x();

    let mut straddling = false;
    let mut closest: Option<(f64, NodeId, NodeId)> = None;
    for (id, vertex) in ring {
        let next = ring.next(id).map_err(err)?;
        let a = vertex.position;
        let b = ring.position(next).map_err(err)?;
        if a.x <= anchor.x && b.x <= anchor.x {
            continue;
        }
        if (a.y > anchor.y) == (b.y > anchor.y) {
            continue;
        }
        straddling = true;
        let Some((t1, _)) = ray_segment_intersect_2d(anchor, &ray, &a, &b) else {
            continue;
        };
        if closest.is_none_or(|(best, _, _)| t1 < best) {
            closest = Some((t1, id, next));
        }
    }

    let Some((t1, start, end)) = closest else {
        return Err(if straddling {
            ConstructionError::NoIntersection { hole }
        } else {
            ConstructionError::NoBridgeEdge { hole }
        });
    };

    let a = ring.position(start).map_err(err)?;
    let b = ring.position(end).map_err(err)?;
    let candidate = if (a.x - b.x).abs() > tolerance.length {
        if a.x > b.x {
            start
        } else {
            end
        }
    } else if (b.y - anchor.y).abs() < (a.y - anchor.y).abs() {
        end
    } else {
        start
    };
    let candidate_pos = if candidate == start { a } else { b };
    let hit = point_at(anchor, &ray, t1);

    // Vertices inside (anchor, hit, candidate) may occlude the candidate; the
    // one closest in angle to the ray is visible.
    let mut visible = candidate;
    if area(anchor, &hit, &candidate_pos) > tolerance.area {
        let mut best: Option<(f64, f64)> = None;
        for (id, vertex) in ring {
            let p = vertex.position;
            if tolerance.coincident(&p, &candidate_pos)
                || !contains(anchor, &hit, &candidate_pos, &p, tolerance.area)
            {
                continue;
            }
            let offset = p - anchor;
            let angle = angle_between(&ray, &offset);
            let distance = offset.norm_squared();
            let better = match best {
                None => true,
                Some((best_angle, best_distance)) => {
                    angle < best_angle - TOLERANCE
                        || ((angle - best_angle).abs() <= TOLERANCE && distance < best_distance)
                }
            };
            if better {
                best = Some((angle, distance));
                visible = id;
            }
        }
    }

    resolve_shared(ring, visible, anchor, winding, tolerance).map_err(err)
}

/// Picks, among live nodes sharing `chosen`'s position, one whose interior
/// wedge contains `target`.
///
/// Earlier bridges leave two nodes at the same position; only one of them
/// faces the side the new hole lies on.
fn resolve_shared(
    ring: &VertexRing,
    chosen: NodeId,
    target: &Point2,
    winding: Winding,
    tolerance: &Tolerance,
) -> Result<NodeId, RingError> {
    if locally_inside(ring, chosen, target, winding)? {
        return Ok(chosen);
    }
    let position = ring.position(chosen)?;
    for (id, vertex) in ring {
        if id != chosen
            && tolerance.coincident(&vertex.position, &position)
            && locally_inside(ring, id, target, winding)?
        {
            return Ok(id);
        }
    }
    Ok(chosen)
}

/// Whether `target` lies in the interior wedge at `id`.
fn locally_inside(
    ring: &VertexRing,
    id: NodeId,
    target: &Point2,
    winding: Winding,
) -> Result<bool, RingError> {
    let s = winding.sign();
    let here = ring.position(id)?;
    let prev = ring.position(ring.prev(id)?)?;
    let next = ring.position(ring.next(id)?)?;

    let left_of_outgoing = s * cross(&here, &next, target) >= 0.0;
    let left_of_incoming = s * cross(&prev, &here, target) >= 0.0;
    Ok(if s * cross(&prev, &here, &next) >= 0.0 {
        left_of_outgoing && left_of_incoming
    } else {
        left_of_outgoing || left_of_incoming
    })
}
