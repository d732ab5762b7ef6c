//! Circular, mutable vertex sequence backed by an arena.
//!
//! Nodes live in a [`SlotMap`] and reference their neighbours through
//! [`NodeId`]s (generational indices), so excising a node is a pure relink and
//! a stale id is detected instead of dangling.

mod vertex;

pub use vertex::Vertex;

use slotmap::SlotMap;

use crate::error::RingError;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node in a [`VertexRing`].
    pub struct NodeId;
}

#[derive(Debug, Clone)]
struct Node {
    vertex: Vertex,
    prev: NodeId,
    next: NodeId,
}

/// An ordered circular sequence of [`Vertex`] records.
///
/// A ring always holds at least one node; removal of the last node is
/// refused.
#[derive(Debug, Clone)]
pub struct VertexRing {
    nodes: SlotMap<NodeId, Node>,
    head: NodeId,
}

impl VertexRing {
    /// Builds a ring from an ordered point list, assigning indices `0..n`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 points are given or two consecutive
    /// points (including last and first) coincide.
    pub fn from_points(points: &[Point2]) -> Result<Self, RingError> {
        Self::from_points_indexed(points, 0)
    }

    /// Builds a ring from an ordered point list, assigning indices
    /// `first_index..first_index + n` in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 points are given or two consecutive
    /// points (including last and first) coincide.
    pub fn from_points_indexed(points: &[Point2], first_index: usize) -> Result<Self, RingError> {
        let n = points.len();
        if n < 3 {
            return Err(RingError::TooFewVertices { count: n });
        }
        for i in 0..n {
            let prev = &points[(i + n - 1) % n];
            if points[i] == *prev {
                return Err(RingError::DuplicateVertex {
                    index: first_index + i,
                });
            }
        }

        let mut nodes = SlotMap::with_capacity_and_key(n);
        let ids: Vec<NodeId> = points
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                nodes.insert(Node {
                    vertex: Vertex::new(position, first_index + i),
                    prev: NodeId::default(),
                    next: NodeId::default(),
                })
            })
            .collect();

        for (i, &id) in ids.iter().enumerate() {
            let node = &mut nodes[id];
            node.prev = ids[(i + n - 1) % n];
            node.next = ids[(i + 1) % n];
        }

        Ok(Self {
            nodes,
            head: ids[0],
        })
    }

    /// The node traversal starts from.
    #[must_use]
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a ring never becomes empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    fn node(&self, id: NodeId) -> Result<&Node, RingError> {
        self.nodes.get(id).ok_or(RingError::NodeNotFound)
    }

    /// Returns the vertex stored at `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the ring.
    pub fn vertex(&self, id: NodeId) -> Result<&Vertex, RingError> {
        self.node(id).map(|n| &n.vertex)
    }

    /// Returns the vertex stored at `id` for mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the ring.
    pub fn vertex_mut(&mut self, id: NodeId) -> Result<&mut Vertex, RingError> {
        self.nodes
            .get_mut(id)
            .map(|n| &mut n.vertex)
            .ok_or(RingError::NodeNotFound)
    }

    /// The position stored at `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the ring.
    pub fn position(&self, id: NodeId) -> Result<Point2, RingError> {
        self.vertex(id).map(|v| v.position)
    }

    /// The successor of `id`, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the ring.
    pub fn next(&self, id: NodeId) -> Result<NodeId, RingError> {
        self.node(id).map(|n| n.next)
    }

    /// The predecessor of `id`, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the ring.
    pub fn prev(&self, id: NodeId) -> Result<NodeId, RingError> {
        self.node(id).map(|n| n.prev)
    }

    /// Splices `vertex` in directly after `id` and returns the new node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the ring.
    pub fn insert_after(&mut self, id: NodeId, vertex: Vertex) -> Result<NodeId, RingError> {
        let next = self.next(id)?;
        let new = self.nodes.insert(Node {
            vertex,
            prev: id,
            next,
        });
        self.nodes[id].next = new;
        self.nodes[next].prev = new;
        Ok(new)
    }

    /// Excises `id`, relinking its neighbours, and returns its vertex.
    ///
    /// If `id` was the head, its successor becomes the new head.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the ring or is the only node
    /// left.
    pub fn remove(&mut self, id: NodeId) -> Result<Vertex, RingError> {
        let &Node { prev, next, .. } = self.node(id)?;
        if self.nodes.len() == 1 {
            return Err(RingError::LastNode);
        }
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if self.head == id {
            self.head = next;
        }
        self.nodes.remove(id).map(|n| n.vertex).ok_or(RingError::NodeNotFound)
    }

    /// Iterates one full circuit starting at the head.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        self.iter_from(self.head)
    }

    /// Iterates one full circuit starting at `start`.
    ///
    /// A stale `start` yields nothing.
    #[must_use]
    pub fn iter_from(&self, start: NodeId) -> Iter<'_> {
        Iter {
            ring: self,
            start,
            current: self.contains(start).then_some(start),
        }
    }

    /// Positions in ring order starting at the head.
    #[must_use]
    pub fn positions(&self) -> Vec<Point2> {
        self.iter().map(|(_, v)| v.position).collect()
    }

    /// Stable vertex indices in ring order starting at the head.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.iter().map(|(_, v)| v.index).collect()
    }
}

/// Iterator over one circuit of a [`VertexRing`].
pub struct Iter<'a> {
    ring: &'a VertexRing,
    start: NodeId,
    current: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a Vertex);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.ring.nodes.get(id)?;
        self.current = (node.next != self.start).then_some(node.next);
        Some((id, &node.vertex))
    }
}

impl<'a> IntoIterator for &'a VertexRing {
    type Item = (NodeId, &'a Vertex);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
