use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

use crate::Vertex;

/// An edge between two vertices.
///
/// Edges are not stored as such: they are views built on demand from an adjacency entry.
/// Equality of undirected edges ignores the order of the endpoints, directed edges compare
/// ordered. A self-loop is never equal to an edge between two distinct vertices.
///
/// # Example
///
/// ```
/// # use slotgraph::Edge;
/// assert_eq!(Edge::undirected(1, 2), Edge::undirected(2, 1));
/// assert_ne!(Edge::directed(1, 2), Edge::directed(2, 1));
/// assert!(Edge::undirected(3, 3).is_self_loop());
/// ```
#[derive(Clone, Copy)]
pub struct Edge {
    pub source: Vertex,
    pub target: Vertex,
    pub directed: bool,
}

impl Edge {
    #[inline]
    pub const fn new(source: Vertex, target: Vertex, directed: bool) -> Self {
        Self {
            source,
            target,
            directed,
        }
    }

    #[inline]
    pub const fn undirected(source: Vertex, target: Vertex) -> Self {
        Self::new(source, target, false)
    }

    #[inline]
    pub const fn directed(source: Vertex, target: Vertex) -> Self {
        Self::new(source, target, true)
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite to `v`, or `None` if `v` is not an endpoint.
    pub fn other(&self, v: Vertex) -> Option<Vertex> {
        if v == self.source {
            Some(self.target)
        } else if v == self.target {
            Some(self.source)
        } else {
            None
        }
    }

    /// Returns the edge with the smaller endpoint first if it is undirected.
    pub fn normalized(&self) -> Self {
        if self.directed || self.source <= self.target {
            *self
        } else {
            Self::undirected(self.target, self.source)
        }
    }

    fn key(&self) -> (Vertex, Vertex) {
        let e = self.normalized();
        (e.source, e.target)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed && self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.directed.hash(state);
        self.key().hash(state);
    }
}

impl From<(Vertex, Vertex)> for Edge {
    fn from((source, target): (Vertex, Vertex)) -> Self {
        Self::undirected(source, target)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "-" };
        write!(f, "{}{}{}", self.source, arrow, self.target)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn self_loop_differs_from_edge() {
        assert_ne!(Edge::undirected(1, 1), Edge::undirected(1, 2));
        assert_eq!(Edge::undirected(1, 1), Edge::undirected(1, 1));
    }

    #[test]
    fn hash_agrees_with_eq() {
        let set: HashSet<Edge> = [Edge::undirected(4, 2), Edge::undirected(2, 4)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);

        let set: HashSet<Edge> = [Edge::directed(4, 2), Edge::directed(2, 4)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn other_endpoint() {
        let e = Edge::directed(5, 9);
        assert_eq!(e.other(5), Some(9));
        assert_eq!(e.other(9), Some(5));
        assert_eq!(e.other(1), None);
        assert_eq!(format!("{e}"), "5->9");
    }
}
