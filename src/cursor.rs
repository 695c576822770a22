//! Positions into adjacency arrays that allow editing and removing edges while traversing.
//!
//! A cursor holds the graph mutably, so at most one cursor can be alive per graph. Removing the
//! current edge swaps the last entry of the array into its position; the cursor steps back so
//! that the following [`advance`] yields that entry instead of skipping it.
//!
//! [`advance`]: NeighborCursor::advance
use std::iter::FusedIterator;

use crate::engine::{GraphCore, Location, Side};
use crate::{Edge, GraphError, Result, Slot, Vertex};

/// Bidirectional cursor over the neighbours of one vertex.
///
/// Depending on how it was obtained it walks the neighbours of an undirected graph, or the
/// successors or predecessors of a directed one.
///
/// # Example
///
/// ```
/// # use slotgraph::{Graph, GraphStore};
/// let mut graph: Graph = Graph::with_num_vertices(4);
/// for u in 1..4 {
///     graph.add_edge(0, u).unwrap();
/// }
///
/// let mut cursor = graph.neighbor_cursor(0).unwrap();
/// while let Some(u) = cursor.advance() {
///     if u % 2 == 1 {
///         cursor.remove_edge().unwrap();
///     }
/// }
/// assert_eq!(graph.neighbors(0).unwrap(), &[2]);
/// ```
pub struct NeighborCursor<'g, VL = (), EL = ()> {
    graph: &'g mut GraphCore<VL, EL>,
    slot: Slot,
    side: Side,
    /// Position the next call to `advance` returns.
    cursor: usize,
    /// Position returned by the last move, cleared by removal.
    last: Option<usize>,
}

impl<'g, VL, EL> NeighborCursor<'g, VL, EL> {
    pub(crate) fn new(graph: &'g mut GraphCore<VL, EL>, v: Vertex, side: Side) -> Result<Self> {
        let slot = graph.slot_of(v)?;
        Ok(Self {
            graph,
            slot,
            side,
            cursor: 0,
            last: None,
        })
    }

    fn targets(&self) -> &[Vertex] {
        let record = self.graph.record(self.slot);
        match self.side {
            Side::Out => record.out.targets(),
            Side::Pred => &record.pred.targets,
        }
    }

    /// Number of entries in the traversed array.
    pub fn len(&self) -> usize {
        self.targets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The vertex whose neighbours are traversed.
    #[inline]
    pub fn vertex(&self) -> Vertex {
        self.graph.vertices()[self.slot]
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.len()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Moves forward and returns the neighbour passed over.
    pub fn advance(&mut self) -> Option<Vertex> {
        let u = *self.targets().get(self.cursor)?;
        self.last = Some(self.cursor);
        self.cursor += 1;
        Some(u)
    }

    /// Moves backward and returns the neighbour passed over.
    pub fn retreat(&mut self) -> Option<Vertex> {
        let pos = self.cursor.checked_sub(1)?;
        let u = self.targets()[pos];
        self.cursor = pos;
        self.last = Some(pos);
        Some(u)
    }

    /// The neighbour returned by the last move.
    pub fn neighbor(&self) -> Option<Vertex> {
        Some(self.targets()[self.last?])
    }

    /// Position of the current neighbour in the adjacency array.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        self.last
    }

    /// The edge to or from the current neighbour.
    pub fn edge(&self) -> Option<Edge> {
        let u = self.neighbor()?;
        let v = self.vertex();
        let directed = self.graph.is_directed();
        Some(match self.side {
            Side::Out => Edge::new(v, u, directed),
            Side::Pred => Edge::new(u, v, directed),
        })
    }

    fn current(&self) -> Result<Location> {
        let pos = self
            .last
            .ok_or(GraphError::UnknownPosition(self.vertex(), self.cursor))?;
        Ok(self.graph.location(self.slot, pos, self.side))
    }

    pub fn weight(&self) -> Result<f64> {
        Ok(self.graph.weight_at(self.current()?))
    }

    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        self.graph.check_payload_mutable()?;
        let location = self.current()?;
        self.graph.set_weight_at(location, weight);
        Ok(())
    }

    pub fn label(&self) -> Result<Option<&EL>> {
        Ok(self.graph.label_at(self.current()?))
    }

    pub fn set_label(&mut self, label: Option<EL>) -> Result<()> {
        self.graph.check_payload_mutable()?;
        let location = self.current()?;
        self.graph.set_label_at(location, label);
        Ok(())
    }

    pub fn edge_data(&self, channel: usize) -> Result<f64> {
        let channel = self.graph.edge_channel(channel)?;
        Ok(self.graph.data_at(self.current()?, channel))
    }

    pub fn set_edge_data(&mut self, channel: usize, value: f64) -> Result<()> {
        self.graph.check_payload_mutable()?;
        let channel = self.graph.edge_channel(channel)?;
        let location = self.current()?;
        self.graph.set_data_at(location, channel, value);
        Ok(())
    }

    /// Removes the edge to the current neighbour and returns that neighbour.
    ///
    /// The last entry of the array takes the removed entry's position. After a forward move the
    /// cursor steps back onto it, so the next [`advance`] neither skips nor repeats an entry.
    ///
    /// [`advance`]: Self::advance
    pub fn remove_edge(&mut self) -> Result<Vertex> {
        let pos = self
            .last
            .take()
            .ok_or(GraphError::UnknownPosition(self.vertex(), self.cursor))?;
        let u = self.targets()[pos];
        match self.side {
            Side::Out => self.graph.remove_edge_at(self.slot, pos),
            Side::Pred => {
                let (source, at) = self.graph.location(self.slot, pos, Side::Pred);
                self.graph.remove_edge_at(source, at);
            }
        }
        if pos < self.cursor {
            self.cursor -= 1;
        }
        Ok(u)
    }
}

/// Cursor over every edge of a graph.
///
/// Slots are visited in order. An undirected edge is reported once, from its smaller endpoint.
pub struct EdgeCursor<'g, VL = (), EL = ()> {
    graph: &'g mut GraphCore<VL, EL>,
    slot: Slot,
    cursor: usize,
    last: Option<Location>,
}

impl<'g, VL, EL> EdgeCursor<'g, VL, EL> {
    pub(crate) fn new(graph: &'g mut GraphCore<VL, EL>) -> Self {
        Self {
            graph,
            slot: 0,
            cursor: 0,
            last: None,
        }
    }

    /// Moves to the next edge and returns it.
    pub fn advance(&mut self) -> Option<Edge> {
        while self.slot < self.graph.num_vertices() {
            let out = &self.graph.record(self.slot).out;
            if self.cursor >= out.len() {
                self.slot += 1;
                self.cursor = 0;
                continue;
            }
            let pos = self.cursor;
            self.cursor += 1;
            if self.graph.emits(self.slot, pos) {
                self.last = Some((self.slot, pos));
                return self.edge();
            }
        }
        None
    }

    /// Moves to the previous edge and returns it.
    ///
    /// A following [`advance`](Self::advance) returns the same edge again.
    pub fn retreat(&mut self) -> Option<Edge> {
        let (mut slot, mut pos) = (self.slot, self.cursor);
        loop {
            if pos == 0 {
                slot = slot.checked_sub(1)?;
                pos = self.graph.record(slot).out.len();
                continue;
            }
            pos -= 1;
            if self.graph.emits(slot, pos) {
                self.slot = slot;
                self.cursor = pos;
                self.last = Some((slot, pos));
                return self.edge();
            }
        }
    }

    /// The edge returned by the last move.
    pub fn edge(&self) -> Option<Edge> {
        let (slot, pos) = self.last?;
        let v = self.graph.vertices()[slot];
        let u = self.graph.record(slot).out.target(pos);
        Some(Edge::new(v, u, self.graph.is_directed()))
    }

    fn current(&self) -> Result<Location> {
        let (slot, pos) = self.last.ok_or_else(|| self.no_current())?;
        Ok(self.graph.location(slot, pos, Side::Out))
    }

    fn no_current(&self) -> GraphError {
        let v = self.graph.vertex_at(self.slot).unwrap_or(crate::INVALID_VERTEX);
        GraphError::UnknownPosition(v, self.cursor)
    }

    pub fn weight(&self) -> Result<f64> {
        Ok(self.graph.weight_at(self.current()?))
    }

    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        self.graph.check_payload_mutable()?;
        let location = self.current()?;
        self.graph.set_weight_at(location, weight);
        Ok(())
    }

    pub fn label(&self) -> Result<Option<&EL>> {
        Ok(self.graph.label_at(self.current()?))
    }

    pub fn set_label(&mut self, label: Option<EL>) -> Result<()> {
        self.graph.check_payload_mutable()?;
        let location = self.current()?;
        self.graph.set_label_at(location, label);
        Ok(())
    }

    pub fn edge_data(&self, channel: usize) -> Result<f64> {
        let channel = self.graph.edge_channel(channel)?;
        Ok(self.graph.data_at(self.current()?, channel))
    }

    pub fn set_edge_data(&mut self, channel: usize, value: f64) -> Result<()> {
        self.graph.check_payload_mutable()?;
        let channel = self.graph.edge_channel(channel)?;
        let location = self.current()?;
        self.graph.set_data_at(location, channel, value);
        Ok(())
    }

    /// Removes the current edge and returns it.
    pub fn remove_edge(&mut self) -> Result<Edge> {
        let edge = self.edge().ok_or_else(|| self.no_current())?;
        if let Some((slot, pos)) = self.last.take() {
            self.graph.remove_edge_at(slot, pos);
            self.cursor = pos;
        }
        Ok(edge)
    }
}

/// Iterator over the edges of a graph, created by [`GraphStore::edges`].
///
/// [`GraphStore::edges`]: crate::GraphStore::edges
#[derive(Debug, Clone)]
pub struct Edges<'g, VL = (), EL = ()> {
    graph: &'g GraphCore<VL, EL>,
    slot: Slot,
    pos: usize,
    remaining: usize,
}

impl<'g, VL, EL> Edges<'g, VL, EL> {
    pub(crate) fn new(graph: &'g GraphCore<VL, EL>) -> Self {
        Self {
            graph,
            slot: 0,
            pos: 0,
            remaining: graph.num_edges(),
        }
    }
}

impl<'g, VL, EL> Iterator for Edges<'g, VL, EL> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot < self.graph.num_vertices() {
            let out = &self.graph.record(self.slot).out;
            if self.pos >= out.len() {
                self.slot += 1;
                self.pos = 0;
                continue;
            }
            let pos = self.pos;
            self.pos += 1;
            if self.graph.emits(self.slot, pos) {
                self.remaining -= 1;
                let v = self.graph.vertices()[self.slot];
                return Some(Edge::new(v, out.target(pos), self.graph.is_directed()));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'g, VL, EL> ExactSizeIterator for Edges<'g, VL, EL> {}
impl<'g, VL, EL> FusedIterator for Edges<'g, VL, EL> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{Capabilities, GraphConfig};
    use crate::testing::assert_consistent;

    fn core(capabilities: Capabilities, n: usize, edges: &[(Vertex, Vertex)]) -> GraphCore<(), u8> {
        let config = GraphConfig::new().with_capabilities(capabilities);
        let mut g = GraphCore::with_num_vertices(config, n);
        for &(v, u) in edges {
            g.add_edge(v, u).unwrap();
        }
        g
    }

    #[test]
    fn removal_while_advancing_visits_every_entry_once() {
        let mut g = core(Capabilities::GRAPH, 6, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
        let mut seen = Vec::new();
        let mut cursor = NeighborCursor::new(&mut g, 0, Side::Out).unwrap();
        while let Some(u) = cursor.advance() {
            seen.push(u);
            if u != 3 {
                cursor.remove_edge().unwrap();
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(g.neighbors(0).unwrap(), &[3]);
        assert_consistent(&g);
    }

    #[test]
    fn retreat_and_remove() {
        let mut g = core(Capabilities::GRAPH, 4, &[(0, 1), (0, 2), (0, 3)]);
        let mut cursor = NeighborCursor::new(&mut g, 0, Side::Out).unwrap();
        while cursor.advance().is_some() {}
        assert!(!cursor.has_next());
        assert_eq!(cursor.retreat(), Some(3));
        assert_eq!(cursor.retreat(), Some(2));
        assert_eq!(cursor.remove_edge(), Ok(2));
        assert_eq!(cursor.remove_edge(), Err(GraphError::UnknownPosition(0, 1)));
        assert_eq!(cursor.retreat(), Some(1));
        assert!(!cursor.has_previous());
        assert_eq!(g.neighbors(0).unwrap(), &[1, 3]);
        assert_consistent(&g);
    }

    #[test]
    fn predecessor_cursor_removes_arcs() {
        let mut g = core(Capabilities::DIGRAPH, 4, &[(1, 0), (2, 0), (3, 0), (0, 1)]);
        let mut cursor = NeighborCursor::new(&mut g, 0, Side::Pred).unwrap();
        while let Some(u) = cursor.advance() {
            assert_eq!(cursor.edge(), Some(Edge::directed(u, 0)));
            if u == 2 {
                cursor.remove_edge().unwrap();
            }
        }
        assert!(!g.contains_edge(2, 0));
        assert!(g.contains_edge(3, 0));
        assert_eq!(g.num_edges(), 3);
        assert_consistent(&g);
    }

    #[test]
    fn cursor_payload_follows_canonical_entry() {
        let mut g = core(Capabilities::GRAPH, 3, &[(0, 2)]);
        let mut cursor = NeighborCursor::new(&mut g, 2, Side::Out).unwrap();
        assert!(cursor.weight().is_err());
        cursor.advance();
        cursor.set_weight(0.25).unwrap();
        cursor.set_label(Some(3)).unwrap();
        assert_eq!(cursor.edge_data(0), Err(GraphError::UnknownChannel(0)));

        let mut cursor = NeighborCursor::new(&mut g, 0, Side::Out).unwrap();
        cursor.advance();
        assert_eq!(cursor.weight(), Ok(0.25));
        assert_eq!(cursor.label(), Ok(Some(&3)));
    }

    #[test]
    fn multigraph_cursor_payload_is_read_only() {
        let mut g = core(Capabilities::MULTIGRAPH, 2, &[(0, 1), (0, 1)]);
        let mut cursor = NeighborCursor::new(&mut g, 0, Side::Out).unwrap();
        cursor.advance();
        assert_eq!(cursor.weight(), Ok(1.0));
        assert_eq!(cursor.set_weight(2.0), Err(GraphError::MultiEdgePayload));
        assert_eq!(cursor.set_label(Some(1)), Err(GraphError::MultiEdgePayload));

        let mut cursor = EdgeCursor::new(&mut g);
        cursor.advance();
        assert_eq!(cursor.set_weight(2.0), Err(GraphError::MultiEdgePayload));
    }

    #[test]
    fn edge_cursor_reports_each_edge_once() {
        let edges = [(0, 1), (1, 1), (2, 0), (1, 2), (2, 2), (0, 1)];
        let mut g = core(Capabilities::PSEUDOGRAPH, 3, &edges);
        let expected = g.num_edges();

        let mut cursor = EdgeCursor::new(&mut g);
        let mut seen = Vec::new();
        while let Some(edge) = cursor.advance() {
            seen.push(edge);
            if edge.is_self_loop() {
                cursor.remove_edge().unwrap();
            }
        }
        assert_eq!(seen.len(), expected);
        assert_eq!(g.num_edges(), expected - 2);
        assert_eq!(Edges::new(&g).len(), expected - 2);
        assert!(Edges::new(&g).all(|edge| !edge.is_self_loop()));
        assert_consistent(&g);
    }

    #[test]
    fn edge_cursor_walks_back_and_writes_data() {
        let config = GraphConfig::new().edge_data_channels(1);
        let mut g: GraphCore = GraphCore::with_num_vertices(config, 4);
        for (v, u) in [(0, 1), (2, 0), (1, 3), (3, 2)] {
            g.add_edge(v, u).unwrap();
        }

        let mut cursor = EdgeCursor::new(&mut g);
        assert_eq!(cursor.retreat(), None);
        let mut forward = Vec::new();
        while let Some(edge) = cursor.advance() {
            cursor.set_edge_data(0, forward.len() as f64).unwrap();
            forward.push(edge);
        }
        assert_eq!(cursor.edge_data(1), Err(GraphError::UnknownChannel(1)));

        let mut backward = Vec::new();
        while let Some(edge) = cursor.retreat() {
            assert_eq!(cursor.edge_data(0), Ok((forward.len() - 1 - backward.len()) as f64));
            backward.push(edge);
        }
        backward.reverse();
        assert_eq!(backward, forward);
        assert_eq!(cursor.advance(), forward.first().copied());

        // Payload of an undirected edge is shared by both endpoints.
        let location = g.edge_location(2, 0).unwrap();
        assert_eq!(g.data_at(location, 0), 1.0);
    }

    #[test]
    fn edges_of_digraph() {
        let g = core(Capabilities::DIGRAPH, 3, &[(0, 1), (1, 0), (2, 1)]);
        let mut edges: Vec<Edge> = Edges::new(&g).collect();
        edges.sort_by_key(|edge| (edge.source, edge.target));
        assert_eq!(
            edges,
            vec![Edge::directed(0, 1), Edge::directed(1, 0), Edge::directed(2, 1)]
        );
    }
}
