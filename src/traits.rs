//! Capability traits implemented by the graph variants.
//!
//! Every operation is a provided method forwarding to the shared [`GraphCore`]. A variant opts
//! into a capability by implementing the corresponding marker-like trait, so that, for example,
//! [`MultiEdges::multiplicity`] is only callable on graphs that admit parallel edges.
use crate::engine::{GraphCore, Side};
use crate::cursor::{EdgeCursor, Edges, NeighborCursor};
use crate::{CopyOptions, Graph, GraphConfig, GraphError, Result, Slot, Vertex};

/// Operations supported by every graph variant.
pub trait GraphStore: Sized {
    /// Label attached to vertices.
    type VertexLabel;
    /// Label attached to edges.
    type EdgeLabel;

    #[doc(hidden)]
    fn core(&self) -> &GraphCore<Self::VertexLabel, Self::EdgeLabel>;

    #[doc(hidden)]
    fn core_mut(&mut self) -> &mut GraphCore<Self::VertexLabel, Self::EdgeLabel>;

    #[doc(hidden)]
    fn from_core(core: GraphCore<Self::VertexLabel, Self::EdgeLabel>) -> Self;

    /// Returns the configuration the graph was built with.
    #[inline]
    fn config(&self) -> &GraphConfig {
        self.core().config()
    }

    #[inline]
    fn is_directed(&self) -> bool {
        self.core().is_directed()
    }

    #[inline]
    fn num_vertices(&self) -> usize {
        self.core().num_vertices()
    }

    #[inline]
    fn num_edges(&self) -> usize {
        self.core().num_edges()
    }

    /// Returns whether the graph has no vertices.
    #[inline]
    fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }

    /// The vertex numbers in slot order.
    ///
    /// # Example
    ///
    /// ```
    /// # use slotgraph::{Graph, GraphStore};
    /// let mut graph: Graph = Graph::with_vertices([8, 3, 5]).unwrap();
    /// graph.remove_vertex(8).unwrap();
    ///
    /// // The last vertex moved into the freed slot.
    /// assert_eq!(graph.vertices(), &[5, 3]);
    /// assert_eq!(graph.index_of(5), Some(0));
    /// ```
    #[inline]
    fn vertices(&self) -> &[Vertex] {
        self.core().vertices()
    }

    /// Returns the vertex stored in `slot`.
    #[inline]
    fn vertex_at(&self, slot: Slot) -> Option<Vertex> {
        self.core().vertex_at(slot)
    }

    /// Returns the slot of `v`, or `None` if the graph does not contain it.
    #[inline]
    fn index_of(&self, v: Vertex) -> Option<Slot> {
        self.core().index_of(v)
    }

    #[inline]
    fn contains_vertex(&self, v: Vertex) -> bool {
        self.index_of(v).is_some()
    }

    fn max_vertex_number(&self) -> Option<Vertex> {
        self.core().max_vertex_number()
    }

    /// Adds a vertex with the given number.
    ///
    /// # Errors
    ///
    /// Fails if `v` is [`INVALID_VERTEX`](crate::INVALID_VERTEX) or already present.
    fn add_vertex(&mut self, v: Vertex) -> Result<()> {
        self.core_mut().add_vertex(v).map(|_| ())
    }

    /// Adds several vertices, stopping at the first failure.
    fn add_vertices(&mut self, vertices: impl IntoIterator<Item = Vertex>) -> Result<()> {
        vertices.into_iter().try_for_each(|v| self.add_vertex(v))
    }

    /// Adds a vertex numbered one past the largest number the graph has ever held.
    fn add_next_vertex(&mut self) -> Result<Vertex> {
        self.core_mut().add_next_vertex()
    }

    /// Removes a vertex together with its incident edges.
    ///
    /// The vertex held by the last slot is relocated into the freed slot.
    fn remove_vertex(&mut self, v: Vertex) -> Result<()> {
        self.core_mut().remove_vertex(v)
    }

    fn remove_vertices(&mut self, vertices: impl IntoIterator<Item = Vertex>) -> Result<()> {
        vertices.into_iter().try_for_each(|v| self.remove_vertex(v))
    }

    /// Adds an edge from `v` to `u`.
    ///
    /// Returns the position of `u` among the neighbours of `v`. In safe mode, an edge the graph
    /// does not admit (a self-loop, or a second edge between the same vertices) is not added and
    /// `None` is returned instead.
    ///
    /// # Errors
    ///
    /// Fails if either endpoint is not in the graph.
    ///
    /// # Example
    ///
    /// ```
    /// # use slotgraph::{Graph, GraphStore};
    /// let mut graph: Graph = Graph::with_num_vertices(3);
    /// assert_eq!(graph.add_edge(0, 1), Ok(Some(0)));
    /// assert_eq!(graph.add_edge(1, 0), Ok(None));
    /// assert_eq!(graph.add_edge(2, 2), Ok(None));
    /// assert!(graph.add_edge(0, 5).is_err());
    /// ```
    fn add_edge(&mut self, v: Vertex, u: Vertex) -> Result<Option<usize>> {
        self.core_mut().add_edge(v, u)
    }

    fn add_weighted_edge(&mut self, v: Vertex, u: Vertex, weight: f64) -> Result<Option<usize>> {
        self.core_mut().add_edge_with(v, u, Some(weight), None)
    }

    fn add_labeled_edge(
        &mut self,
        v: Vertex,
        u: Vertex,
        label: Self::EdgeLabel,
    ) -> Result<Option<usize>> {
        self.core_mut().add_edge_with(v, u, None, Some(label))
    }

    /// Removes one edge from `v` to `u`.
    fn remove_edge(&mut self, v: Vertex, u: Vertex) -> Result<()> {
        self.core_mut().remove_edge(v, u)
    }

    /// Returns whether an edge from `v` to `u` exists.
    ///
    /// Absent vertices are reported as not connected rather than as an error.
    fn contains_edge(&self, v: Vertex, u: Vertex) -> bool {
        self.core().contains_edge(v, u)
    }

    /// Number of edge endpoints at `v`; outgoing edges only for directed graphs.
    ///
    /// A self-loop of an undirected graph counts twice.
    fn degree(&self, v: Vertex) -> Result<usize> {
        self.core().degree(v)
    }

    fn max_degree(&self) -> usize {
        self.core().max_degree()
    }

    fn is_isolated(&self, v: Vertex) -> Result<bool> {
        let core = self.core();
        let slot = core.slot_of(v)?;
        let record = core.record(slot);
        Ok(record.out.targets().is_empty() && record.pred.is_empty())
    }

    /// Neighbours of `v`, or successors for directed graphs, in adjacency order.
    fn neighbors(&self, v: Vertex) -> Result<&[Vertex]> {
        self.core().neighbors(v)
    }

    /// The neighbour stored at position `pos` of the adjacency array of `v`.
    fn neighbor_at(&self, v: Vertex, pos: usize) -> Result<Vertex> {
        self.neighbors(v)?
            .get(pos)
            .copied()
            .ok_or(GraphError::UnknownPosition(v, pos))
    }

    /// Toggles validation of the self-loop and multi-edge policy on insertion.
    fn set_safe_mode(&mut self, safe_mode: bool) {
        self.core_mut().set_safe_mode(safe_mode);
    }

    fn is_safe_mode(&self) -> bool {
        self.config().safe_mode
    }

    /// Weight of `v`, `1.0` unless set.
    fn vertex_weight(&self, v: Vertex) -> Result<f64> {
        self.core().vertex_weight(v)
    }

    fn set_vertex_weight(&mut self, v: Vertex, weight: f64) -> Result<()> {
        self.core_mut().set_vertex_weight(v, weight)
    }

    fn vertex_label(&self, v: Vertex) -> Result<Option<&Self::VertexLabel>> {
        self.core().vertex_label(v)
    }

    /// Sets the label of `v` and returns the previous one.
    fn set_vertex_label(
        &mut self,
        v: Vertex,
        label: Option<Self::VertexLabel>,
    ) -> Result<Option<Self::VertexLabel>> {
        self.core_mut().set_vertex_label(v, label)
    }

    fn vertex_data(&self, v: Vertex, channel: usize) -> Result<f64> {
        self.core().vertex_data(v, channel)
    }

    fn set_vertex_data(&mut self, v: Vertex, channel: usize, value: f64) -> Result<()> {
        self.core_mut().set_vertex_data(v, channel, value)
    }

    fn is_vertex_weighted(&self) -> bool {
        self.core().is_vertex_weighted()
    }

    fn is_edge_weighted(&self) -> bool {
        self.core().is_edge_weighted()
    }

    /// Cursor over the neighbours of `v`, or its successors for directed graphs.
    fn neighbor_cursor(
        &mut self,
        v: Vertex,
    ) -> Result<NeighborCursor<'_, Self::VertexLabel, Self::EdgeLabel>> {
        NeighborCursor::new(self.core_mut(), v, Side::Out)
    }

    /// Cursor over every edge, able to remove edges while traversing.
    fn edge_cursor(&mut self) -> EdgeCursor<'_, Self::VertexLabel, Self::EdgeLabel> {
        EdgeCursor::new(self.core_mut())
    }

    /// Iterator over every edge; undirected edges are reported once.
    ///
    /// # Example
    ///
    /// ```
    /// # use slotgraph::{Edge, Graph, GraphStore};
    /// let mut graph: Graph = Graph::with_num_vertices(3);
    /// graph.add_edge(2, 0).unwrap();
    /// graph.add_edge(1, 2).unwrap();
    ///
    /// let edges: Vec<Edge> = graph.edges().collect();
    /// assert_eq!(edges, vec![Edge::undirected(0, 2), Edge::undirected(1, 2)]);
    /// ```
    fn edges(&self) -> Edges<'_, Self::VertexLabel, Self::EdgeLabel> {
        Edges::new(self.core())
    }

    /// Duplicates the graph, keeping what `options` selects.
    fn copy(&self, options: CopyOptions) -> Self
    where
        Self::VertexLabel: Clone,
        Self::EdgeLabel: Clone,
    {
        Self::from_core(self.core().copy(options))
    }

    /// Induced subgraph on `vertices`, which occupy slots in the given order.
    ///
    /// # Errors
    ///
    /// Fails if a vertex is absent from the graph or listed twice.
    fn subgraph(&self, vertices: impl IntoIterator<Item = Vertex>) -> Result<Self>
    where
        Self::VertexLabel: Clone,
        Self::EdgeLabel: Clone,
    {
        self.core().subgraph(vertices).map(Self::from_core)
    }

    /// Simple undirected graph connecting the vertices that `self` connects in any direction.
    ///
    /// Self-loops and edge payload are dropped; vertex payload is kept.
    fn support_graph(&self) -> Graph<Self::VertexLabel, Self::EdgeLabel>
    where
        Self::VertexLabel: Clone,
        Self::EdgeLabel: Clone,
    {
        Graph::from_core(self.core().support())
    }
}

/// Graphs whose edges are arcs, keeping predecessor lists.
pub trait Directed: GraphStore {
    fn outdegree(&self, v: Vertex) -> Result<usize> {
        self.core().degree(v)
    }

    fn indegree(&self, v: Vertex) -> Result<usize> {
        self.core().indegree(v)
    }

    fn successors(&self, v: Vertex) -> Result<&[Vertex]> {
        self.core().neighbors(v)
    }

    /// Sources of the arcs entering `v`.
    fn predecessors(&self, v: Vertex) -> Result<&[Vertex]> {
        self.core().predecessors(v)
    }

    fn successor_cursor(
        &mut self,
        v: Vertex,
    ) -> Result<NeighborCursor<'_, Self::VertexLabel, Self::EdgeLabel>> {
        NeighborCursor::new(self.core_mut(), v, Side::Out)
    }

    fn predecessor_cursor(
        &mut self,
        v: Vertex,
    ) -> Result<NeighborCursor<'_, Self::VertexLabel, Self::EdgeLabel>> {
        NeighborCursor::new(self.core_mut(), v, Side::Pred)
    }
}

/// Access to edge payload by endpoints.
///
/// Only graphs without parallel edges identify an edge by its endpoints.
pub trait EdgeAttributes: GraphStore {
    /// Weight of the edge from `v` to `u`, `1.0` unless set.
    fn edge_weight(&self, v: Vertex, u: Vertex) -> Result<f64> {
        let core = self.core();
        Ok(core.weight_at(core.edge_location(v, u)?))
    }

    fn set_edge_weight(&mut self, v: Vertex, u: Vertex, weight: f64) -> Result<()> {
        let core = self.core_mut();
        let location = core.edge_location(v, u)?;
        core.set_weight_at(location, weight);
        Ok(())
    }

    fn edge_label(&self, v: Vertex, u: Vertex) -> Result<Option<&Self::EdgeLabel>> {
        let core = self.core();
        Ok(core.label_at(core.edge_location(v, u)?))
    }

    fn set_edge_label(
        &mut self,
        v: Vertex,
        u: Vertex,
        label: Option<Self::EdgeLabel>,
    ) -> Result<()> {
        let core = self.core_mut();
        let location = core.edge_location(v, u)?;
        core.set_label_at(location, label);
        Ok(())
    }

    fn edge_data(&self, v: Vertex, u: Vertex, channel: usize) -> Result<f64> {
        let core = self.core();
        let channel = core.edge_channel(channel)?;
        Ok(core.data_at(core.edge_location(v, u)?, channel))
    }

    fn set_edge_data(&mut self, v: Vertex, u: Vertex, channel: usize, value: f64) -> Result<()> {
        let core = self.core_mut();
        let channel = core.edge_channel(channel)?;
        let location = core.edge_location(v, u)?;
        core.set_data_at(location, channel, value);
        Ok(())
    }
}

/// Graphs admitting several edges between the same vertices.
pub trait MultiEdges: GraphStore {
    /// Number of edges from `v` to `u`.
    fn multiplicity(&self, v: Vertex, u: Vertex) -> Result<usize> {
        self.core().multiplicity(v, u)
    }

    /// Removes every edge from `v` to `u` and returns how many were removed.
    fn remove_all_edges(&mut self, v: Vertex, u: Vertex) -> Result<usize> {
        self.core_mut().remove_all_edges(v, u)
    }
}

/// Graphs admitting self-loops.
pub trait SelfLoops: GraphStore {
    /// Number of self-loops at `v`.
    fn self_loops(&self, v: Vertex) -> Result<usize> {
        self.core().self_loops(v)
    }
}

/// Graphs without self-loops and parallel edges.
pub trait Simple: GraphStore {
    /// Graph on the same vertices connecting exactly the pairs `self` does not.
    ///
    /// # Example
    ///
    /// ```
    /// # use slotgraph::{Graph, GraphStore, Simple};
    /// let mut graph: Graph = Graph::with_num_vertices(3);
    /// graph.add_edge(0, 1).unwrap();
    ///
    /// let complement = graph.complement();
    /// assert_eq!(complement.num_edges(), 2);
    /// assert!(complement.contains_edge(2, 0));
    /// assert!(!complement.contains_edge(1, 0));
    /// ```
    fn complement(&self) -> Self
    where
        Self::VertexLabel: Clone,
        Self::EdgeLabel: Clone,
    {
        Self::from_core(self.core().complement())
    }
}
