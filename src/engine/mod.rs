//! The adjacency engine shared by every graph variant.
//!
//! A [`GraphCore`] stores vertices in dense slots and one adjacency array per slot. Every
//! adjacency entry records, next to the neighbour, the position of its reciprocal entry: the
//! neighbour's own entry for undirected graphs, or the matching predecessor entry for directed
//! ones. This makes removing an edge a constant-time pair of swap-removals.
//!
//! Edge payload (weight, label and data channels) of an undirected edge is stored once, at the
//! entry held by the smaller endpoint.
use std::cell::OnceCell;

use tracing::trace;

use crate::config::{Capabilities, GraphConfig};
use crate::index::VertexIndex;
use crate::memory::{AdjacencyStore, SlotRecord};
use crate::{GraphError, Result, Slot, Vertex, INVALID_VERTEX};

mod derive;
mod edges;

pub(crate) use edges::Location;

/// Capacity of network edges inserted without an explicit capacity.
pub(crate) const DEFAULT_CAPACITY: f64 = 1.0;

/// Offsets of the network channels behind the user-defined edge data channels.
pub(crate) const CAPACITY_CHANNEL: usize = 0;
pub(crate) const COST_CHANNEL: usize = 1;
pub(crate) const FLOW_CHANNEL: usize = 2;
const NETWORK_CHANNELS: usize = 3;

/// Which adjacency array of a slot a position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// Neighbours, or successors for directed graphs.
    Out,
    /// Predecessors of directed graphs.
    Pred,
}

/// Storage engine behind every graph variant.
///
/// The engine is not used directly: the variant types ([`Graph`], [`Digraph`], [`Network`], ...)
/// wrap it and expose the operations their capabilities allow.
///
/// [`Graph`]: crate::Graph
/// [`Digraph`]: crate::Digraph
/// [`Network`]: crate::Network
#[derive(Debug, Clone)]
pub struct GraphCore<VL = (), EL = ()> {
    config: GraphConfig,
    index: VertexIndex,
    store: AdjacencyStore<VL, EL>,
    num_edges: usize,
    /// One past the largest vertex number ever added.
    next_vertex: Vertex,
    /// Initial value of every edge data channel, network channels included.
    edge_defaults: Vec<f64>,
    vertex_weighted: bool,
    /// Edges were once added without policy checks, so parallel edges may exist.
    unchecked: bool,
}

impl<VL, EL> GraphCore<VL, EL> {
    /// Creates a graph holding `vertices`, in that slot order.
    pub(crate) fn new(config: GraphConfig, vertices: impl IntoIterator<Item = Vertex>) -> Result<Self> {
        let vertices: Vec<Vertex> = vertices.into_iter().collect();
        let mut core = Self::empty(config, vertices.len());
        core.index = VertexIndex::for_vertices(&vertices, core.config.max_vertex_hint);
        for v in vertices {
            core.add_vertex(v)?;
        }
        Ok(core)
    }

    /// Creates a graph with the vertices `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the number of valid vertex numbers.
    pub(crate) fn with_num_vertices(config: GraphConfig, n: usize) -> Self {
        assert!(n <= INVALID_VERTEX as usize, "too many vertices: {n}");
        let mut core = Self::empty(config, n);
        for v in 0..n as Vertex {
            core.push_vertex(v);
        }
        core
    }

    fn empty(config: GraphConfig, capacity: usize) -> Self {
        let mut edge_defaults = vec![0.0; config.edge_data_channels];
        if config.capabilities.flow {
            edge_defaults.extend([0.0; NETWORK_CHANNELS]);
            edge_defaults[config.edge_data_channels + CAPACITY_CHANNEL] = DEFAULT_CAPACITY;
        }
        Self {
            vertex_weighted: config.vertex_weighted,
            unchecked: !config.safe_mode,
            index: VertexIndex::default(),
            store: AdjacencyStore::with_capacity(capacity),
            num_edges: 0,
            next_vertex: 0,
            edge_defaults,
            config,
        }
    }

    #[inline]
    pub(crate) fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[inline]
    pub(crate) fn capabilities(&self) -> Capabilities {
        self.config.capabilities
    }

    #[inline]
    pub(crate) fn is_directed(&self) -> bool {
        self.config.capabilities.directed
    }

    pub(crate) fn set_safe_mode(&mut self, safe_mode: bool) {
        self.config.safe_mode = safe_mode;
        if !safe_mode && !self.unchecked {
            self.unchecked = true;
            // Bitsets cannot count the parallel edges unchecked insertion may create.
            if !self.capabilities().multi_edges {
                for record in self.store.records_mut() {
                    record.existence = OnceCell::new();
                }
            }
        }
    }

    /// Whether a neighbour may occur more than once in an adjacency array.
    #[inline]
    pub(crate) fn admits_parallel(&self) -> bool {
        self.config.capabilities.multi_edges || self.unchecked
    }

    #[inline]
    pub(crate) fn num_vertices(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub(crate) fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    pub(crate) fn vertices(&self) -> &[Vertex] {
        self.store.vertices()
    }

    #[inline]
    pub(crate) fn vertex_at(&self, slot: Slot) -> Option<Vertex> {
        self.store.vertex_at(slot)
    }

    #[inline]
    pub(crate) fn index_of(&self, v: Vertex) -> Option<Slot> {
        self.index.index_of(v)
    }

    pub(crate) fn max_vertex_number(&self) -> Option<Vertex> {
        self.vertices().iter().copied().max()
    }

    /// Resolves a vertex to its slot, reporting invalid and absent vertices.
    pub(crate) fn slot_of(&self, v: Vertex) -> Result<Slot> {
        if v == INVALID_VERTEX {
            return Err(GraphError::InvalidVertex(v));
        }
        self.index.index_of(v).ok_or(GraphError::UnknownVertex(v))
    }

    /// Resolves a vertex that adjacency data refers to, and hence must be present.
    #[inline]
    pub(crate) fn slot_unchecked(&self, v: Vertex) -> Slot {
        self.index
            .index_of(v)
            .expect("adjacency entry refers to a vertex missing from the index")
    }

    #[inline]
    pub(crate) fn record(&self, slot: Slot) -> &SlotRecord<VL, EL> {
        &self.store[slot]
    }

    fn push_vertex(&mut self, v: Vertex) -> Slot {
        let record = SlotRecord::new(
            self.config.vertex_data_channels,
            self.edge_defaults.len(),
            self.config.edge_weighted,
        );
        let slot = self.store.push(v, record);
        self.index.set(v, slot);
        self.next_vertex = self.next_vertex.max(v + 1);
        slot
    }

    pub(crate) fn add_vertex(&mut self, v: Vertex) -> Result<Slot> {
        if v == INVALID_VERTEX {
            return Err(GraphError::InvalidVertex(v));
        }
        if self.index.index_of(v).is_some() {
            return Err(GraphError::DuplicateVertex(v));
        }
        Ok(self.push_vertex(v))
    }

    /// Adds the vertex following the largest vertex number ever added.
    pub(crate) fn add_next_vertex(&mut self) -> Result<Vertex> {
        let v = self.next_vertex;
        self.add_vertex(v)?;
        Ok(v)
    }

    /// Removes a vertex and its incident edges, then fills its slot with the last slot.
    pub(crate) fn remove_vertex(&mut self, v: Vertex) -> Result<()> {
        let slot = self.slot_of(v)?;

        while let Some(pos) = self.store[slot].out.len().checked_sub(1) {
            self.remove_edge_at(slot, pos);
        }
        if self.is_directed() {
            while let Some(pos) = self.store[slot].pred.len().checked_sub(1) {
                let source = self.store[slot].pred.targets[pos];
                let source_pos = self.store[slot].pred.mirror[pos];
                self.remove_edge_at(self.slot_unchecked(source), source_pos);
            }
        }

        self.index.remove(v);
        let (_, moved) = self.store.swap_remove(slot);
        if let Some(moved) = moved {
            trace!(vertex = v, moved, slot, "relocated vertex into freed slot");
            self.index.set(moved, slot);
        }
        Ok(())
    }

    pub(crate) fn degree_at(&self, slot: Slot) -> usize {
        let record = &self.store[slot];
        if self.is_directed() {
            record.out.len()
        } else {
            record.out.len() + record.self_loops
        }
    }

    pub(crate) fn degree(&self, v: Vertex) -> Result<usize> {
        Ok(self.degree_at(self.slot_of(v)?))
    }

    pub(crate) fn max_degree(&self) -> usize {
        (0..self.num_vertices())
            .map(|slot| self.degree_at(slot))
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn indegree(&self, v: Vertex) -> Result<usize> {
        Ok(self.store[self.slot_of(v)?].pred.len())
    }

    pub(crate) fn self_loops(&self, v: Vertex) -> Result<usize> {
        Ok(self.store[self.slot_of(v)?].self_loops)
    }

    pub(crate) fn neighbors(&self, v: Vertex) -> Result<&[Vertex]> {
        Ok(self.store[self.slot_of(v)?].out.targets())
    }

    pub(crate) fn predecessors(&self, v: Vertex) -> Result<&[Vertex]> {
        Ok(&self.store[self.slot_of(v)?].pred.targets)
    }

    pub(crate) fn vertex_weight(&self, v: Vertex) -> Result<f64> {
        Ok(self.store[self.slot_of(v)?].weight)
    }

    pub(crate) fn set_vertex_weight(&mut self, v: Vertex, weight: f64) -> Result<()> {
        let slot = self.slot_of(v)?;
        self.store[slot].weight = weight;
        self.vertex_weighted = true;
        Ok(())
    }

    #[inline]
    pub(crate) fn is_vertex_weighted(&self) -> bool {
        self.vertex_weighted
    }

    pub(crate) fn is_edge_weighted(&self) -> bool {
        self.store.iter().any(|(_, record)| record.out.is_weighted())
    }

    pub(crate) fn vertex_label(&self, v: Vertex) -> Result<Option<&VL>> {
        Ok(self.store[self.slot_of(v)?].label.as_ref())
    }

    pub(crate) fn set_vertex_label(&mut self, v: Vertex, label: Option<VL>) -> Result<Option<VL>> {
        let slot = self.slot_of(v)?;
        Ok(std::mem::replace(&mut self.store[slot].label, label))
    }

    pub(crate) fn vertex_data(&self, v: Vertex, channel: usize) -> Result<f64> {
        let slot = self.slot_of(v)?;
        self.store[slot]
            .data
            .get(channel)
            .copied()
            .ok_or(GraphError::UnknownChannel(channel))
    }

    pub(crate) fn set_vertex_data(&mut self, v: Vertex, channel: usize, value: f64) -> Result<()> {
        let slot = self.slot_of(v)?;
        let data = self.store[slot]
            .data
            .get_mut(channel)
            .ok_or(GraphError::UnknownChannel(channel))?;
        *data = value;
        Ok(())
    }

    /// Checks that `channel` is one of the user-defined edge data channels.
    pub(crate) fn edge_channel(&self, channel: usize) -> Result<usize> {
        if channel < self.config.edge_data_channels {
            Ok(channel)
        } else {
            Err(GraphError::UnknownChannel(channel))
        }
    }

    /// Parallel edges have no stable identity, so their payload is fixed at insertion.
    pub(crate) fn check_payload_mutable(&self) -> Result<()> {
        if self.config.capabilities.multi_edges {
            Err(GraphError::MultiEdgePayload)
        } else {
            Ok(())
        }
    }

    /// Data channel holding one of the network quantities.
    #[inline]
    pub(crate) fn network_channel(&self, offset: usize) -> usize {
        debug_assert!(self.config.capabilities.flow);
        self.config.edge_data_channels + offset
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::assert_consistent;

    fn graph(vertices: &[Vertex]) -> GraphCore<&'static str, ()> {
        GraphCore::new(GraphConfig::new(), vertices.iter().copied()).unwrap()
    }

    #[test]
    fn add_and_resolve_sparse_vertices() {
        let mut g = graph(&[10, 4, 7]);
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.index_of(4), Some(1));
        assert_eq!(g.vertex_at(2), Some(7));
        assert_eq!(g.add_vertex(4), Err(GraphError::DuplicateVertex(4)));
        assert_eq!(g.add_vertex(INVALID_VERTEX), Err(GraphError::InvalidVertex(INVALID_VERTEX)));
        assert_eq!(g.degree(5), Err(GraphError::UnknownVertex(5)));
        assert_eq!(g.add_next_vertex(), Ok(11));
        assert_eq!(g.max_vertex_number(), Some(11));
        assert_consistent(&g);
    }

    #[test]
    fn duplicate_initial_vertices_fail() {
        let result = GraphCore::<(), ()>::new(GraphConfig::new(), [1, 2, 1]);
        assert_eq!(result.err(), Some(GraphError::DuplicateVertex(1)));
    }

    #[test]
    fn remove_relocates_last_slot() {
        let mut g = graph(&[0, 1, 2, 3]);
        g.set_vertex_label(3, Some("three")).unwrap();
        g.set_vertex_weight(3, 2.5).unwrap();
        g.add_edge(3, 0).unwrap();
        g.add_edge(3, 2).unwrap();
        let before: Vec<Vertex> = g.neighbors(3).unwrap().to_vec();

        g.remove_vertex(1).unwrap();
        assert_eq!(g.index_of(1), None);
        assert_eq!(g.index_of(3), Some(1));
        assert_eq!(g.vertex_at(1), Some(3));
        assert_eq!(g.vertex_label(3).unwrap(), Some(&"three"));
        assert_eq!(g.vertex_weight(3).unwrap(), 2.5);
        assert_eq!(g.neighbors(3).unwrap(), before.as_slice());
        assert_consistent(&g);
    }

    #[test]
    fn vertex_data_channels() {
        let mut g: GraphCore =
            GraphCore::new(GraphConfig::new().vertex_data_channels(2), [5, 6]).unwrap();
        g.set_vertex_data(6, 1, 4.0).unwrap();
        assert_eq!(g.vertex_data(6, 1), Ok(4.0));
        assert_eq!(g.vertex_data(5, 1), Ok(0.0));
        assert_eq!(g.vertex_data(5, 2), Err(GraphError::UnknownChannel(2)));
    }
}
