//! Slot-addressed storage of vertices and their adjacency arrays.
//!
//! Everything the graph stores per vertex lives in one [`SlotRecord`], so relocating a vertex
//! to another slot moves all of its arrays at once.
use std::cell::OnceCell;

pub(crate) mod adjacency;

pub(crate) use adjacency::{AdjList, MirrorList};

use crate::index::ExistenceSet;
use crate::{Slot, Vertex};

/// Per-vertex state of a graph.
#[derive(Debug, Clone)]
pub(crate) struct SlotRecord<VL, EL> {
    /// Neighbours for undirected graphs, successors for directed ones.
    pub(crate) out: AdjList<EL>,
    /// Predecessors; only used by directed graphs.
    pub(crate) pred: MirrorList,
    /// Built on the first membership query that cannot afford a linear scan.
    pub(crate) existence: OnceCell<ExistenceSet>,
    pub(crate) self_loops: usize,
    pub(crate) weight: f64,
    pub(crate) label: Option<VL>,
    pub(crate) data: Vec<f64>,
}

impl<VL, EL> SlotRecord<VL, EL> {
    pub fn new(vertex_channels: usize, edge_channels: usize, weighted: bool) -> Self {
        Self {
            out: AdjList::new(edge_channels, weighted),
            pred: MirrorList::default(),
            existence: OnceCell::new(),
            self_loops: 0,
            weight: 1.0,
            label: None,
            data: vec![0.0; vertex_channels],
        }
    }
}

/// Options selecting what [`copy`] duplicates.
///
/// [`copy`]: crate::GraphStore::copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    pub edges: bool,
    /// Vertex weights and vertex data channels.
    pub vertex_weights: bool,
    pub vertex_labels: bool,
    /// Edge weights and edge data channels.
    pub edge_weights: bool,
    pub edge_labels: bool,
}

impl CopyOptions {
    /// Copy everything.
    pub const ALL: Self = Self::new(true, true, true, true, true);

    /// Copy the vertex set only.
    pub const VERTICES: Self = Self::new(false, false, false, false, false);

    pub const fn new(
        edges: bool,
        vertex_weights: bool,
        vertex_labels: bool,
        edge_weights: bool,
        edge_labels: bool,
    ) -> Self {
        Self {
            edges,
            vertex_weights,
            vertex_labels,
            edge_weights,
            edge_labels,
        }
    }
}

/// Arena of slot records, kept dense by swap-compaction.
///
/// `vertices[slot]` is the vertex number owning `records[slot]`.
#[derive(Debug, Clone)]
pub(crate) struct AdjacencyStore<VL, EL> {
    vertices: Vec<Vertex>,
    records: Vec<SlotRecord<VL, EL>>,
}

impl<VL, EL> AdjacencyStore<VL, EL> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            records: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_at(&self, slot: Slot) -> Option<Vertex> {
        self.vertices.get(slot).copied()
    }

    pub fn push(&mut self, vertex: Vertex, record: SlotRecord<VL, EL>) -> Slot {
        self.vertices.push(vertex);
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vertex, &SlotRecord<VL, EL>)> + '_ {
        self.vertices.iter().copied().zip(&self.records)
    }

    pub fn records_mut(&mut self) -> std::slice::IterMut<'_, SlotRecord<VL, EL>> {
        self.records.iter_mut()
    }

    /// Removes the record at `slot`, moving the last record into its place.
    ///
    /// Returns the removed record and the vertex that was relocated into `slot`, if any.
    pub fn swap_remove(&mut self, slot: Slot) -> (SlotRecord<VL, EL>, Option<Vertex>) {
        self.vertices.swap_remove(slot);
        let removed = self.records.swap_remove(slot);
        (removed, self.vertices.get(slot).copied())
    }
}

impl<VL, EL> std::ops::Index<Slot> for AdjacencyStore<VL, EL> {
    type Output = SlotRecord<VL, EL>;

    #[inline]
    fn index(&self, slot: Slot) -> &Self::Output {
        &self.records[slot]
    }
}

impl<VL, EL> std::ops::IndexMut<Slot> for AdjacencyStore<VL, EL> {
    #[inline]
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        &mut self.records[slot]
    }
}

impl<VL, EL> FromIterator<(Vertex, SlotRecord<VL, EL>)> for AdjacencyStore<VL, EL> {
    fn from_iter<I: IntoIterator<Item = (Vertex, SlotRecord<VL, EL>)>>(iter: I) -> Self {
        let (vertices, records) = iter.into_iter().unzip();
        Self { vertices, records }
    }
}
