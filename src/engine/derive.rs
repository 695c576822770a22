//! Graphs derived from an existing one: copies, induced subgraphs, complements and supports.
use std::cell::OnceCell;

use tracing::debug;

use super::GraphCore;
use crate::config::Capabilities;
use crate::index::VertexIndex;
use crate::memory::{AdjList, CopyOptions, MirrorList, SlotRecord};
use crate::{Result, Slot, Vertex};

/// Number of vertices inspected to estimate the average degree of a subgraph.
const DEGREE_SAMPLE: usize = 64;

impl<VL: Clone, EL: Clone> GraphCore<VL, EL> {
    /// Duplicates the graph, keeping the vertex set and whatever `options` selects.
    pub(crate) fn copy(&self, options: CopyOptions) -> Self {
        let user_channels = self.config.edge_data_channels;
        let flow = self.capabilities().flow;
        let keep_channel = |channel: usize| options.edge_weights || (flow && channel >= user_channels);

        let store = self
            .store
            .iter()
            .map(|(v, record)| {
                let (out, pred, self_loops) = if options.edges {
                    let out = record.out.copy(
                        options.edge_weights,
                        options.edge_labels,
                        keep_channel,
                        &self.edge_defaults,
                    );
                    (out, record.pred.clone(), record.self_loops)
                } else {
                    let out = AdjList::new(self.edge_defaults.len(), self.config.edge_weighted);
                    (out, MirrorList::default(), 0)
                };
                let copied = SlotRecord {
                    out,
                    pred,
                    existence: OnceCell::new(),
                    self_loops,
                    weight: if options.vertex_weights { record.weight } else { 1.0 },
                    label: if options.vertex_labels { record.label.clone() } else { None },
                    data: if options.vertex_weights {
                        record.data.clone()
                    } else {
                        vec![0.0; record.data.len()]
                    },
                };
                (v, copied)
            })
            .collect();

        Self {
            config: self.config.clone(),
            index: self.index.clone(),
            store,
            num_edges: if options.edges { self.num_edges } else { 0 },
            next_vertex: self.next_vertex,
            edge_defaults: self.edge_defaults.clone(),
            vertex_weighted: options.vertex_weights && self.vertex_weighted,
            unchecked: self.unchecked,
        }
    }

    /// Induced subgraph on `vertices`, which occupy the slots of the result in the given order.
    ///
    /// Vertex and edge payload is carried over.
    pub(crate) fn subgraph(&self, vertices: impl IntoIterator<Item = Vertex>) -> Result<Self> {
        let vertices: Vec<Vertex> = vertices.into_iter().collect();
        let slots = vertices
            .iter()
            .map(|&v| self.slot_of(v))
            .collect::<Result<Vec<Slot>>>()?;

        let mut sub = Self::new(self.config.clone(), vertices.iter().copied())?;
        sub.config.avg_degree_hint = sub.sampled_degree(self, &slots);
        sub.vertex_weighted = self.vertex_weighted;
        sub.unchecked = self.unchecked;
        debug!(
            vertices = vertices.len(),
            avg_degree_hint = sub.config.avg_degree_hint,
            "building induced subgraph"
        );

        for (sv, (&v, &s)) in vertices.iter().zip(&slots).enumerate() {
            sub.copy_vertex_payload(sv, &self.store[s]);
            let out = &self.store[s].out;
            for pos in 0..out.len() {
                let u = out.target(pos);
                let Some(su) = sub.index_of(u) else { continue };
                if !self.emits(s, pos) {
                    continue;
                }
                let p = sub.insert_edge(sv, su, v, u);
                sub.copy_payload((sv, p), self, (s, pos));
            }
        }
        Ok(sub)
    }

    /// Average number of neighbours inside `self` over an evenly spaced sample of the source
    /// slots the subgraph is built from.
    fn sampled_degree(&self, source: &Self, slots: &[Slot]) -> usize {
        let step = (slots.len() / DEGREE_SAMPLE).max(1);
        let (sampled, kept) = slots
            .iter()
            .step_by(step)
            .map(|&s| {
                source.store[s]
                    .out
                    .targets()
                    .iter()
                    .filter(|&&u| self.index_of(u).is_some())
                    .count()
            })
            .fold((0, 0), |(n, total), kept| (n + 1, total + kept));
        if sampled == 0 {
            return self.config.avg_degree_hint;
        }
        ((kept + sampled - 1) / sampled).max(1)
    }

    fn copy_vertex_payload(&mut self, slot: Slot, from: &SlotRecord<VL, EL>) {
        let record = &mut self.store[slot];
        record.weight = from.weight;
        record.label = from.label.clone();
        record.data.clone_from(&from.data);
    }

    /// Graph on the same vertices whose edges are exactly the non-edges of `self`.
    ///
    /// Vertex payload is kept. Quadratic in the number of vertices.
    pub(crate) fn complement(&self) -> Self {
        debug_assert!(self.capabilities().is_simple());
        let mut complement = self.copy(CopyOptions::new(false, true, true, false, false));
        let n = self.num_vertices();
        let avg_degree = if n == 0 { 0 } else { 2 * self.num_edges / n };
        complement.config.avg_degree_hint = n.saturating_sub(1 + avg_degree).max(1);

        for sv in 0..n {
            let v = self.store.vertices()[sv];
            let first = if self.is_directed() { 0 } else { sv + 1 };
            for su in first..n {
                let u = self.store.vertices()[su];
                if su != sv && !self.contains_edge_at(sv, u) {
                    complement.insert_edge(sv, su, v, u);
                }
            }
        }
        complement
    }

    /// Simple undirected graph with an edge wherever `self` connects two distinct vertices in
    /// either direction.
    ///
    /// Vertex payload is kept while edge payload is not.
    pub(crate) fn support(&self) -> GraphCore<VL, EL> {
        let config = self
            .config
            .clone()
            .with_capabilities(Capabilities::GRAPH);
        let mut support = Self::empty(config, self.num_vertices());
        support.index = VertexIndex::for_vertices(self.vertices(), support.config.max_vertex_hint);
        for (slot, (v, record)) in self.store.iter().enumerate() {
            support.push_vertex(v);
            support.copy_vertex_payload(slot, record);
        }
        support.vertex_weighted = self.vertex_weighted;

        for sv in 0..self.num_vertices() {
            let v = self.store.vertices()[sv];
            for &u in self.store[sv].out.targets() {
                if u == v || (!self.is_directed() && u < v) {
                    continue;
                }
                let su = support.slot_unchecked(u);
                if !support.contains_edge_at(sv, u) {
                    support.insert_edge(sv, su, v, u);
                }
            }
        }
        support
    }
}
