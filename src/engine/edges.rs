use tracing::trace;

use super::{GraphCore, Side};
use crate::index::ExistenceSet;
use crate::{GraphError, Result, Slot, Vertex};

/// Slot and position of the outgoing entry that holds an edge's payload.
pub(crate) type Location = (Slot, usize);

impl<VL, EL> GraphCore<VL, EL> {
    /// Adds an edge from `v` to `u`.
    ///
    /// Returns the position of `u` in the adjacency array of `v`, or `None` if safe mode is on
    /// and the edge would be a disallowed self-loop or multi-edge.
    pub(crate) fn add_edge(&mut self, v: Vertex, u: Vertex) -> Result<Option<usize>> {
        self.add_edge_with(v, u, None, None)
    }

    pub(crate) fn add_edge_with(
        &mut self,
        v: Vertex,
        u: Vertex,
        weight: Option<f64>,
        label: Option<EL>,
    ) -> Result<Option<usize>> {
        let sv = self.slot_of(v)?;
        let su = self.slot_of(u)?;
        if self.config.safe_mode && !self.admits_edge(sv, v, u) {
            return Ok(None);
        }

        let pos = self.insert_edge(sv, su, v, u);
        if weight.is_some() || label.is_some() {
            let (slot, at) = self.location(sv, pos, Side::Out);
            let out = &mut self.store[slot].out;
            if let Some(weight) = weight {
                out.set_weight(at, weight);
            }
            if label.is_some() {
                out.set_label(at, label);
            }
        }
        Ok(Some(pos))
    }

    fn admits_edge(&self, sv: Slot, v: Vertex, u: Vertex) -> bool {
        let capabilities = self.capabilities();
        if v == u && !capabilities.self_loops {
            return false;
        }
        capabilities.multi_edges || !self.contains_edge_at(sv, u)
    }

    /// Appends the adjacency entries of a new edge without any validation.
    pub(crate) fn insert_edge(&mut self, sv: Slot, su: Slot, v: Vertex, u: Vertex) -> usize {
        let hint = self.config.avg_degree_hint;
        let pos = if self.is_directed() {
            let q = self.store[su].pred.len();
            let pos = self.store[sv].out.push(u, q, hint, &self.edge_defaults);
            self.store[su].pred.push(v, pos, hint);
            pos
        } else if sv == su {
            // A self-loop is stored once and mirrors onto itself.
            let p = self.store[sv].out.len();
            self.store[sv].out.push(u, p, hint, &self.edge_defaults)
        } else {
            let q = self.store[su].out.len();
            let pos = self.store[sv].out.push(u, q, hint, &self.edge_defaults);
            self.store[su].out.push(v, pos, hint, &self.edge_defaults);
            pos
        };

        if sv == su {
            self.store[sv].self_loops += 1;
        }
        if let Some(set) = self.store[sv].existence.get_mut() {
            set.insert(u);
        }
        if !self.is_directed() && sv != su {
            if let Some(set) = self.store[su].existence.get_mut() {
                set.insert(v);
            }
        }
        self.num_edges += 1;
        pos
    }

    /// Removes the edge stored at position `pos` of the outgoing array of `slot`.
    pub(crate) fn remove_edge_at(&mut self, slot: Slot, pos: usize) {
        let v = self.store.vertices()[slot];
        let u = self.store[slot].out.target(pos);
        let mirror = self.store[slot].out.mirror(pos);

        if self.is_directed() {
            let su = self.slot_unchecked(u);
            self.swap_remove_predecessor(su, mirror);
            self.swap_remove_successor(slot, pos);
        } else if v == u {
            self.swap_remove_neighbor(slot, pos);
        } else {
            let su = self.slot_unchecked(u);
            self.swap_remove_neighbor(su, mirror);
            self.swap_remove_neighbor(slot, pos);
            if let Some(set) = self.store[su].existence.get_mut() {
                set.remove(v);
            }
        }

        if v == u {
            self.store[slot].self_loops -= 1;
        }
        if let Some(set) = self.store[slot].existence.get_mut() {
            set.remove(u);
        }
        self.num_edges -= 1;
    }

    /// Swap-removes an undirected entry and repairs the mirror of the entry moved into `pos`.
    fn swap_remove_neighbor(&mut self, slot: Slot, pos: usize) {
        let owner = self.store.vertices()[slot];
        let out = &mut self.store[slot].out;
        out.swap_remove(pos);
        if pos == out.len() {
            return;
        }

        let moved = out.target(pos);
        let mirror = out.mirror(pos);
        if moved == owner {
            out.set_mirror(pos, pos);
        } else {
            let sm = self.slot_unchecked(moved);
            self.store[sm].out.set_mirror(mirror, pos);
        }
    }

    fn swap_remove_successor(&mut self, slot: Slot, pos: usize) {
        let out = &mut self.store[slot].out;
        out.swap_remove(pos);
        if pos == out.len() {
            return;
        }

        let moved = out.target(pos);
        let mirror = out.mirror(pos);
        let sm = self.slot_unchecked(moved);
        self.store[sm].pred.mirror[mirror] = pos;
    }

    fn swap_remove_predecessor(&mut self, slot: Slot, pos: usize) {
        let pred = &mut self.store[slot].pred;
        pred.swap_remove(pos);
        if pos == pred.len() {
            return;
        }

        let moved = pred.targets[pos];
        let mirror = pred.mirror[pos];
        let sm = self.slot_unchecked(moved);
        self.store[sm].out.set_mirror(mirror, pos);
    }

    /// Whether an edge from `v` to `u` exists; `false` if either vertex is absent.
    pub(crate) fn contains_edge(&self, v: Vertex, u: Vertex) -> bool {
        self.index_of(v)
            .map_or(false, |sv| self.contains_edge_at(sv, u))
    }

    /// Scans the adjacency array of low-degree vertices, otherwise answers from the
    /// existence set of `slot`, building it on first use.
    pub(crate) fn contains_edge_at(&self, slot: Slot, u: Vertex) -> bool {
        let record = &self.store[slot];
        let degree = record.out.len();
        if degree.saturating_mul(degree) < self.num_vertices() {
            return record.out.targets().contains(&u);
        }

        record
            .existence
            .get_or_init(|| {
                trace!(slot, degree, "building existence set");
                ExistenceSet::build(
                    record.out.targets(),
                    self.index.dense_bound(),
                    self.admits_parallel(),
                )
            })
            .contains(u)
    }

    /// Position of the first entry `u` in the outgoing array of `sv`.
    ///
    /// Searches whichever endpoint has the shorter array.
    pub(crate) fn position_of(&self, sv: Slot, u: Vertex) -> Option<usize> {
        let v = self.store.vertices()[sv];
        let targets = self.store[sv].out.targets();
        if let Some(su) = self.index_of(u).filter(|&su| su != sv) {
            let (others, mirrors) = if self.is_directed() {
                let pred = &self.store[su].pred;
                (pred.targets.as_slice(), pred.mirror.as_slice())
            } else {
                let entries = &self.store[su].out.entries;
                (entries.targets.as_slice(), entries.mirror.as_slice())
            };
            if others.len() < targets.len() {
                return others.iter().position(|&x| x == v).map(|q| mirrors[q]);
            }
        }
        targets.iter().position(|&t| t == u)
    }

    fn find_edge(&self, v: Vertex, u: Vertex) -> Result<(Slot, usize)> {
        let sv = self.slot_of(v)?;
        self.slot_of(u)?;
        let pos = self
            .position_of(sv, u)
            .ok_or(GraphError::UnknownEdge(v, u))?;
        Ok((sv, pos))
    }

    pub(crate) fn remove_edge(&mut self, v: Vertex, u: Vertex) -> Result<()> {
        let (sv, pos) = self.find_edge(v, u)?;
        self.remove_edge_at(sv, pos);
        Ok(())
    }

    /// Removes every edge from `v` to `u` and returns how many there were.
    pub(crate) fn remove_all_edges(&mut self, v: Vertex, u: Vertex) -> Result<usize> {
        let sv = self.slot_of(v)?;
        self.slot_of(u)?;
        let mut removed = 0;
        for pos in (0..self.store[sv].out.len()).rev() {
            if self.store[sv].out.target(pos) == u {
                self.remove_edge_at(sv, pos);
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub(crate) fn multiplicity(&self, v: Vertex, u: Vertex) -> Result<usize> {
        let sv = self.slot_of(v)?;
        self.slot_of(u)?;
        Ok(self.store[sv].out.targets().iter().filter(|&&t| t == u).count())
    }

    /// Whether the entry at `pos` of `slot` is the one an edge listing reports.
    ///
    /// Undirected edges are reported from their smaller endpoint only.
    #[inline]
    pub(crate) fn emits(&self, slot: Slot, pos: usize) -> bool {
        self.is_directed() || self.store.vertices()[slot] <= self.store[slot].out.target(pos)
    }

    /// Resolves an adjacency entry to the location of its edge's payload.
    pub(crate) fn location(&self, slot: Slot, pos: usize, side: Side) -> Location {
        match side {
            Side::Pred => {
                let pred = &self.store[slot].pred;
                (self.slot_unchecked(pred.targets[pos]), pred.mirror[pos])
            }
            Side::Out if self.emits(slot, pos) => (slot, pos),
            Side::Out => {
                let out = &self.store[slot].out;
                (self.slot_unchecked(out.target(pos)), out.mirror(pos))
            }
        }
    }

    pub(crate) fn edge_location(&self, v: Vertex, u: Vertex) -> Result<Location> {
        let (sv, pos) = self.find_edge(v, u)?;
        Ok(self.location(sv, pos, Side::Out))
    }

    pub(crate) fn weight_at(&self, (slot, pos): Location) -> f64 {
        self.store[slot].out.weight(pos)
    }

    pub(crate) fn set_weight_at(&mut self, (slot, pos): Location, weight: f64) {
        self.store[slot].out.set_weight(pos, weight);
    }

    pub(crate) fn label_at(&self, (slot, pos): Location) -> Option<&EL> {
        self.store[slot].out.label(pos)
    }

    pub(crate) fn set_label_at(&mut self, (slot, pos): Location, label: Option<EL>) {
        self.store[slot].out.set_label(pos, label);
    }

    pub(crate) fn data_at(&self, (slot, pos): Location, channel: usize) -> f64 {
        self.store[slot].out.data(pos, channel)
    }

    pub(crate) fn set_data_at(&mut self, (slot, pos): Location, channel: usize, value: f64) {
        self.store[slot].out.set_data(pos, channel, value);
    }

    /// Resets a data channel of every edge.
    pub(crate) fn fill_edge_data(&mut self, channel: usize, value: f64) {
        for record in self.store.records_mut() {
            record.out.fill_data(channel, value);
        }
    }

    /// Copies weight, label and data channels of an edge of `other` onto an edge of `self`.
    pub(crate) fn copy_payload(&mut self, to: Location, other: &Self, from: Location)
    where
        EL: Clone,
    {
        let source = &other.store[from.0].out;
        let target = &mut self.store[to.0].out;
        if source.is_weighted() {
            target.set_weight(to.1, source.weight(from.1));
        }
        if let Some(label) = source.label(from.1) {
            target.set_label(to.1, Some(label.clone()));
        }
        for channel in 0..self.edge_defaults.len() {
            target.set_data(to.1, channel, source.data(from.1, channel));
        }
    }
}
