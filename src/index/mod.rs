//! Translation of external vertex numbers into dense slots.
//!
//! Vertex numbers may be sparse. Every present vertex owns a slot in `0..n` where `n` is the
//! number of vertices, and the per-vertex storage of the graph is addressed by slot.
use fxhash::FxHashMap;
use tracing::debug;

use crate::{Slot, Vertex};

pub(crate) mod existence;

pub(crate) use existence::ExistenceSet;

/// Marker stored in the direct-address table for vertex numbers that are not in the graph.
const NOT_PRESENT: u32 = u32::MAX;

/// Largest direct-address table the index allocates before falling back to hashing.
pub(crate) const DENSE_LIMIT: usize = 1 << 24;

/// Maps vertex numbers to slots.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum VertexIndex {
    /// The vertices are exactly `0..n` and every vertex is its own slot.
    Identity(usize),
    /// Direct-address table indexed by vertex number.
    Table(Vec<u32>),
    /// Hash map for numberings too sparse to address directly.
    Hashed(FxHashMap<Vertex, u32>),
}

impl Default for VertexIndex {
    fn default() -> Self {
        Self::Identity(0)
    }
}

impl VertexIndex {
    /// Creates an index for vertices that will be added in the given order, so that the `i`th
    /// vertex lands in slot `i`.
    ///
    /// The identity strategy is chosen if the vertices are exactly `0..n`.
    pub fn for_vertices(vertices: &[Vertex], max_vertex_hint: Option<Vertex>) -> Self {
        let identity = vertices.iter().enumerate().all(|(i, &v)| i == v as usize);
        if identity {
            return Self::Identity(0);
        }

        let max = vertices.iter().copied().chain(max_vertex_hint).max();
        match max {
            Some(max) => Self::with_bound(max as usize + 1),
            None => Self::Identity(0),
        }
    }

    fn with_bound(bound: usize) -> Self {
        let len = bound + bound / 2;
        if len > DENSE_LIMIT {
            Self::Hashed(FxHashMap::default())
        } else {
            Self::Table(vec![NOT_PRESENT; len])
        }
    }

    /// Returns the slot of a vertex, or `None` if it is not present.
    #[inline]
    pub fn index_of(&self, v: Vertex) -> Option<Slot> {
        match self {
            Self::Identity(n) => ((v as usize) < *n).then_some(v as usize),
            Self::Table(table) => match table.get(v as usize) {
                Some(&slot) if slot != NOT_PRESENT => Some(slot as usize),
                _ => None,
            },
            Self::Hashed(map) => map.get(&v).map(|&slot| slot as usize),
        }
    }

    /// Exclusive upper bound on the vertex numbers the index addresses directly.
    ///
    /// Returns `None` if the numbering is too sparse for dense auxiliary structures.
    pub fn dense_bound(&self) -> Option<usize> {
        match self {
            Self::Identity(n) => Some(*n),
            Self::Table(table) => Some(table.len()),
            Self::Hashed(_) => None,
        }
    }

    /// Maps `v` to `slot`, replacing any previous mapping of `v`.
    pub fn set(&mut self, v: Vertex, slot: Slot) {
        if let Self::Identity(n) = *self {
            if v as usize == slot && slot == n {
                *self = Self::Identity(n + 1);
                return;
            } else if v as usize == slot && slot < n {
                return;
            }
            self.materialize(n, v as usize + 1);
        }

        if let Self::Table(table) = self {
            let i = v as usize;
            if i >= table.len() {
                let new_len = (i + 1) + (i + 1) / 2;
                if new_len > DENSE_LIMIT {
                    debug!(vertex = v, "vertex numbering too sparse, switching to hashed index");
                    *self = Self::Hashed(Self::table_entries(table).collect());
                } else {
                    debug!(from = table.len(), to = new_len, "growing vertex index");
                    table.resize(new_len, NOT_PRESENT);
                }
            }
        }

        match self {
            Self::Table(table) => table[v as usize] = slot as u32,
            Self::Hashed(map) => {
                map.insert(v, slot as u32);
            }
            Self::Identity(_) => unreachable!("identity index is materialized before updates"),
        }
    }

    /// Removes the mapping of `v`.
    pub fn remove(&mut self, v: Vertex) {
        if let Self::Identity(n) = *self {
            if n > 0 && v as usize == n - 1 {
                *self = Self::Identity(n - 1);
                return;
            } else if v as usize >= n {
                return;
            }
            self.materialize(n, n);
        }

        match self {
            Self::Table(table) => {
                if let Some(slot) = table.get_mut(v as usize) {
                    *slot = NOT_PRESENT;
                }
            }
            Self::Hashed(map) => {
                map.remove(&v);
            }
            Self::Identity(_) => unreachable!("identity index is materialized before updates"),
        }
    }

    /// Replaces the identity mapping of `0..n` by an explicit one able to hold `bound` vertices.
    fn materialize(&mut self, n: usize, bound: usize) {
        let mut index = Self::with_bound(bound.max(n));
        debug!(vertices = n, "vertex numbering no longer contiguous, materializing index");
        for v in 0..n {
            match &mut index {
                Self::Table(table) => table[v] = v as u32,
                Self::Hashed(map) => {
                    map.insert(v as Vertex, v as u32);
                }
                Self::Identity(_) => {}
            }
        }
        *self = index;
    }

    fn table_entries(table: &[u32]) -> impl Iterator<Item = (Vertex, u32)> + '_ {
        table
            .iter()
            .enumerate()
            .filter(|(_, &slot)| slot != NOT_PRESENT)
            .map(|(v, &slot)| (v as Vertex, slot))
    }
}
