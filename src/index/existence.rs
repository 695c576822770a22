use bitvec::vec::BitVec;
use fxhash::FxHashMap;

use super::DENSE_LIMIT;
use crate::Vertex;

/// Auxiliary set of the neighbours of one vertex, answering membership in constant time.
///
/// A bitset is used when vertex numbers are bounded and every neighbour occurs at most once;
/// otherwise neighbours are counted in a hash map so that removing one of several parallel
/// edges keeps the remaining ones visible.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExistenceSet {
    Bits(BitVec),
    Counted(FxHashMap<Vertex, u32>),
}

impl ExistenceSet {
    pub fn build(neighbors: &[Vertex], dense_bound: Option<usize>, parallel: bool) -> Self {
        let mut set = match dense_bound {
            Some(bound) if !parallel => Self::Bits(BitVec::repeat(false, bound)),
            _ => Self::Counted(FxHashMap::default()),
        };
        for &u in neighbors {
            set.insert(u);
        }
        set
    }

    #[inline]
    pub fn contains(&self, u: Vertex) -> bool {
        match self {
            Self::Bits(bits) => bits.get(u as usize).map_or(false, |bit| *bit),
            Self::Counted(counts) => counts.contains_key(&u),
        }
    }

    pub fn insert(&mut self, u: Vertex) {
        if let Self::Bits(bits) = self {
            let i = u as usize;
            if i >= bits.len() {
                let new_len = (i + 1) + (i + 1) / 2;
                if new_len > DENSE_LIMIT {
                    let counts = bits.iter_ones().map(|v| (v as Vertex, 1)).collect();
                    *self = Self::Counted(counts);
                } else {
                    bits.resize(new_len, false);
                }
            }
        }

        match self {
            Self::Bits(bits) => bits.set(u as usize, true),
            Self::Counted(counts) => *counts.entry(u).or_insert(0) += 1,
        }
    }

    pub fn remove(&mut self, u: Vertex) {
        match self {
            Self::Bits(bits) => {
                if (u as usize) < bits.len() {
                    bits.set(u as usize, false);
                }
            }
            Self::Counted(counts) => {
                if let Some(count) = counts.get_mut(&u) {
                    *count -= 1;
                    if *count == 0 {
                        counts.remove(&u);
                    }
                }
            }
        }
    }
}
