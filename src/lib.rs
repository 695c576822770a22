//! `slotgraph` is a mutable in-memory graph store built for algorithm workloads.
//!
//! Vertices are identified by arbitrary, possibly sparse, `u32` numbers and stored in dense
//! slots. Each slot holds an adjacency array in which every entry remembers the position of its
//! reciprocal entry, so removing an edge or a vertex only swaps array elements instead of
//! searching for the other end.
//!
//! The graph types differ in which edges they admit. They share one storage engine and expose
//! their operations through capability traits:
//!
//! - [`GraphStore`]: operations every graph supports.
//! - [`Directed`]: in-degrees and predecessor lists.
//! - [`EdgeAttributes`]: edge weights, labels and data looked up by endpoints.
//! - [`MultiEdges`] and [`SelfLoops`]: queries on parallel edges and self-loops.
//! - [`Simple`]: complements of graphs without parallel edges and self-loops.
//!
//! # Example
//!
//! ```
//! use slotgraph::{Directed, Digraph, GraphStore};
//!
//! let mut graph: Digraph = Digraph::with_vertices([10, 20, 30]).unwrap();
//! graph.add_edge(10, 20).unwrap();
//! graph.add_edge(30, 20).unwrap();
//!
//! assert_eq!(graph.indegree(20), Ok(2));
//! assert_eq!(graph.successors(10), Ok(&[20][..]));
//!
//! // Removing an edge while walking the predecessors of a vertex.
//! let mut cursor = graph.predecessor_cursor(20).unwrap();
//! while let Some(v) = cursor.advance() {
//!     if v == 30 {
//!         cursor.remove_edge().unwrap();
//!     }
//! }
//! assert_eq!(graph.num_edges(), 1);
//! ```
//!
//! Graphs are single-owner values without internal synchronization. A cursor borrows its graph
//! mutably, so no other access can happen while it is alive.

pub mod config;
pub mod cursor;
mod edge;
mod engine;
mod error;
mod index;
mod macros;
mod memory;
mod traits;
mod variants;

#[cfg(test)]
mod testing;

pub use crate::config::{Capabilities, GraphConfig};
pub use crate::cursor::{EdgeCursor, Edges, NeighborCursor};
pub use crate::edge::Edge;
#[doc(hidden)]
pub use crate::engine::GraphCore;
pub use crate::error::{GraphError, Result};
pub use crate::memory::CopyOptions;
pub use crate::traits::{Directed, EdgeAttributes, GraphStore, MultiEdges, SelfLoops, Simple};
pub use crate::variants::{
    Digraph, DirectedMultigraph, DirectedPseudograph, Graph, Multigraph, Network, Pseudograph,
};

/// External number of a vertex.
pub type Vertex = u32;

/// Dense internal position of a vertex.
pub type Slot = usize;

/// Reserved vertex number that never names a vertex.
pub const INVALID_VERTEX: Vertex = Vertex::MAX;

/// Commonly used types and traits.
pub mod prelude {
    pub use crate::{
        CopyOptions, Digraph, Directed, DirectedMultigraph, DirectedPseudograph, Edge,
        EdgeAttributes, Graph, GraphConfig, GraphError, GraphStore, MultiEdges, Multigraph,
        Network, Pseudograph, SelfLoops, Simple, Vertex,
    };
}
