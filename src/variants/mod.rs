//! The graph types, each one fixing which edges it admits.
//!
//! | Type                    | Directed | Parallel edges | Self-loops |
//! |-------------------------|----------|----------------|------------|
//! | [`Graph`]               |          |                |            |
//! | [`Digraph`]             | yes      |                |            |
//! | [`Multigraph`]          |          | yes            |            |
//! | [`DirectedMultigraph`]  | yes      | yes            |            |
//! | [`Pseudograph`]         |          | yes            | yes        |
//! | [`DirectedPseudograph`] | yes      | yes            | yes        |
//! | [`Network`]             | yes      |                |            |
use crate::macros::graph_variant;
use crate::Capabilities;

mod network;

pub use network::Network;

graph_variant!(
    /// Undirected graph without self-loops and parallel edges.
    ///
    /// # Example
    ///
    /// ```
    /// # use slotgraph::{Graph, GraphStore};
    /// let mut graph: Graph = Graph::with_num_vertices(3);
    /// graph.add_edge(0, 1).unwrap();
    /// graph.add_edge(1, 2).unwrap();
    ///
    /// assert!(graph.contains_edge(1, 0));
    /// assert!(!graph.contains_edge(0, 2));
    /// assert_eq!(graph.degree(1), Ok(2));
    /// ```
    Graph,
    Capabilities::GRAPH,
    EdgeAttributes,
    Simple,
);

graph_variant!(
    /// Directed graph without self-loops and parallel arcs.
    ///
    /// # Example
    ///
    /// ```
    /// # use slotgraph::{Digraph, Directed, GraphStore};
    /// let mut graph: Digraph = Digraph::with_num_vertices(3);
    /// graph.add_edge(0, 1).unwrap();
    /// graph.add_edge(0, 2).unwrap();
    ///
    /// assert_eq!(graph.outdegree(0), Ok(2));
    /// assert_eq!(graph.predecessors(1), Ok(&[0][..]));
    /// assert!(!graph.contains_edge(1, 0));
    /// ```
    Digraph,
    Capabilities::DIGRAPH,
    Directed,
    EdgeAttributes,
    Simple,
);

graph_variant!(
    /// Undirected graph admitting parallel edges but no self-loops.
    Multigraph,
    Capabilities::MULTIGRAPH,
    MultiEdges,
);

graph_variant!(
    /// Directed graph admitting parallel arcs but no self-loops.
    DirectedMultigraph,
    Capabilities::DIRECTED_MULTIGRAPH,
    Directed,
    MultiEdges,
);

graph_variant!(
    /// Undirected graph admitting parallel edges and self-loops.
    ///
    /// A self-loop is stored once and contributes two to the degree of its vertex.
    ///
    /// # Example
    ///
    /// ```
    /// # use slotgraph::{GraphStore, MultiEdges, Pseudograph, SelfLoops};
    /// let mut graph: Pseudograph = Pseudograph::with_num_vertices(2);
    /// graph.add_edge(1, 1).unwrap();
    /// graph.add_edge(0, 1).unwrap();
    /// graph.add_edge(1, 0).unwrap();
    ///
    /// assert_eq!(graph.self_loops(1), Ok(1));
    /// assert_eq!(graph.multiplicity(0, 1), Ok(2));
    /// assert_eq!(graph.degree(1), Ok(4));
    /// ```
    Pseudograph,
    Capabilities::PSEUDOGRAPH,
    MultiEdges,
    SelfLoops,
);

graph_variant!(
    /// Directed graph admitting parallel arcs and self-loops.
    DirectedPseudograph,
    Capabilities::DIRECTED_PSEUDOGRAPH,
    Directed,
    MultiEdges,
    SelfLoops,
);
