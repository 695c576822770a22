use thiserror::Error;

use crate::Vertex;

/// Result type used throughout the crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Error returned by graph mutations and queries.
///
/// Disallowed self-loops and multi-edges are not errors: [`add_edge`] reports them by
/// returning `Ok(None)` so that generators can try edges speculatively without paying for an
/// error.
///
/// [`add_edge`]: crate::GraphStore::add_edge
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("{0} is not a valid vertex number")]
    InvalidVertex(Vertex),
    #[error("vertex {0} does not exist")]
    UnknownVertex(Vertex),
    #[error("vertex {0} already exists")]
    DuplicateVertex(Vertex),
    #[error("edge {0}-{1} does not exist")]
    UnknownEdge(Vertex, Vertex),
    #[error("no adjacency entry at position {1} of vertex {0}")]
    UnknownPosition(Vertex, usize),
    #[error("data channel {0} does not exist")]
    UnknownChannel(usize),
    #[error("edge payload of a multigraph cannot be changed after insertion")]
    MultiEdgePayload,
    #[error("capacity {0} of edge {1}-{2} is negative")]
    NegativeCapacity(f64, Vertex, Vertex),
    #[error("flow {0} of edge {1}-{2} is negative")]
    NegativeFlow(f64, Vertex, Vertex),
    #[error("capacity or flow of edge {0}-{1} is not a number")]
    NotANumber(Vertex, Vertex),
    #[error("flow {flow} of edge {tail}-{head} exceeds its capacity {capacity}")]
    FlowExceedsCapacity {
        tail: Vertex,
        head: Vertex,
        flow: f64,
        capacity: f64,
    },
    #[error("flow is not conserved at vertex {vertex}: in {inflow}, out {outflow}")]
    FlowNotConserved {
        vertex: Vertex,
        inflow: f64,
        outflow: f64,
    },
    #[error("preflow has negative excess at vertex {vertex}: in {inflow}, out {outflow}")]
    PreflowViolated {
        vertex: Vertex,
        inflow: f64,
        outflow: f64,
    },
}
