//! Construction parameters shared by every graph variant.

use crate::Vertex;

/// Default number of neighbours reserved per vertex on its first edge.
pub const DEFAULT_AVG_DEGREE: usize = 4;

/// Structural capabilities of a graph.
///
/// These are fixed by the variant type ([`Graph`], [`Digraph`], [`Multigraph`], ...) and are not
/// meant to be changed after construction.
///
/// [`Graph`]: crate::Graph
/// [`Digraph`]: crate::Digraph
/// [`Multigraph`]: crate::Multigraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Edges are arcs and the graph keeps predecessor lists.
    pub directed: bool,
    /// More than one edge may connect the same pair of vertices.
    pub multi_edges: bool,
    /// An edge may connect a vertex to itself.
    pub self_loops: bool,
    /// Edges carry capacity, cost and flow channels.
    pub flow: bool,
}

impl Capabilities {
    pub const GRAPH: Self = Self::new(false, false, false);
    pub const DIGRAPH: Self = Self::new(true, false, false);
    pub const MULTIGRAPH: Self = Self::new(false, true, false);
    pub const DIRECTED_MULTIGRAPH: Self = Self::new(true, true, false);
    pub const PSEUDOGRAPH: Self = Self::new(false, true, true);
    pub const DIRECTED_PSEUDOGRAPH: Self = Self::new(true, true, true);
    pub const NETWORK: Self = Self {
        flow: true,
        ..Self::DIGRAPH
    };

    const fn new(directed: bool, multi_edges: bool, self_loops: bool) -> Self {
        Self {
            directed,
            multi_edges,
            self_loops,
            flow: false,
        }
    }

    /// Whether the graph admits neither self-loops nor multiple edges.
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.multi_edges && !self.self_loops
    }
}

/// Construction parameters for a graph.
///
/// # Example
///
/// ```
/// # use slotgraph::{GraphConfig, Graph, GraphStore};
/// let config = GraphConfig::new().avg_degree_hint(16).edge_data_channels(2);
/// let graph = Graph::<(), ()>::with_config(config, [3, 7, 11]).unwrap();
///
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.config().edge_data_channels, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub capabilities: Capabilities,
    /// Expected largest vertex number, used to size the vertex index up front.
    pub max_vertex_hint: Option<Vertex>,
    /// Expected average degree, used as the initial capacity of adjacency arrays.
    pub avg_degree_hint: usize,
    /// Number of additional `f64` channels stored for every vertex.
    pub vertex_data_channels: usize,
    /// Number of additional `f64` channels stored for every edge.
    pub edge_data_channels: usize,
    /// Whether mutations validate the self-loop and multi-edge policy.
    pub safe_mode: bool,
    /// Materialize the vertex weight channel on construction.
    pub vertex_weighted: bool,
    /// Materialize the edge weight channel on construction.
    pub edge_weighted: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::GRAPH,
            max_vertex_hint: None,
            avg_degree_hint: DEFAULT_AVG_DEGREE,
            vertex_data_channels: 0,
            edge_data_channels: 0,
            safe_mode: true,
            vertex_weighted: false,
            edge_weighted: false,
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_vertex_hint(mut self, max_vertex: Vertex) -> Self {
        self.max_vertex_hint = Some(max_vertex);
        self
    }

    pub fn avg_degree_hint(mut self, avg_degree: usize) -> Self {
        self.avg_degree_hint = avg_degree;
        self
    }

    pub fn vertex_data_channels(mut self, channels: usize) -> Self {
        self.vertex_data_channels = channels;
        self
    }

    pub fn edge_data_channels(mut self, channels: usize) -> Self {
        self.edge_data_channels = channels;
        self
    }

    pub fn safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    pub fn vertex_weighted(mut self, weighted: bool) -> Self {
        self.vertex_weighted = weighted;
        self
    }

    pub fn edge_weighted(mut self, weighted: bool) -> Self {
        self.edge_weighted = weighted;
        self
    }

    pub(crate) fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
