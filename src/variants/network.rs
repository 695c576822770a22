use std::fmt;

use tracing::debug;

use crate::engine::{GraphCore, Location, CAPACITY_CHANNEL, COST_CHANNEL, FLOW_CHANNEL};
use crate::{
    Capabilities, CopyOptions, Directed, EdgeAttributes, GraphConfig, GraphError, GraphStore,
    Result, Vertex,
};

/// Directed graph whose arcs carry a capacity, a cost and a flow.
///
/// Capacities and flows are validated when written: a flow is always between zero and the
/// capacity of its arc. Conservation is only checked on request, by [`check_flow`] and
/// [`check_preflow`].
///
/// [`check_flow`]: Network::check_flow
/// [`check_preflow`]: Network::check_preflow
///
/// # Example
///
/// ```
/// # use slotgraph::{GraphStore, Network};
/// let mut network: Network = Network::with_num_vertices(3);
/// network.set_source(0).unwrap();
/// network.set_sink(2).unwrap();
/// network.add_edge_with_capacity(0, 1, 5.0).unwrap();
/// network.add_edge_with_capacity(1, 2, 4.0).unwrap();
///
/// network.set_flow(0, 1, 3.0).unwrap();
/// network.set_flow(1, 2, 3.0).unwrap();
/// assert!(network.check_flow().is_ok());
/// assert_eq!(network.flow_value(), 3.0);
///
/// // Writing an infeasible flow fails immediately.
/// assert!(network.set_flow(1, 2, 4.5).is_err());
/// assert_eq!(network.residual_capacity(1, 2), Ok(1.0));
/// ```
#[derive(Clone)]
pub struct Network<VL = (), EL = ()> {
    core: GraphCore<VL, EL>,
    source: Option<Vertex>,
    sink: Option<Vertex>,
}

impl<VL, EL> Network<VL, EL> {
    pub const CAPABILITIES: Capabilities = Capabilities::NETWORK;

    pub fn new() -> Self {
        Self::with_num_vertices(0)
    }

    /// Creates a network with the vertices `0..n` and neither source nor sink.
    pub fn with_num_vertices(n: usize) -> Self {
        let config = GraphConfig::new().with_capabilities(Self::CAPABILITIES);
        Self::from_core(GraphCore::with_num_vertices(config, n))
    }

    pub fn with_vertices(vertices: impl IntoIterator<Item = Vertex>) -> Result<Self> {
        Self::with_config(GraphConfig::new(), vertices)
    }

    pub fn with_config(
        config: GraphConfig,
        vertices: impl IntoIterator<Item = Vertex>,
    ) -> Result<Self> {
        let config = config.with_capabilities(Self::CAPABILITIES);
        GraphCore::new(config, vertices).map(Self::from_core)
    }

    #[inline]
    pub fn source(&self) -> Option<Vertex> {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> Option<Vertex> {
        self.sink
    }

    pub fn set_source(&mut self, v: Vertex) -> Result<()> {
        self.core.slot_of(v)?;
        self.source = Some(v);
        Ok(())
    }

    pub fn set_sink(&mut self, v: Vertex) -> Result<()> {
        self.core.slot_of(v)?;
        self.sink = Some(v);
        Ok(())
    }

    /// Adds an arc with the given capacity, zero cost and zero flow.
    pub fn add_edge_with_capacity(
        &mut self,
        v: Vertex,
        u: Vertex,
        capacity: f64,
    ) -> Result<Option<usize>> {
        self.add_edge_with_capacity_and_cost(v, u, capacity, 0.0)
    }

    pub fn add_edge_with_capacity_and_cost(
        &mut self,
        v: Vertex,
        u: Vertex,
        capacity: f64,
        cost: f64,
    ) -> Result<Option<usize>> {
        check_capacity(v, u, capacity)?;
        let Some(pos) = self.core.add_edge(v, u)? else {
            return Ok(None);
        };
        let location = (self.core.slot_of(v)?, pos);
        let capacity_channel = self.core.network_channel(CAPACITY_CHANNEL);
        let cost_channel = self.core.network_channel(COST_CHANNEL);
        self.core.set_data_at(location, capacity_channel, capacity);
        self.core.set_data_at(location, cost_channel, cost);
        Ok(Some(pos))
    }

    fn read(&self, v: Vertex, u: Vertex, offset: usize) -> Result<f64> {
        let location = self.core.edge_location(v, u)?;
        Ok(self.read_at(location, offset))
    }

    #[inline]
    fn read_at(&self, location: Location, offset: usize) -> f64 {
        self.core.data_at(location, self.core.network_channel(offset))
    }

    fn write_at(&mut self, location: Location, offset: usize, value: f64) {
        let channel = self.core.network_channel(offset);
        self.core.set_data_at(location, channel, value);
    }

    pub fn capacity(&self, v: Vertex, u: Vertex) -> Result<f64> {
        self.read(v, u, CAPACITY_CHANNEL)
    }

    /// Sets the capacity of an arc.
    ///
    /// # Errors
    ///
    /// Fails if the capacity is negative or below the current flow of the arc.
    pub fn set_capacity(&mut self, v: Vertex, u: Vertex, capacity: f64) -> Result<()> {
        let location = self.core.edge_location(v, u)?;
        check_capacity(v, u, capacity)?;
        let flow = self.read_at(location, FLOW_CHANNEL);
        if flow > capacity {
            return Err(GraphError::FlowExceedsCapacity {
                tail: v,
                head: u,
                flow,
                capacity,
            });
        }
        self.write_at(location, CAPACITY_CHANNEL, capacity);
        Ok(())
    }

    pub fn cost(&self, v: Vertex, u: Vertex) -> Result<f64> {
        self.read(v, u, COST_CHANNEL)
    }

    pub fn set_cost(&mut self, v: Vertex, u: Vertex, cost: f64) -> Result<()> {
        let location = self.core.edge_location(v, u)?;
        self.write_at(location, COST_CHANNEL, cost);
        Ok(())
    }

    pub fn flow(&self, v: Vertex, u: Vertex) -> Result<f64> {
        self.read(v, u, FLOW_CHANNEL)
    }

    /// Sets the flow on an arc.
    ///
    /// # Errors
    ///
    /// Fails if the flow is negative or exceeds the capacity of the arc; the flow is left
    /// unchanged in that case.
    pub fn set_flow(&mut self, v: Vertex, u: Vertex, flow: f64) -> Result<()> {
        let location = self.core.edge_location(v, u)?;
        if flow.is_nan() {
            return Err(GraphError::NotANumber(v, u));
        }
        if flow < 0.0 {
            return Err(GraphError::NegativeFlow(flow, v, u));
        }
        let capacity = self.read_at(location, CAPACITY_CHANNEL);
        if flow > capacity {
            return Err(GraphError::FlowExceedsCapacity {
                tail: v,
                head: u,
                flow,
                capacity,
            });
        }
        self.write_at(location, FLOW_CHANNEL, flow);
        Ok(())
    }

    /// Capacity left on an arc once its flow is subtracted.
    pub fn residual_capacity(&self, v: Vertex, u: Vertex) -> Result<f64> {
        let location = self.core.edge_location(v, u)?;
        Ok(self.read_at(location, CAPACITY_CHANNEL) - self.read_at(location, FLOW_CHANNEL))
    }

    /// Sets the flow of every arc to zero.
    pub fn reset_flow(&mut self) {
        let channel = self.core.network_channel(FLOW_CHANNEL);
        self.core.fill_edge_data(channel, 0.0);
    }

    /// Flow entering and leaving every vertex, indexed by slot.
    fn balances(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.core.num_vertices();
        let (mut inflow, mut outflow) = (vec![0.0; n], vec![0.0; n]);
        let channel = self.core.network_channel(FLOW_CHANNEL);
        for slot in 0..n {
            let out = &self.core.record(slot).out;
            for pos in 0..out.len() {
                let flow = out.data(pos, channel);
                outflow[slot] += flow;
                inflow[self.core.slot_unchecked(out.target(pos))] += flow;
            }
        }
        (inflow, outflow)
    }

    /// Flow entering `v` minus the flow leaving it.
    pub fn excess(&self, v: Vertex) -> Result<f64> {
        let slot = self.core.slot_of(v)?;
        let channel = self.core.network_channel(FLOW_CHANNEL);
        let out = &self.core.record(slot).out;
        let outflow: f64 = (0..out.len()).map(|pos| out.data(pos, channel)).sum();
        let inflow: f64 = self
            .core
            .record(slot)
            .pred
            .targets
            .iter()
            .zip(&self.core.record(slot).pred.mirror)
            .map(|(&w, &r)| self.core.data_at((self.core.slot_unchecked(w), r), channel))
            .sum();
        Ok(inflow - outflow)
    }

    /// Net flow leaving the source, zero if the network has no source.
    pub fn flow_value(&self) -> f64 {
        self.source
            .filter(|&s| self.core.index_of(s).is_some())
            .and_then(|s| self.excess(s).ok())
            .map_or(0.0, |excess| -excess)
    }

    fn is_terminal(&self, v: Vertex) -> bool {
        Some(v) == self.source || Some(v) == self.sink
    }

    /// Checks that flow is conserved at every vertex other than the source and the sink.
    pub fn check_flow(&self) -> Result<()> {
        let (inflow, outflow) = self.balances();
        for (slot, &v) in self.core.vertices().iter().enumerate() {
            if !self.is_terminal(v) && inflow[slot] != outflow[slot] {
                debug!(
                    vertex = v,
                    inflow = inflow[slot],
                    outflow = outflow[slot],
                    "flow not conserved"
                );
                return Err(GraphError::FlowNotConserved {
                    vertex: v,
                    inflow: inflow[slot],
                    outflow: outflow[slot],
                });
            }
        }
        Ok(())
    }

    /// Checks that no vertex other than the source and the sink sends more flow than it
    /// receives.
    pub fn check_preflow(&self) -> Result<()> {
        let (inflow, outflow) = self.balances();
        for (slot, &v) in self.core.vertices().iter().enumerate() {
            if !self.is_terminal(v) && inflow[slot] < outflow[slot] {
                debug!(
                    vertex = v,
                    inflow = inflow[slot],
                    outflow = outflow[slot],
                    "preflow violated"
                );
                return Err(GraphError::PreflowViolated {
                    vertex: v,
                    inflow: inflow[slot],
                    outflow: outflow[slot],
                });
            }
        }
        Ok(())
    }
}

impl<VL, EL> Default for Network<VL, EL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<VL, EL> fmt::Debug for Network<VL, EL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("vertices", &self.vertices())
            .field("edges", &self.edges().collect::<Vec<_>>())
            .field("source", &self.source)
            .field("sink", &self.sink)
            .finish()
    }
}

impl<VL, EL> GraphStore for Network<VL, EL> {
    type VertexLabel = VL;
    type EdgeLabel = EL;

    #[inline]
    fn core(&self) -> &GraphCore<VL, EL> {
        &self.core
    }

    #[inline]
    fn core_mut(&mut self) -> &mut GraphCore<VL, EL> {
        &mut self.core
    }

    fn from_core(core: GraphCore<VL, EL>) -> Self {
        Self {
            core,
            source: None,
            sink: None,
        }
    }

    fn copy(&self, options: CopyOptions) -> Self
    where
        Self::VertexLabel: Clone,
        Self::EdgeLabel: Clone,
    {
        Self {
            core: self.core.copy(options),
            source: self.source,
            sink: self.sink,
        }
    }
}

impl<VL, EL> Directed for Network<VL, EL> {}
impl<VL, EL> EdgeAttributes for Network<VL, EL> {}

fn check_capacity(v: Vertex, u: Vertex, capacity: f64) -> Result<()> {
    if capacity.is_nan() {
        Err(GraphError::NotANumber(v, u))
    } else if capacity < 0.0 {
        Err(GraphError::NegativeCapacity(capacity, v, u))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::assert_consistent;

    fn path() -> Network {
        let mut network = Network::with_num_vertices(4);
        network.set_source(0).unwrap();
        network.set_sink(3).unwrap();
        network.add_edge_with_capacity(0, 1, 5.0).unwrap();
        network.add_edge_with_capacity_and_cost(1, 2, 2.0, 7.0).unwrap();
        network.add_edge(2, 3).unwrap();
        network
    }

    #[test]
    fn capacity_is_checked_on_write() {
        let mut network = path();
        network.set_flow(0, 1, 3.0).unwrap();
        assert_eq!(
            network.check_flow(),
            Err(GraphError::FlowNotConserved {
                vertex: 1,
                inflow: 3.0,
                outflow: 0.0,
            })
        );
        assert!(network.check_preflow().is_ok());

        assert_eq!(
            network.set_flow(0, 1, 6.0),
            Err(GraphError::FlowExceedsCapacity {
                tail: 0,
                head: 1,
                flow: 6.0,
                capacity: 5.0,
            })
        );
        assert_eq!(network.flow(0, 1), Ok(3.0));
        assert_eq!(network.set_flow(0, 1, -1.0), Err(GraphError::NegativeFlow(-1.0, 0, 1)));
        assert!(network.set_capacity(0, 1, 2.0).is_err());
        assert_eq!(network.capacity(0, 1), Ok(5.0));
    }

    #[test]
    fn conserved_flow() {
        let mut network = path();
        assert_eq!(network.capacity(2, 3), Ok(1.0));
        assert_eq!(network.cost(1, 2), Ok(7.0));
        for (v, u) in [(0, 1), (1, 2), (2, 3)] {
            network.set_flow(v, u, 1.0).unwrap();
        }
        assert!(network.check_flow().is_ok());
        assert_eq!(network.flow_value(), 1.0);
        assert_eq!(network.excess(3), Ok(1.0));
        assert_eq!(network.residual_capacity(1, 2), Ok(1.0));

        network.set_flow(2, 3, 0.0).unwrap();
        assert!(network.check_flow().is_err());
        assert!(network.check_preflow().is_ok());
        network.set_flow(1, 2, 0.0).unwrap();
        assert_eq!(network.check_preflow(), Ok(()));

        network.reset_flow();
        assert_eq!(network.flow_value(), 0.0);
        assert_eq!(network.flow(0, 1), Ok(0.0));
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let mut network: Network = Network::with_num_vertices(2);
        assert_eq!(
            network.add_edge_with_capacity(0, 1, -2.0),
            Err(GraphError::NegativeCapacity(-2.0, 0, 1))
        );
        assert_eq!(network.num_edges(), 0);
        assert_eq!(network.add_edge_with_capacity(1, 1, 1.0), Ok(None));
    }

    #[test]
    fn nan_capacity_and_flow_are_rejected() {
        let mut network = path();
        assert_eq!(network.set_flow(0, 1, f64::NAN), Err(GraphError::NotANumber(0, 1)));
        assert_eq!(network.flow(0, 1), Ok(0.0));
        assert_eq!(network.set_capacity(0, 1, f64::NAN), Err(GraphError::NotANumber(0, 1)));
        assert_eq!(network.capacity(0, 1), Ok(5.0));

        assert_eq!(
            network.add_edge_with_capacity(3, 0, f64::NAN),
            Err(GraphError::NotANumber(3, 0))
        );
        assert!(!network.contains_edge(3, 0));
        assert_eq!(network.num_edges(), 3);

        network.add_edge_with_capacity(3, 0, f64::INFINITY).unwrap();
        assert_eq!(network.set_flow(3, 0, 1e9), Ok(()));
    }

    #[test]
    fn preflow_deficit() {
        let mut network = path();
        network.set_flow(1, 2, 1.0).unwrap();
        assert_eq!(
            network.check_preflow(),
            Err(GraphError::PreflowViolated {
                vertex: 1,
                inflow: 0.0,
                outflow: 1.0,
            })
        );
    }

    #[test]
    fn user_channels_precede_network_channels() {
        let config = GraphConfig::new().edge_data_channels(1);
        let mut network: Network = Network::with_config(config, [0, 1]).unwrap();
        network.add_edge_with_capacity(0, 1, 3.0).unwrap();
        network.set_edge_data(0, 1, 0, 9.0).unwrap();
        assert_eq!(network.capacity(0, 1), Ok(3.0));
        assert_eq!(network.edge_data(0, 1, 1), Err(GraphError::UnknownChannel(1)));

        let copy = network.copy(CopyOptions::new(true, false, false, false, false));
        assert_eq!(copy.capacity(0, 1), Ok(3.0));
        assert_eq!(copy.edge_data(0, 1, 0), Ok(0.0));
        assert_consistent(copy.core());
    }
}
