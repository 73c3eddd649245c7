//! Residual flow network with arena-allocated edges
//!
//! Edges are stored once in an arena and referenced by `EdgeId` handles.
//! Every vertex keeps the handles of all its incident edges, outgoing and
//! incoming, so a residual traversal from any vertex reaches both forward
//! arcs (unused capacity) and backward arcs (cancellable flow) of a single
//! edge record.
//!
//! # Invariants
//! - `0 <= flow <= capacity` for every edge at all times
//! - Adjacency lists hold edge handles in insertion order
//! - Edge handles stay valid until `reset` or `load`
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::algorithm::traits::NodeId;

/// Edge capacity type
pub type Capacity = u64;

/// Flow value type
pub type Flow = u64;

/// Handle of an edge inside a network's edge arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Flow algorithm errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Vertex {vertex} is outside the network (vertex count {vertex_count})")]
    InvalidVertex { vertex: NodeId, vertex_count: usize },

    #[error("Vertex {vertex} is not an endpoint of edge {start} -> {end}")]
    NotIncident { vertex: NodeId, start: NodeId, end: NodeId },

    #[error("Unknown edge {0}")]
    InvalidEdge(EdgeId),

    #[error("Predecessor chain from sink {sink} did not reach the source within {steps} steps")]
    NoPath { sink: NodeId, steps: usize },

    #[error("Minimum cut requested before a solver has run on the network")]
    NetworkNotSolved,

    #[error("Flow arithmetic overflowed")]
    Overflow,

    #[error("Requested {requested} units of flow but only {available} are available")]
    CapacityExceeded { requested: Capacity, available: Capacity },

    #[error("Invalid network description: {0}")]
    InvalidDescription(String),

    #[error("Flow verification failed: {0}")]
    VerificationFailed(String),
}

/// Directed capacity/flow record with bidirectional residual queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    start: NodeId,
    end: NodeId,
    capacity: Capacity,
    flow: Flow,
}

impl FlowEdge {
    /// Create new zero-flow edge with specified capacity
    pub fn new(start: NodeId, end: NodeId, capacity: Capacity) -> Self {
        Self {
            start,
            end,
            capacity,
            flow: 0,
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Unused capacity in the forward direction
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }

    /// Residual capacity in the direction of `vertex`
    ///
    /// Toward `end` this is the unused capacity; toward `start` it is the
    /// flow that can still be cancelled.
    pub fn residual_capacity_to(&self, vertex: NodeId) -> Result<Capacity, FlowError> {
        if vertex == self.start {
            Ok(self.flow)
        } else if vertex == self.end {
            Ok(self.capacity - self.flow)
        } else {
            Err(self.not_incident(vertex))
        }
    }

    /// Sends `amount` units toward `vertex`
    ///
    /// Callers pass at most the residual capacity toward `vertex`; larger
    /// amounts are rejected instead of breaking the flow bounds.
    pub fn add_flow_to(&mut self, vertex: NodeId, amount: Flow) -> Result<(), FlowError> {
        let available = self.residual_capacity_to(vertex)?;
        if amount > available {
            return Err(FlowError::CapacityExceeded { requested: amount, available });
        }

        if vertex == self.start {
            self.flow -= amount;
        } else {
            self.flow += amount;
        }
        Ok(())
    }

    /// Endpoint of the edge that is different from `vertex`
    pub fn other_endpoint(&self, vertex: NodeId) -> Result<NodeId, FlowError> {
        if vertex == self.start {
            Ok(self.end)
        } else if vertex == self.end {
            Ok(self.start)
        } else {
            Err(self.not_incident(vertex))
        }
    }

    fn not_incident(&self, vertex: NodeId) -> FlowError {
        FlowError::NotIncident {
            vertex,
            start: self.start,
            end: self.end,
        }
    }
}

/// Serializable edge description used to (re)populate networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
}

/// Serializable topology description of a flow network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescription {
    pub vertex_count: usize,
    pub source: NodeId,
    pub sink: NodeId,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

/// Flow network representation with residual graph
///
/// Serializes as its `NetworkDescription`; deserialization rebuilds the
/// network through `from_description`, so flow state is never read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NetworkDescription", into = "NetworkDescription")]
pub struct FlowNetwork {
    /// Number of vertices in network
    vertex_count: usize,
    source: NodeId,
    sink: NodeId,
    /// Incident edge handles per vertex
    adjacency: Vec<Vec<EdgeId>>,
    /// All edges in the network
    edges: Vec<FlowEdge>,
    /// Whether a solver has run since the last reset
    solved: bool,
}

impl FlowNetwork {
    /// Create new edge-free flow network
    pub fn new(vertex_count: usize, source: NodeId, sink: NodeId) -> Result<Self, FlowError> {
        let network = Self {
            vertex_count,
            source,
            sink,
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
            solved: false,
        };
        network.check_vertex(source)?;
        network.check_vertex(sink)?;
        Ok(network)
    }

    /// Add zero-flow edge from `from` to `to`
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: Capacity) -> Result<EdgeId, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        let id = EdgeId(self.edges.len());
        self.edges.push(FlowEdge::new(from, to, capacity));
        self.solved = false;
        self.adjacency[from].push(id);
        if to != from {
            self.adjacency[to].push(id);
        }
        Ok(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> Result<&FlowEdge, FlowError> {
        self.edges.get(id.index()).ok_or(FlowError::InvalidEdge(id))
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Result<&mut FlowEdge, FlowError> {
        self.edges.get_mut(id.index()).ok_or(FlowError::InvalidEdge(id))
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Edges paired with their handles, in insertion order
    pub fn edges_with_ids(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges.iter().enumerate().map(|(index, edge)| (EdgeId(index), edge))
    }

    /// Handles of every edge touching `vertex`, in insertion order
    pub fn incident_edges(&self, vertex: NodeId) -> Result<&[EdgeId], FlowError> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    /// Largest single-edge capacity, 0 for an edge-free network
    pub fn max_capacity(&self) -> Capacity {
        self.edges.iter().map(FlowEdge::capacity).max().unwrap_or(0)
    }

    pub fn has_flow(&self) -> bool {
        self.edges.iter().any(|edge| edge.flow > 0)
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub(crate) fn mark_solved(&mut self) {
        self.solved = true;
    }

    /// Removes every edge, keeping vertex count, source and sink
    pub fn reset(&mut self) {
        self.edges.clear();
        for incident in &mut self.adjacency {
            incident.clear();
        }
        self.solved = false;
    }

    /// Zeroes the flow on every edge, keeping the topology
    pub fn clear_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
        self.solved = false;
    }

    pub fn check_vertex(&self, vertex: NodeId) -> Result<(), FlowError> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(FlowError::InvalidVertex {
                vertex,
                vertex_count: self.vertex_count,
            })
        }
    }

    /// Build a fresh network from a topology description
    pub fn from_description(description: &NetworkDescription) -> Result<Self, FlowError> {
        let mut network = Self::new(description.vertex_count, description.source, description.sink)?;
        for edge in &description.edges {
            network.add_edge(edge.from, edge.to, edge.capacity)?;
        }
        Ok(network)
    }

    /// Replace all edges with those of `description`
    ///
    /// The description must name the same vertex count, source and sink. On
    /// any error the network is left untouched.
    pub fn load(&mut self, description: &NetworkDescription) -> Result<(), FlowError> {
        if description.vertex_count != self.vertex_count
            || description.source != self.source
            || description.sink != self.sink
        {
            return Err(FlowError::InvalidDescription(format!(
                "expected {} vertices with source {} and sink {}, got {} vertices with source {} and sink {}",
                self.vertex_count, self.source, self.sink,
                description.vertex_count, description.source, description.sink
            )));
        }

        *self = Self::from_description(description)?;
        Ok(())
    }

    /// Topology of the network without flow state
    pub fn describe(&self) -> NetworkDescription {
        NetworkDescription {
            vertex_count: self.vertex_count,
            source: self.source,
            sink: self.sink,
            edges: self
                .edges
                .iter()
                .map(|edge| EdgeDescription {
                    from: edge.start,
                    to: edge.end,
                    capacity: edge.capacity,
                })
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        let description: NetworkDescription = serde_json::from_str(json)
            .map_err(|e| FlowError::InvalidDescription(e.to_string()))?;
        Self::from_description(&description)
    }

    pub fn to_json(&self) -> Result<String, FlowError> {
        serde_json::to_string(&self.describe())
            .map_err(|e| FlowError::InvalidDescription(e.to_string()))
    }

    /// Adjacency without bounds reporting, for traversals over known vertices
    pub(crate) fn adjacency(&self, vertex: NodeId) -> &[EdgeId] {
        &self.adjacency[vertex]
    }
}

impl TryFrom<NetworkDescription> for FlowNetwork {
    type Error = FlowError;

    fn try_from(description: NetworkDescription) -> Result<Self, Self::Error> {
        Self::from_description(&description)
    }
}

impl From<FlowNetwork> for NetworkDescription {
    fn from(network: FlowNetwork) -> Self {
        network.describe()
    }
}
