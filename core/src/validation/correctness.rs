//! Flow correctness verification
//!
//! Audits a flow network after a solver run: every edge must respect its
//! capacity bounds, every vertex other than source and sink must conserve
//! flow, and the net outflow of the source must equal the flow value the
//! solver reported.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::algorithm::traits::NodeId;
use crate::data_structures::flow_network::{Capacity, EdgeId, Flow, FlowError, FlowNetwork};

/// A single violated flow property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowViolation {
    /// Edge flow outside `[0, capacity]`
    CapacityBound { edge: EdgeId, flow: Flow, capacity: Capacity },
    /// Inflow and outflow differ at an internal vertex
    Conservation { vertex: NodeId, inflow: i128, outflow: i128 },
    /// Net source outflow differs from the reported flow value
    SourceOutflow { expected: i128, actual: i128 },
}

impl fmt::Display for FlowViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowViolation::CapacityBound { edge, flow, capacity } => {
                write!(f, "edge {} carries {} units over capacity {}", edge, flow, capacity)
            }
            FlowViolation::Conservation { vertex, inflow, outflow } => {
                write!(f, "vertex {} receives {} units but emits {}", vertex, inflow, outflow)
            }
            FlowViolation::SourceOutflow { expected, actual } => {
                write!(f, "source emits {} units, expected {}", actual, expected)
            }
        }
    }
}

/// Result of auditing a network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowAudit {
    pub violations: Vec<FlowViolation>,
    pub edges_checked: usize,
    pub vertices_checked: usize,
}

impl FlowAudit {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Converts a failed audit into `FlowError::VerificationFailed`
    pub fn into_result(self) -> Result<(), FlowError> {
        if self.is_valid() {
            return Ok(());
        }
        let message = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(FlowError::VerificationFailed(message))
    }
}

/// Stateless verifier for flow networks
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowValidator;

impl FlowValidator {
    /// Audits bounds, conservation and source outflow against `expected_outflow`
    pub fn verify(network: &FlowNetwork, expected_outflow: i128) -> FlowAudit {
        let mut audit = FlowAudit::default();
        let (inflow, outflow) = Self::vertex_totals(network);

        for (id, edge) in network.edges_with_ids() {
            audit.edges_checked += 1;
            if edge.flow() > edge.capacity() {
                audit.violations.push(FlowViolation::CapacityBound {
                    edge: id,
                    flow: edge.flow(),
                    capacity: edge.capacity(),
                });
            }
        }

        for vertex in 0..network.vertex_count() {
            if vertex == network.source() || vertex == network.sink() {
                continue;
            }
            audit.vertices_checked += 1;
            if inflow[vertex] != outflow[vertex] {
                audit.violations.push(FlowViolation::Conservation {
                    vertex,
                    inflow: inflow[vertex],
                    outflow: outflow[vertex],
                });
            }
        }

        let source = network.source();
        if source != network.sink() {
            let actual = outflow[source] - inflow[source];
            if actual != expected_outflow {
                audit.violations.push(FlowViolation::SourceOutflow {
                    expected: expected_outflow,
                    actual,
                });
            }
        }

        audit
    }

    /// Outgoing minus incoming flow at `vertex`
    pub fn net_outflow(network: &FlowNetwork, vertex: NodeId) -> Result<i128, FlowError> {
        network.check_vertex(vertex)?;
        let (inflow, outflow) = Self::vertex_totals(network);
        Ok(outflow[vertex] - inflow[vertex])
    }

    fn vertex_totals(network: &FlowNetwork) -> (Vec<i128>, Vec<i128>) {
        let mut inflow = vec![0i128; network.vertex_count()];
        let mut outflow = vec![0i128; network.vertex_count()];
        for edge in network.edges() {
            outflow[edge.start()] += i128::from(edge.flow());
            inflow[edge.end()] += i128::from(edge.flow());
        }
        (inflow, outflow)
    }
}
