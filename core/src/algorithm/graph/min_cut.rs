//! Minimum cut extraction from a solved residual network
//!
//! After a maximum flow run no source-to-sink path with positive residual
//! capacity remains. The vertices still reachable from the source form the
//! source side `S` of a minimum cut; every original edge leaving `S` is
//! saturated and their capacities sum to the maximum flow value.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use serde::{Serialize, Deserialize};

use crate::algorithm::graph::max_flow::PathFinder;
use crate::algorithm::traits::NodeId;
use crate::data_structures::flow_network::{Capacity, EdgeId, FlowError, FlowNetwork};

/// Source/sink partition with its crossing edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices reachable from the source in the final residual network
    pub source_side: Vec<NodeId>,
    /// Original edges leaving the source side, in insertion order
    pub edges: Vec<EdgeId>,
    /// Sum of the capacities of `edges`
    pub capacity: Capacity,
}

impl MinCut {
    pub fn contains(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MinCutExtractor;

impl MinCutExtractor {
    /// Extracts the minimum cut of a network a solver has already run on
    ///
    /// When source and sink coincide there is nothing to separate and the
    /// cut is empty.
    pub fn extract_min_cut(network: &FlowNetwork) -> Result<MinCut, FlowError> {
        if !network.is_solved() {
            return Err(FlowError::NetworkNotSolved);
        }

        let reachable = PathFinder::new().reachable_from(network, network.source(), 0)?;
        let source_side: Vec<NodeId> = (0..network.vertex_count()).filter(|&v| reachable[v]).collect();

        let mut edges = Vec::new();
        let mut capacity: Capacity = 0;
        if network.source() != network.sink() {
            for (id, edge) in network.edges_with_ids() {
                if reachable[edge.start()] && !reachable[edge.end()] {
                    debug_assert!(edge.is_saturated(), "cut edge {} is not saturated", id);
                    capacity = capacity.checked_add(edge.capacity()).ok_or(FlowError::Overflow)?;
                    edges.push(id);
                }
            }
        }

        debug!(
            "Minimum cut of {} edges, capacity {}, source side of {} vertices",
            edges.len(),
            capacity,
            source_side.len()
        );
        Ok(MinCut {
            source_side,
            edges,
            capacity,
        })
    }
}

/// Minimum cut of a solved network
pub fn extract_min_cut(network: &FlowNetwork) -> Result<MinCut, FlowError> {
    MinCutExtractor::extract_min_cut(network)
}
