//! CONFLUX: Residual Network Flow Engine
//!
//! Maximum flow over directed capacity networks by augmenting paths, with
//! two threshold policies (Edmonds-Karp and capacity scaling), minimum cut
//! extraction, flow auditing and parallel batch solving.
//!
//! ```
//! use conflux_core::{FlowNetwork, MaxFlowAlgorithm, MaxFlowSolver};
//!
//! let mut network = FlowNetwork::new(4, 0, 3)?;
//! network.add_edge(0, 1, 8)?;
//! network.add_edge(1, 2, 3)?;
//! network.add_edge(1, 3, 4)?;
//! network.add_edge(2, 3, 5)?;
//!
//! let result = MaxFlowSolver::new(MaxFlowAlgorithm::EdmondsKarp).solve(&mut network)?;
//! assert_eq!(result.max_flow, 7);
//! assert_eq!(result.min_cut.map(|cut| cut.capacity), Some(7));
//! # Ok::<(), conflux_core::FlowError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod execution;
pub mod optimization;
pub mod validation;

pub use crate::algorithm::*;
pub use crate::data_structures::flow_network::{
    Capacity, EdgeDescription, EdgeId, Flow, FlowEdge, FlowError, FlowNetwork, NetworkDescription,
};
pub use crate::execution::history::{AugmentationHistory, AugmentationRecord, PhaseRecord};
pub use crate::optimization::parallel::BatchSolver;
pub use crate::validation::correctness::{FlowAudit, FlowValidator, FlowViolation};
