//! Parallel batch solving over independent flow networks
//!
//! A single maximum flow run is strictly sequential, but distinct
//! `FlowNetwork` instances share no state, so a batch of them can be solved
//! concurrently. Work is distributed with rayon's work-stealing pool; each
//! network gets its own solver cloned from a configured prototype and
//! results come back in input order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use rayon::prelude::*;

use crate::algorithm::graph::max_flow::{MaxFlowAlgorithm, MaxFlowResult, MaxFlowSolver};
use crate::algorithm::traits::{Algorithm, AlgorithmError};
use crate::data_structures::flow_network::{FlowError, FlowNetwork};

/// Solves many independent networks with a shared configuration
#[derive(Debug, Clone)]
pub struct BatchSolver {
    prototype: MaxFlowSolver,
}

impl BatchSolver {
    pub fn new(algorithm: MaxFlowAlgorithm) -> Self {
        Self {
            prototype: MaxFlowSolver::new(algorithm),
        }
    }

    /// Applies a solver parameter to every network of the batch
    pub fn with_parameter(mut self, name: &str, value: &str) -> Result<Self, AlgorithmError> {
        self.prototype.set_parameter(name, value)?;
        Ok(self)
    }

    pub fn algorithm(&self) -> MaxFlowAlgorithm {
        self.prototype.algorithm()
    }

    /// Solves every network in parallel; one result per network, in order
    pub fn solve_all(&self, networks: &mut [FlowNetwork]) -> Vec<Result<MaxFlowResult, FlowError>> {
        debug!(
            "Solving batch of {} networks with {}",
            networks.len(),
            self.prototype.name()
        );
        networks
            .par_iter_mut()
            .map(|network| self.prototype.clone().solve(network))
            .collect()
    }

    /// Sequential counterpart of `solve_all`
    pub fn solve_all_sequential(&self, networks: &mut [FlowNetwork]) -> Vec<Result<MaxFlowResult, FlowError>> {
        networks
            .iter_mut()
            .map(|network| self.prototype.clone().solve(network))
            .collect()
    }
}
