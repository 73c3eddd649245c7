//! Core algorithm trait definitions for the CONFLUX flow engine
//!
//! This module establishes the shared vocabulary every solver in the crate
//! speaks: vertex identifiers, the configurable `Algorithm` interface with
//! string-typed parameters, framework-level errors, and a lightweight
//! profiler used to collect execution metrics.
//!
//! # Key Design Principles
//! - Parameters are validated at the point they are set
//! - Solvers are deterministic for a given input network
//! - Metrics are collected without affecting algorithmic behaviour
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::time::{Duration, Instant};
use serde::{Serialize, Deserialize};

use crate::data_structures::flow_network::FlowError;

/// Vertex identifier: an index in `[0, vertex_count)` of a flow network
pub type NodeId = usize;

/// Comprehensive error types for algorithm configuration and execution
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid node: {0}")]
    InvalidNode(NodeId),

    #[error("Execution error: {0}")]
    ExecutionError(String),
}

impl From<FlowError> for AlgorithmError {
    fn from(error: FlowError) -> Self {
        match error {
            FlowError::InvalidVertex { vertex, .. } => AlgorithmError::InvalidNode(vertex),
            other => AlgorithmError::ExecutionError(other.to_string()),
        }
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub iteration_bound: String,
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    pub steps_executed: usize,
    pub nodes_explored: usize,
    pub execution_time: Duration,
}

/// Configurable algorithm interface
///
/// # Invariants
/// - Parameter values returned by `get_parameter` were accepted by `set_parameter`
/// - Rejected parameters leave the algorithm configuration unchanged
pub trait Algorithm {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &str;

    /// Returns the algorithm's category (e.g., max_flow)
    fn category(&self) -> &str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> &str;

    /// Returns the algorithm's asymptotic complexity
    fn complexity(&self) -> AlgorithmComplexity;

    /// Sets algorithm parameter with validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<&str>;

    /// Returns every configured parameter
    fn get_parameters(&self) -> HashMap<String, String>;
}

/// Parses a boolean parameter value, accepting only `true` and `false`
pub fn parse_bool_parameter(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::InvalidParameter(format!(
            "{} expects 'true' or 'false', got '{}'",
            name, value
        ))),
    }
}

/// Performance profiling integration
#[derive(Debug, Clone, Default)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears collected metrics and starts the clock
    pub fn start(&mut self) {
        self.metrics = AlgorithmMetrics::default();
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_node_exploration(&mut self, count: usize) {
        self.metrics.nodes_explored += count;
    }

    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}
