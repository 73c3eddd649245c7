//! Maximum Flow Algorithm Implementation
//!
//! This module implements augmenting-path maximum flow over a residual
//! network: a threshold-aware breadth-first `PathFinder`, an `Augmenter`
//! that pushes the bottleneck amount along a discovered path, and a
//! `MaxFlowSolver` driving both under one of two threshold policies.
//!
//! # Policies
//!
//! - **Edmonds-Karp**: every search uses threshold 0, so any arc with
//!   positive residual capacity is usable. Shortest augmenting paths bound
//!   the run to O(V·E) augmentations and O(V·E²) time.
//! - **Capacity Scaling**: a phase with scaling value Δ only admits arcs
//!   with residual capacity of at least Δ. Δ starts at the largest edge
//!   capacity and is halved after each exhausted phase while Δ ≥ 1, giving
//!   O(E·log C) augmentations per run. The Δ = 1 phase is a threshold-0
//!   search, so the result is a true maximum.
//!
//! Both policies stop when no augmenting path exists at threshold 0, which
//! is the max-flow/min-cut optimality condition.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};
use log::{debug, trace, warn};
use serde::{Serialize, Deserialize};

use crate::algorithm::graph::min_cut::{MinCut, MinCutExtractor};
use crate::algorithm::traits::{
    parse_bool_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmProfiler, NodeId,
};
use crate::data_structures::flow_network::{Capacity, EdgeId, Flow, FlowError, FlowNetwork};
use crate::execution::history::AugmentationHistory;
use crate::validation::correctness::FlowValidator;

/// Maximum flow algorithm variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaxFlowAlgorithm {
    /// Shortest augmenting paths (threshold fixed at 0)
    EdmondsKarp,
    /// Augmenting paths above a halving capacity threshold
    CapacityScaling,
}

impl MaxFlowAlgorithm {
    /// Parameter spelling of the variant
    pub fn as_parameter(self) -> &'static str {
        match self {
            MaxFlowAlgorithm::EdmondsKarp => "edmonds_karp",
            MaxFlowAlgorithm::CapacityScaling => "capacity_scaling",
        }
    }

    pub fn from_parameter(value: &str) -> Option<Self> {
        match value {
            "edmonds_karp" => Some(MaxFlowAlgorithm::EdmondsKarp),
            "capacity_scaling" => Some(MaxFlowAlgorithm::CapacityScaling),
            _ => None,
        }
    }
}

/// Augmenting path as a predecessor-edge map
///
/// For every vertex reached by the search, `predecessor[v]` holds the handle
/// of the edge used to reach it. The path is read from sink back to source
/// through `edge.other_endpoint(v)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    source: NodeId,
    sink: NodeId,
    predecessor: Vec<Option<EdgeId>>,
}

impl AugmentingPath {
    /// Wraps a predecessor map produced outside the `PathFinder`
    pub fn from_predecessors(source: NodeId, sink: NodeId, predecessor: Vec<Option<EdgeId>>) -> Self {
        Self {
            source,
            sink,
            predecessor,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn predecessor_edge(&self, vertex: NodeId) -> Option<EdgeId> {
        self.predecessor.get(vertex).copied().flatten()
    }

    /// Walks from sink to source, yielding `(vertex, edge)` pairs where
    /// `edge` enters `vertex` on the path
    ///
    /// Fails with `NoPath` if the chain is broken or has not reached the
    /// source after `vertex_count` steps.
    pub fn edges_from_sink(&self, network: &FlowNetwork) -> Result<Vec<(NodeId, EdgeId)>, FlowError> {
        let limit = network.vertex_count();
        let mut steps = Vec::new();
        let mut vertex = self.sink;

        while vertex != self.source {
            if steps.len() >= limit {
                return Err(FlowError::NoPath { sink: self.sink, steps: steps.len() });
            }
            let edge_id = self
                .predecessor_edge(vertex)
                .ok_or(FlowError::NoPath { sink: self.sink, steps: steps.len() })?;
            let previous = network.edge(edge_id)?.other_endpoint(vertex)?;
            steps.push((vertex, edge_id));
            vertex = previous;
        }

        Ok(steps)
    }

    /// Path vertices in source-to-sink order
    pub fn vertices(&self, network: &FlowNetwork) -> Result<Vec<NodeId>, FlowError> {
        let steps = self.edges_from_sink(network)?;
        let mut vertices = Vec::with_capacity(steps.len() + 1);
        vertices.push(self.source);
        vertices.extend(steps.iter().rev().map(|&(vertex, _)| vertex));
        Ok(vertices)
    }
}

/// Threshold-aware breadth-first search over the residual network
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    searches: usize,
    vertices_visited: usize,
    edges_examined: usize,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a source-to-sink path whose every arc has residual capacity
    /// strictly above `threshold`
    ///
    /// Returns `None` when the sink is unreachable or equals the source.
    pub fn find_augmenting_path(
        &mut self,
        network: &FlowNetwork,
        threshold: Capacity,
    ) -> Result<Option<AugmentingPath>, FlowError> {
        let (source, sink) = (network.source(), network.sink());
        if source == sink {
            return Ok(None);
        }

        let (visited, predecessor) = self.search(network, source, threshold, Some(sink))?;
        if visited[sink] {
            Ok(Some(AugmentingPath::from_predecessors(source, sink, predecessor)))
        } else {
            Ok(None)
        }
    }

    /// Marks every vertex reachable from `start` over arcs above `threshold`
    pub fn reachable_from(
        &mut self,
        network: &FlowNetwork,
        start: NodeId,
        threshold: Capacity,
    ) -> Result<Vec<bool>, FlowError> {
        network.check_vertex(start)?;
        let (visited, _) = self.search(network, start, threshold, None)?;
        Ok(visited)
    }

    pub fn searches(&self) -> usize {
        self.searches
    }

    pub fn vertices_visited(&self) -> usize {
        self.vertices_visited
    }

    pub fn edges_examined(&self) -> usize {
        self.edges_examined
    }

    fn search(
        &mut self,
        network: &FlowNetwork,
        start: NodeId,
        threshold: Capacity,
        target: Option<NodeId>,
    ) -> Result<(Vec<bool>, Vec<Option<EdgeId>>), FlowError> {
        let vertex_count = network.vertex_count();
        let mut visited = vec![false; vertex_count];
        let mut predecessor = vec![None; vertex_count];
        let mut queue = VecDeque::new();

        self.searches += 1;
        visited[start] = true;
        queue.push_back(start);

        while let Some(vertex) = queue.pop_front() {
            self.vertices_visited += 1;

            for &edge_id in network.adjacency(vertex) {
                self.edges_examined += 1;
                let edge = network.edge(edge_id)?;
                let neighbor = edge.other_endpoint(vertex)?;

                if !visited[neighbor] && edge.residual_capacity_to(neighbor)? > threshold {
                    visited[neighbor] = true;
                    predecessor[neighbor] = Some(edge_id);
                    if Some(neighbor) == target {
                        return Ok((visited, predecessor));
                    }
                    queue.push_back(neighbor);
                }
            }
        }

        Ok((visited, predecessor))
    }
}

/// Bottleneck computation and flow augmentation along a path
#[derive(Debug, Clone, Copy, Default)]
pub struct Augmenter;

impl Augmenter {
    /// Minimum residual capacity along the path
    pub fn compute_bottleneck(network: &FlowNetwork, path: &AugmentingPath) -> Result<Capacity, FlowError> {
        let steps = path.edges_from_sink(network)?;
        if steps.is_empty() {
            return Err(FlowError::NoPath { sink: path.sink(), steps: 0 });
        }

        let mut bottleneck = Capacity::MAX;
        for (vertex, edge_id) in steps {
            bottleneck = bottleneck.min(network.edge(edge_id)?.residual_capacity_to(vertex)?);
        }
        Ok(bottleneck)
    }

    /// Sends `amount` toward the sink on every edge of the path
    pub fn apply_augmentation(
        network: &mut FlowNetwork,
        path: &AugmentingPath,
        amount: Flow,
    ) -> Result<(), FlowError> {
        for (vertex, edge_id) in path.edges_from_sink(network)? {
            network.edge_mut(edge_id)?.add_flow_to(vertex, amount)?;
        }
        Ok(())
    }

    /// Computes the bottleneck and applies it, returning the amount pushed
    pub fn augment(network: &mut FlowNetwork, path: &AugmentingPath) -> Result<Flow, FlowError> {
        let bottleneck = Self::compute_bottleneck(network, path)?;
        Self::apply_augmentation(network, path, bottleneck)?;
        Ok(bottleneck)
    }
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Number of threshold phases run
    pub phases: usize,
    /// Breadth-first searches performed
    pub searches: usize,
    pub vertices_visited: usize,
    pub edges_examined: usize,
    pub execution_time_ms: f64,
}

/// Maximum flow result with cut and metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowResult {
    pub algorithm: MaxFlowAlgorithm,
    /// Flow added by this run
    pub max_flow: Flow,
    pub min_cut: Option<MinCut>,
    pub metrics: FlowMetrics,
}

/// Augmenting-path maximum flow solver
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    /// Selected algorithm variant
    algorithm: MaxFlowAlgorithm,
    /// Algorithm parameters
    parameters: HashMap<String, String>,
    path_finder: PathFinder,
    history: AugmentationHistory,
    profiler: AlgorithmProfiler,
    metrics: FlowMetrics,
    /// Net source outflow before the current run
    baseline_outflow: i128,
}

impl MaxFlowSolver {
    /// Create new maximum flow solver with specified algorithm
    pub fn new(algorithm: MaxFlowAlgorithm) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("algorithm".to_string(), algorithm.as_parameter().to_string());
        parameters.insert("verify_result".to_string(), "true".to_string());
        parameters.insert("record_history".to_string(), "true".to_string());
        parameters.insert("compute_min_cut".to_string(), "true".to_string());

        Self {
            algorithm,
            parameters,
            path_finder: PathFinder::new(),
            history: AugmentationHistory::new(),
            profiler: AlgorithmProfiler::new(),
            metrics: FlowMetrics::default(),
            baseline_outflow: 0,
        }
    }

    pub fn algorithm(&self) -> MaxFlowAlgorithm {
        self.algorithm
    }

    /// Augmentations of the most recent run
    pub fn history(&self) -> &AugmentationHistory {
        &self.history
    }

    /// Metrics of the most recent run
    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// Solves with the configured variant and attaches the minimum cut
    pub fn solve(&mut self, network: &mut FlowNetwork) -> Result<MaxFlowResult, FlowError> {
        let max_flow = match self.algorithm {
            MaxFlowAlgorithm::EdmondsKarp => self.solve_edmonds_karp(network)?,
            MaxFlowAlgorithm::CapacityScaling => {
                let max_capacity = network.max_capacity();
                self.solve_capacity_scaling(network, max_capacity)?
            }
        };

        let min_cut = if self.flag("compute_min_cut") {
            Some(MinCutExtractor::extract_min_cut(network)?)
        } else {
            None
        };

        Ok(MaxFlowResult {
            algorithm: self.algorithm,
            max_flow,
            min_cut,
            metrics: self.metrics.clone(),
        })
    }

    /// Shortest augmenting path method
    pub fn solve_edmonds_karp(&mut self, network: &mut FlowNetwork) -> Result<Flow, FlowError> {
        self.begin_run(network, "Edmonds-Karp")?;
        let total = self.run_phase(network, 0)?;
        self.finish_run(network, total)
    }

    /// Capacity scaling method starting from `max_capacity`
    pub fn solve_capacity_scaling(
        &mut self,
        network: &mut FlowNetwork,
        max_capacity: Capacity,
    ) -> Result<Flow, FlowError> {
        self.begin_run(network, "Capacity Scaling")?;

        let mut total: Flow = 0;
        let mut delta = max_capacity.max(1);
        while delta >= 1 {
            debug!("Capacity scaling phase with delta {}", delta);
            let phase_flow = self.run_phase(network, delta - 1)?;
            total = total.checked_add(phase_flow).ok_or(FlowError::Overflow)?;
            delta /= 2;
        }

        self.finish_run(network, total)
    }

    /// Augments along paths above `threshold` until none remain
    fn run_phase(&mut self, network: &mut FlowNetwork, threshold: Capacity) -> Result<Flow, FlowError> {
        let record_history = self.flag("record_history");
        let mut phase_flow: Flow = 0;
        let mut augmentations = 0;

        while let Some(path) = self.path_finder.find_augmenting_path(network, threshold)? {
            let bottleneck = Augmenter::compute_bottleneck(network, &path)?;
            let vertices = if record_history || log::log_enabled!(log::Level::Trace) {
                path.vertices(network)?
            } else {
                Vec::new()
            };

            Augmenter::apply_augmentation(network, &path, bottleneck)?;
            phase_flow = phase_flow.checked_add(bottleneck).ok_or(FlowError::Overflow)?;
            augmentations += 1;
            self.profiler.record_step();

            trace!("Augmented {} units along {:?} (threshold {})", bottleneck, vertices, threshold);
            if record_history {
                self.history.record_augmentation(threshold, bottleneck, vertices);
            }
        }

        self.metrics.phases += 1;
        if record_history {
            self.history.record_phase(threshold, augmentations, phase_flow);
        }
        Ok(phase_flow)
    }

    fn begin_run(&mut self, network: &FlowNetwork, label: &str) -> Result<(), FlowError> {
        debug!(
            "{} on {} vertices, {} edges (source {}, sink {})",
            label,
            network.vertex_count(),
            network.edge_count(),
            network.source(),
            network.sink()
        );
        self.path_finder = PathFinder::new();
        self.history.clear();
        self.metrics = FlowMetrics::default();
        self.profiler.start();
        self.baseline_outflow = FlowValidator::net_outflow(network, network.source())?;
        Ok(())
    }

    fn finish_run(&mut self, network: &mut FlowNetwork, total: Flow) -> Result<Flow, FlowError> {
        self.profiler.record_node_exploration(self.path_finder.vertices_visited());
        self.profiler.stop();
        let profile = self.profiler.get_metrics();
        self.metrics.augmentations = profile.steps_executed;
        self.metrics.searches = self.path_finder.searches();
        self.metrics.vertices_visited = profile.nodes_explored;
        self.metrics.edges_examined = self.path_finder.edges_examined();
        self.metrics.execution_time_ms = profile.execution_time.as_secs_f64() * 1000.0;

        if self.flag("verify_result") {
            let expected = self.baseline_outflow + i128::from(total);
            if let Err(error) = FlowValidator::verify(network, expected).into_result() {
                warn!("Flow audit failed: {}", error);
                return Err(error);
            }
        }
        network.mark_solved();

        debug!(
            "Max flow {} after {} augmentations in {} phases",
            total, self.metrics.augmentations, self.metrics.phases
        );
        Ok(total)
    }

    fn flag(&self, name: &str) -> bool {
        self.parameters.get(name).map_or(true, |value| value == "true")
    }
}

impl Default for MaxFlowSolver {
    fn default() -> Self {
        Self::new(MaxFlowAlgorithm::EdmondsKarp)
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &str {
        match self.algorithm {
            MaxFlowAlgorithm::EdmondsKarp => "Edmonds-Karp",
            MaxFlowAlgorithm::CapacityScaling => "Capacity Scaling",
        }
    }

    fn category(&self) -> &str {
        "max_flow"
    }

    fn description(&self) -> &str {
        match self.algorithm {
            MaxFlowAlgorithm::EdmondsKarp => {
                "Ford-Fulkerson with breadth-first shortest augmenting paths over the residual network, terminating when no source-to-sink path with positive residual capacity remains."
            }
            MaxFlowAlgorithm::CapacityScaling => {
                "Ford-Fulkerson restricted to residual arcs above a capacity threshold that starts at the largest edge capacity and halves after each exhausted phase, finishing with a threshold-0 phase."
            }
        }
    }

    fn complexity(&self) -> AlgorithmComplexity {
        match self.algorithm {
            MaxFlowAlgorithm::EdmondsKarp => AlgorithmComplexity {
                time_complexity: "O(V·E²)".to_string(),
                space_complexity: "O(V + E)".to_string(),
                iteration_bound: "O(V·E) augmentations".to_string(),
            },
            MaxFlowAlgorithm::CapacityScaling => AlgorithmComplexity {
                time_complexity: "O(E²·log C)".to_string(),
                space_complexity: "O(V + E)".to_string(),
                iteration_bound: "O(E·log C) augmentations".to_string(),
            },
        }
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "algorithm" => {
                let algorithm = MaxFlowAlgorithm::from_parameter(value).ok_or_else(|| {
                    AlgorithmError::InvalidParameter(format!(
                        "algorithm must be 'edmonds_karp' or 'capacity_scaling', got '{}'",
                        value
                    ))
                })?;
                self.algorithm = algorithm;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            "verify_result" | "record_history" | "compute_min_cut" => {
                parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::InvalidParameter(format!(
                "Unknown parameter: {}. Valid parameters: algorithm, verify_result, record_history, compute_min_cut",
                name
            ))),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }
}

/// Maximum flow by shortest augmenting paths
pub fn solve_edmonds_karp(network: &mut FlowNetwork) -> Result<Flow, FlowError> {
    MaxFlowSolver::new(MaxFlowAlgorithm::EdmondsKarp).solve_edmonds_karp(network)
}

/// Maximum flow by capacity scaling from `max_capacity`
pub fn solve_capacity_scaling(network: &mut FlowNetwork, max_capacity: Capacity) -> Result<Flow, FlowError> {
    MaxFlowSolver::new(MaxFlowAlgorithm::CapacityScaling).solve_capacity_scaling(network, max_capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const DIAMOND: [(NodeId, NodeId, Capacity); 4] = [(0, 1, 8), (1, 2, 3), (1, 3, 4), (2, 3, 5)];

    fn build(vertex_count: usize, source: NodeId, sink: NodeId, edges: &[(NodeId, NodeId, Capacity)]) -> FlowNetwork {
        let mut network = FlowNetwork::new(vertex_count, source, sink).unwrap();
        for &(from, to, capacity) in edges {
            network.add_edge(from, to, capacity).unwrap();
        }
        network
    }

    /// Classic six-vertex network with max flow 23
    fn clrs_network() -> FlowNetwork {
        build(6, 0, 5, &[
            (0, 1, 16), (0, 2, 13), (1, 2, 10), (2, 1, 4), (1, 3, 12),
            (3, 2, 9), (2, 4, 14), (4, 3, 7), (3, 5, 20), (4, 5, 4),
        ])
    }

    /// Deterministic pseudo-random network for property checks
    fn generated_network(seed: u64, vertex_count: usize, edge_count: usize) -> FlowNetwork {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            state >> 33
        };
        let mut network = FlowNetwork::new(vertex_count, 0, vertex_count - 1).unwrap();
        for _ in 0..edge_count {
            let from = (next() % vertex_count as u64) as usize;
            let to = (next() % vertex_count as u64) as usize;
            let capacity = next() % 40;
            network.add_edge(from, to, capacity).unwrap();
        }
        network
    }

    fn assert_conserved(network: &FlowNetwork, flow: Flow) {
        let audit = FlowValidator::verify(network, i128::from(flow));
        assert!(audit.is_valid(), "violations: {:?}", audit.violations);
    }

    #[test]
    fn test_edmonds_karp_diamond() {
        init_logging();
        let mut network = build(4, 0, 3, &DIAMOND);
        assert_eq!(solve_edmonds_karp(&mut network).unwrap(), 7);
        assert_conserved(&network, 7);
    }

    #[test]
    fn test_capacity_scaling_diamond() {
        init_logging();
        let mut network = build(4, 0, 3, &DIAMOND);
        assert_eq!(solve_capacity_scaling(&mut network, 8).unwrap(), 7);
        assert_conserved(&network, 7);
    }

    #[test]
    fn test_classic_network() {
        let mut network = clrs_network();
        assert_eq!(solve_edmonds_karp(&mut network).unwrap(), 23);

        let mut network = clrs_network();
        let max_capacity = network.max_capacity();
        assert_eq!(solve_capacity_scaling(&mut network, max_capacity).unwrap(), 23);
    }

    #[test]
    fn test_disconnected_sink() {
        let mut network = build(4, 0, 3, &[(0, 1, 5)]);
        assert_eq!(solve_edmonds_karp(&mut network).unwrap(), 0);
        assert_eq!(solve_capacity_scaling(&mut network, 5).unwrap(), 0);
    }

    #[test]
    fn test_zero_capacity_edge_never_used() {
        let mut network = build(2, 0, 1, &[(0, 1, 0)]);
        assert_eq!(solve_edmonds_karp(&mut network).unwrap(), 0);
        assert_eq!(solve_capacity_scaling(&mut network, 0).unwrap(), 0);
        assert_eq!(network.edges()[0].flow(), 0);
    }

    #[test]
    fn test_unit_capacity_reaches_final_phase() {
        let mut network = build(3, 0, 2, &[(0, 1, 1), (1, 2, 1), (0, 2, 1)]);
        assert_eq!(solve_capacity_scaling(&mut network, 1).unwrap(), 2);
    }

    #[test]
    fn test_understated_max_capacity_still_optimal() {
        let mut network = clrs_network();
        assert_eq!(solve_capacity_scaling(&mut network, 0).unwrap(), 23);
    }

    #[test]
    fn test_source_equals_sink() {
        let mut network = build(2, 0, 0, &[(0, 1, 3), (1, 0, 3)]);
        assert_eq!(solve_edmonds_karp(&mut network).unwrap(), 0);
        assert!(!network.has_flow());
    }

    #[test]
    fn test_backward_arc_cancels_flow() {
        // The first shortest path 0-1-2-5 blocks 3->2; the optimum needs the
        // second path 0-3-2-1-4-5 to cancel the flow on 1->2.
        let mut network = build(6, 0, 5, &[
            (0, 1, 1), (1, 2, 1), (2, 5, 1), (0, 3, 1), (3, 2, 1), (1, 4, 1), (4, 5, 1),
        ]);
        let mut solver = MaxFlowSolver::default();
        assert_eq!(solver.solve_edmonds_karp(&mut network).unwrap(), 2);
        assert_conserved(&network, 2);

        assert_eq!(network.edges()[1].flow(), 0);
        assert_eq!(solver.history().augmentations()[1].path, vec![0, 3, 2, 1, 4, 5]);
    }

    #[test]
    fn test_policy_equivalence_after_reset() {
        for seed in 1..=12 {
            let mut network = generated_network(seed, 10, 30);
            let description = network.describe();

            let edmonds_karp = solve_edmonds_karp(&mut network).unwrap();
            assert_conserved(&network, edmonds_karp);

            network.reset();
            network.load(&description).unwrap();
            let max_capacity = network.max_capacity();
            let scaling = solve_capacity_scaling(&mut network, max_capacity).unwrap();
            assert_conserved(&network, scaling);

            assert_eq!(edmonds_karp, scaling, "seed {}", seed);
        }
    }

    #[test]
    fn test_reset_reproduces_result() {
        let mut network = clrs_network();
        let description = network.describe();
        let mut solver = MaxFlowSolver::new(MaxFlowAlgorithm::EdmondsKarp);

        let first = solver.solve_edmonds_karp(&mut network).unwrap();
        let first_history = solver.history().clone();

        network.reset();
        for edge in &description.edges {
            network.add_edge(edge.from, edge.to, edge.capacity).unwrap();
        }
        let second = solver.solve_edmonds_karp(&mut network).unwrap();

        assert_eq!(first, second);
        assert_eq!(&first_history, solver.history());
    }

    #[test]
    fn test_rerun_on_solved_network_adds_nothing() {
        let mut network = build(4, 0, 3, &DIAMOND);
        let mut solver = MaxFlowSolver::default();
        assert_eq!(solver.solve_edmonds_karp(&mut network).unwrap(), 7);
        assert_eq!(solver.solve_edmonds_karp(&mut network).unwrap(), 0);

        network.clear_flow();
        assert_eq!(solver.solve_edmonds_karp(&mut network).unwrap(), 7);
    }

    #[test]
    fn test_path_finder_respects_threshold() {
        let network = build(4, 0, 3, &DIAMOND);
        let mut finder = PathFinder::new();

        let path = finder.find_augmenting_path(&network, 0).unwrap().unwrap();
        assert_eq!(path.vertices(&network).unwrap(), vec![0, 1, 3]);

        // Only 0->1 (8) and 2->3 (5) exceed 4, which do not connect
        assert!(finder.find_augmenting_path(&network, 4).unwrap().is_none());
        assert_eq!(finder.searches(), 2);
    }

    #[test]
    fn test_path_finder_tie_break_is_adjacency_order() {
        let network = build(4, 0, 3, &[(0, 2, 1), (0, 1, 1), (1, 3, 1), (2, 3, 1)]);
        let path = PathFinder::new().find_augmenting_path(&network, 0).unwrap().unwrap();
        assert_eq!(path.vertices(&network).unwrap(), vec![0, 2, 3]);
    }

    #[test]
    fn test_bottleneck_and_augmentation() {
        let mut network = build(4, 0, 3, &DIAMOND);
        let path = PathFinder::new().find_augmenting_path(&network, 0).unwrap().unwrap();

        assert_eq!(Augmenter::compute_bottleneck(&network, &path).unwrap(), 4);
        assert_eq!(Augmenter::augment(&mut network, &path).unwrap(), 4);
        assert_eq!(network.edges()[0].flow(), 4);
        assert!(network.edges()[2].is_saturated());
    }

    #[test]
    fn test_corrupted_predecessor_map_reports_no_path() {
        let network = build(4, 0, 3, &DIAMOND);
        // Vertices 1 and 2 both claim edge 1->2, so the chain cycles 3, 2, 1, 2, ...
        let cyclic = AugmentingPath::from_predecessors(
            0,
            3,
            vec![None, Some(EdgeId(1)), Some(EdgeId(1)), Some(EdgeId(3))],
        );
        assert!(matches!(
            Augmenter::compute_bottleneck(&network, &cyclic),
            Err(FlowError::NoPath { sink: 3, steps: 4 })
        ));

        let broken = AugmentingPath::from_predecessors(0, 3, vec![None; 4]);
        assert!(matches!(
            Augmenter::compute_bottleneck(&network, &broken),
            Err(FlowError::NoPath { sink: 3, steps: 0 })
        ));
    }

    #[test]
    fn test_flow_overflow_is_reported() {
        let mut network = build(3, 0, 2, &[(0, 2, u64::MAX), (0, 1, u64::MAX), (1, 2, u64::MAX)]);
        assert_eq!(solve_edmonds_karp(&mut network).unwrap_err(), FlowError::Overflow);
    }

    #[test]
    fn test_failed_audit_leaves_network_unsolved() {
        let mut network = build(4, 0, 3, &DIAMOND);
        // Flow on 1->2 with nothing entering 1 breaks conservation at 1 and 2
        network.edge_mut(EdgeId(1)).unwrap().add_flow_to(2, 1).unwrap();

        let mut solver = MaxFlowSolver::default();
        assert!(matches!(
            solver.solve_edmonds_karp(&mut network),
            Err(FlowError::VerificationFailed(_))
        ));
        assert!(!network.is_solved());
        assert_eq!(MinCutExtractor::extract_min_cut(&network).unwrap_err(), FlowError::NetworkNotSolved);

        // Without the audit the same run completes and marks the network
        solver.set_parameter("verify_result", "false").unwrap();
        network.clear_flow();
        network.edge_mut(EdgeId(1)).unwrap().add_flow_to(2, 1).unwrap();
        assert!(solver.solve_edmonds_karp(&mut network).is_ok());
        assert!(network.is_solved());
    }

    #[test]
    fn test_solve_attaches_min_cut_and_metrics() {
        init_logging();
        let mut network = build(4, 0, 3, &DIAMOND);
        let mut solver = MaxFlowSolver::new(MaxFlowAlgorithm::CapacityScaling);
        let result = solver.solve(&mut network).unwrap();

        assert_eq!(result.max_flow, 7);
        assert_eq!(result.algorithm, MaxFlowAlgorithm::CapacityScaling);
        let cut = result.min_cut.unwrap();
        assert_eq!(cut.capacity, 7);
        assert_eq!(cut.edges, vec![EdgeId(1), EdgeId(2)]);

        // delta 8, 4, 2, 1
        assert_eq!(result.metrics.phases, 4);
        assert_eq!(result.metrics.augmentations, 2);
        assert_eq!(solver.history().total_flow(), Some(7));
        assert_eq!(solver.history().phases().len(), 4);
        assert_eq!(solver.history().phases()[2].threshold, 1);
    }

    #[test]
    fn test_history_can_be_disabled() {
        let mut network = build(4, 0, 3, &DIAMOND);
        let mut solver = MaxFlowSolver::default();
        solver.set_parameter("record_history", "false").unwrap();
        solver.set_parameter("compute_min_cut", "false").unwrap();

        let result = solver.solve(&mut network).unwrap();
        assert_eq!(result.max_flow, 7);
        assert!(result.min_cut.is_none());
        assert!(solver.history().is_empty());
    }

    #[test]
    fn test_solver_creation() {
        let solver = MaxFlowSolver::new(MaxFlowAlgorithm::CapacityScaling);
        assert_eq!(solver.name(), "Capacity Scaling");
        assert_eq!(solver.category(), "max_flow");
        assert_eq!(solver.get_parameter("algorithm"), Some("capacity_scaling"));
        assert_eq!(solver.complexity().time_complexity, "O(E²·log C)");
    }

    #[test]
    fn test_parameter_setting() {
        let mut solver = MaxFlowSolver::default();

        assert!(solver.set_parameter("algorithm", "capacity_scaling").is_ok());
        assert_eq!(solver.algorithm(), MaxFlowAlgorithm::CapacityScaling);
        assert!(solver.set_parameter("verify_result", "false").is_ok());
        assert_eq!(solver.get_parameter("verify_result"), Some("false"));

        // Test invalid parameters
        assert!(solver.set_parameter("algorithm", "push_relabel").is_err());
        assert_eq!(solver.algorithm(), MaxFlowAlgorithm::CapacityScaling);
        assert!(solver.set_parameter("verify_result", "maybe").is_err());
        assert!(solver.set_parameter("invalid_param", "value").is_err());
        assert_eq!(solver.get_parameters().len(), 4);
    }
}
