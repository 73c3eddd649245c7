//! Network flow algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod min_cut;

pub use self::max_flow::{
    solve_capacity_scaling, solve_edmonds_karp, Augmenter, AugmentingPath, FlowMetrics, MaxFlowAlgorithm,
    MaxFlowResult, MaxFlowSolver, PathFinder,
};
pub use self::min_cut::{extract_min_cut, MinCut, MinCutExtractor};
