//! Parallel execution of independent solver runs

pub mod parallel;
