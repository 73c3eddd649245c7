//! Execution records of solver runs

pub mod history;
