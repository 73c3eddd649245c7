//! Flow correctness verification

pub mod correctness;
