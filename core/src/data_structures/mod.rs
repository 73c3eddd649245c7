//! Flow network data structures

pub mod flow_network;
