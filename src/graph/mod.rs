//! Road network representation.
//!
//! Provides an adjacency-list graph over locations and undirected roads.

mod network;

pub use network::Graph;
