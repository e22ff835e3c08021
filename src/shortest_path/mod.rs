//! Shortest-path queries over the road network.
//!
//! - [`dijkstra`] — All-destinations distance table, O((V + E) log V)
//! - [`dijkstra_tree`] / [`shortest_path`] — Distances with path reconstruction
//! - [`astar`] — Goal-directed single-pair search with a pluggable [`Heuristic`]

mod astar;
mod dijkstra;

pub use astar::{astar, astar_with, Heuristic, IdDifference, ZeroHeuristic};
pub use dijkstra::{dijkstra, dijkstra_tree, shortest_path, Distances, ShortestPathTree};

/// A sequence of locations joined by roads, with its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Location ids from source to target, inclusive.
    pub nodes: Vec<usize>,
    /// Sum of road costs along `nodes`.
    pub cost: f64,
}
