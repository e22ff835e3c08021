//! # relief-routing
//!
//! Priority-driven vehicle allocation and routing over a weighted road
//! network: shortest paths, greedy capacity-aware assignment, 2-opt route
//! refinement, and multi-objective route scoring.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, RoadSegment, Vehicle)
//! - [`graph`] — Adjacency-list road network
//! - [`shortest_path`] — Dijkstra and A* queries
//! - [`constructive`] — Priority-greedy allocation of locations to vehicles
//! - [`local_search`] — 2-opt route improvement
//! - [`evaluation`] — Route cost model
//! - [`solver`] — Allocation → improvement → scoring pipeline
//! - [`generator`] — Seeded synthetic scenarios
//! - [`io`] — JSON problem/solution documents (feature `json`)

pub mod constructive;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod graph;
#[cfg(feature = "json")]
pub mod io;
pub mod local_search;
pub mod models;
pub mod shortest_path;
pub mod solver;

pub use error::{Result, RoutingError};
