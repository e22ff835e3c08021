//! Constructive allocation of locations to vehicles.
//!
//! - [`allocate_vehicles`] — Priority-ordered greedy assignment by shortest-path cost

mod priority_greedy;

pub use priority_greedy::{allocate_vehicles, Allocation};
