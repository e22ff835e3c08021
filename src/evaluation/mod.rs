//! Route scoring.
//!
//! Combines travel time, compounded road unreliability, and idle capacity
//! into a single weighted score per route.

mod cost_model;

pub use cost_model::{calculate_route_cost, calculate_total_cost, CostWeights, RouteCost};
