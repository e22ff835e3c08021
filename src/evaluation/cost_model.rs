//! Multi-objective route scoring.
//!
//! ```text
//! final_score = time · total_time + reliability · (1 − Π r_e) + idle · (capacity − load)
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, RoutingError};
use crate::graph::Graph;
use crate::models::Vehicle;

/// Weights of the linear scoring function.
///
/// Weights must be finite and non-negative; they need not sum to one.
///
/// # Examples
///
/// ```
/// use relief_routing::evaluation::CostWeights;
///
/// let w = CostWeights::default();
/// assert_eq!((w.time, w.reliability, w.idle), (0.6, 0.3, 0.1));
/// assert!(CostWeights::new(1.0, -0.5, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Weight on total travel time (α).
    pub time: f64,
    /// Weight on the reliability penalty (β).
    pub reliability: f64,
    /// Weight on idle capacity (γ).
    pub idle: f64,
}

impl CostWeights {
    /// Creates a validated set of weights.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidWeight`] for a negative or non-finite weight.
    pub fn new(time: f64, reliability: f64, idle: f64) -> Result<Self> {
        let weights = Self {
            time,
            reliability,
            idle,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Checks that every weight is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidWeight`] naming the first bad weight.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("time", self.time),
            ("reliability", self.reliability),
            ("idle", self.idle),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RoutingError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            time: 0.6,
            reliability: 0.3,
            idle: 0.1,
        }
    }
}

/// Cost breakdown of one route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteCost {
    /// Sum of traversed road costs.
    pub total_time: f64,
    /// One minus the product of traversed road reliabilities.
    pub reliability_penalty: f64,
    /// Capacity minus load.
    pub idle_time: f64,
    /// Weighted sum of the three components.
    pub final_score: f64,
    /// Hops between distinct locations with no direct road.
    ///
    /// These contribute neither time nor reliability, so a route with missing
    /// roads can look cheaper and more reliable than it is.
    pub missing_edges: usize,
}

impl RouteCost {
    /// Returns `true` if every hop of the route had a direct road.
    pub fn is_complete(&self) -> bool {
        self.missing_edges == 0
    }
}

/// Scores a finalized route.
///
/// Hops without a direct road are skipped and counted in
/// [`RouteCost::missing_edges`]. A hop that stays on the same location with
/// no self-loop road is stationary: zero time, full reliability. Routes with
/// fewer than two stops score all zeros.
///
/// # Examples
///
/// ```
/// use relief_routing::evaluation::{calculate_route_cost, CostWeights};
/// use relief_routing::graph::Graph;
///
/// let mut g = Graph::new();
/// g.add_road(0, 1, 2.0, 0.5);
///
/// let cost = calculate_route_cost(&g, &[0, 1, 0], 10, 4, &CostWeights::default());
/// assert_eq!(cost.total_time, 4.0);
/// assert_eq!(cost.reliability_penalty, 0.75);
/// assert_eq!(cost.idle_time, 6.0);
/// ```
pub fn calculate_route_cost(
    graph: &Graph,
    route: &[usize],
    capacity: i32,
    load: i32,
    weights: &CostWeights,
) -> RouteCost {
    if route.len() < 2 {
        return RouteCost::default();
    }

    let mut cost = RouteCost::default();
    let mut reliability = 1.0;

    for hop in route.windows(2) {
        let (u, v) = (hop[0], hop[1]);
        match (graph.edge_cost(u, v), graph.edge_reliability(u, v)) {
            (Some(time), Some(r)) => {
                cost.total_time += time;
                reliability *= r;
            }
            _ if u == v => {}
            _ => cost.missing_edges += 1,
        }
    }

    cost.reliability_penalty = 1.0 - reliability;
    cost.idle_time = f64::from(capacity - load);
    if cost.idle_time < 0.0 {
        warn!(capacity, load, "route load exceeds vehicle capacity");
    }
    cost.final_score = weights.time * cost.total_time
        + weights.reliability * cost.reliability_penalty
        + weights.idle * cost.idle_time;
    cost
}

/// Sum of final scores across a fleet.
pub fn calculate_total_cost(graph: &Graph, vehicles: &[Vehicle], weights: &CostWeights) -> f64 {
    vehicles
        .iter()
        .map(|v| {
            calculate_route_cost(graph, v.route(), v.capacity(), v.current_load(), weights)
                .final_score
        })
        .sum()
}
