//! End-to-end planning pipeline.
//!
//! Allocation runs to completion before any route is improved, since 2-opt
//! assumes each route's stop set is fixed. Routes are then improved and
//! scored one vehicle at a time.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::constructive::allocate_vehicles;
use crate::error::Result;
use crate::evaluation::{calculate_route_cost, CostWeights, RouteCost};
use crate::graph::Graph;
use crate::local_search::{two_opt_improve_with_limit, DEFAULT_MAX_PASSES};
use crate::models::Vehicle;

/// Tunable parameters of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Scoring weights.
    pub weights: CostWeights,
    /// Cap on accepted 2-opt moves per route.
    pub max_two_opt_passes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            weights: CostWeights::default(),
            max_two_opt_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// One vehicle's final route and its cost breakdown.
#[derive(Debug, Clone)]
pub struct VehiclePlan {
    /// The vehicle with its improved, depot-to-depot route.
    pub vehicle: Vehicle,
    /// Score of that route.
    pub cost: RouteCost,
}

/// Result of a full planning run.
#[derive(Debug, Clone)]
pub struct Plan {
    vehicles: Vec<VehiclePlan>,
    unassigned: Vec<usize>,
}

impl Plan {
    /// Per-vehicle routes and costs, in fleet order.
    pub fn vehicles(&self) -> &[VehiclePlan] {
        &self.vehicles
    }

    /// Demand locations no vehicle could serve.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Sum of the final scores of all routes.
    pub fn total_score(&self) -> f64 {
        self.vehicles.iter().map(|p| p.cost.final_score).sum()
    }

    /// Number of locations served across the fleet.
    pub fn served_locations(&self) -> usize {
        self.vehicles.iter().map(|p| p.vehicle.stops().len()).sum()
    }
}

/// Runs allocation, route improvement and scoring.
///
/// # Examples
///
/// ```
/// use relief_routing::graph::Graph;
/// use relief_routing::models::{Location, Vehicle};
/// use relief_routing::solver::{Solver, SolverConfig};
///
/// let mut g = Graph::new();
/// g.add_location(Location::depot(0));
/// g.add_location(Location::new(1, 4, 2));
/// g.add_road(0, 1, 3.0, 1.0);
///
/// let solver = Solver::new(SolverConfig::default()).unwrap();
/// let plan = solver.solve(&g, &[Vehicle::new(0, 10)]).unwrap();
/// assert_eq!(plan.vehicles()[0].vehicle.route(), &[0, 1, 0]);
/// assert_eq!(plan.served_locations(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidWeight`](crate::error::RoutingError::InvalidWeight)
    /// if any cost weight is negative or not finite.
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.weights.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Plans routes for `vehicles` over `graph`.
    ///
    /// # Errors
    ///
    /// Propagates [`RoutingError::UnknownLocation`](crate::error::RoutingError::UnknownLocation)
    /// from allocation when a vehicle starts off the graph.
    #[instrument(skip_all, fields(locations = graph.num_locations(), vehicles = vehicles.len()))]
    pub fn solve(&self, graph: &Graph, vehicles: &[Vehicle]) -> Result<Plan> {
        let allocation = allocate_vehicles(graph, vehicles)?;
        let unassigned = allocation.unassigned().to_vec();
        if !unassigned.is_empty() {
            warn!(count = unassigned.len(), "locations left unassigned");
        }

        let plans: Vec<VehiclePlan> = allocation
            .into_vehicles()
            .into_iter()
            .map(|mut vehicle| {
                let (route, _) = two_opt_improve_with_limit(
                    graph,
                    vehicle.route(),
                    self.config.max_two_opt_passes,
                );
                vehicle.set_route(route);
                let cost = calculate_route_cost(
                    graph,
                    vehicle.route(),
                    vehicle.capacity(),
                    vehicle.current_load(),
                    &self.config.weights,
                );
                if !cost.is_complete() {
                    warn!(
                        vehicle = vehicle.id(),
                        missing = cost.missing_edges,
                        "route uses hops without a direct road"
                    );
                }
                VehiclePlan { vehicle, cost }
            })
            .collect();

        let plan = Plan {
            vehicles: plans,
            unassigned,
        };
        info!(
            served = plan.served_locations(),
            total_score = plan.total_score(),
            "planning finished"
        );
        Ok(plan)
    }
}
