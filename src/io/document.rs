//! JSON problem and solution documents.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::evaluation::RouteCost;
use crate::graph::Graph;
use crate::models::{Location, Vehicle, DEFAULT_DEPOT};
use crate::solver::Plan;

fn full_reliability() -> f64 {
    1.0
}

/// A location as stored on disk.
///
/// Extra fields (such as coordinates) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Location id.
    pub id: usize,
    /// Demand; defaults to 0.
    #[serde(default)]
    pub demand: i32,
    /// Priority; defaults to 0.
    #[serde(default)]
    pub priority: i32,
}

/// A road as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// First endpoint.
    pub u: usize,
    /// Second endpoint.
    pub v: usize,
    /// Travel cost.
    pub cost: f64,
    /// Reliability; defaults to 1.0.
    #[serde(default = "full_reliability")]
    pub reliability: f64,
}

/// A vehicle as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Vehicle id.
    pub id: usize,
    /// Capacity.
    pub capacity: i32,
}

/// Input document: the road network and the fleet.
///
/// # Examples
///
/// ```
/// use relief_routing::io::ProblemDocument;
///
/// let doc: ProblemDocument = serde_json::from_str(r#"{
///     "nodes": [{"id": 0}, {"id": 1, "demand": 4, "priority": 2}],
///     "edges": [{"u": 0, "v": 1, "cost": 3.5}],
///     "vehicles": [{"id": 1, "capacity": 10}]
/// }"#).unwrap();
///
/// let (graph, vehicles) = doc.into_problem().unwrap();
/// assert_eq!(graph.edge_reliability(1, 0), Some(1.0));
/// assert_eq!(vehicles[0].route(), &[0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemDocument {
    /// Locations, including the depot.
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    /// Undirected roads.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    /// Fleet.
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
    /// Depot id; defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depot: Option<usize>,
}

impl ProblemDocument {
    /// Builds a document from an in-memory graph and fleet.
    pub fn from_problem(graph: &Graph, vehicles: &[Vehicle]) -> Self {
        Self {
            nodes: graph
                .locations()
                .map(|l| NodeRecord {
                    id: l.id(),
                    demand: l.demand(),
                    priority: l.priority(),
                })
                .collect(),
            edges: graph
                .roads()
                .iter()
                .map(|r| EdgeRecord {
                    u: r.u(),
                    v: r.v(),
                    cost: r.cost(),
                    reliability: r.reliability(),
                })
                .collect(),
            vehicles: vehicles
                .iter()
                .map(|v| VehicleRecord {
                    id: v.id(),
                    capacity: v.capacity(),
                })
                .collect(),
            depot: (graph.depot() != DEFAULT_DEPOT).then_some(graph.depot()),
        }
    }

    /// Validates the document and converts it into a graph and fresh fleet.
    ///
    /// Roads may reference ids that are not declared as nodes; those ids
    /// become vertices without demand.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidInput`] for duplicate ids, negative
    /// demand or capacity, negative or non-finite costs, and reliabilities
    /// outside `[0, 1]`.
    pub fn into_problem(self) -> Result<(Graph, Vec<Vehicle>)> {
        let depot = self.depot.unwrap_or(DEFAULT_DEPOT);
        let mut graph = Graph::with_depot(depot);

        let mut seen = BTreeSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(invalid(format!("duplicate node id {}", node.id)));
            }
            if node.demand < 0 {
                return Err(invalid(format!(
                    "node {} has negative demand {}",
                    node.id, node.demand
                )));
            }
            graph.add_location(Location::new(node.id, node.demand, node.priority));
        }

        for edge in &self.edges {
            if !edge.cost.is_finite() || edge.cost < 0.0 {
                return Err(invalid(format!(
                    "road {}-{} has invalid cost {}",
                    edge.u, edge.v, edge.cost
                )));
            }
            if !(0.0..=1.0).contains(&edge.reliability) {
                return Err(invalid(format!(
                    "road {}-{} has reliability {} outside [0, 1]",
                    edge.u, edge.v, edge.reliability
                )));
            }
            graph.add_road(edge.u, edge.v, edge.cost, edge.reliability);
        }

        let mut seen = BTreeSet::new();
        let mut vehicles = Vec::with_capacity(self.vehicles.len());
        for record in &self.vehicles {
            if !seen.insert(record.id) {
                return Err(invalid(format!("duplicate vehicle id {}", record.id)));
            }
            if record.capacity < 0 {
                return Err(invalid(format!(
                    "vehicle {} has negative capacity {}",
                    record.id, record.capacity
                )));
            }
            vehicles.push(Vehicle::at_depot(record.id, record.capacity, depot));
        }

        Ok((graph, vehicles))
    }
}

fn invalid(message: String) -> RoutingError {
    RoutingError::InvalidInput(message)
}

/// Output document: routes and cost breakdowns keyed by vehicle id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionDocument {
    /// Depot-to-depot route per vehicle.
    pub routes: BTreeMap<usize, Vec<usize>>,
    /// Cost breakdown per vehicle.
    pub costs: BTreeMap<usize, RouteCost>,
    /// Locations nobody could serve.
    #[serde(default)]
    pub unassigned: Vec<usize>,
    /// Sum of final scores.
    pub total_score: f64,
}

impl SolutionDocument {
    /// Renders a plan.
    pub fn from_plan(plan: &Plan) -> Self {
        let mut doc = Self {
            unassigned: plan.unassigned().to_vec(),
            total_score: plan.total_score(),
            ..Self::default()
        };
        for vp in plan.vehicles() {
            doc.routes.insert(vp.vehicle.id(), vp.vehicle.route().to_vec());
            doc.costs.insert(vp.vehicle.id(), vp.cost);
        }
        doc
    }
}
