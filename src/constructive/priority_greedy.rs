//! Priority-ordered greedy allocation.
//!
//! # Algorithm
//!
//! 1. Collect every non-depot location with positive demand.
//! 2. Sort by priority (descending), breaking ties by ascending id.
//! 3. For each location, among vehicles with enough remaining capacity, pick
//!    the one whose current route tail reaches it at the lowest shortest-path
//!    cost. Ties keep the earliest vehicle; unreachable vehicles are skipped.
//! 4. Append the location to that vehicle's route and add its demand.
//! 5. Close every route by returning to the depot.
//!
//! Locations no vehicle can take stay unassigned. Every vehicle must be
//! stationed at the graph's depot.
//!
//! # Complexity
//!
//! O(L × K) shortest-path lookups for L locations and K vehicles. Distance
//! tables are memoized per source vertex for the duration of one run, so at
//! most V Dijkstra searches are performed.

use std::collections::hash_map::Entry;

use fxhash::FxHashMap;
use tracing::{debug, instrument};

use crate::error::{Result, RoutingError};
use crate::graph::Graph;
use crate::models::{Location, Vehicle};
use crate::shortest_path::{dijkstra, Distances};

/// Vehicles with finalized routes plus the locations nobody could serve.
#[derive(Debug, Clone)]
pub struct Allocation {
    vehicles: Vec<Vehicle>,
    unassigned: Vec<usize>,
}

impl Allocation {
    /// Vehicles in their original order, routes closed at the depot.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Consumes the allocation, returning the vehicles.
    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    /// Location ids left unassigned, in the order they were considered.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Number of locations placed on some route.
    pub fn num_assigned(&self) -> usize {
        self.vehicles.iter().map(|v| v.stops().len()).sum()
    }
}

/// Locations that need service, in allocation order.
fn demand_locations(graph: &Graph) -> Vec<&Location> {
    let depot = graph.depot();
    let mut pending: Vec<&Location> = graph
        .locations()
        .filter(|l| l.id() != depot && l.needs_service())
        .collect();
    pending.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then_with(|| a.id().cmp(&b.id()))
    });
    pending
}

/// Assigns demand locations to vehicles by priority, using shortest-path
/// cost from each vehicle's route tail as the assignment metric.
///
/// The input vehicles are copied; each should be fresh (empty load, route
/// holding only its depot).
///
/// # Errors
///
/// Returns [`RoutingError::UnknownLocation`](crate::error::RoutingError::UnknownLocation)
/// if a candidate vehicle's route tail is not a vertex of `graph`.
///
/// # Examples
///
/// ```
/// use relief_routing::constructive::allocate_vehicles;
/// use relief_routing::graph::Graph;
/// use relief_routing::models::{Location, Vehicle};
///
/// let mut g = Graph::new();
/// g.add_location(Location::depot(0));
/// g.add_location(Location::new(1, 5, 3));
/// g.add_location(Location::new(2, 5, 5));
/// g.add_road(0, 1, 2.0, 1.0);
/// g.add_road(0, 2, 3.0, 0.9);
/// g.add_road(1, 2, 1.0, 1.0);
///
/// let allocation = allocate_vehicles(&g, &[Vehicle::new(0, 10)]).unwrap();
/// assert_eq!(allocation.vehicles()[0].route(), &[0, 2, 1, 0]);
/// assert!(allocation.unassigned().is_empty());
/// ```
#[instrument(skip_all, level = "debug", fields(vehicles = vehicles.len()))]
pub fn allocate_vehicles(graph: &Graph, vehicles: &[Vehicle]) -> Result<Allocation> {
    if let Some(stray) = vehicles.iter().find(|v| v.depot() != graph.depot()) {
        return Err(RoutingError::InvalidInput(format!(
            "vehicle {} is stationed at {} but the depot is {}",
            stray.id(),
            stray.depot(),
            graph.depot()
        )));
    }

    let mut vehicles = vehicles.to_vec();
    let mut unassigned = Vec::new();
    let mut tables: FxHashMap<usize, Distances> = FxHashMap::default();

    for location in demand_locations(graph) {
        let mut best: Option<(usize, f64)> = None;

        for (idx, vehicle) in vehicles.iter().enumerate() {
            if !vehicle.can_serve(location.demand()) {
                continue;
            }
            let tail = vehicle.tail();
            let table = match tables.entry(tail) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(dijkstra(graph, tail)?),
            };
            let cost = table.get(location.id());
            if !cost.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((idx, cost));
            }
        }

        match best {
            Some((idx, cost)) => {
                let vehicle = &mut vehicles[idx];
                debug!(
                    location = location.id(),
                    vehicle = vehicle.id(),
                    cost,
                    "assigned location"
                );
                vehicle.assign(location.id(), location.demand());
            }
            None => {
                debug!(location = location.id(), "no feasible vehicle");
                unassigned.push(location.id());
            }
        }
    }

    for vehicle in &mut vehicles {
        vehicle.finalize_route();
    }

    debug!(
        unassigned = unassigned.len(),
        searches = tables.len(),
        "allocation finished"
    );
    Ok(Allocation {
        vehicles,
        unassigned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        g.add_location(Location::depot(0));
        g.add_location(Location::new(1, 5, 3));
        g.add_location(Location::new(2, 5, 5));
        g.add_road(0, 1, 2.0, 1.0);
        g.add_road(0, 2, 3.0, 0.9);
        g.add_road(1, 2, 1.0, 1.0);
        g
    }

    #[test]
    fn test_priority_order() {
        let g = triangle();
        let order: Vec<usize> = demand_locations(&g).iter().map(|l| l.id()).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_priority_ties_by_id() {
        let mut g = Graph::new();
        g.add_location(Location::depot(0));
        g.add_location(Location::new(5, 1, 2));
        g.add_location(Location::new(3, 1, 2));
        g.add_location(Location::new(4, 1, 9));
        g.add_location(Location::new(6, 0, 9));
        let order: Vec<usize> = demand_locations(&g).iter().map(|l| l.id()).collect();
        assert_eq!(order, vec![4, 3, 5]);
    }

    #[test]
    fn test_single_vehicle_takes_all() {
        let g = triangle();
        let a = allocate_vehicles(&g, &[Vehicle::new(0, 10)]).expect("valid graph");
        let v = &a.vehicles()[0];
        assert_eq!(v.route(), &[0, 2, 1, 0]);
        assert_eq!(v.current_load(), 10);
        assert_eq!(a.num_assigned(), 2);
    }

    #[test]
    fn test_two_vehicles_split() {
        let g = triangle();
        let a = allocate_vehicles(&g, &[Vehicle::new(0, 5), Vehicle::new(1, 5)])
            .expect("valid graph");
        assert_eq!(a.vehicles()[0].route(), &[0, 2, 0]);
        assert_eq!(a.vehicles()[1].route(), &[0, 1, 0]);
        assert!(a.unassigned().is_empty());
    }

    #[test]
    fn test_cheapest_vehicle_wins() {
        // Vehicle 1 is already parked next to location 3 after serving 2.
        let mut g = Graph::new();
        g.add_location(Location::depot(0));
        g.add_location(Location::new(1, 1, 9));
        g.add_location(Location::new(2, 1, 8));
        g.add_location(Location::new(3, 1, 1));
        g.add_road(0, 1, 1.0, 1.0);
        g.add_road(0, 2, 1.0, 1.0);
        g.add_road(2, 3, 1.0, 1.0);
        g.add_road(1, 3, 10.0, 1.0);
        let fleet = [Vehicle::new(0, 1), Vehicle::new(1, 10)];
        let a = allocate_vehicles(&g, &fleet).expect("valid graph");
        assert_eq!(a.vehicles()[0].route(), &[0, 1, 0]);
        assert_eq!(a.vehicles()[1].route(), &[0, 2, 3, 0]);
    }

    #[test]
    fn test_tie_keeps_first_vehicle() {
        let g = triangle();
        let a = allocate_vehicles(&g, &[Vehicle::new(7, 5), Vehicle::new(8, 10)])
            .expect("valid graph");
        // Both start at the depot: location 2 goes to the first vehicle.
        assert_eq!(a.vehicles()[0].route(), &[0, 2, 0]);
        assert_eq!(a.vehicles()[1].route(), &[0, 1, 0]);
    }

    #[test]
    fn test_oversized_demand_unassigned() {
        let mut g = triangle();
        g.add_location(Location::new(3, 50, 10));
        g.add_road(0, 3, 1.0, 1.0);
        let a = allocate_vehicles(&g, &[Vehicle::new(0, 10)]).expect("valid graph");
        assert_eq!(a.unassigned(), &[3]);
        assert!(!a.vehicles()[0].route().contains(&3));
        assert_eq!(a.vehicles()[0].current_load(), 10);
    }

    #[test]
    fn test_unreachable_location_unassigned() {
        let mut g = triangle();
        g.add_location(Location::new(4, 1, 10));
        let a = allocate_vehicles(&g, &[Vehicle::new(0, 100)]).expect("valid graph");
        assert_eq!(a.unassigned(), &[4]);
        assert_eq!(a.vehicles()[0].route(), &[0, 2, 1, 0]);
    }

    #[test]
    fn test_depot_demand_ignored() {
        let mut g = triangle();
        g.add_location(Location::new(0, 7, 99));
        let a = allocate_vehicles(&g, &[Vehicle::new(0, 100)]).expect("valid graph");
        assert_eq!(a.vehicles()[0].route(), &[0, 2, 1, 0]);
        assert_eq!(a.vehicles()[0].current_load(), 10);
    }

    #[test]
    fn test_no_vehicles() {
        let g = triangle();
        let a = allocate_vehicles(&g, &[]).expect("valid graph");
        assert!(a.vehicles().is_empty());
        assert_eq!(a.unassigned(), &[2, 1]);
    }

    #[test]
    fn test_idle_vehicle_route_closed() {
        let g = triangle();
        let a = allocate_vehicles(&g, &[Vehicle::new(0, 10), Vehicle::new(1, 10)])
            .expect("valid graph");
        assert_eq!(a.vehicles()[1].route(), &[0, 0]);
        assert!(a.vehicles().iter().all(Vehicle::is_finalized));
    }

    #[test]
    fn test_unknown_depot_is_error() {
        let mut g = Graph::with_depot(99);
        g.add_location(Location::new(1, 5, 3));
        g.add_road(1, 2, 1.0, 1.0);
        let fleet = [Vehicle::at_depot(0, 10, 99)];
        assert!(matches!(
            allocate_vehicles(&g, &fleet),
            Err(RoutingError::UnknownLocation(99))
        ));
    }

    #[test]
    fn test_vehicle_off_depot_rejected() {
        let mut g = Graph::with_depot(4);
        g.add_location(Location::depot(4));
        g.add_location(Location::new(0, 3, 1));
        g.add_road(4, 0, 1.0, 1.0);
        assert!(matches!(
            allocate_vehicles(&g, &[Vehicle::new(0, 10)]),
            Err(RoutingError::InvalidInput(_))
        ));

        let a = allocate_vehicles(&g, &[Vehicle::at_depot(0, 10, 4)]).expect("valid graph");
        assert_eq!(a.vehicles()[0].route(), &[4, 0, 4]);
    }

    #[test]
    fn test_huge_demand_left_unassigned() {
        let mut g = Graph::new();
        g.add_location(Location::depot(0));
        g.add_location(Location::new(1, 1, 9));
        g.add_location(Location::new(2, i32::MAX, 1));
        g.add_road(0, 1, 1.0, 1.0);
        g.add_road(1, 2, 1.0, 1.0);
        let a = allocate_vehicles(&g, &[Vehicle::new(0, 10)]).expect("valid graph");
        assert_eq!(a.vehicles()[0].route(), &[0, 1, 0]);
        assert_eq!(a.vehicles()[0].current_load(), 1);
        assert_eq!(a.unassigned(), &[2]);
    }
}
