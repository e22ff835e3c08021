//! End-to-end allocation, improvement and scoring scenarios.

use relief_routing::constructive::allocate_vehicles;
use relief_routing::evaluation::{calculate_route_cost, CostWeights};
use relief_routing::graph::Graph;
use relief_routing::local_search::{route_cost, two_opt_improve};
use relief_routing::models::{Location, Vehicle};
use relief_routing::solver::Solver;

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
fn single_vehicle_serves_both_locations_by_priority() {
    let g = triangle();
    let allocation = allocate_vehicles(&g, &[Vehicle::new(0, 10)]).expect("valid graph");
    let route = allocation.vehicles()[0].route();

    // Location 2 has the higher priority and is placed first.
    assert_eq!(route, &[0, 2, 1, 0]);
    assert_eq!(allocation.vehicles()[0].current_load(), 10);
}

#[test]
fn two_vehicles_each_serve_one_location() {
    let mut g = Graph::new();
    g.add_location(Location::depot(0));
    g.add_location(Location::new(1, 5, 5));
    g.add_location(Location::new(2, 5, 1));
    g.add_road(0, 1, 4.0, 1.0);
    g.add_road(0, 2, 2.0, 1.0);
    g.add_road(1, 2, 3.0, 1.0);

    let fleet = [Vehicle::new(1, 5), Vehicle::new(2, 5)];
    let allocation = allocate_vehicles(&g, &fleet).expect("valid graph");

    assert_eq!(allocation.vehicles()[0].stops(), &[1]);
    assert_eq!(allocation.vehicles()[1].stops(), &[2]);
    for v in allocation.vehicles() {
        assert_eq!(v.current_load(), 5);
    }
}

#[test]
fn two_opt_uncrosses_bowtie() {
    // Depot 0 in the middle of a unit square 1-2-3-4; diagonals are long.
    let mut g = Graph::new();
    for corner in 1..=4 {
        g.add_road(0, corner, 1.0, 1.0);
    }
    g.add_road(1, 2, 1.0, 1.0);
    g.add_road(2, 3, 1.0, 1.0);
    g.add_road(3, 4, 1.0, 1.0);
    g.add_road(4, 1, 1.0, 1.0);
    g.add_road(1, 3, 4.0, 1.0);
    g.add_road(2, 4, 4.0, 1.0);

    let crossed = [0, 1, 3, 2, 4, 0];
    let before = route_cost(&g, &crossed).expect("connected");
    let (improved, after) = two_opt_improve(&g, &crossed);
    let after = after.expect("connected");

    assert!(after < before);
    assert!((after - 5.0).abs() < 1e-10);
    assert_eq!(improved.first(), Some(&0));
    assert_eq!(improved.last(), Some(&0));
}

#[test]
fn oversized_demand_is_left_out() {
    let mut g = triangle();
    g.add_location(Location::new(3, 25, 9));
    g.add_road(0, 3, 1.0, 1.0);

    let fleet = [Vehicle::new(0, 10), Vehicle::new(1, 20)];
    let plan = Solver::default().solve(&g, &fleet).expect("valid graph");

    assert_eq!(plan.unassigned(), &[3]);
    for vp in plan.vehicles() {
        assert!(!vp.vehicle.route().contains(&3));
        assert!(vp.vehicle.current_load() <= vp.vehicle.capacity());
    }
}

#[test]
fn scoring_follows_the_final_route() {
    let g = triangle();
    let plan = Solver::default()
        .solve(&g, &[Vehicle::new(0, 12)])
        .expect("valid graph");
    let vp = &plan.vehicles()[0];
    let expected = calculate_route_cost(&g, vp.vehicle.route(), 12, 10, &CostWeights::default());

    assert_eq!(vp.cost, expected);
    assert!((vp.cost.idle_time - 2.0).abs() < 1e-10);
    assert!((vp.cost.final_score - (0.6 * 6.0 + 0.3 * 0.1 + 0.1 * 2.0)).abs() < 1e-10);
}
