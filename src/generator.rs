//! Seeded synthetic relief scenarios.
//!
//! Produces a depot at the centre of a square grid, demand locations that
//! partly cluster around earlier ones, roads to the depot and to a few
//! nearest neighbours, a handful of faster long-distance highways, and a
//! fleet of modest-capacity vehicles. The same seed always yields the same
//! instance.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RoutingError};
use crate::graph::Graph;
use crate::models::{Location, Vehicle, DEFAULT_DEPOT};

/// Priority draw weights: roughly 30% high, 40% medium, 30% low.
const PRIORITY_POOL: [i32; 14] = [5, 5, 4, 4, 4, 3, 3, 3, 3, 2, 2, 2, 1, 1];

/// Distance kept between locations and the grid border.
const MARGIN: f64 = 5.0;

/// Maximum offset of a clustered location from its anchor.
const CLUSTER_SPREAD: f64 = 15.0;

/// Highways are cheaper than the straight-line distance by this factor.
const HIGHWAY_DISCOUNT: f64 = 0.8;

/// Parameters of a generated scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Demand locations, excluding the depot.
    pub num_locations: usize,
    /// Vehicles in the fleet.
    pub num_vehicles: usize,
    /// Side length of the square grid.
    pub grid_size: f64,
    /// Base probability of a neighbour road (0.4 is added on top).
    pub edge_density: f64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_locations: 20,
            num_vehicles: 3,
            grid_size: 100.0,
            edge_density: 0.3,
            seed: 42,
        }
    }
}

/// A generated scenario.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Road network; location `0` is the depot.
    pub graph: Graph,
    /// Fresh vehicles stationed at the depot.
    pub vehicles: Vec<Vehicle>,
    /// Grid position of each location, indexed by id.
    pub coordinates: Vec<(f64, f64)>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

fn scatter_locations(config: &GeneratorConfig, rng: &mut StdRng) -> (Vec<(f64, f64)>, Vec<Location>) {
    let centre = config.grid_size / 2.0;
    let upper = config.grid_size - MARGIN;
    let mut coordinates = vec![(centre, centre)];
    let mut locations = vec![Location::depot(DEFAULT_DEPOT)];

    for id in 1..=config.num_locations {
        let (x, y) = if id % 3 == 0 && id > 3 {
            let anchor = coordinates[rng.random_range(1..coordinates.len())];
            (
                anchor.0 + rng.random_range(-CLUSTER_SPREAD..=CLUSTER_SPREAD),
                anchor.1 + rng.random_range(-CLUSTER_SPREAD..=CLUSTER_SPREAD),
            )
        } else {
            (
                rng.random_range(MARGIN..=upper),
                rng.random_range(MARGIN..=upper),
            )
        };
        coordinates.push((round2(x.clamp(MARGIN, upper)), round2(y.clamp(MARGIN, upper))));

        let priority = PRIORITY_POOL.choose(rng).copied().unwrap_or(1);
        let demand = rng.random_range(1..=(priority * 2).min(8));
        locations.push(Location::new(id, demand, priority));
    }

    (coordinates, locations)
}

/// Generates a scenario from `config`.
///
/// # Errors
///
/// Returns [`RoutingError::InvalidInput`] if the grid is smaller than twice
/// the border margin or `edge_density` lies outside `[0, 1]`.
///
/// # Examples
///
/// ```
/// use relief_routing::generator::{generate_instance, GeneratorConfig};
///
/// let instance = generate_instance(&GeneratorConfig::default()).unwrap();
/// assert_eq!(instance.graph.num_locations(), 21);
/// assert_eq!(instance.vehicles.len(), 3);
/// ```
pub fn generate_instance(config: &GeneratorConfig) -> Result<Instance> {
    if !config.grid_size.is_finite() || config.grid_size < 2.0 * MARGIN {
        return Err(RoutingError::InvalidInput(format!(
            "grid size {} is smaller than {}",
            config.grid_size,
            2.0 * MARGIN
        )));
    }
    if !(0.0..=1.0).contains(&config.edge_density) {
        return Err(RoutingError::InvalidInput(format!(
            "edge density {} outside [0, 1]",
            config.edge_density
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let (coordinates, locations) = scatter_locations(config, &mut rng);

    let mut graph = Graph::new();
    for location in &locations {
        graph.add_location(*location);
    }

    let mut linked: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut link = |graph: &mut Graph, u: usize, v: usize, cost: f64, reliability: f64| {
        if linked.insert((u.min(v), u.max(v))) {
            graph.add_road(u.min(v), u.max(v), round2(cost), round2(reliability));
        }
    };

    let n = coordinates.len();
    for i in 0..n {
        let mut nearest: Vec<(usize, f64)> = (0..n)
            .filter(|&j| j != i)
            .map(|j| (j, euclidean(coordinates[i], coordinates[j])))
            .collect();
        nearest.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        if i != DEFAULT_DEPOT {
            let reliability = rng.random_range(0.75..=0.95);
            let cost = euclidean(coordinates[i], coordinates[DEFAULT_DEPOT]);
            link(&mut graph, DEFAULT_DEPOT, i, cost, reliability);
        }

        let fan_out = rng.random_range(2..=4);
        for &(j, cost) in nearest.iter().take(fan_out) {
            if rng.random::<f64>() < config.edge_density + 0.4 {
                let reliability = rng.random_range(0.7..=1.0);
                link(&mut graph, i, j, cost, reliability);
            }
        }
    }

    if config.num_locations >= 2 {
        let highways = (config.num_locations / 8).max(3);
        for _ in 0..highways {
            let i = rng.random_range(1..=config.num_locations);
            let j = rng.random_range(1..=config.num_locations);
            if i != j {
                let cost = euclidean(coordinates[i], coordinates[j]) * HIGHWAY_DISCOUNT;
                let reliability = rng.random_range(0.85..=0.98);
                link(&mut graph, i, j, cost, reliability);
            }
        }
    }

    let vehicles = (1..=config.num_vehicles)
        .map(|id| Vehicle::new(id, 10 + rng.random_range(0..=10)))
        .collect();

    debug!(
        locations = graph.num_locations(),
        roads = graph.num_roads(),
        seed = config.seed,
        "generated instance"
    );
    Ok(Instance {
        graph,
        vehicles,
        coordinates,
    })
}
