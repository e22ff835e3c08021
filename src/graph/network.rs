//! Adjacency-list road network.

use std::collections::BTreeMap;

use fxhash::FxHashMap;

use crate::models::{Location, RoadSegment, DEFAULT_DEPOT};

/// An undirected road network over demand-bearing locations.
///
/// Each road is indexed under both endpoints, so neighbor lookup is O(1)
/// amortized and a direct edge lookup is O(degree). Parallel roads between the
/// same pair coexist; lookups return the first one added.
///
/// The graph is write-once: locations may be overwritten during loading, but
/// nothing is ever removed.
///
/// # Examples
///
/// ```
/// use relief_routing::graph::Graph;
/// use relief_routing::models::Location;
///
/// let mut g = Graph::new();
/// g.add_location(Location::depot(0));
/// g.add_location(Location::new(1, 5, 3));
/// g.add_road(0, 1, 2.0, 0.9);
///
/// assert_eq!(g.edge_cost(1, 0), Some(2.0));
/// assert_eq!(g.edge_reliability(0, 1), Some(0.9));
/// assert_eq!(g.edge_cost(0, 2), None);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    depot: usize,
    locations: BTreeMap<usize, Location>,
    adjacency: FxHashMap<usize, Vec<(usize, RoadSegment)>>,
    roads: Vec<RoadSegment>,
}

impl Graph {
    /// Creates an empty graph whose depot is location `0`.
    pub fn new() -> Self {
        Self::with_depot(DEFAULT_DEPOT)
    }

    /// Creates an empty graph with a custom depot id.
    pub fn with_depot(depot: usize) -> Self {
        Self {
            depot,
            locations: BTreeMap::new(),
            adjacency: FxHashMap::default(),
            roads: Vec::new(),
        }
    }

    /// Depot location id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Inserts a location, replacing any earlier one with the same id.
    pub fn add_location(&mut self, location: Location) {
        self.adjacency.entry(location.id()).or_default();
        self.locations.insert(location.id(), location);
    }

    /// Adds an undirected road between `u` and `v`.
    pub fn add_road(&mut self, u: usize, v: usize, cost: f64, reliability: f64) {
        let road = RoadSegment::new(u, v, cost, reliability);
        self.roads.push(road);
        self.adjacency.entry(u).or_default().push((v, road));
        self.adjacency.entry(v).or_default().push((u, road));
    }

    /// Roads touching `id` as `(other_end, road)` pairs, in insertion order.
    pub fn neighbors(&self, id: usize) -> &[(usize, RoadSegment)] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn direct_road(&self, u: usize, v: usize) -> Option<&RoadSegment> {
        self.neighbors(u)
            .iter()
            .find(|(other, _)| *other == v)
            .map(|(_, road)| road)
    }

    /// Cost of the first road from `u` to `v`, or `None` if there is no direct road.
    pub fn edge_cost(&self, u: usize, v: usize) -> Option<f64> {
        self.direct_road(u, v).map(RoadSegment::cost)
    }

    /// Reliability of the first road from `u` to `v`, or `None` if there is no direct road.
    pub fn edge_reliability(&self, u: usize, v: usize) -> Option<f64> {
        self.direct_road(u, v).map(RoadSegment::reliability)
    }

    /// Declared location with the given id.
    pub fn location(&self, id: usize) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Declared locations in ascending id order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All roads in insertion order.
    pub fn roads(&self) -> &[RoadSegment] {
        &self.roads
    }

    /// Returns `true` if `id` is a declared location or a road endpoint.
    pub fn contains_vertex(&self, id: usize) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Every vertex id (locations and road endpoints), ascending.
    pub fn vertex_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of declared locations.
    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    /// Number of roads added.
    pub fn num_roads(&self) -> usize {
        self.roads.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
