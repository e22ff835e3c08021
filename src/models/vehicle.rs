//! Capacity-constrained vehicles and their routes.

use super::DEFAULT_DEPOT;

/// A vehicle that serves locations along a route starting at the depot.
///
/// The route always begins with the depot id. Allocation appends locations
/// and grows the load; [`Vehicle::finalize_route`] closes the tour by
/// returning to the depot.
///
/// # Examples
///
/// ```
/// use relief_routing::models::Vehicle;
///
/// let mut v = Vehicle::new(1, 10);
/// assert_eq!(v.route(), &[0]);
/// assert!(v.can_serve(10));
///
/// v.assign(4, 6);
/// assert_eq!(v.current_load(), 6);
/// assert!(!v.can_serve(5));
///
/// v.finalize_route();
/// assert_eq!(v.route(), &[0, 4, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    current_load: i32,
    depot: usize,
    route: Vec<usize>,
}

impl Vehicle {
    /// Creates an empty vehicle stationed at the default depot (`0`).
    pub fn new(id: usize, capacity: i32) -> Self {
        Self::at_depot(id, capacity, DEFAULT_DEPOT)
    }

    /// Creates an empty vehicle stationed at `depot`.
    pub fn at_depot(id: usize, capacity: i32, depot: usize) -> Self {
        Self {
            id,
            capacity,
            current_load: 0,
            depot,
            route: vec![depot],
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum cumulative demand this vehicle can serve.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Demand served so far.
    pub fn current_load(&self) -> i32 {
        self.current_load
    }

    /// Capacity not yet used.
    pub fn remaining_capacity(&self) -> i32 {
        self.capacity - self.current_load
    }

    /// Depot the route starts (and ends) at.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Ordered location ids visited, starting at the depot.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Last location on the route.
    pub fn tail(&self) -> usize {
        self.route.last().copied().unwrap_or(self.depot)
    }

    /// Returns `true` if `demand` still fits in the remaining capacity.
    pub fn can_serve(&self, demand: i32) -> bool {
        demand <= self.remaining_capacity()
    }

    /// Appends a location to the route and adds its demand to the load.
    pub fn assign(&mut self, location_id: usize, demand: i32) {
        self.route.push(location_id);
        self.current_load += demand;
    }

    /// Closes the route by returning to the depot.
    pub fn finalize_route(&mut self) {
        self.route.push(self.depot);
    }

    /// Returns `true` once the route starts and ends at the depot.
    pub fn is_finalized(&self) -> bool {
        self.route.len() >= 2
            && self.route.first() == Some(&self.depot)
            && self.route.last() == Some(&self.depot)
    }

    /// Replaces the route with a reordering of the same stops.
    ///
    /// Used by route improvement; the load is unchanged because the set of
    /// served locations is unchanged.
    pub fn set_route(&mut self, route: Vec<usize>) {
        debug_assert_eq!(route.len(), self.route.len());
        self.route = route;
    }

    /// Served location ids, excluding depot visits at either end.
    pub fn stops(&self) -> &[usize] {
        match self.route.len() {
            0 | 1 => &[],
            n if self.is_finalized() => &self.route[1..n - 1],
            _ => &self.route[1..],
        }
    }
}
