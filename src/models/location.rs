//! Demand-bearing locations.

/// A location (graph node) that may require service.
///
/// Location `0` is conventionally the depot. Locations carry a demand (units
/// to deliver) and a priority where a higher value means more urgent.
///
/// # Examples
///
/// ```
/// use relief_routing::models::Location;
///
/// let depot = Location::depot(0);
/// assert_eq!(depot.demand(), 0);
///
/// let shelter = Location::new(3, 6, 5);
/// assert_eq!(shelter.id(), 3);
/// assert!(shelter.needs_service());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    id: usize,
    demand: i32,
    priority: i32,
}

impl Location {
    /// Creates a location with the given demand and priority.
    pub fn new(id: usize, demand: i32, priority: i32) -> Self {
        Self {
            id,
            demand,
            priority,
        }
    }

    /// Creates a depot location (no demand, no priority).
    pub fn depot(id: usize) -> Self {
        Self::new(id, 0, 0)
    }

    /// Location ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Units of resource required at this location.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Urgency; higher is served first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns `true` if this location has positive demand.
    pub fn needs_service(&self) -> bool {
        self.demand > 0
    }
}
