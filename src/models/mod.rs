//! Domain model types for relief routing.
//!
//! Locations carry demand and priority, road segments carry travel cost and
//! reliability, and vehicles accumulate load and a route that starts and
//! ends at the depot.

mod location;
mod road;
mod vehicle;

pub use location::Location;
pub use road::RoadSegment;
pub use vehicle::Vehicle;

/// Location id used as the depot unless configured otherwise.
pub const DEFAULT_DEPOT: usize = 0;
