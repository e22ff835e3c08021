//! Road segments connecting locations.

/// A bidirectional road between two locations.
///
/// `cost` is the non-negative travel weight; `reliability` lies in `[0, 1]`
/// and acts as the probability that the segment is passable.
///
/// # Examples
///
/// ```
/// use relief_routing::models::RoadSegment;
///
/// let road = RoadSegment::new(0, 1, 2.5, 0.9);
/// assert_eq!(road.other_end(0), Some(1));
/// assert_eq!(road.other_end(1), Some(0));
/// assert_eq!(road.other_end(7), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    u: usize,
    v: usize,
    cost: f64,
    reliability: f64,
}

impl RoadSegment {
    /// Creates a road between `u` and `v`.
    pub fn new(u: usize, v: usize, cost: f64, reliability: f64) -> Self {
        Self {
            u,
            v,
            cost,
            reliability,
        }
    }

    /// First endpoint, as declared.
    pub fn u(&self) -> usize {
        self.u
    }

    /// Second endpoint, as declared.
    pub fn v(&self) -> usize {
        self.v
    }

    /// Travel cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Probability-like quality of the segment.
    pub fn reliability(&self) -> f64 {
        self.reliability
    }

    /// Returns the endpoint opposite `id`, or `None` if `id` is not an endpoint.
    pub fn other_end(&self, id: usize) -> Option<usize> {
        if id == self.u {
            Some(self.v)
        } else if id == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}
