//! Intra-route 2-opt improvement on the road network.
//!
//! # Algorithm
//!
//! For each pair of interior cut points `1 <= i < j <= n-2`, reverse the
//! segment `route[i..=j]` and recompute the full route cost from direct road
//! lookups. The first reversal that strictly lowers the cost is accepted and
//! the scan restarts (first-improvement strategy). The search stops when a
//! full scan finds nothing, or after `max_passes` accepted moves.
//!
//! Road lookups are direction-sensitive when parallel roads exist, so the
//! cost is recomputed over the whole route rather than via an edge delta.
//! A route with a hop that has no direct road has no cost; such a route is
//! never produced and, as input, is returned unchanged.
//!
//! # Complexity
//!
//! O(n³) per scan (O(n²) cut pairs, O(n) cost each). Every accepted move
//! strictly lowers the cost, so the search cannot cycle.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::{debug, warn};

use crate::graph::Graph;

/// Upper bound on accepted moves used by [`two_opt_improve`].
pub const DEFAULT_MAX_PASSES: usize = 10_000;

/// Minimum cost reduction for a reversal to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Sum of direct road costs along `route`.
///
/// Returns `None` if any consecutive pair has no direct road. Routes with
/// fewer than two stops cost zero.
///
/// # Examples
///
/// ```
/// use relief_routing::graph::Graph;
/// use relief_routing::local_search::route_cost;
///
/// let mut g = Graph::new();
/// g.add_road(0, 1, 2.0, 1.0);
/// g.add_road(1, 2, 3.0, 1.0);
///
/// assert_eq!(route_cost(&g, &[0, 1, 2]), Some(5.0));
/// assert_eq!(route_cost(&g, &[0, 2]), None);
/// ```
pub fn route_cost(graph: &Graph, route: &[usize]) -> Option<f64> {
    route
        .windows(2)
        .map(|hop| graph.edge_cost(hop[0], hop[1]))
        .sum()
}

/// Applies 2-opt to a closed route using [`DEFAULT_MAX_PASSES`].
///
/// Returns the improved route and its cost (`None` if the route is not
/// fully connected by direct roads).
///
/// # Examples
///
/// ```
/// use relief_routing::graph::Graph;
/// use relief_routing::local_search::two_opt_improve;
///
/// // Square 0-1-2-3 with unit sides and long diagonals.
/// let mut g = Graph::new();
/// g.add_road(0, 1, 1.0, 1.0);
/// g.add_road(1, 2, 1.0, 1.0);
/// g.add_road(2, 3, 1.0, 1.0);
/// g.add_road(3, 0, 1.0, 1.0);
/// g.add_road(0, 2, 3.0, 1.0);
/// g.add_road(1, 3, 3.0, 1.0);
///
/// let (route, cost) = two_opt_improve(&g, &[0, 2, 1, 3, 0]);
/// assert_eq!(cost, Some(4.0));
/// assert_eq!(route.first(), Some(&0));
/// assert_eq!(route.last(), Some(&0));
/// ```
pub fn two_opt_improve(graph: &Graph, route: &[usize]) -> (Vec<usize>, Option<f64>) {
    two_opt_improve_with_limit(graph, route, DEFAULT_MAX_PASSES)
}

/// Applies 2-opt to a closed route, accepting at most `max_passes` moves.
///
/// The first and last elements never move. Routes of length `<= 3` have no
/// interior segment to reverse and are returned unchanged.
pub fn two_opt_improve_with_limit(
    graph: &Graph,
    route: &[usize],
    max_passes: usize,
) -> (Vec<usize>, Option<f64>) {
    let mut current = route.to_vec();
    let Some(mut current_cost) = route_cost(graph, &current) else {
        debug!(len = route.len(), "route has a missing road; skipping 2-opt");
        return (current, None);
    };
    if current.len() <= 3 {
        return (current, Some(current_cost));
    }

    let last_cut = current.len() - 2;
    let mut passes = 0;

    'search: loop {
        if passes >= max_passes {
            warn!(max_passes, "2-opt stopped at pass limit");
            break;
        }
        for i in 1..last_cut {
            for j in (i + 1)..=last_cut {
                current[i..=j].reverse();
                match route_cost(graph, &current) {
                    Some(cost) if cost + IMPROVEMENT_EPSILON < current_cost => {
                        current_cost = cost;
                        passes += 1;
                        continue 'search;
                    }
                    _ => current[i..=j].reverse(),
                }
            }
        }
        break;
    }

    debug!(passes, cost = current_cost, "2-opt converged");
    (current, Some(current_cost))
}
