//! Goal-directed A* search.
//!
//! Orders the frontier by `g(n) + h(n, target)`. With a heuristic that never
//! overestimates the remaining road cost (and is consistent), the returned
//! path has the same cost as the Dijkstra optimum while settling fewer
//! vertices.

use std::collections::BinaryHeap;

use fxhash::{FxHashMap, FxHashSet};

use super::dijkstra::QueueEntry;
use super::Path;
use crate::error::{Result, RoutingError};
use crate::graph::Graph;

/// Estimates the remaining road cost between two locations.
pub trait Heuristic {
    /// Lower bound on the cost of travelling from `from` to `to`.
    fn estimate(&self, from: usize, to: usize) -> f64;
}

/// `|from - to|` on location ids.
///
/// Only meaningful when ids encode spatial proximity and roads cost at least
/// one unit per id step. Otherwise it may overestimate and A* loses its
/// optimality guarantee.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdDifference;

impl Heuristic for IdDifference {
    fn estimate(&self, from: usize, to: usize) -> f64 {
        from.abs_diff(to) as f64
    }
}

/// Always zero; turns A* into a single-pair Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: usize, _to: usize) -> f64 {
        0.0
    }
}

impl<F> Heuristic for F
where
    F: Fn(usize, usize) -> f64,
{
    fn estimate(&self, from: usize, to: usize) -> f64 {
        self(from, to)
    }
}

/// A* from `source` to `target` with the [`IdDifference`] heuristic.
///
/// # Errors
///
/// Returns [`RoutingError::UnknownLocation`] if `source` is not in the graph.
///
/// # Examples
///
/// ```
/// use relief_routing::graph::Graph;
/// use relief_routing::shortest_path::astar;
///
/// let mut g = Graph::new();
/// g.add_road(0, 1, 1.0, 1.0);
/// g.add_road(1, 2, 1.0, 1.0);
/// g.add_road(0, 2, 4.0, 1.0);
///
/// let path = astar(&g, 0, 2).unwrap().unwrap();
/// assert_eq!(path.nodes, vec![0, 1, 2]);
/// assert_eq!(path.cost, 2.0);
/// ```
pub fn astar(graph: &Graph, source: usize, target: usize) -> Result<Option<Path>> {
    astar_with(graph, source, target, &IdDifference)
}

/// A* from `source` to `target` guided by a caller-supplied heuristic.
///
/// Returns `Ok(None)` if `target` is unreachable or unknown.
///
/// # Errors
///
/// Returns [`RoutingError::UnknownLocation`] if `source` is not in the graph.
pub fn astar_with<H>(graph: &Graph, source: usize, target: usize, heuristic: &H) -> Result<Option<Path>>
where
    H: Heuristic + ?Sized,
{
    if !graph.contains_vertex(source) {
        return Err(RoutingError::UnknownLocation(source));
    }

    let mut g_score: FxHashMap<usize, f64> = FxHashMap::default();
    let mut came_from: FxHashMap<usize, usize> = FxHashMap::default();
    let mut closed = FxHashSet::default();
    let mut open = BinaryHeap::new();

    g_score.insert(source, 0.0);
    open.push(QueueEntry {
        key: heuristic.estimate(source, target),
        node: source,
    });

    while let Some(QueueEntry { node, .. }) = open.pop() {
        if !closed.insert(node) {
            continue;
        }
        let g = g_score.get(&node).copied().unwrap_or(f64::INFINITY);

        if node == target {
            let mut nodes = vec![target];
            let mut current = target;
            while let Some(&prev) = came_from.get(&current) {
                nodes.push(prev);
                current = prev;
            }
            nodes.reverse();
            return Ok(Some(Path { nodes, cost: g }));
        }

        for (next, road) in graph.neighbors(node) {
            if closed.contains(next) {
                continue;
            }
            let tentative = g + road.cost();
            let best = g_score.entry(*next).or_insert(f64::INFINITY);
            if tentative < *best {
                *best = tentative;
                came_from.insert(*next, node);
                open.push(QueueEntry {
                    key: tentative + heuristic.estimate(*next, target),
                    node: *next,
                });
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortest_path::dijkstra;

    fn line_graph() -> Graph {
        // Ids follow position along a line; each step costs at least 1.
        let mut g = Graph::new();
        g.add_road(0, 1, 1.0, 1.0);
        g.add_road(1, 2, 1.5, 1.0);
        g.add_road(2, 3, 1.0, 1.0);
        g.add_road(0, 3, 10.0, 1.0);
        g.add_road(1, 3, 2.0, 1.0);
        g
    }

    #[test]
    fn test_astar_matches_dijkstra_cost() {
        let g = line_graph();
        let d = dijkstra(&g, 0).expect("known source");
        for target in 0..4 {
            let path = astar(&g, 0, target)
                .expect("known source")
                .expect("reachable");
            assert!((path.cost - d.get(target)).abs() < 1e-10);
        }
    }

    #[test]
    fn test_astar_path_endpoints() {
        let g = line_graph();
        let path = astar(&g, 0, 3).expect("known source").expect("reachable");
        assert_eq!(path.nodes.first(), Some(&0));
        assert_eq!(path.nodes.last(), Some(&3));
        assert_eq!(path.nodes, vec![0, 1, 3]);
    }

    #[test]
    fn test_astar_source_equals_target() {
        let g = line_graph();
        let path = astar(&g, 2, 2).expect("known source").expect("reachable");
        assert_eq!(path.nodes, vec![2]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn test_astar_unreachable() {
        let mut g = line_graph();
        g.add_road(8, 9, 1.0, 1.0);
        assert!(astar(&g, 0, 9).expect("known source").is_none());
        assert!(astar(&g, 0, 50).expect("known source").is_none());
    }

    #[test]
    fn test_astar_unknown_source() {
        let g = line_graph();
        assert!(matches!(
            astar(&g, 42, 0),
            Err(RoutingError::UnknownLocation(42))
        ));
    }

    #[test]
    fn test_astar_custom_heuristic() {
        let g = line_graph();
        let zero = astar_with(&g, 0, 3, &ZeroHeuristic)
            .expect("known source")
            .expect("reachable");
        let closure = astar_with(&g, 0, 3, &|_: usize, _: usize| 0.0)
            .expect("known source")
            .expect("reachable");
        assert!((zero.cost - 3.0).abs() < 1e-10);
        assert_eq!(zero.nodes, closure.nodes);
    }

    #[test]
    fn test_id_difference() {
        assert_eq!(IdDifference.estimate(2, 7), 5.0);
        assert_eq!(IdDifference.estimate(7, 2), 5.0);
    }
}
