//! Dijkstra single-source shortest paths.
//!
//! # Algorithm
//!
//! Classic label-setting search over non-negative road costs with a binary
//! heap keyed by tentative distance. A vertex is settled the first time it is
//! popped and never relaxed again.
//!
//! Heap ties are broken by the smaller vertex id and neighbors are relaxed in
//! insertion order, so results are reproducible run to run.
//!
//! # Complexity
//!
//! O((V + E) log V).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::{FxHashMap, FxHashSet};

use super::Path;
use crate::error::{Result, RoutingError};
use crate::graph::Graph;

/// Heap entry ordered so that `BinaryHeap` pops the smallest key first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct QueueEntry {
    pub(crate) key: f64,
    pub(crate) node: usize,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum road cost from a source to every vertex of a graph.
///
/// Unreached vertices (and ids unknown to the graph) report `f64::INFINITY`.
#[derive(Debug, Clone)]
pub struct Distances {
    source: usize,
    dist: FxHashMap<usize, f64>,
}

impl Distances {
    /// Vertex the search started from.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance to `id`, or `f64::INFINITY` if there is no path.
    pub fn get(&self, id: usize) -> f64 {
        self.dist.get(&id).copied().unwrap_or(f64::INFINITY)
    }

    /// Returns `true` if a path to `id` exists.
    pub fn is_reachable(&self, id: usize) -> bool {
        self.get(id).is_finite()
    }

    /// `(vertex, distance)` pairs in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> {
        let mut entries: Vec<(usize, f64)> = self.dist.iter().map(|(&k, &d)| (k, d)).collect();
        entries.sort_unstable_by_key(|&(k, _)| k);
        entries.into_iter()
    }

    /// Number of vertices covered (reachable or not).
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }
}

/// Shortest distances plus the predecessor of each reached vertex.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    distances: Distances,
    predecessor: FxHashMap<usize, usize>,
}

impl ShortestPathTree {
    /// Distance table of this tree.
    pub fn distances(&self) -> &Distances {
        &self.distances
    }

    /// Shortest distance to `id`, or `f64::INFINITY` if unreachable.
    pub fn distance(&self, id: usize) -> f64 {
        self.distances.get(id)
    }

    /// Reconstructs the location sequence from the source to `target`.
    ///
    /// Returns `None` if `target` is unreachable.
    pub fn path_to(&self, target: usize) -> Option<Path> {
        let cost = self.distances.get(target);
        if !cost.is_finite() {
            return None;
        }
        let mut nodes = vec![target];
        let mut current = target;
        while current != self.distances.source {
            current = *self.predecessor.get(&current)?;
            nodes.push(current);
        }
        nodes.reverse();
        Some(Path { nodes, cost })
    }
}

struct SearchState {
    dist: FxHashMap<usize, f64>,
    predecessor: FxHashMap<usize, usize>,
}

fn search(graph: &Graph, source: usize, stop_at: Option<usize>) -> Result<SearchState> {
    if !graph.contains_vertex(source) {
        return Err(RoutingError::UnknownLocation(source));
    }

    let mut dist: FxHashMap<usize, f64> = graph
        .vertex_ids()
        .into_iter()
        .map(|id| (id, f64::INFINITY))
        .collect();
    let mut predecessor = FxHashMap::default();
    let mut settled = FxHashSet::default();
    let mut heap = BinaryHeap::new();

    dist.insert(source, 0.0);
    heap.push(QueueEntry {
        key: 0.0,
        node: source,
    });

    while let Some(QueueEntry { key, node }) = heap.pop() {
        if !settled.insert(node) {
            continue;
        }
        if stop_at == Some(node) {
            break;
        }
        for (next, road) in graph.neighbors(node) {
            if settled.contains(next) {
                continue;
            }
            let candidate = key + road.cost();
            let best = dist.entry(*next).or_insert(f64::INFINITY);
            if candidate < *best {
                *best = candidate;
                predecessor.insert(*next, node);
                heap.push(QueueEntry {
                    key: candidate,
                    node: *next,
                });
            }
        }
    }

    Ok(SearchState { dist, predecessor })
}

/// Computes the shortest road cost from `source` to every vertex.
///
/// # Errors
///
/// Returns [`RoutingError::UnknownLocation`] if `source` is not in the graph.
///
/// # Examples
///
/// ```
/// use relief_routing::graph::Graph;
/// use relief_routing::shortest_path::dijkstra;
///
/// let mut g = Graph::new();
/// g.add_road(0, 1, 2.0, 1.0);
/// g.add_road(1, 2, 1.0, 1.0);
/// g.add_road(0, 2, 5.0, 1.0);
///
/// let d = dijkstra(&g, 0).unwrap();
/// assert_eq!(d.get(0), 0.0);
/// assert_eq!(d.get(2), 3.0);
/// assert!(d.get(9).is_infinite());
/// ```
pub fn dijkstra(graph: &Graph, source: usize) -> Result<Distances> {
    let state = search(graph, source, None)?;
    Ok(Distances {
        source,
        dist: state.dist,
    })
}

/// Like [`dijkstra`], but also records predecessors for path reconstruction.
///
/// # Errors
///
/// Returns [`RoutingError::UnknownLocation`] if `source` is not in the graph.
pub fn dijkstra_tree(graph: &Graph, source: usize) -> Result<ShortestPathTree> {
    let state = search(graph, source, None)?;
    Ok(ShortestPathTree {
        distances: Distances {
            source,
            dist: state.dist,
        },
        predecessor: state.predecessor,
    })
}

/// Finds a cheapest path from `source` to `target`.
///
/// The search stops as soon as `target` is settled. Returns `Ok(None)` when
/// `target` is unreachable or unknown.
///
/// # Errors
///
/// Returns [`RoutingError::UnknownLocation`] if `source` is not in the graph.
pub fn shortest_path(graph: &Graph, source: usize, target: usize) -> Result<Option<Path>> {
    let state = search(graph, source, Some(target))?;
    let tree = ShortestPathTree {
        distances: Distances {
            source,
            dist: state.dist,
        },
        predecessor: state.predecessor,
    };
    Ok(tree.path_to(target))
}
