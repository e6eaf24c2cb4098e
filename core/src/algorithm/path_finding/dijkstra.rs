//! Dijkstra's Shortest Path Algorithm Implementation
//!
//! Single-target, all-targets and all-pairs shortest paths over the dense
//! adjacency-matrix [`Graph`].
//!
//! # Theoretical Foundation
//!
//! With non-negative edge weights the vertex with the smallest tentative
//! distance can be settled permanently. Instead of a decrease-key operation
//! the frontier is a [`LazyPriorityQueue`]: every improving relaxation pushes
//! a fresh entry, and an entry whose stored distance exceeds the best known
//! distance for its vertex is discarded when it surfaces. No closed set is
//! kept. Ties between equal distances are broken by the smaller vertex index.
//!
//! # Algorithmic Complexity
//!
//! - Time Complexity: O((V + E) log V) per source
//! - Space Complexity: O(V + E) for the distance table and lazy queue
//!
//! # Sentinels
//!
//! - out-of-range start or end: `distance == None`, empty path
//! - unreachable end: `distance == Some(f64::INFINITY)`, empty path
//!
//! Edges with a negative or NaN weight are not relaxed.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    parse_bool_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmProfiler,
    AlgorithmResult, NodeId,
};
use crate::data_structures::graph::Graph;
use crate::data_structures::priority_queue::LazyPriorityQueue;

/// Distance and vertex sequence from a start vertex to one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// `None` when start or target is out of range, `+inf` when unreachable
    pub distance: Option<f64>,
    /// Vertices from start to target inclusive; empty when there is no path
    pub path: Vec<NodeId>,
}

impl ShortestPath {
    pub fn out_of_range() -> Self {
        Self {
            distance: None,
            path: Vec::new(),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            distance: Some(f64::INFINITY),
            path: Vec::new(),
        }
    }

    /// Whether a finite path was found
    pub fn is_reachable(&self) -> bool {
        matches!(self.distance, Some(d) if d.is_finite())
    }
}

/// Performance statistics for the last run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DijkstraStatistics {
    pub vertices_settled: usize,
    pub edges_relaxed: usize,
    pub stale_entries_discarded: u64,
    pub queue_pushes: u64,
    pub execution_time_ms: f64,
}

/// Distance table and parent pointers of one single-source run
struct SearchTree {
    distance: Vec<f64>,
    parent: Vec<Option<NodeId>>,
}

impl SearchTree {
    fn path(&self, start: NodeId, end: NodeId) -> ShortestPath {
        let distance = self.distance[end];
        if !distance.is_finite() {
            return ShortestPath::unreachable();
        }

        let mut path = vec![end];
        let mut current = end;
        while current != start {
            match self.parent[current] {
                // a parent chain longer than n would mean a cycle
                Some(p) if path.len() <= self.parent.len() => {
                    path.push(p);
                    current = p;
                }
                _ => return ShortestPath::unreachable(),
            }
        }
        path.reverse();

        ShortestPath {
            distance: Some(distance),
            path,
        }
    }
}

/// Dijkstra engine
///
/// Parameters:
/// - `early_exit` (`true`|`false`, default `true`): stop a single-target
///   search as soon as the target is settled
#[derive(Debug, Clone)]
pub struct Dijkstra {
    parameters: HashMap<String, String>,
    statistics: DijkstraStatistics,
}

impl Dijkstra {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("early_exit".to_string(), "true".to_string());

        Self {
            parameters,
            statistics: DijkstraStatistics::default(),
        }
    }

    fn early_exit(&self) -> bool {
        self.parameters
            .get("early_exit")
            .map_or(true, |value| value == "true")
    }

    /// Statistics of the most recent call
    pub fn statistics(&self) -> &DijkstraStatistics {
        &self.statistics
    }

    /// Shortest path from `start` to `end`
    pub fn shortest_path(&mut self, graph: &Graph, start: NodeId, end: NodeId) -> ShortestPath {
        let n = graph.size();
        debug!("dijkstra: {} -> {} over {} vertices", start, end, n);

        if start >= n || end >= n {
            self.statistics = DijkstraStatistics::default();
            return ShortestPath::out_of_range();
        }

        let target = if self.early_exit() { Some(end) } else { None };
        let tree = self.search(graph, start, target);
        let result = tree.path(start, end);

        debug!(
            "dijkstra: {} -> {} distance {:?} with {} hops",
            start,
            end,
            result.distance,
            result.path.len().saturating_sub(1)
        );
        result
    }

    /// Shortest paths from `start` to every vertex, indexed by target
    ///
    /// Empty when `start` is out of range.
    pub fn all_shortest_paths(&mut self, graph: &Graph, start: NodeId) -> Vec<ShortestPath> {
        let n = graph.size();
        debug!("dijkstra: all targets from {} over {} vertices", start, n);

        if start >= n {
            self.statistics = DijkstraStatistics::default();
            return Vec::new();
        }

        let tree = self.search(graph, start, None);
        (0..n).map(|end| tree.path(start, end)).collect()
    }

    fn search(&mut self, graph: &Graph, start: NodeId, target: Option<NodeId>) -> SearchTree {
        let n = graph.size();
        let mut profiler = AlgorithmProfiler::new();
        profiler.start();

        let mut distance = vec![f64::INFINITY; n];
        let mut parent = vec![None; n];
        let mut queue = LazyPriorityQueue::with_capacity(n);

        distance[start] = 0.0;
        queue.push_keyed(0.0, start);
        let mut skipped = 0;

        while let Some((dist_v, v)) = queue.pop_live(|&u| distance[u]) {
            profiler.record_node_exploration();
            trace!("dijkstra: settled {} at {}", v, dist_v);

            if target == Some(v) {
                break;
            }

            for edge in graph.outgoing(v) {
                if !(edge.weight >= 0.0) {
                    skipped += 1;
                    continue;
                }
                profiler.record_step();
                let candidate = dist_v + edge.weight;
                if candidate < distance[edge.to] {
                    distance[edge.to] = candidate;
                    parent[edge.to] = Some(v);
                    queue.push_keyed(candidate, edge.to);
                }
            }
        }

        if skipped > 0 {
            warn!("dijkstra: ignored {} edges with negative or NaN weight", skipped);
        }

        profiler.stop();
        let metrics = profiler.metrics();
        let heap = queue.stats();
        self.statistics = DijkstraStatistics {
            vertices_settled: metrics.nodes_explored,
            edges_relaxed: metrics.steps_executed,
            stale_entries_discarded: heap.stale_discarded,
            queue_pushes: heap.pushes,
            execution_time_ms: metrics.execution_time.as_secs_f64() * 1000.0,
        };

        SearchTree { distance, parent }
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra's Algorithm"
    }

    fn category(&self) -> &'static str {
        "path_finding"
    }

    fn description(&self) -> &'static str {
        "Dijkstra's algorithm computes shortest paths from a single source in a graph with non-negative edge weights, settling vertices in order of distance from a lazy-deletion priority queue."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O((V + E) log V)", "O(V + E)")
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> AlgorithmResult<()> {
        match name {
            "early_exit" => {
                parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::unknown_parameter(name, "early_exit")),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }

    fn parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }
}

/// Shortest path from `start` to `end` with a default engine
pub fn shortest_path(graph: &Graph, start: NodeId, end: NodeId) -> ShortestPath {
    Dijkstra::new().shortest_path(graph, start, end)
}

/// Shortest paths from `start` to every vertex with a default engine
pub fn all_shortest_paths(graph: &Graph, start: NodeId) -> Vec<ShortestPath> {
    Dijkstra::new().all_shortest_paths(graph, start)
}

/// `n x n` table of shortest paths, row = source, column = target
///
/// Each source runs an independent search in parallel; the graph is only
/// shared immutably.
pub fn all_pairs_shortest_paths(graph: &Graph) -> Vec<Vec<ShortestPath>> {
    debug!("dijkstra: all pairs over {} vertices", graph.size());
    (0..graph.size())
        .into_par_iter()
        .map(|source| Dijkstra::new().all_shortest_paths(graph, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::{Edge, Orientation};

    fn square_with_chord() -> Graph {
        Graph::from_edges(
            4,
            Orientation::Undirected,
            vec![
                Edge::new(0, 1, 1.0),
                Edge::new(1, 2, 1.0),
                Edge::new(2, 3, 1.0),
                Edge::new(0, 3, 4.0),
            ],
        )
    }

    #[test]
    fn test_shortest_path_prefers_cheaper_route() {
        let result = shortest_path(&square_with_chord(), 0, 3);
        assert_eq!(result.distance, Some(3.0));
        assert_eq!(result.path, vec![0, 1, 2, 3]);
        assert!(result.is_reachable());
    }

    #[test]
    fn test_start_equals_end() {
        let result = shortest_path(&square_with_chord(), 2, 2);
        assert_eq!(result.distance, Some(0.0));
        assert_eq!(result.path, vec![2]);
    }

    #[test]
    fn test_unreachable_target() {
        let graph = Graph::from_edges(3, Orientation::Directed, vec![Edge::new(1, 0, 1.0)]);
        let result = shortest_path(&graph, 0, 1);
        assert_eq!(result, ShortestPath::unreachable());
        assert!(!result.is_reachable());
    }

    #[test]
    fn test_out_of_range_is_distinct_from_unreachable() {
        let graph = square_with_chord();
        assert_eq!(shortest_path(&graph, 0, 4), ShortestPath::out_of_range());
        assert_eq!(shortest_path(&graph, 9, 0), ShortestPath::out_of_range());
        assert!(all_shortest_paths(&graph, 4).is_empty());
    }

    #[test]
    fn test_zero_weight_edges_are_traversed() {
        let graph = Graph::from_edges(
            3,
            Orientation::Directed,
            vec![Edge::new(0, 1, 0.0), Edge::new(1, 2, 0.0)],
        );
        let result = shortest_path(&graph, 0, 2);
        assert_eq!(result.distance, Some(0.0));
        assert_eq!(result.path, vec![0, 1, 2]);
    }

    #[test]
    fn test_negative_and_nan_weights_are_not_relaxed() {
        let mut graph = Graph::with_size(3, Orientation::Undirected);
        graph.add_edge(0, 1, -1.0);
        graph.add_edge(1, 2, 2.0);
        graph.add_edge(0, 2, f64::NAN);

        let results = all_shortest_paths(&graph, 0);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].distance, Some(0.0));
        assert!(!results[1].is_reachable());
        assert!(!results[2].is_reachable());

        let result = shortest_path(&graph, 2, 1);
        assert_eq!(result.distance, Some(2.0));
        assert_eq!(result.path, vec![2, 1]);
    }

    #[test]
    fn test_equal_cost_tie_uses_smaller_index() {
        // 0 -> 1 -> 3 and 0 -> 2 -> 3 both cost 2
        let graph = Graph::from_edges(
            4,
            Orientation::Directed,
            vec![
                Edge::new(0, 2, 1.0),
                Edge::new(0, 1, 1.0),
                Edge::new(2, 3, 1.0),
                Edge::new(1, 3, 1.0),
            ],
        );
        assert_eq!(shortest_path(&graph, 0, 3).path, vec![0, 1, 3]);
    }

    #[test]
    fn test_all_shortest_paths() {
        let mut graph = square_with_chord();
        graph.add_vertex(4);

        let results = all_shortest_paths(&graph, 0);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].distance, Some(0.0));
        assert_eq!(results[0].path, vec![0]);
        assert_eq!(results[2].distance, Some(2.0));
        assert_eq!(results[3].path, vec![0, 1, 2, 3]);
        assert_eq!(results[4], ShortestPath::unreachable());
    }

    #[test]
    fn test_all_pairs_is_symmetric_for_undirected() {
        let graph = square_with_chord();
        let table = all_pairs_shortest_paths(&graph);
        assert_eq!(table.len(), 4);
        for (i, row) in table.iter().enumerate() {
            assert_eq!(row.len(), 4);
            for (j, entry) in row.iter().enumerate() {
                assert_eq!(entry.distance, table[j][i].distance);
            }
        }
        assert_eq!(table[3][0].path, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_early_exit_does_not_change_answer() {
        let graph = square_with_chord();
        let mut eager = Dijkstra::new();
        let mut exhaustive = Dijkstra::new();
        exhaustive.set_parameter("early_exit", "false").unwrap();

        let a = eager.shortest_path(&graph, 0, 1);
        let b = exhaustive.shortest_path(&graph, 0, 1);
        assert_eq!(a, b);
        assert!(eager.statistics().vertices_settled < exhaustive.statistics().vertices_settled);
        assert_eq!(exhaustive.statistics().vertices_settled, 4);
    }

    #[test]
    fn test_statistics_count_stale_entries() {
        // vertex 2 is first reached at 10, then improved to 2 via vertex 1
        let graph = Graph::from_edges(
            3,
            Orientation::Directed,
            vec![
                Edge::new(0, 2, 10.0),
                Edge::new(0, 1, 1.0),
                Edge::new(1, 2, 1.0),
            ],
        );
        let mut engine = Dijkstra::new();
        engine.set_parameter("early_exit", "false").unwrap();
        let results = engine.all_shortest_paths(&graph, 0);

        assert_eq!(results[2].distance, Some(2.0));
        assert_eq!(engine.statistics().queue_pushes, 4);
        assert_eq!(engine.statistics().stale_entries_discarded, 1);
        assert_eq!(engine.statistics().vertices_settled, 3);
    }

    #[test]
    fn test_parameter_interface() {
        let mut engine = Dijkstra::default();
        assert_eq!(engine.get_parameter("early_exit").as_deref(), Some("true"));
        assert!(engine.set_parameter("early_exit", "sometimes").is_err());
        assert!(engine.set_parameter("heuristic", "manhattan").is_err());
        assert_eq!(engine.get_parameter("early_exit").as_deref(), Some("true"));
        assert_eq!(engine.category(), "path_finding");
        assert_eq!(engine.parameters().len(), 1);
    }
}
