//! Maximum Flow Algorithm Implementation
//!
//! This module implements Edmonds-Karp: Ford-Fulkerson with breadth-first
//! search for augmenting paths over an explicit residual network.
//!
//! # Theoretical Foundation
//!
//! Every input edge contributes a forward residual edge carrying its capacity
//! and a paired backward edge of capacity 0. Each edge stores the position of
//! its twin in the target's adjacency list, so pushing flow along one edge
//! and cancelling it on the twin is O(1). Choosing the fewest-hop augmenting
//! path bounds the number of augmentations by O(VE).
//!
//! When no augmenting path is left, the vertices still reachable from the
//! source in the residual network form the source side of a minimum cut
//! (max-flow min-cut theorem).
//!
//! # Algorithmic Complexity
//!
//! - Time Complexity: O(V * E^2)
//! - Space Complexity: O(V + E)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    parse_bool_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmProfiler,
    AlgorithmResult, NodeId,
};
use crate::data_structures::graph::Edge;

/// Flow capacity type
pub type Capacity = f64;

/// Flow value type
pub type Flow = f64;

/// Edge of the residual network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualEdge {
    pub to: NodeId,
    /// Position of the paired edge in `adjacency[to]`
    pub twin: usize,
    pub capacity: Capacity,
    pub flow: Flow,
}

impl ResidualEdge {
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// Input edge annotated with its final flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
    pub flow: Flow,
}

/// Residual network with paired forward/backward edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork {
    adjacency: Vec<Vec<ResidualEdge>>,
    /// `(from, position)` of every forward edge in insertion order
    forward: Vec<(NodeId, usize)>,
}

impl FlowNetwork {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            forward: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds a forward edge and its zero-capacity twin
    ///
    /// An edge with an endpoint out of range is dropped with a warning.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: Capacity) {
        if from >= self.vertex_count() || to >= self.vertex_count() {
            warn!(
                "flow network: dropping edge {} -> {} outside {} vertices",
                from,
                to,
                self.vertex_count()
            );
            return;
        }

        // for a self-loop the twin lands one slot after the forward edge
        let forward_position = self.adjacency[from].len();
        let backward_position = self.adjacency[to].len() + usize::from(from == to);

        self.adjacency[from].push(ResidualEdge {
            to,
            twin: backward_position,
            capacity,
            flow: 0.0,
        });
        self.adjacency[to].push(ResidualEdge {
            to: from,
            twin: forward_position,
            capacity: 0.0,
            flow: 0.0,
        });
        self.forward.push((from, forward_position));
    }

    /// Outgoing residual edges of `v`; empty if `v` is out of range
    pub fn edges(&self, v: NodeId) -> &[ResidualEdge] {
        match self.adjacency.get(v) {
            Some(edges) => edges,
            None => &[],
        }
    }

    /// Forward edges in insertion order with their current flow
    pub fn flow_edges(&self) -> Vec<FlowEdge> {
        self.forward
            .iter()
            .map(|&(from, position)| {
                let edge = &self.adjacency[from][position];
                FlowEdge {
                    from,
                    to: edge.to,
                    capacity: edge.capacity,
                    flow: edge.flow,
                }
            })
            .collect()
    }

    /// Fewest-hop path with positive residual capacity, as `(vertex, edge
    /// position)` steps from source to sink
    fn find_augmenting_path(
        &self,
        source: NodeId,
        sink: NodeId,
        profiler: &mut AlgorithmProfiler,
    ) -> Option<Vec<(NodeId, usize)>> {
        let mut parent: Vec<Option<(NodeId, usize)>> = vec![None; self.vertex_count()];
        let mut queue = VecDeque::from([source]);

        while let Some(v) = queue.pop_front() {
            if parent[sink].is_some() {
                break;
            }
            profiler.record_node_exploration();

            for (position, edge) in self.adjacency[v].iter().enumerate() {
                if edge.residual_capacity() <= 0.0 {
                    continue;
                }
                if parent[edge.to].is_some() || edge.to == source {
                    continue;
                }
                parent[edge.to] = Some((v, position));
                queue.push_back(edge.to);
            }
        }

        parent[sink]?;

        let mut path = Vec::new();
        let mut current = sink;
        while current != source {
            let (v, position) = parent[current]?;
            path.push((v, position));
            current = v;
        }
        path.reverse();
        Some(path)
    }

    /// Pushes the bottleneck along `path` and returns it
    fn augment(&mut self, path: &[(NodeId, usize)]) -> Flow {
        let bottleneck = path
            .iter()
            .map(|&(v, position)| self.adjacency[v][position].residual_capacity())
            .fold(Flow::INFINITY, Flow::min);

        for &(v, position) in path {
            let edge = &mut self.adjacency[v][position];
            edge.flow += bottleneck;
            let (to, twin) = (edge.to, edge.twin);
            self.adjacency[to][twin].flow -= bottleneck;
        }

        bottleneck
    }

    /// Vertices reachable from `source` over positive residual capacity,
    /// in ascending order
    pub fn reachable_from(&self, source: NodeId) -> Vec<NodeId> {
        if source >= self.vertex_count() {
            return Vec::new();
        }
        let mut seen = vec![false; self.vertex_count()];
        let mut queue = VecDeque::from([source]);
        seen[source] = true;

        while let Some(v) = queue.pop_front() {
            for edge in &self.adjacency[v] {
                if edge.residual_capacity() > 0.0 && !seen[edge.to] {
                    seen[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        (0..seen.len()).filter(|&v| seen[v]).collect()
    }
}

/// Outcome of a maximum-flow computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    pub max_flow: Flow,
    /// Input edges in input order, annotated with their final flow
    pub edges: Vec<FlowEdge>,
    /// Source side of a minimum cut, ascending; empty for degenerate input
    /// or when cut tracking is disabled
    pub min_cut: Vec<NodeId>,
    pub augmenting_paths: usize,
}

impl MaxFlowResult {
    fn empty() -> Self {
        Self {
            max_flow: 0.0,
            edges: Vec::new(),
            min_cut: Vec::new(),
            augmenting_paths: 0,
        }
    }

    /// Total capacity of the input edges leaving the `min_cut` side
    pub fn cut_capacity(&self) -> Capacity {
        self.edges
            .iter()
            .filter(|e| {
                self.min_cut.binary_search(&e.from).is_ok()
                    && self.min_cut.binary_search(&e.to).is_err()
            })
            .map(|e| e.capacity)
            .sum()
    }
}

/// Performance statistics for the last run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaxFlowStatistics {
    pub augmenting_paths: usize,
    pub bfs_vertices_visited: usize,
    pub execution_time_ms: f64,
}

/// Edmonds-Karp engine
///
/// Parameters:
/// - `track_min_cut` (`true`|`false`, default `true`)
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    parameters: HashMap<String, String>,
    statistics: MaxFlowStatistics,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("track_min_cut".to_string(), "true".to_string());

        Self {
            parameters,
            statistics: MaxFlowStatistics::default(),
        }
    }

    fn track_min_cut(&self) -> bool {
        self.parameters
            .get("track_min_cut")
            .map_or(true, |value| value == "true")
    }

    /// Statistics of the most recent call
    pub fn statistics(&self) -> &MaxFlowStatistics {
        &self.statistics
    }

    /// Maximum flow from `source` to `sink` over `n` vertices
    ///
    /// Edge weights are capacities. Degenerate input is answered with a
    /// zero flow: `n == 0`, an out-of-range source or sink, or an edge
    /// endpoint out of range or a capacity that is negative or not finite
    /// yield no edges; `source == sink` yields every input edge with flow 0.
    pub fn solve(&mut self, n: usize, edges: &[Edge], source: NodeId, sink: NodeId) -> MaxFlowResult {
        debug!(
            "edmonds-karp: {} -> {} over {} vertices, {} edges",
            source,
            sink,
            n,
            edges.len()
        );
        self.statistics = MaxFlowStatistics::default();

        if n == 0 || source >= n || sink >= n {
            return MaxFlowResult::empty();
        }

        if let Some(edge) = edges.iter().find(|e| e.from >= n || e.to >= n) {
            warn!(
                "edmonds-karp: edge {} -> {} is out of range for {} vertices",
                edge.from, edge.to, n
            );
            return MaxFlowResult::empty();
        }

        if let Some(edge) = edges
            .iter()
            .find(|e| !(e.weight >= 0.0 && e.weight.is_finite()))
        {
            warn!(
                "edmonds-karp: edge {} -> {} has unusable capacity {}",
                edge.from, edge.to, edge.weight
            );
            return MaxFlowResult::empty();
        }

        if source == sink {
            return MaxFlowResult {
                edges: edges
                    .iter()
                    .map(|e| FlowEdge {
                        from: e.from,
                        to: e.to,
                        capacity: e.weight,
                        flow: 0.0,
                    })
                    .collect(),
                ..MaxFlowResult::empty()
            };
        }

        let mut profiler = AlgorithmProfiler::new();
        profiler.start();

        let mut network = FlowNetwork::new(n);
        for edge in edges {
            network.add_edge(edge.from, edge.to, edge.weight);
        }

        let mut max_flow = 0.0;
        let mut augmenting_paths = 0;
        while let Some(path) = network.find_augmenting_path(source, sink, &mut profiler) {
            let bottleneck = network.augment(&path);
            profiler.record_step();
            trace!(
                "edmonds-karp: augmented {} along {} edges",
                bottleneck,
                path.len()
            );
            max_flow += bottleneck;
            augmenting_paths += 1;
        }

        let min_cut = if self.track_min_cut() {
            network.reachable_from(source)
        } else {
            Vec::new()
        };

        profiler.stop();
        let metrics = profiler.metrics();
        self.statistics = MaxFlowStatistics {
            augmenting_paths: metrics.steps_executed,
            bfs_vertices_visited: metrics.nodes_explored,
            execution_time_ms: metrics.execution_time.as_secs_f64() * 1000.0,
        };

        debug!(
            "edmonds-karp: max flow {} after {} augmenting paths",
            max_flow, augmenting_paths
        );

        MaxFlowResult {
            max_flow,
            edges: network.flow_edges(),
            min_cut,
            augmenting_paths,
        }
    }
}

impl Default for MaxFlowSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Edmonds-Karp Maximum Flow"
    }

    fn category(&self) -> &'static str {
        "graph"
    }

    fn description(&self) -> &'static str {
        "Edmonds-Karp computes a maximum flow between a source and a sink by repeatedly augmenting along the fewest-hop path of a residual network, and reports the source side of a minimum cut."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V * E^2)", "O(V + E)")
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> AlgorithmResult<()> {
        match name {
            "track_min_cut" => {
                parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::unknown_parameter(name, "track_min_cut")),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }

    fn parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }
}

/// Maximum flow with a default engine
pub fn edmonds_karp(n: usize, edges: &[Edge], source: NodeId, sink: NodeId) -> MaxFlowResult {
    MaxFlowSolver::new().solve(n, edges, source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Vec<Edge> {
        vec![
            Edge::new(0, 1, 3.0),
            Edge::new(0, 2, 2.0),
            Edge::new(1, 3, 2.0),
            Edge::new(2, 3, 3.0),
            Edge::new(1, 2, 1.0),
        ]
    }

    #[test]
    fn test_flow_network_twins() {
        let mut network = FlowNetwork::new(3);
        network.add_edge(0, 1, 4.0);
        network.add_edge(1, 0, 2.0);
        network.add_edge(2, 2, 1.0);

        for v in 0..3 {
            for (position, edge) in network.edges(v).iter().enumerate() {
                let twin = &network.edges(edge.to)[edge.twin];
                assert_eq!(twin.to, v);
                assert_eq!(twin.twin, position);
            }
        }
        assert_eq!(network.flow_edges().len(), 3);
    }

    #[test]
    fn test_flow_network_ignores_out_of_range_vertices() {
        let mut network = FlowNetwork::new(2);
        network.add_edge(0, 5, 1.0);
        network.add_edge(7, 1, 1.0);
        network.add_edge(0, 1, 1.0);

        assert_eq!(network.flow_edges().len(), 1);
        assert_eq!(network.edges(0).len(), 1);
        assert!(network.edges(9).is_empty());
        assert!(network.reachable_from(9).is_empty());
        assert_eq!(network.reachable_from(0), vec![0, 1]);
    }

    #[test]
    fn test_unusable_capacities_give_zero_flow() {
        for capacity in [f64::INFINITY, f64::NAN, -1.0] {
            let edges = vec![Edge::new(0, 1, capacity), Edge::new(1, 2, 1.0)];
            let result = edmonds_karp(3, &edges, 0, 2);
            assert_eq!(result, MaxFlowResult::empty());
        }

        let zero = edmonds_karp(2, &[Edge::new(0, 1, 0.0)], 0, 1);
        assert_eq!(zero.max_flow, 0.0);
        assert_eq!(zero.edges.len(), 1);
    }

    #[test]
    fn test_diamond_max_flow() {
        let result = edmonds_karp(4, &diamond(), 0, 3);

        assert_eq!(result.max_flow, 5.0);
        assert_eq!(result.augmenting_paths, 3);
        assert_eq!(result.min_cut, vec![0]);
        assert_eq!(result.cut_capacity(), result.max_flow);

        let flows: Vec<Flow> = result.edges.iter().map(|e| e.flow).collect();
        assert_eq!(flows, vec![3.0, 2.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_bottleneck_through_middle() {
        let edges = vec![
            Edge::new(0, 1, 10.0),
            Edge::new(1, 2, 1.0),
            Edge::new(2, 3, 10.0),
        ];
        let result = edmonds_karp(4, &edges, 0, 3);
        assert_eq!(result.max_flow, 1.0);
        assert_eq!(result.min_cut, vec![0, 1]);
        assert_eq!(result.cut_capacity(), 1.0);
    }

    #[test]
    fn test_flow_cancellation_uses_backward_edges() {
        // shortest path 0-1-2-5 is fine, but the second unit has to undo 1->2
        let edges = vec![
            Edge::new(0, 1, 1.0),
            Edge::new(0, 3, 1.0),
            Edge::new(1, 2, 1.0),
            Edge::new(3, 2, 1.0),
            Edge::new(1, 4, 1.0),
            Edge::new(2, 5, 1.0),
            Edge::new(4, 5, 1.0),
        ];
        let result = edmonds_karp(6, &edges, 0, 5);
        assert_eq!(result.max_flow, 2.0);
        assert_eq!(result.cut_capacity(), 2.0);
    }

    #[test]
    fn test_no_path_gives_zero_flow() {
        let edges = vec![Edge::new(1, 0, 5.0)];
        let result = edmonds_karp(2, &edges, 0, 1);
        assert_eq!(result.max_flow, 0.0);
        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.edges[0].flow, 0.0);
        assert_eq!(result.min_cut, vec![0]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(edmonds_karp(0, &[], 0, 0), MaxFlowResult::empty());
        assert_eq!(edmonds_karp(4, &diamond(), 0, 4), MaxFlowResult::empty());
        assert_eq!(edmonds_karp(4, &diamond(), 7, 3), MaxFlowResult::empty());
        assert_eq!(
            edmonds_karp(2, &[Edge::new(0, 5, 1.0)], 0, 1),
            MaxFlowResult::empty()
        );
    }

    #[test]
    fn test_source_equals_sink_returns_inputs() {
        let result = edmonds_karp(4, &diamond(), 2, 2);
        assert_eq!(result.max_flow, 0.0);
        assert_eq!(result.edges.len(), 5);
        for (flow_edge, input) in result.edges.iter().zip(diamond()) {
            assert_eq!(flow_edge.from, input.from);
            assert_eq!(flow_edge.to, input.to);
            assert_eq!(flow_edge.capacity, input.weight);
            assert_eq!(flow_edge.flow, 0.0);
        }
    }

    #[test]
    fn test_parallel_edges_are_kept_separately() {
        let edges = vec![Edge::new(0, 1, 2.0), Edge::new(0, 1, 3.0)];
        let result = edmonds_karp(2, &edges, 0, 1);
        assert_eq!(result.max_flow, 5.0);
        assert_eq!(result.edges[0].flow, 2.0);
        assert_eq!(result.edges[1].flow, 3.0);
    }

    #[test]
    fn test_min_cut_tracking_can_be_disabled() {
        let mut solver = MaxFlowSolver::new();
        solver.set_parameter("track_min_cut", "false").unwrap();
        let result = solver.solve(4, &diamond(), 0, 3);
        assert_eq!(result.max_flow, 5.0);
        assert!(result.min_cut.is_empty());
        assert_eq!(solver.statistics().augmenting_paths, 3);

        assert!(solver.set_parameter("track_min_cut", "yes").is_err());
        assert!(solver.set_parameter("variant", "dinic").is_err());
        assert_eq!(solver.get_parameter("track_min_cut").as_deref(), Some("false"));
    }
}
