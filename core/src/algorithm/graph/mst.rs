//! Minimum Spanning Tree Algorithm Implementation
//!
//! This module implements Prim's algorithm over the dense adjacency-matrix
//! [`Graph`], growing a tree from a chosen root.
//!
//! # Theoretical Foundation
//!
//! - **Cut Property**: for any cut `(S, V - S)`, the minimum-weight crossing
//!   edge is safe for the MST. Prim's algorithm keeps `S` as the vertices
//!   already in the tree and repeatedly adds the cheapest crossing edge.
//!
//! The frontier uses the same lazy-deletion discipline as Dijkstra, keyed on
//! the weight of the edge that would connect a vertex rather than on a path
//! distance. A vertex that has joined the tree is never re-parented.
//!
//! # Directed Input
//!
//! For a directed graph the link between `v` and `u` weighs
//! `min(weight(v, u), weight(u, v))` over the directions that are present.
//! This approximates the MST of the underlying undirected skeleton; it is not
//! a minimum arborescence.
//!
//! # Algorithmic Complexity
//!
//! - Time Complexity: O(V^2 log V) on the dense matrix (O(E log V) heap work)
//! - Space Complexity: O(V + E)
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::collections::HashMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmProfiler, AlgorithmResult, NodeId,
};
use crate::data_structures::graph::{Graph, Weight};
use crate::data_structures::priority_queue::LazyPriorityQueue;

/// Tree edge `(parent, child, weight)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MstEdge {
    pub parent: NodeId,
    pub child: NodeId,
    pub weight: Weight,
}

/// Spanning tree of the root's connected component
///
/// `edges` lists tree edges in the order their child joined the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree {
    pub root: NodeId,
    /// Parent of each vertex; `None` for the root and for unreached vertices
    pub parent: Vec<Option<NodeId>>,
    pub edges: Vec<MstEdge>,
    pub total_weight: Weight,
}

impl SpanningTree {
    fn empty(root: NodeId) -> Self {
        Self {
            root,
            parent: Vec::new(),
            edges: Vec::new(),
            total_weight: 0.0,
        }
    }

    /// No vertex is in the tree (out-of-range root or empty graph)
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Whether `v` belongs to the tree
    pub fn contains(&self, v: NodeId) -> bool {
        v < self.parent.len() && (v == self.root || self.parent[v].is_some())
    }

    /// Number of vertices in the tree
    pub fn vertex_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.edges.len() + 1
        }
    }

    /// Whether the tree reaches every vertex of the graph
    pub fn is_spanning(&self) -> bool {
        !self.is_empty() && self.vertex_count() == self.parent.len()
    }

    /// Tree path from the root to `v`; empty when `v` is not in the tree
    pub fn path_to(&self, v: NodeId) -> Vec<NodeId> {
        if !self.contains(v) {
            return Vec::new();
        }

        let mut path = vec![v];
        let mut current = v;
        while let Some(p) = self.parent[current] {
            path.push(p);
            current = p;
        }
        path.reverse();
        path
    }

    /// Tree paths from the root to every vertex, indexed by vertex
    pub fn paths(&self) -> Vec<Vec<NodeId>> {
        (0..self.parent.len()).map(|v| self.path_to(v)).collect()
    }
}

/// Performance statistics for the last run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MstStatistics {
    pub edges_examined: usize,
    pub priority_queue_operations: u64,
    pub stale_entries_discarded: u64,
    pub execution_time_ms: f64,
}

/// Cheapest link between two vertices over the directions present
fn link_weight(graph: &Graph, v: NodeId, u: NodeId) -> Option<Weight> {
    graph
        .weight(v, u)
        .into_iter()
        .chain(graph.weight(u, v))
        .reduce(Weight::min)
}

/// Prim engine
#[derive(Debug, Clone, Default)]
pub struct Prim {
    statistics: MstStatistics,
}

impl Prim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the most recent call
    pub fn statistics(&self) -> &MstStatistics {
        &self.statistics
    }

    /// Grows a minimum spanning tree from `start`
    ///
    /// An out-of-range `start` returns an empty tree. Vertices outside the
    /// root's component stay outside the tree.
    pub fn compute(&mut self, graph: &Graph, start: NodeId) -> SpanningTree {
        let n = graph.size();
        debug!("prim: root {} over {} vertices", start, n);
        self.statistics = MstStatistics::default();

        if start >= n {
            return SpanningTree::empty(start);
        }

        let mut profiler = AlgorithmProfiler::new();
        profiler.start();

        let mut key = vec![Weight::INFINITY; n];
        let mut parent = vec![None; n];
        let mut in_tree = vec![false; n];
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        let mut total_weight = 0.0;
        let mut duplicates = 0;
        let mut queue = LazyPriorityQueue::with_capacity(n);

        key[start] = 0.0;
        queue.push_keyed(0.0, start);

        while let Some((weight, v)) = queue.pop_live(|&u| key[u]) {
            // an equal-weight duplicate of a vertex already joined
            if in_tree[v] {
                duplicates += 1;
                continue;
            }
            in_tree[v] = true;
            profiler.record_node_exploration();

            if let Some(p) = parent[v] {
                trace!("prim: {} joins via {} ({})", v, p, weight);
                edges.push(MstEdge {
                    parent: p,
                    child: v,
                    weight,
                });
                total_weight += weight;
            }

            for u in 0..n {
                if u == v || in_tree[u] {
                    continue;
                }
                profiler.record_step();
                if let Some(w) = link_weight(graph, v, u) {
                    if w < key[u] {
                        key[u] = w;
                        parent[u] = Some(v);
                        queue.push_keyed(w, u);
                    }
                }
            }
        }

        profiler.stop();
        let metrics = profiler.metrics();
        let heap = queue.stats();
        self.statistics = MstStatistics {
            edges_examined: metrics.steps_executed,
            priority_queue_operations: heap.pushes + heap.pops,
            stale_entries_discarded: heap.stale_discarded + duplicates,
            execution_time_ms: metrics.execution_time.as_secs_f64() * 1000.0,
        };

        debug!(
            "prim: {} tree edges, total weight {}",
            edges.len(),
            total_weight
        );

        SpanningTree {
            root: start,
            parent,
            edges,
            total_weight,
        }
    }
}

impl Algorithm for Prim {
    fn name(&self) -> &'static str {
        "Prim's Minimum Spanning Tree"
    }

    fn category(&self) -> &'static str {
        "graph"
    }

    fn description(&self) -> &'static str {
        "Prim's algorithm grows a minimum spanning tree from a root vertex by repeatedly adding the cheapest edge that crosses from the tree to the rest of the graph. Directed input is treated as its undirected skeleton, taking the cheaper of the two directions."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V^2 log V)", "O(V + E)")
    }

    fn set_parameter(&mut self, name: &str, _value: &str) -> AlgorithmResult<()> {
        Err(AlgorithmError::unknown_parameter(name, "none"))
    }

    fn get_parameter(&self, _name: &str) -> Option<String> {
        None
    }

    fn parameters(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Minimum spanning tree rooted at `start` with a default engine
pub fn minimum_spanning_tree(graph: &Graph, start: NodeId) -> SpanningTree {
    Prim::new().compute(graph, start)
}
