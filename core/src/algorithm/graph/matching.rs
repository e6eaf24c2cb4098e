//! Bipartite Matching Algorithms
//!
//! Two-coloring of undirected edge lists and maximum-cardinality matching by
//! Hopcroft-Karp.
//!
//! # Theoretical Foundation
//!
//! A graph is bipartite iff it has no odd cycle, iff a breadth-first
//! traversal can color every component with two colors without a conflict.
//!
//! Hopcroft-Karp works in phases. Each phase layers the graph with one BFS
//! from all free left vertices, then augments along a maximal set of
//! vertex-disjoint shortest augmenting paths found by layered DFS. The
//! shortest augmenting path grows by at least one edge per phase, which
//! bounds the number of phases by O(sqrt(V)).
//!
//! # Algorithmic Complexity
//!
//! - Bipartite check: O(V + E)
//! - Hopcroft-Karp: O(E * sqrt(V))
//!
//! Copyright (c) 2025 CHRONOS Algorithmic Observatory

use std::collections::{BTreeSet, HashMap, VecDeque};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmProfiler, AlgorithmResult, NodeId,
};

/// Undirected edge `(u, v)`
pub type MatchEdge = (NodeId, NodeId);

/// Layer value of a left vertex that is unlayered or exhausted
const UNLAYERED: usize = usize::MAX;

// ═══════════════════════════════════════════════════════════════════════════
// TWO-COLORING
// ═══════════════════════════════════════════════════════════════════════════

/// Color of a vertex in a two-coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Outcome of a bipartiteness check
///
/// On a conflict the coloring is returned as it stood when the conflict was
/// found, so some vertices may still be `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bipartition {
    pub is_bipartite: bool,
    pub coloring: Vec<Option<Side>>,
}

impl Bipartition {
    fn side(&self, side: Side) -> BTreeSet<NodeId> {
        self.coloring
            .iter()
            .enumerate()
            .filter(|(_, color)| **color == Some(side))
            .map(|(v, _)| v)
            .collect()
    }

    pub fn left(&self) -> BTreeSet<NodeId> {
        self.side(Side::Left)
    }

    pub fn right(&self) -> BTreeSet<NodeId> {
        self.side(Side::Right)
    }
}

/// Edges with both endpoints below `n`; the rest are dropped with a warning
fn in_range(n: usize, edges: &[MatchEdge]) -> impl Iterator<Item = MatchEdge> + '_ {
    edges.iter().copied().filter(move |&(u, v)| {
        let ok = u < n && v < n;
        if !ok {
            warn!("matching: skipping edge ({}, {}) outside {} vertices", u, v, n);
        }
        ok
    })
}

/// Two-colors every connected component by BFS
///
/// Each component's lowest vertex is colored [`Side::Left`]. The check stops
/// at the first edge whose endpoints share a color.
pub fn check_bipartite(n: usize, edges: &[MatchEdge]) -> Bipartition {
    let mut adjacency = vec![Vec::new(); n];
    for (u, v) in in_range(n, edges) {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }

    let mut coloring: Vec<Option<Side>> = vec![None; n];
    for start in 0..n {
        if coloring[start].is_some() {
            continue;
        }
        coloring[start] = Some(Side::Left);
        let mut queue = VecDeque::from([start]);

        while let Some(v) = queue.pop_front() {
            let color = coloring[v];
            for &u in &adjacency[v] {
                let existing = coloring[u];
                match existing {
                    None => {
                        coloring[u] = color.map(Side::opposite);
                        queue.push_back(u);
                    }
                    Some(_) if existing == color => {
                        debug!("matching: odd cycle through edge ({}, {})", v, u);
                        return Bipartition {
                            is_bipartite: false,
                            coloring,
                        };
                    }
                    _ => {}
                }
            }
        }
    }

    Bipartition {
        is_bipartite: true,
        coloring,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HOPCROFT-KARP
// ═══════════════════════════════════════════════════════════════════════════

/// DFS frame: a left vertex and the position of its next edge to try
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: NodeId,
    next: usize,
}

/// Working state of one Hopcroft-Karp run
struct MatchingState<'a> {
    left: &'a BTreeSet<NodeId>,
    adjacency: Vec<Vec<NodeId>>,
    pair_left: Vec<Option<NodeId>>,
    pair_right: Vec<Option<NodeId>>,
    layer: Vec<usize>,
}

impl<'a> MatchingState<'a> {
    fn new(n: usize, edges: &[MatchEdge], left: &'a BTreeSet<NodeId>) -> Self {
        let mut adjacency = vec![Vec::new(); n];
        for (u, v) in in_range(n, edges) {
            if left.contains(&u) {
                adjacency[u].push(v);
            } else if left.contains(&v) {
                adjacency[v].push(u);
            }
        }

        Self {
            left,
            adjacency,
            pair_left: vec![None; n],
            pair_right: vec![None; n],
            layer: vec![UNLAYERED; n],
        }
    }

    /// Layers left vertices from the free ones; true if a free right vertex
    /// is reachable
    fn layer_phase(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for &v in self.left {
            if self.pair_left[v].is_some() {
                self.layer[v] = UNLAYERED;
            } else {
                self.layer[v] = 0;
                queue.push_back(v);
            }
        }

        let mut found = false;
        while let Some(v) = queue.pop_front() {
            for &u in &self.adjacency[v] {
                match self.pair_right[u] {
                    None => found = true,
                    Some(partner) if self.layer[partner] == UNLAYERED => {
                        self.layer[partner] = self.layer[v] + 1;
                        queue.push_back(partner);
                    }
                    Some(_) => {}
                }
            }
        }
        found
    }

    /// Searches a layered augmenting path from the free left vertex `root`
    /// and flips it on success
    fn augment_from(&mut self, root: NodeId) -> bool {
        let mut stack = vec![Frame { vertex: root, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let v = frame.vertex;
            let Some(&u) = self.adjacency[v].get(frame.next) else {
                // dead end for the rest of this phase
                self.layer[v] = UNLAYERED;
                stack.pop();
                continue;
            };
            frame.next += 1;

            match self.pair_right[u] {
                None => {
                    for frame in &stack {
                        let right = self.adjacency[frame.vertex][frame.next - 1];
                        self.pair_left[frame.vertex] = Some(right);
                        self.pair_right[right] = Some(frame.vertex);
                    }
                    trace!("matching: augmenting path of {} edges from {}", 2 * stack.len() - 1, root);
                    return true;
                }
                Some(partner) if self.layer[partner] == self.layer[v].saturating_add(1) => {
                    stack.push(Frame {
                        vertex: partner,
                        next: 0,
                    });
                }
                Some(_) => {}
            }
        }

        false
    }

    fn pairs(&self) -> Vec<MatchEdge> {
        self.left
            .iter()
            .filter_map(|&v| self.pair_left[v].map(|u| (v, u)))
            .collect()
    }
}

/// Outcome of [`solve_matching`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingResult {
    pub is_bipartite: bool,
    /// `(left, right)` pairs ordered by left vertex; empty if not bipartite
    pub matching: Vec<MatchEdge>,
}

impl MatchingResult {
    pub fn size(&self) -> usize {
        self.matching.len()
    }
}

/// Performance statistics for the last run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingStatistics {
    pub phases: usize,
    pub augmenting_paths: usize,
    pub execution_time_ms: f64,
}

/// Hopcroft-Karp engine
#[derive(Debug, Clone, Default)]
pub struct HopcroftKarp {
    statistics: MatchingStatistics,
}

impl HopcroftKarp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the most recent call
    pub fn statistics(&self) -> &MatchingStatistics {
        &self.statistics
    }

    /// Maximum matching between `left` and the remaining vertices
    ///
    /// Only edges with exactly one endpoint in `left` take part.
    pub fn maximum_matching(
        &mut self,
        n: usize,
        edges: &[MatchEdge],
        left: &BTreeSet<NodeId>,
    ) -> Vec<MatchEdge> {
        debug!(
            "hopcroft-karp: {} vertices, {} edges, {} on the left",
            n,
            edges.len(),
            left.len()
        );
        let mut profiler = AlgorithmProfiler::new();
        profiler.start();

        let mut state = MatchingState::new(n, edges, left);
        let mut phases = 0;
        while state.layer_phase() {
            phases += 1;
            for &v in left {
                if state.pair_left[v].is_none() {
                    profiler.record_node_exploration();
                    if state.augment_from(v) {
                        profiler.record_step();
                    }
                }
            }
            trace!("hopcroft-karp: phase {} done", phases);
        }

        let matching = state.pairs();
        profiler.stop();
        let metrics = profiler.metrics();
        self.statistics = MatchingStatistics {
            phases,
            augmenting_paths: metrics.steps_executed,
            execution_time_ms: metrics.execution_time.as_secs_f64() * 1000.0,
        };

        debug!(
            "hopcroft-karp: matching of size {} after {} phases",
            matching.len(),
            phases
        );
        matching
    }

    /// Bipartiteness check followed by maximum matching
    pub fn solve(&mut self, n: usize, edges: &[MatchEdge]) -> MatchingResult {
        let bipartition = check_bipartite(n, edges);
        if !bipartition.is_bipartite {
            self.statistics = MatchingStatistics::default();
            return MatchingResult {
                is_bipartite: false,
                matching: Vec::new(),
            };
        }

        let left = bipartition.left();
        MatchingResult {
            is_bipartite: true,
            matching: self.maximum_matching(n, edges, &left),
        }
    }
}

impl Algorithm for HopcroftKarp {
    fn name(&self) -> &'static str {
        "Hopcroft-Karp Bipartite Matching"
    }

    fn category(&self) -> &'static str {
        "graph"
    }

    fn description(&self) -> &'static str {
        "Checks that an undirected graph is bipartite by BFS two-coloring, then computes a maximum-cardinality matching with Hopcroft-Karp's phased shortest augmenting paths."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(E * sqrt(V))", "O(V + E)")
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

/// Maximum matching between `left` and the remaining vertices
pub fn hopcroft_karp(n: usize, edges: &[MatchEdge], left: &BTreeSet<NodeId>) -> Vec<MatchEdge> {
    HopcroftKarp::new().maximum_matching(n, edges, left)
}

/// Bipartiteness flag and maximum matching of an undirected edge list
pub fn solve_matching(n: usize, edges: &[MatchEdge]) -> MatchingResult {
    HopcroftKarp::new().solve(n, edges)
}
