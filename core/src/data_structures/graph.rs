//! Dense adjacency-matrix graph with directed/undirected orientation
//!
//! This module implements the graph container consumed by the shortest-path
//! and spanning-tree engines. Vertices are dense indices `0..n`; the matrix
//! stores `Option<Weight>` so that a legitimate zero-weight edge is never
//! confused with "no edge".
//!
//! # Invariants
//! - `weight[i][i] == Some(0.0)` for every vertex
//! - for undirected graphs `weight[i][j] == weight[j][i]` after every operation
//!
//! # Vertex Identity
//! Removing vertex `k` deletes row and column `k` and re-indexes every vertex
//! above `k` down by one. Callers holding vertex ids across a removal must
//! remap them themselves.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeSet;

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::NodeId;

/// Edge weight type
pub type Weight = f64;

/// Weight assumed for edges given without one
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// Graph orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    Directed,
    #[default]
    Undirected,
}

/// Weighted edge triple `(from, to, weight)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Edge with the default weight of 1
    pub fn unweighted(from: NodeId, to: NodeId) -> Self {
        Self::new(from, to, DEFAULT_WEIGHT)
    }
}

/// Dense adjacency-matrix graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    orientation: Orientation,
    matrix: Vec<Vec<Option<Weight>>>,
}

impl Graph {
    /// Creates an empty graph with no vertices
    pub fn new(orientation: Orientation) -> Self {
        Self::with_size(0, orientation)
    }

    /// Creates a graph with `n` isolated vertices
    pub fn with_size(n: usize, orientation: Orientation) -> Self {
        let mut graph = Self {
            orientation,
            matrix: Vec::with_capacity(n),
        };
        if n > 0 {
            graph.add_vertex(n - 1);
        }
        graph
    }

    /// Loads a graph of `n` vertices from an edge list
    ///
    /// Edges referencing vertices `>= n` extend the graph, exactly as
    /// [`add_edge`](Self::add_edge) does.
    pub fn from_edges<I>(n: usize, orientation: Orientation, edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::with_size(n, orientation);
        for edge in edges {
            graph.add_edge(edge.from, edge.to, edge.weight);
        }
        graph
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_directed(&self) -> bool {
        self.orientation == Orientation::Directed
    }

    /// Number of vertices
    #[inline]
    pub fn size(&self) -> usize {
        self.matrix.len()
    }

    #[inline]
    fn contains(&self, v: NodeId) -> bool {
        v < self.size()
    }

    /// Weight stored between `a` and `b`; `None` when there is no edge or
    /// either index is out of range. The diagonal always reads `Some(0.0)`.
    #[inline]
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        if self.contains(a) && self.contains(b) {
            self.matrix[a][b]
        } else {
            None
        }
    }

    /// Whether a non-loop edge `a -> b` exists
    #[inline]
    pub fn is_edge(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.weight(a, b).is_some()
    }

    /// Extends the matrix so that vertex `k` exists
    ///
    /// Every vertex below `k` is created as well. No-op when `k` is already
    /// in range.
    pub fn add_vertex(&mut self, k: NodeId) {
        if self.contains(k) {
            return;
        }

        let new_size = k + 1;
        for row in &mut self.matrix {
            row.resize(new_size, None);
        }
        for i in self.matrix.len()..new_size {
            let mut row = vec![None; new_size];
            row[i] = Some(0.0);
            self.matrix.push(row);
        }
        trace!("graph extended to {} vertices", new_size);
    }

    /// Adds (or overwrites) the edge `a -> b`, mirrored for undirected graphs
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Weight) {
        self.add_vertex(a.max(b));

        if a == b {
            warn!("ignoring self-loop weight {} on vertex {}; the diagonal stays 0", weight, a);
            return;
        }

        self.matrix[a][b] = Some(weight);
        if !self.is_directed() {
            self.matrix[b][a] = Some(weight);
        }
    }

    /// Removes vertex `k`, shifting every higher index down by one
    pub fn remove_vertex(&mut self, k: NodeId) {
        if !self.contains(k) {
            return;
        }

        self.matrix.remove(k);
        for row in &mut self.matrix {
            row.remove(k);
        }
        trace!("vertex {} removed, {} vertices remain", k, self.size());
    }

    /// Removes the edge `a -> b` (both directions for undirected graphs)
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) {
        if !(self.contains(a) && self.contains(b)) || a == b {
            return;
        }

        self.matrix[a][b] = None;
        if !self.is_directed() {
            self.matrix[b][a] = None;
        }
    }

    /// All vertex indices `0..n`
    pub fn list_of_vertices(&self) -> Vec<NodeId> {
        (0..self.size()).collect()
    }

    /// Lists edges
    ///
    /// With `Some(v)`, returns the outgoing edges of `v` (empty if `v` is out
    /// of range). With `None`, returns every directed edge once, and every
    /// undirected edge twice - once in each direction.
    pub fn list_of_edges(&self, vertex: Option<NodeId>) -> Vec<Edge> {
        if let Some(v) = vertex {
            return self.outgoing(v).collect();
        }

        let n = self.size();
        let mut edges = Vec::new();
        for i in 0..n {
            let first = match self.orientation {
                Orientation::Directed => 0,
                Orientation::Undirected => i + 1,
            };
            for j in first..n {
                if let Some(w) = self.matrix[i][j] {
                    if i == j {
                        continue;
                    }
                    edges.push(Edge::new(i, j, w));
                    if !self.is_directed() {
                        edges.push(Edge::new(j, i, w));
                    }
                }
            }
        }
        edges
    }

    /// Outgoing non-loop edges of `v` in ascending target order
    pub fn outgoing(&self, v: NodeId) -> impl Iterator<Item = Edge> + '_ {
        let row: &[Option<Weight>] = if self.contains(v) { &self.matrix[v] } else { &[] };
        row.iter()
            .enumerate()
            .filter_map(move |(u, w)| match w {
                Some(w) if u != v => Some(Edge::new(v, u, *w)),
                _ => None,
            })
    }

    /// Number of distinct edges (an undirected pair counts once)
    pub fn edge_count(&self) -> usize {
        let edges = self.list_of_edges(None).len();
        match self.orientation {
            Orientation::Directed => edges,
            Orientation::Undirected => edges / 2,
        }
    }

    /// Whether the graph is (weakly) connected. The empty graph is connected.
    pub fn is_connected(&self) -> bool {
        self.size() == 0 || self.connected_components().len() == 1
    }

    /// Connected components, or weakly connected components of a digraph
    ///
    /// Uses an explicit stack, never recursion. An edge counts for
    /// connectivity if either direction is present. Components are listed in
    /// order of their smallest vertex.
    pub fn connected_components(&self) -> Vec<BTreeSet<NodeId>> {
        let n = self.size();
        let mut components = Vec::new();
        let mut visited = vec![false; n];

        for root in 0..n {
            if visited[root] {
                continue;
            }

            let mut component = BTreeSet::new();
            let mut stack = vec![root];
            while let Some(v) = stack.pop() {
                if visited[v] {
                    continue;
                }
                visited[v] = true;
                component.insert(v);

                for u in 0..n {
                    if u != v
                        && !visited[u]
                        && (self.matrix[v][u].is_some() || self.matrix[u][v].is_some())
                    {
                        stack.push(u);
                    }
                }
            }
            components.push(component);
        }

        components
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Orientation::Undirected)
    }
}
