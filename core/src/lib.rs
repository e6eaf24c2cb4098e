//! graphworks: classical graph algorithms over adjacency matrices and cost grids
//!
//! - [`Graph`]: dense adjacency-matrix store, directed or undirected
//! - Dijkstra shortest paths (single target, all targets, all pairs)
//! - Prim minimum spanning trees
//! - Edmonds-Karp maximum flow with minimum cut
//! - Two-coloring and Hopcroft-Karp maximum bipartite matching
//! - A* over 4-connected cost grids
//!
//! Engines never fail: out-of-range input is answered with a sentinel, and
//! the checks in [`io::validate`] turn those cases into errors up front.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod io;

pub use crate::algorithm::traits::{Algorithm, AlgorithmError, AlgorithmResult, NodeId};
pub use crate::data_structures::graph::{Edge, Graph, Orientation};
pub use crate::data_structures::grid::{Coord, Grid};
