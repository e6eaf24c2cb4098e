//! Graph, grid and queue containers shared by the engines
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod grid;
pub mod priority_queue;

pub use self::graph::{Edge, Graph, Orientation, Weight};
pub use self::grid::{Coord, Grid};
pub use self::priority_queue::{HeapStats, LazyPriorityQueue};
