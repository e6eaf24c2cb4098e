//! Shortest-path engines over graphs and cost grids
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod astar;
pub mod dijkstra;

pub use self::astar::{a_star, solve_grid, AStar, GridPath, Heuristic};
pub use self::dijkstra::{
    all_pairs_shortest_paths, all_shortest_paths, shortest_path, Dijkstra, DijkstraStatistics,
    ShortestPath,
};
