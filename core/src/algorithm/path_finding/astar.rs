//! A* Search over 4-connected cost grids
//!
//! # Theoretical Foundation
//!
//! A* orders the frontier by `f = g + h`, where `g` is the cost paid so far
//! and `h` an admissible estimate of the remaining cost. Every cell costs at
//! least 1 to enter, so both the Manhattan and the Euclidean distance are
//! admissible and consistent, and the first time the goal is settled its
//! `g` is optimal.
//!
//! Frontier entries are `(f, g, coord)`; ties on `f` prefer the smaller `g`,
//! then the smaller coordinate. Outdated entries are discarded lazily by
//! comparing their `g` against the best known cost of their cell.
//!
//! # Algorithmic Complexity
//!
//! - Time Complexity: O(C log C) where C is the number of walkable cells
//! - Space Complexity: O(C)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmProfiler, AlgorithmResult,
};
use crate::data_structures::grid::{Coord, Grid};
use crate::data_structures::priority_queue::LazyPriorityQueue;

/// Remaining-cost estimate between two cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::Euclidean];

    pub fn estimate(self, (r1, c1): Coord, (r2, c2): Coord) -> f64 {
        let dr = r1.abs_diff(r2) as f64;
        let dc = c1.abs_diff(c2) as f64;
        match self {
            Heuristic::Manhattan => dr + dc,
            Heuristic::Euclidean => dr.hypot(dc),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            _ => Err(AlgorithmError::InvalidParameter {
                name: "heuristic".to_string(),
                reason: format!("invalid heuristic: {}. Valid options: manhattan, euclidean", s),
            }),
        }
    }
}

/// Result of one grid search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPath {
    /// Sum of entered-cell costs; `+inf` when there is no path
    pub length: f64,
    /// Cells from start to goal inclusive; empty when there is no path
    pub path: Vec<Coord>,
    /// Cells settled by the search
    pub visited_count: usize,
    /// `visited_count` as a percentage of all walkable cells
    pub visited_percent: f64,
    pub runtime: Duration,
}

impl GridPath {
    fn unreachable() -> Self {
        Self {
            length: f64::INFINITY,
            path: Vec::new(),
            visited_count: 0,
            visited_percent: 0.0,
            runtime: Duration::ZERO,
        }
    }

    pub fn is_found(&self) -> bool {
        self.length.is_finite()
    }
}

/// Per-run counters beyond what [`GridPath`] reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AStarStatistics {
    pub cells_expanded: usize,
    pub neighbors_examined: usize,
    pub stale_entries_discarded: u64,
    pub execution_time_ms: f64,
}

fn search(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    heuristic: Heuristic,
) -> (GridPath, AStarStatistics) {
    debug!(
        "a*: {:?} -> {:?} on {}x{} grid with {} heuristic",
        start,
        goal,
        grid.rows(),
        grid.cols(),
        heuristic
    );

    if !(grid.is_walkable(start) && grid.is_walkable(goal)) {
        debug!("a*: start or goal is outside the grid or a wall");
        return (GridPath::unreachable(), AStarStatistics::default());
    }

    let cols = grid.cols();
    let index = |(r, c): Coord| r * cols + c;
    let total_walkable = grid.walkable_count();

    let mut profiler = AlgorithmProfiler::new();
    profiler.start();

    let mut best = vec![f64::INFINITY; grid.rows() * cols];
    let mut parent: Vec<Option<Coord>> = vec![None; grid.rows() * cols];
    let mut queue = LazyPriorityQueue::new();
    let mut reached = false;

    best[index(start)] = 0.0;
    queue.push(heuristic.estimate(start, goal), 0.0, start);

    while let Some((g, current)) = queue.pop_live(|&cell| best[index(cell)]) {
        profiler.record_node_exploration();
        trace!("a*: settled {:?} at g = {}", current, g);

        if current == goal {
            reached = true;
            break;
        }

        for (next, cost) in grid.neighbors(current) {
            profiler.record_step();
            let candidate = g + f64::from(cost);
            if candidate < best[index(next)] {
                best[index(next)] = candidate;
                parent[index(next)] = Some(current);
                queue.push(candidate + heuristic.estimate(next, goal), candidate, next);
            }
        }
    }

    profiler.stop();
    let metrics = profiler.metrics();

    let path = if reached {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(previous) = parent[index(current)] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    } else {
        Vec::new()
    };

    let visited_count = metrics.nodes_explored;
    let visited_percent = if total_walkable > 0 {
        visited_count as f64 / total_walkable as f64 * 100.0
    } else {
        0.0
    };

    let result = GridPath {
        length: if reached { best[index(goal)] } else { f64::INFINITY },
        path,
        visited_count,
        visited_percent,
        runtime: metrics.execution_time,
    };
    let statistics = AStarStatistics {
        cells_expanded: metrics.nodes_explored,
        neighbors_examined: metrics.steps_executed,
        stale_entries_discarded: queue.stats().stale_discarded,
        execution_time_ms: metrics.execution_time.as_secs_f64() * 1000.0,
    };

    debug!(
        "a*: length {} after visiting {} cells ({:.2}%)",
        result.length, result.visited_count, result.visited_percent
    );
    (result, statistics)
}

/// Cheapest 4-connected path from `start` to `goal`
///
/// A start or goal outside the grid or on a wall yields an unreachable
/// result with zero instrumentation and no search.
pub fn a_star(grid: &Grid, start: Coord, goal: Coord, heuristic: Heuristic) -> GridPath {
    search(grid, start, goal, heuristic).0
}

/// Runs every heuristic over the same grid
pub fn solve_grid(grid: &Grid, start: Coord, goal: Coord) -> BTreeMap<Heuristic, GridPath> {
    Heuristic::ALL
        .iter()
        .map(|&heuristic| {
            let result = AStar::with_heuristic(heuristic).find_path(grid, start, goal);
            (heuristic, result)
        })
        .collect()
}

/// A* engine configured through the parameter interface
///
/// Parameters:
/// - `heuristic` (`manhattan`|`euclidean`, default `manhattan`)
#[derive(Debug, Clone, Default)]
pub struct AStar {
    heuristic: Heuristic,
    statistics: AStarStatistics,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            ..Self::default()
        }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn find_path(&mut self, grid: &Grid, start: Coord, goal: Coord) -> GridPath {
        let (result, statistics) = search(grid, start, goal, self.heuristic);
        self.statistics = statistics;
        result
    }

    /// Statistics of the most recent call
    pub fn statistics(&self) -> &AStarStatistics {
        &self.statistics
    }
}

impl Algorithm for AStar {
    fn name(&self) -> &'static str {
        "A* Search"
    }

    fn category(&self) -> &'static str {
        "path_finding"
    }

    fn description(&self) -> &'static str {
        "A* finds a cheapest 4-connected path across a cost grid, guiding the search with a Manhattan or Euclidean estimate of the remaining distance."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(C log C)", "O(C)")
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> AlgorithmResult<()> {
        match name {
            "heuristic" => {
                self.heuristic = value.parse()?;
                Ok(())
            }
            _ => Err(AlgorithmError::unknown_parameter(name, "heuristic")),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "heuristic" => Some(self.heuristic.name().to_string()),
            _ => None,
        }
    }

    fn parameters(&self) -> HashMap<String, String> {
        HashMap::from([("heuristic".to_string(), self.heuristic.name().to_string())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_cost(grid: &Grid, path: &[Coord]) -> f64 {
        path.iter()
            .skip(1)
            .map(|&cell| f64::from(grid.cost(cell).unwrap()))
            .sum()
    }

    #[test]
    fn test_heuristic_estimates() {
        assert_eq!(Heuristic::Manhattan.estimate((0, 0), (3, 4)), 7.0);
        assert_eq!(Heuristic::Euclidean.estimate((3, 4), (0, 0)), 5.0);
        assert_eq!("euclidean".parse::<Heuristic>().unwrap(), Heuristic::Euclidean);
        assert!("chebyshev".parse::<Heuristic>().is_err());
    }

    #[test]
    fn test_uniform_grid_heuristics_agree() {
        let grid = Grid::uniform(3, 3, 1);
        let results = solve_grid(&grid, (0, 0), (2, 2));
        assert_eq!(results.len(), 2);

        for (heuristic, result) in &results {
            assert_eq!(result.length, 4.0, "{}", heuristic);
            assert_eq!(result.path.len(), 5);
            assert_eq!(result.path.first(), Some(&(0, 0)));
            assert_eq!(result.path.last(), Some(&(2, 2)));
            assert!(result.visited_count > 0);
            assert!(result.visited_percent > 0.0 && result.visited_percent <= 100.0);
        }
    }

    #[test]
    fn test_equal_f_and_g_prefer_smaller_coordinate() {
        let grid = Grid::uniform(2, 2, 1);
        let result = a_star(&grid, (0, 0), (1, 1), Heuristic::Manhattan);
        // (0, 1) and (1, 0) tie on f and g
        assert_eq!(result.path, vec![(0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_avoids_expensive_cells() {
        let grid = Grid::new(vec![vec![1, 9, 1], vec![1, 1, 1]]).unwrap();
        let result = a_star(&grid, (0, 0), (0, 2), Heuristic::Manhattan);
        assert_eq!(result.length, 4.0);
        assert_eq!(result.path, vec![(0, 0), (1, 0), (1, 1), (1, 2), (0, 2)]);
        assert_eq!(path_cost(&grid, &result.path), result.length);
    }

    #[test]
    fn test_walls_block_the_goal() {
        let grid = Grid::new(vec![vec![1, 0, 1], vec![1, 0, 1]]).unwrap();
        let result = a_star(&grid, (0, 0), (0, 2), Heuristic::Euclidean);
        assert!(!result.is_found());
        assert!(result.path.is_empty());
        // both cells on the left side are settled
        assert_eq!(result.visited_count, 2);
        assert_eq!(result.visited_percent, 50.0);
    }

    #[test]
    fn test_invalid_endpoints_skip_search() {
        let grid = Grid::new(vec![vec![1, 0], vec![1, 1]]).unwrap();
        for (start, goal) in [((0, 0), (0, 1)), ((0, 1), (1, 1)), ((0, 0), (5, 5))] {
            let result = a_star(&grid, start, goal, Heuristic::Manhattan);
            assert_eq!(result.length, f64::INFINITY);
            assert!(result.path.is_empty());
            assert_eq!(result.visited_count, 0);
            assert_eq!(result.runtime, Duration::ZERO);
        }
    }

    #[test]
    fn test_start_is_goal() {
        let grid = Grid::uniform(2, 2, 3);
        let result = a_star(&grid, (1, 1), (1, 1), Heuristic::Manhattan);
        assert_eq!(result.length, 0.0);
        assert_eq!(result.path, vec![(1, 1)]);
        assert_eq!(result.visited_count, 1);
    }

    #[test]
    fn test_engine_parameters() {
        let mut engine = AStar::new();
        assert_eq!(engine.get_parameter("heuristic").as_deref(), Some("manhattan"));

        engine.set_parameter("heuristic", "euclidean").unwrap();
        assert_eq!(engine.heuristic(), Heuristic::Euclidean);
        assert!(engine.set_parameter("heuristic", "octile").is_err());
        assert_eq!(engine.heuristic(), Heuristic::Euclidean);
        assert!(engine.set_parameter("weight", "2").is_err());

        let grid = Grid::uniform(3, 3, 1);
        let result = engine.find_path(&grid, (0, 0), (2, 2));
        assert_eq!(result.length, 4.0);
        assert_eq!(engine.statistics().cells_expanded, result.visited_count);

        let configured = AStar::with_heuristic(Heuristic::Euclidean);
        assert_eq!(configured.heuristic(), Heuristic::Euclidean);
        assert_eq!(configured.get_parameter("heuristic").as_deref(), Some("euclidean"));
    }
}
