//! Rectangular cost grid for 4-connected pathfinding
//!
//! Cells hold non-negative integers: `0` marks a wall, any positive value is
//! the cost of entering that cell. Coordinates are `(row, col)` with the
//! origin in the top-left corner.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, AlgorithmResult};

/// Grid coordinate `(row, col)`
pub type Coord = (usize, usize);

/// Cell value marking an impassable cell
pub const WALL: u32 = 0;

/// Movement order: down, up, right, left
pub const MOVES: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Row-major cost grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Builds a grid from rows of cell values
    ///
    /// Fails with a format error when there are no rows, when the first row
    /// is empty, or when the rows differ in width. Line numbers in the error
    /// are 1-based row positions.
    pub fn new(rows: Vec<Vec<u32>>) -> AlgorithmResult<Self> {
        let cols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            Some(_) => return Err(AlgorithmError::format(1, "grid row is empty")),
            None => return Err(AlgorithmError::format(1, "grid has no rows")),
        };

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(AlgorithmError::format(
                    i + 1,
                    format!("expected {} cells, found {}", cols, row.len()),
                ));
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Grid of the given shape with every cell set to `cost`
    pub fn uniform(rows: usize, cols: usize, cost: u32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![cost; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_bounds(&self, (row, col): Coord) -> bool {
        row < self.rows && col < self.cols
    }

    /// Cell value, or `None` outside the grid
    #[inline]
    pub fn cost(&self, coord: Coord) -> Option<u32> {
        if self.in_bounds(coord) {
            Some(self.cells[coord.0 * self.cols + coord.1])
        } else {
            None
        }
    }

    /// Inside the grid and not a wall
    #[inline]
    pub fn is_walkable(&self, coord: Coord) -> bool {
        matches!(self.cost(coord), Some(c) if c != WALL)
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != WALL).count()
    }

    /// Walkable neighbours of `coord` in movement order, with entry cost
    pub fn neighbors(&self, (row, col): Coord) -> impl Iterator<Item = (Coord, u32)> + '_ {
        MOVES.iter().filter_map(move |&(dr, dc)| {
            let next = (row.checked_add_signed(dr)?, col.checked_add_signed(dc)?);
            match self.cost(next) {
                Some(c) if c != WALL => Some((next, c)),
                _ => None,
            }
        })
    }

    /// Rows of cell values, as accepted by [`Grid::new`]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[u32]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_ragged_rows() {
        let err = Grid::new(vec![vec![1, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, AlgorithmError::Format { line: 2, .. }));
    }

    #[test]
    fn test_grid_rejects_empty_input() {
        assert!(matches!(
            Grid::new(Vec::new()),
            Err(AlgorithmError::Format { line: 1, .. })
        ));
        assert!(matches!(
            Grid::new(vec![Vec::new()]),
            Err(AlgorithmError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_cells_and_walls() {
        let grid = Grid::new(vec![vec![1, 0, 3], vec![2, 5, 1]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cost((0, 2)), Some(3));
        assert_eq!(grid.cost((2, 0)), None);
        assert!(!grid.is_walkable((0, 1)));
        assert!(grid.is_walkable((1, 1)));
        assert!(!grid.is_walkable((0, 3)));
        assert_eq!(grid.walkable_count(), 5);
        assert_eq!(grid.to_rows(), vec![vec![1, 0, 3], vec![2, 5, 1]]);
    }

    #[test]
    fn test_neighbors_follow_move_order() {
        let grid = Grid::uniform(3, 3, 1);
        let around: Vec<Coord> = grid.neighbors((1, 1)).map(|(c, _)| c).collect();
        assert_eq!(around, vec![(2, 1), (0, 1), (1, 2), (1, 0)]);

        let corner: Vec<Coord> = grid.neighbors((0, 0)).map(|(c, _)| c).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_neighbors_skip_walls() {
        let grid = Grid::new(vec![vec![1, 0], vec![4, 1]]).unwrap();
        let around: Vec<(Coord, u32)> = grid.neighbors((0, 0)).collect();
        assert_eq!(around, vec![((1, 0), 4)]);
    }
}
