//! Range validation ahead of engine calls
//!
//! Engines answer out-of-range indices with sentinels. Callers that want a
//! hard failure instead run these checks first. Negative weights and
//! capacities are rejected here too; engines skip them rather than loop.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::traits::{AlgorithmError, AlgorithmResult, NodeId};
use crate::data_structures::graph::{Edge, Graph};
use crate::data_structures::grid::{Coord, Grid, WALL};
use crate::io::parse::{FlowInput, MatchingInput};

pub fn validate_vertex(vertex: NodeId, size: usize) -> AlgorithmResult<()> {
    if vertex < size {
        Ok(())
    } else {
        Err(AlgorithmError::VertexOutOfRange { vertex, size })
    }
}

/// Every endpoint of every edge is below `size`
pub fn validate_edges<I>(size: usize, endpoints: I) -> AlgorithmResult<()>
where
    I: IntoIterator<Item = (NodeId, NodeId)>,
{
    endpoints.into_iter().try_for_each(|(u, v)| {
        validate_vertex(u, size)?;
        validate_vertex(v, size)
    })
}

/// Every weight is a non-negative number
pub fn validate_weights<'a, I>(edges: I) -> AlgorithmResult<()>
where
    I: IntoIterator<Item = &'a Edge>,
{
    match edges.into_iter().find(|e| !(e.weight >= 0.0)) {
        Some(e) => Err(AlgorithmError::NegativeWeight {
            from: e.from,
            to: e.to,
            weight: e.weight,
        }),
        None => Ok(()),
    }
}

/// Graph weights are fit for Dijkstra
pub fn validate_graph(graph: &Graph) -> AlgorithmResult<()> {
    validate_weights(&graph.list_of_edges(None))
}

/// Source, sink and every edge endpoint are below `n`; capacities are
/// non-negative
pub fn validate_flow_input(input: &FlowInput) -> AlgorithmResult<()> {
    validate_vertex(input.source, input.n)?;
    validate_vertex(input.sink, input.n)?;
    validate_edges(input.n, input.edges.iter().map(|e| (e.from, e.to)))?;
    validate_weights(&input.edges)
}

pub fn validate_matching_input(input: &MatchingInput) -> AlgorithmResult<()> {
    validate_edges(input.n, input.edges.iter().copied())
}

fn validate_cell(grid: &Grid, (row, col): Coord) -> AlgorithmResult<()> {
    match grid.cost((row, col)) {
        None => Err(AlgorithmError::CoordinateOutOfRange {
            row,
            col,
            rows: grid.rows(),
            cols: grid.cols(),
        }),
        Some(WALL) => Err(AlgorithmError::WallCell { row, col }),
        Some(_) => Ok(()),
    }
}

/// Start and goal lie inside the grid on walkable cells
pub fn validate_endpoints(grid: &Grid, start: Coord, goal: Coord) -> AlgorithmResult<()> {
    validate_cell(grid, start)?;
    validate_cell(grid, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::Orientation;

    #[test]
    fn test_validate_vertex() {
        assert!(validate_vertex(3, 4).is_ok());
        assert!(matches!(
            validate_vertex(4, 4),
            Err(AlgorithmError::VertexOutOfRange { vertex: 4, size: 4 })
        ));
    }

    #[test]
    fn test_validate_flow_input_reports_first_offender() {
        let mut input = FlowInput {
            n: 3,
            source: 0,
            sink: 2,
            edges: vec![Edge::new(0, 1, 1.0), Edge::new(1, 5, 1.0)],
        };
        assert!(matches!(
            validate_flow_input(&input),
            Err(AlgorithmError::VertexOutOfRange { vertex: 5, size: 3 })
        ));

        input.edges.pop();
        assert!(validate_flow_input(&input).is_ok());

        input.sink = 3;
        assert!(validate_flow_input(&input).is_err());
    }

    #[test]
    fn test_negative_capacity_fails_validation() {
        let input = FlowInput {
            n: 3,
            source: 0,
            sink: 2,
            edges: vec![Edge::new(0, 1, 4.0), Edge::new(1, 2, -2.0)],
        };
        assert!(matches!(
            validate_flow_input(&input),
            Err(AlgorithmError::NegativeWeight { from: 1, to: 2, .. })
        ));
    }

    #[test]
    fn test_validate_graph_weights() {
        let mut graph = Graph::with_size(3, Orientation::Undirected);
        graph.add_edge(0, 1, 0.0);
        graph.add_edge(1, 2, 3.5);
        assert!(validate_graph(&graph).is_ok());

        graph.add_edge(2, 0, -1.0);
        assert!(matches!(
            validate_graph(&graph),
            Err(AlgorithmError::NegativeWeight { from: 0, to: 2, .. })
        ));

        graph.add_edge(2, 0, f64::NAN);
        assert!(validate_graph(&graph).is_err());
    }

    #[test]
    fn test_validate_matching_input() {
        let input = MatchingInput {
            n: 2,
            edges: vec![(0, 1), (2, 0)],
        };
        assert!(matches!(
            validate_matching_input(&input),
            Err(AlgorithmError::VertexOutOfRange { vertex: 2, size: 2 })
        ));
    }

    #[test]
    fn test_validate_endpoints() {
        let grid = Grid::new(vec![vec![1, 0], vec![1, 1]]).unwrap();
        assert!(validate_endpoints(&grid, (0, 0), (1, 1)).is_ok());
        assert!(matches!(
            validate_endpoints(&grid, (0, 0), (0, 1)),
            Err(AlgorithmError::WallCell { row: 0, col: 1 })
        ));
        assert!(matches!(
            validate_endpoints(&grid, (2, 0), (1, 1)),
            Err(AlgorithmError::CoordinateOutOfRange { row: 2, col: 0, rows: 2, cols: 2 })
        ));
    }
}
