//! Text input formats
//!
//! Every parser takes the whole input as a string and reports malformed
//! input as [`AlgorithmError::Format`] carrying the 1-based line number.
//! Weights and capacities must be finite numbers. Parsers check syntax only;
//! index ranges and signs are checked by [`validate`](crate::io::validate).
//! The edge-list graph is the exception: its endpoints are range-checked
//! while loading, since [`Graph::add_edge`] would otherwise grow the graph.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::matching::MatchEdge;
use crate::algorithm::traits::{AlgorithmError, AlgorithmResult, NodeId};
use crate::data_structures::graph::{Edge, Graph, Orientation, Weight};
use crate::data_structures::grid::Grid;
use crate::io::validate::validate_vertex;

/// Parsed max-flow problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowInput {
    pub n: usize,
    pub source: NodeId,
    pub sink: NodeId,
    /// `(from, to, capacity)` in input order
    pub edges: Vec<Edge>,
}

/// Parsed matching problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingInput {
    pub n: usize,
    pub edges: Vec<MatchEdge>,
}

/// Reads a whole input file
pub fn read_to_string(path: impl AsRef<Path>) -> AlgorithmResult<String> {
    let path = path.as_ref();
    debug!("reading input from {}", path.display());
    Ok(fs::read_to_string(path)?)
}

fn parse_token<T: FromStr>(token: &str, line: usize, what: &str) -> AlgorithmResult<T> {
    token
        .parse()
        .map_err(|_| AlgorithmError::format(line, format!("{} must be a number, found '{}'", what, token)))
}

/// Real-valued token; `inf` and `NaN` are rejected
fn parse_finite(token: &str, line: usize, what: &str) -> AlgorithmResult<Weight> {
    let value: Weight = parse_token(token, line, what)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AlgorithmError::format(
            line,
            format!("{} must be finite, found '{}'", what, token),
        ))
    }
}

/// Non-blank lines with their 1-based line numbers
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_vertex_count(line: Option<(usize, &str)>) -> AlgorithmResult<usize> {
    let (number, line) = line.ok_or_else(|| AlgorithmError::format(1, "missing vertex count"))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [n] => parse_token(n, number, "vertex count"),
        _ => Err(AlgorithmError::format(number, "expected a single vertex count 'n'")),
    }
}

/// Edge-list graph: `n`, then one `a b [w]` per line, weight defaulting to 1
///
/// Blank lines are ignored. An endpoint at or above `n` is an
/// [`AlgorithmError::VertexOutOfRange`].
pub fn parse_graph(text: &str, orientation: Orientation) -> AlgorithmResult<Graph> {
    let mut lines = content_lines(text);
    let n = parse_vertex_count(lines.next())?;

    let mut graph = Graph::with_size(n, orientation);
    for (number, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let edge = match tokens.as_slice() {
            [a, b] => Edge::unweighted(
                parse_token(a, number, "vertex")?,
                parse_token(b, number, "vertex")?,
            ),
            [a, b, w] => Edge::new(
                parse_token(a, number, "vertex")?,
                parse_token(b, number, "vertex")?,
                parse_finite(w, number, "weight")?,
            ),
            _ => return Err(AlgorithmError::format(number, "expected 'a b' or 'a b w'")),
        };
        validate_vertex(edge.from, n)?;
        validate_vertex(edge.to, n)?;
        graph.add_edge(edge.from, edge.to, edge.weight);
    }

    debug!("parsed graph with {} vertices, {} edges", graph.size(), graph.edge_count());
    Ok(graph)
}

/// Max-flow adjacency list: `n`, `source sink`, then one line per vertex
/// `0..n` of `v capacity` pairs
///
/// A blank or missing vertex line means no outgoing edges. Lines after the
/// `n` vertex lines are ignored.
pub fn parse_flow_input(text: &str) -> AlgorithmResult<FlowInput> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 2 {
        return Err(AlgorithmError::format(
            lines.len() + 1,
            "expected at least two lines: 'n' and 'source sink'",
        ));
    }

    let n = parse_vertex_count(Some((1, lines[0].trim())))?;

    let endpoints: Vec<&str> = lines[1].split_whitespace().collect();
    let (source, sink) = match endpoints.as_slice() {
        [s, t] => (parse_token(s, 2, "source")?, parse_token(t, 2, "sink")?),
        _ => return Err(AlgorithmError::format(2, "expected 'source sink'")),
    };

    let mut edges = Vec::new();
    for from in 0..n {
        let number = from + 3;
        let Some(line) = lines.get(from + 2) else {
            break;
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() % 2 != 0 {
            return Err(AlgorithmError::format(
                number,
                format!("adjacency of vertex {} must be 'v capacity' pairs", from),
            ));
        }
        for pair in tokens.chunks_exact(2) {
            let to = parse_token(pair[0], number, "vertex")?;
            let capacity = parse_finite(pair[1], number, "capacity")?;
            edges.push(Edge::new(from, to, capacity));
        }
    }

    debug!("parsed flow network with {} vertices, {} edges", n, edges.len());
    Ok(FlowInput {
        n,
        source,
        sink,
        edges,
    })
}

/// Cost grid: rows of non-negative integers, blank lines ignored
pub fn parse_grid(text: &str) -> AlgorithmResult<Grid> {
    let mut rows: Vec<Vec<u32>> = Vec::new();

    for (number, line) in content_lines(text) {
        let row = line
            .split_whitespace()
            .map(|token| parse_token::<u32>(token, number, "cell"))
            .collect::<AlgorithmResult<Vec<u32>>>()?;
        if let Some(width) = rows.first().map(Vec::len) {
            if row.len() != width {
                return Err(AlgorithmError::format(
                    number,
                    format!("expected {} cells, found {}", width, row.len()),
                ));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(AlgorithmError::format(1, "grid is empty"));
    }

    let grid = Grid::new(rows)?;
    debug!("parsed {}x{} grid", grid.rows(), grid.cols());
    Ok(grid)
}

/// Undirected edge list: `n`, then one `u v` per line, blank lines ignored
pub fn parse_matching_input(text: &str) -> AlgorithmResult<MatchingInput> {
    let mut lines = content_lines(text);
    let n = parse_vertex_count(lines.next())?;

    let mut edges: Vec<MatchEdge> = Vec::new();
    for (number, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [u, v] => {
                let u = parse_token(u, number, "vertex")?;
                let v = parse_token(v, number, "vertex")?;
                edges.push((u, v));
            }
            _ => return Err(AlgorithmError::format(number, "expected 'u v'")),
        }
    }

    debug!("parsed matching input with {} vertices, {} edges", n, edges.len());
    Ok(MatchingInput { n, edges })
}
