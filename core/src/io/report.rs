//! Plain-text reports of engine results
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeMap;

use crate::algorithm::graph::matching::MatchingResult;
use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::algorithm::graph::mst::SpanningTree;
use crate::algorithm::path_finding::astar::{GridPath, Heuristic};
use crate::algorithm::path_finding::dijkstra::ShortestPath;
use crate::algorithm::traits::NodeId;
use crate::data_structures::grid::Coord;

fn join_vertices(path: &[NodeId]) -> String {
    path.iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn join_cells(path: &[Coord]) -> String {
    path.iter()
        .map(|(r, c)| format!("({},{})", r, c))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Source, sink, total flow and per-edge `flow / capacity`
pub fn flow_report(source: NodeId, sink: NodeId, result: &MaxFlowResult) -> String {
    let mut lines = vec![
        format!("Source: {}", source),
        format!("Sink: {}", sink),
        format!("Max flow: {:.2}", result.max_flow),
        "Edges (flow / capacity):".to_string(),
    ];
    lines.extend(result.edges.iter().map(|e| {
        format!("  {} -> {}: {:.2} / {:.2}", e.from, e.to, e.flow, e.capacity)
    }));
    if !result.min_cut.is_empty() {
        lines.push(format!("Min cut (source side): {:?}", result.min_cut));
    }
    lines.join("\n")
}

/// One block per heuristic with length, path, visited cells and runtime
pub fn path_report(start: Coord, goal: Coord, results: &BTreeMap<Heuristic, GridPath>) -> String {
    let mut lines = vec![
        format!("Start: ({}, {})", start.0, start.1),
        format!("Goal: ({}, {})", goal.0, goal.1),
    ];

    for (heuristic, result) in results {
        lines.push(String::new());
        lines.push(format!("A* ({}):", heuristic));
        if result.is_found() {
            lines.push(format!("  Path length: {:.2}", result.length));
            lines.push(format!("  Path: {}", join_cells(&result.path)));
        } else {
            lines.push("  No path found".to_string());
        }
        lines.push(format!(
            "  Visited: {:.2}% ({} cells)",
            result.visited_percent, result.visited_count
        ));
        lines.push(format!("  Runtime: {:.6} s", result.runtime.as_secs_f64()));
    }

    lines.join("\n")
}

/// Bipartite flag, sizes and matched pairs
pub fn matching_report(vertex_count: usize, edge_count: usize, result: &MatchingResult) -> String {
    if !result.is_bipartite {
        return "Bipartite: no".to_string();
    }

    let mut lines = vec![
        "Bipartite: yes".to_string(),
        format!("Vertices: {}", vertex_count),
        format!("Edges: {}", edge_count),
        format!("Maximum matching size: {}", result.size()),
        "Matching edges:".to_string(),
    ];
    lines.extend(result.matching.iter().map(|(u, v)| format!("  {} - {}", u, v)));
    lines.join("\n")
}

/// Distance and vertex sequence of a single-target search
pub fn shortest_path_report(start: NodeId, end: NodeId, result: &ShortestPath) -> String {
    let header = format!("Shortest path {} -> {}:", start, end);
    let body = match result.distance {
        None => "  Vertex out of range".to_string(),
        Some(_) if !result.is_reachable() => "  No path exists".to_string(),
        Some(distance) => format!(
            "  Distance: {:.2}\n  Path: {}",
            distance,
            join_vertices(&result.path)
        ),
    };
    format!("{}\n{}", header, body)
}

/// Numbered tree edges and the total weight
pub fn spanning_tree_report(tree: &SpanningTree) -> String {
    if tree.is_empty() {
        return format!("No spanning tree from vertex {}", tree.root);
    }

    let mut lines = vec![format!("Minimum spanning tree from vertex {}:", tree.root)];
    lines.extend(tree.edges.iter().enumerate().map(|(i, e)| {
        format!("  {}. {} - {}: {:.2}", i + 1, e.parent, e.child, e.weight)
    }));
    lines.push(format!("Total weight: {:.2}", tree.total_weight));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::FlowEdge;
    use crate::algorithm::graph::mst::MstEdge;
    use std::time::Duration;

    #[test]
    fn test_flow_report() {
        let result = MaxFlowResult {
            max_flow: 1.5,
            edges: vec![FlowEdge {
                from: 0,
                to: 1,
                capacity: 2.0,
                flow: 1.5,
            }],
            min_cut: Vec::new(),
            augmenting_paths: 1,
        };
        assert_eq!(
            flow_report(0, 1, &result),
            "Source: 0\nSink: 1\nMax flow: 1.50\nEdges (flow / capacity):\n  0 -> 1: 1.50 / 2.00"
        );
    }

    #[test]
    fn test_path_report_with_and_without_path() {
        let found = GridPath {
            length: 2.0,
            path: vec![(0, 0), (0, 1), (1, 1)],
            visited_count: 3,
            visited_percent: 75.0,
            runtime: Duration::from_micros(5),
        };
        let missing = GridPath {
            length: f64::INFINITY,
            path: Vec::new(),
            visited_count: 0,
            visited_percent: 0.0,
            runtime: Duration::ZERO,
        };
        let results = BTreeMap::from([(Heuristic::Manhattan, found), (Heuristic::Euclidean, missing)]);
        let report = path_report((0, 0), (1, 1), &results);

        assert!(report.starts_with("Start: (0, 0)\nGoal: (1, 1)\n\nA* (manhattan):"));
        assert!(report.contains("  Path: (0,0) -> (0,1) -> (1,1)"));
        assert!(report.contains("  Visited: 75.00% (3 cells)"));
        assert!(report.contains("  Runtime: 0.000005 s"));
        assert!(report.contains("A* (euclidean):\n  No path found"));
    }

    #[test]
    fn test_matching_report() {
        let result = MatchingResult {
            is_bipartite: true,
            matching: vec![(0, 1), (2, 3)],
        };
        assert_eq!(
            matching_report(4, 4, &result),
            "Bipartite: yes\nVertices: 4\nEdges: 4\nMaximum matching size: 2\nMatching edges:\n  0 - 1\n  2 - 3"
        );

        let odd = MatchingResult {
            is_bipartite: false,
            matching: Vec::new(),
        };
        assert_eq!(matching_report(3, 3, &odd), "Bipartite: no");
    }

    #[test]
    fn test_shortest_path_report_sentinels() {
        assert!(shortest_path_report(0, 9, &ShortestPath::out_of_range()).contains("out of range"));
        assert!(shortest_path_report(0, 1, &ShortestPath::unreachable()).contains("No path"));

        let found = ShortestPath {
            distance: Some(3.0),
            path: vec![0, 1, 2],
        };
        assert_eq!(
            shortest_path_report(0, 2, &found),
            "Shortest path 0 -> 2:\n  Distance: 3.00\n  Path: 0 -> 1 -> 2"
        );
    }

    #[test]
    fn test_spanning_tree_report() {
        let tree = SpanningTree {
            root: 0,
            parent: vec![None, Some(0)],
            edges: vec![MstEdge {
                parent: 0,
                child: 1,
                weight: 2.0,
            }],
            total_weight: 2.0,
        };
        assert_eq!(
            spanning_tree_report(&tree),
            "Minimum spanning tree from vertex 0:\n  1. 0 - 1: 2.00\nTotal weight: 2.00"
        );
    }
}
