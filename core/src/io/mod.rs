//! Text input parsing, range validation and report rendering
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod parse;
pub mod report;
pub mod validate;

pub use self::parse::{
    parse_flow_input, parse_graph, parse_grid, parse_matching_input, read_to_string, FlowInput,
    MatchingInput,
};
pub use self::report::{
    flow_report, matching_report, path_report, shortest_path_report, spanning_tree_report,
};
pub use self::validate::{
    validate_edges, validate_endpoints, validate_flow_input, validate_graph,
    validate_matching_input, validate_vertex, validate_weights,
};
