//! Spanning tree, network flow and bipartite matching engines
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod matching;
pub mod max_flow;
pub mod mst;

pub use self::matching::{
    check_bipartite, hopcroft_karp, solve_matching, Bipartition, HopcroftKarp, MatchingResult,
    Side,
};
pub use self::max_flow::{edmonds_karp, FlowEdge, FlowNetwork, MaxFlowResult, MaxFlowSolver};
pub use self::mst::{minimum_spanning_tree, MstEdge, Prim, SpanningTree};
