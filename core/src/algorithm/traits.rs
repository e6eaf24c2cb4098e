//! Core algorithm trait definitions for the graphworks engines
//!
//! This module establishes the vocabulary shared by every engine: the vertex
//! index type, the error kinds surfaced at the library boundary, the string
//! parameter interface used to configure engines, and the profiler that
//! records per-run instrumentation.
//!
//! # Key Design Principles
//! - Engines never fail mid-algorithm: "no path", "no flow" and "no matching"
//!   are ordinary answers, and out-of-range inputs are sentinels
//! - Errors are raised only while parsing or validating input
//! - Each engine call owns its own working state
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Dense vertex index. Indices are contiguous (`0..n`) and shift down by one
/// when a lower vertex is removed from a [`Graph`](crate::data_structures::graph::Graph).
pub type NodeId = usize;

/// Comprehensive error types for the library boundary
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    /// Malformed textual input: missing header, wrong token count, non-numeric token
    #[error("Format error on line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Vertex {vertex} is out of range for a graph with {size} vertices")]
    VertexOutOfRange { vertex: NodeId, size: usize },

    /// Dijkstra and max flow require non-negative weights and capacities
    #[error("Edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("Coordinate ({row}, {col}) is outside the {rows}x{cols} grid")]
    CoordinateOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Coordinate ({row}, {col}) is a wall cell")]
    WallCell { row: usize, col: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlgorithmError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        AlgorithmError::Format {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_parameter(name: &str, valid: &str) -> Self {
        AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: format!("unknown parameter, valid parameters: {}", valid),
        }
    }
}

/// Result type for fallible graphworks operations
pub type AlgorithmResult<T> = Result<T, AlgorithmError>;

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

impl AlgorithmComplexity {
    pub fn new(time: &str, space: &str) -> Self {
        Self {
            time_complexity: time.to_string(),
            space_complexity: space.to_string(),
        }
    }
}

/// Main engine trait: identification plus the string parameter interface
///
/// Parameters are validated on `set_parameter`; an unknown name or an
/// unparsable value is rejected with [`AlgorithmError::InvalidParameter`]
/// and leaves the engine unchanged.
pub trait Algorithm: Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g. "path_finding", "graph")
    fn category(&self) -> &'static str;

    /// Returns a one-paragraph description of what the engine computes
    fn description(&self) -> &'static str;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Sets an algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> AlgorithmResult<()>;

    /// Gets an algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Returns every supported parameter with its current value
    fn parameters(&self) -> HashMap<String, String>;
}

/// Parses a `true`/`false` parameter value
pub(crate) fn parse_bool_parameter(name: &str, value: &str) -> AlgorithmResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: format!("invalid boolean value: {}. Use 'true' or 'false'", value),
        }),
    }
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    pub steps_executed: usize,
    pub nodes_explored: usize,
    pub execution_time: Duration,
}

/// Performance profiling for a single engine run
#[derive(Debug, Default)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the monotonic clock
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stops the clock and stores the elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_node_exploration(&mut self) {
        self.metrics.nodes_explored += 1;
    }

    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    pub fn metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}
