//! Minimal workflow orchestrator: named async steps connected by fixed or
//! state-dependent edges, executed sequentially from START to END.

mod state_graph;

pub use state_graph::{StateGraph, END, START};
