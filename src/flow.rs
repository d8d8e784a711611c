pub mod extract;
pub mod graph;
pub mod min_cost;
pub mod push_relabel;


use num_traits::{PrimInt, Signed};
use std::fmt::{Debug, Display};

pub use extract::{check_flow, flow_cost, flow_on_edge, flow_value, min_cut, MinCut};
pub use graph::{Edge, EdgeId, FlowGraph, VertexId};
pub use min_cost::{min_cost_flow, min_cost_flow_with, min_cost_max_flow};
pub use push_relabel::{max_flow, max_flow_with};

/// Integer type used for capacities, flows and costs.
///
/// Arithmetic is not widened automatically: pick a type large enough for
/// the sum of all capacities and for `cost * flow` totals.
pub trait FlowNum: PrimInt + Signed + Debug + Display {}

impl<T> FlowNum for T where T: PrimInt + Signed + Debug + Display {}

/// Tuning options shared by the flow algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Push-relabel recomputes exact distance labels after
    /// `global_relabel_frequency * vertex_count` relabel operations.
    /// Zero keeps only the initial global relabel.
    pub global_relabel_frequency: usize,
    /// Min-cost flow rejects graphs whose initial residual graph has a
    /// negative-cost cycle.
    pub check_negative_cycles: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            global_relabel_frequency: 4,
            check_negative_cycles: true,
        }
    }
}
