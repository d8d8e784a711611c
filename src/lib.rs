pub mod error;
pub mod flow;

pub use error::{Error, Result};
pub use flow::{
    check_flow, flow_cost, flow_on_edge, flow_value, max_flow, max_flow_with, min_cost_flow,
    min_cost_flow_with, min_cost_max_flow, min_cut, Edge, EdgeId, FlowConfig, FlowGraph,
    FlowNum, MinCut, VertexId,
};
