//! Reading results back out of a solved [`FlowGraph`].

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::flow::graph::{EdgeId, FlowGraph, VertexId};
use crate::flow::FlowNum;

/// Flow routed along `edge` (`capacity - residual_capacity`).
pub fn flow_on_edge<T: FlowNum>(graph: &FlowGraph<T>, edge: EdgeId) -> Result<T> {
    graph.flow_on_edge(edge)
}

/// Net flow leaving `vertex`: outgoing flow minus incoming flow.
///
/// Equals the max-flow value at the source and its negation at the sink.
pub fn flow_value<T: FlowNum>(graph: &FlowGraph<T>, vertex: VertexId) -> Result<T> {
    // Reverse arcs leaving `vertex` report the negated flow of the edges
    // entering it, so one pass over the adjacency list covers both sides.
    Ok(graph
        .out_edges(vertex)?
        .map(|edge| graph.arc(edge).flow())
        .fold(T::zero(), |acc, flow| acc + flow))
}

/// Total cost of the current flow: sum of `cost * flow` over forward edges.
pub fn flow_cost<T: FlowNum>(graph: &FlowGraph<T>) -> T {
    graph
        .edges()
        .map(|edge| {
            let arc = graph.arc(edge);
            arc.cost() * arc.flow()
        })
        .fold(T::zero(), |acc, cost| acc + cost)
}

/// Source side of a minimum cut and the edges leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut {
    /// `source_side[v]` is true when `v` is reachable from the source in the
    /// residual graph.
    pub source_side: Vec<bool>,
    /// Forward edges from the source side to the sink side, all saturated.
    pub cut_edges: Vec<EdgeId>,
}

impl MinCut {
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.source_side.get(vertex).copied().unwrap_or(false)
    }

    /// Sum of the capacities of the cut edges.
    pub fn capacity<T: FlowNum>(&self, graph: &FlowGraph<T>) -> T {
        self.cut_edges
            .iter()
            .map(|&edge| graph.arc(edge).capacity())
            .fold(T::zero(), |acc, capacity| acc + capacity)
    }
}

/// Minimum cut induced by the flow currently stored in `graph`.
///
/// Meaningful after [`max_flow`](crate::flow::max_flow) or
/// [`min_cost_max_flow`](crate::flow::min_cost_max_flow): the vertices
/// reachable from `source` through arcs with positive residual capacity form
/// the source side, and the cut capacity equals the flow value.
pub fn min_cut<T: FlowNum>(graph: &FlowGraph<T>, source: VertexId) -> Result<MinCut> {
    graph.check_vertex(source)?;

    let mut source_side = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::new();
    source_side[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for &edge in graph.arcs(u) {
            let arc = graph.arc(edge);
            if arc.residual_capacity() > T::zero() && !source_side[arc.to()] {
                source_side[arc.to()] = true;
                queue.push_back(arc.to());
            }
        }
    }

    let cut_edges = graph
        .edges()
        .filter(|&edge| {
            let arc = graph.arc(edge);
            source_side[arc.from()] && !source_side[arc.to()]
        })
        .collect();

    Ok(MinCut {
        source_side,
        cut_edges,
    })
}

/// Checks that the stored flow respects every capacity and is conserved at
/// every vertex except `source` and `sink`.
///
/// # Errors
/// * `InvalidFlow` describing the first violation found
/// * `InvalidVertex` / `SameSourceAndSink` for bad terminals
pub fn check_flow<T: FlowNum>(
    graph: &FlowGraph<T>,
    source: VertexId,
    sink: VertexId,
) -> Result<()> {
    graph.check_terminals(source, sink)?;

    for edge in graph.edges() {
        let arc = graph.arc(edge);
        let flow = arc.flow();
        if flow < T::zero() || flow > arc.capacity() {
            return Err(Error::invalid_flow(format!(
                "edge {} ({} -> {}) carries {} outside [0, {}]",
                edge.index(),
                arc.from(),
                arc.to(),
                flow,
                arc.capacity()
            )));
        }
    }

    for vertex in 0..graph.vertex_count() {
        if vertex == source || vertex == sink {
            continue;
        }
        let net = flow_value(graph, vertex)?;
        if net != T::zero() {
            return Err(Error::invalid_flow(format!(
                "vertex {} has net outflow {}",
                vertex, net
            )));
        }
    }
    Ok(())
}
