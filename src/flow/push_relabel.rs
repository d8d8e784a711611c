use log::debug;
use std::collections::VecDeque;

use crate::error::Result;
use crate::flow::graph::{FlowGraph, VertexId};
use crate::flow::{FlowConfig, FlowNum};

const UNLABELED: usize = usize::MAX;

/// Computes a maximum flow from `source` to `sink` with the default
/// [`FlowConfig`].
///
/// See [`max_flow_with`].
pub fn max_flow<T: FlowNum>(
    graph: &mut FlowGraph<T>,
    source: VertexId,
    sink: VertexId,
) -> Result<T> {
    max_flow_with(graph, source, sink, &FlowConfig::default())
}

/// Computes a maximum flow from `source` to `sink` using FIFO push-relabel
/// with periodic global relabeling.
///
/// Any flow left over from a previous run is discarded first. On return the
/// residual capacities describe a valid flow: every edge carries
/// `capacity - residual_capacity` units and all vertices other than
/// `source` and `sink` are balanced.
///
/// # Arguments
/// * `graph` - The flow network; only residual capacities are modified
/// * `source` - Vertex the flow leaves from
/// * `sink` - Vertex the flow arrives at
/// * `config` - Global relabel frequency
///
/// # Returns
/// * `Ok(value)` - Value of a maximum flow (zero when `sink` is unreachable)
/// * `Err(Error)` - If `source` or `sink` is out of range or they coincide
///
/// # Complexity
/// * Time: O(V³)
/// * Space: O(V + E)
pub fn max_flow_with<T: FlowNum>(
    graph: &mut FlowGraph<T>,
    source: VertexId,
    sink: VertexId,
    config: &FlowConfig,
) -> Result<T> {
    graph.check_terminals(source, sink)?;
    graph.reset_flow();

    let mut solver = PushRelabel::new(graph, source, sink, config);
    let value = solver.run();
    debug!(
        "push-relabel: flow {} from {} to {} ({} relabels, {} global relabels)",
        value, source, sink, solver.relabel_count, solver.global_relabel_count
    );
    Ok(value)
}

struct PushRelabel<'a, T> {
    graph: &'a mut FlowGraph<T>,
    source: VertexId,
    sink: VertexId,
    height: Vec<usize>,
    excess: Vec<T>,
    // Index of the next arc to inspect in each vertex's adjacency list.
    current: Vec<usize>,
    active: VecDeque<VertexId>,
    queued: Vec<bool>,
    relabel_interval: Option<usize>,
    relabels_since_global: usize,
    relabel_count: usize,
    global_relabel_count: usize,
}

impl<'a, T: FlowNum> PushRelabel<'a, T> {
    fn new(
        graph: &'a mut FlowGraph<T>,
        source: VertexId,
        sink: VertexId,
        config: &FlowConfig,
    ) -> Self {
        let n = graph.vertex_count();
        let relabel_interval = match config.global_relabel_frequency {
            0 => None,
            frequency => Some(frequency.saturating_mul(n)),
        };
        PushRelabel {
            graph,
            source,
            sink,
            height: vec![0; n],
            excess: vec![T::zero(); n],
            current: vec![0; n],
            active: VecDeque::new(),
            queued: vec![false; n],
            relabel_interval,
            relabels_since_global: 0,
            relabel_count: 0,
            global_relabel_count: 0,
        }
    }

    fn run(&mut self) -> T {
        // Saturate every arc leaving the source before the first labeling,
        // so no residual arc leaves it while its height is pinned at n.
        let source_arcs = self.graph.arcs(self.source).to_vec();
        for edge in source_arcs {
            let arc = self.graph.arc(edge);
            let (to, amount) = (arc.to(), arc.residual_capacity());
            if amount > T::zero() {
                self.graph.push(edge, amount);
                self.excess[self.source] = self.excess[self.source] - amount;
                self.excess[to] = self.excess[to] + amount;
                self.activate(to);
            }
        }
        self.global_relabel();

        while let Some(u) = self.active.pop_front() {
            self.queued[u] = false;
            self.discharge(u);

            if let Some(interval) = self.relabel_interval {
                if self.relabels_since_global >= interval {
                    self.global_relabel();
                }
            }
        }

        self.excess[self.sink]
    }

    /// Pushes excess out of `u` until it is balanced, relabeling whenever the
    /// current arc pointer runs off the end of the adjacency list.
    fn discharge(&mut self, u: VertexId) {
        while self.excess[u] > T::zero() {
            let arcs = self.graph.arcs(u);
            if self.current[u] == arcs.len() {
                self.relabel(u);
                continue;
            }

            let edge = arcs[self.current[u]];
            let arc = self.graph.arc(edge);
            let (v, residual) = (arc.to(), arc.residual_capacity());
            if residual > T::zero() && self.height[u] == self.height[v] + 1 {
                let amount = self.excess[u].min(residual);
                self.graph.push(edge, amount);
                self.excess[u] = self.excess[u] - amount;
                self.excess[v] = self.excess[v] + amount;
                self.activate(v);
            } else {
                self.current[u] += 1;
            }
        }
    }

    fn relabel(&mut self, u: VertexId) {
        let lowest = self
            .graph
            .arcs(u)
            .iter()
            .map(|&edge| self.graph.arc(edge))
            .filter(|arc| arc.residual_capacity() > T::zero())
            .map(|arc| self.height[arc.to()])
            .min()
            .unwrap_or(2 * self.height.len());

        self.height[u] = lowest + 1;
        self.current[u] = 0;
        self.relabel_count += 1;
        self.relabels_since_global += 1;
    }

    fn activate(&mut self, v: VertexId) {
        if v != self.source && v != self.sink && !self.queued[v] {
            self.queued[v] = true;
            self.active.push_back(v);
        }
    }

    /// Resets every height to the exact residual distance to the sink, or to
    /// `n` plus the residual distance to the source for vertices that can no
    /// longer reach the sink.
    fn global_relabel(&mut self) {
        let n = self.height.len();
        self.height.fill(UNLABELED);
        self.height[self.sink] = 0;
        self.height[self.source] = n;

        self.label_from(self.sink);
        self.label_from(self.source);

        for height in &mut self.height {
            if *height == UNLABELED {
                *height = 2 * n;
            }
        }
        self.current.fill(0);
        self.relabels_since_global = 0;
        self.global_relabel_count += 1;
    }

    /// Backward BFS: labels every unlabeled vertex that has a residual path
    /// into `root`.
    fn label_from(&mut self, root: VertexId) {
        let mut queue = VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            for &edge in self.graph.arcs(u) {
                let arc = self.graph.arc(edge);
                let v = arc.to();
                if self.height[v] != UNLABELED {
                    continue;
                }
                if self.graph.arc(arc.reverse()).residual_capacity() > T::zero() {
                    self.height[v] = self.height[u] + 1;
                    queue.push_back(v);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_single_edge() {
        let mut graph: FlowGraph<i64> = FlowGraph::new(2);
        graph.add_edge(0, 1, 5).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 1).unwrap(), 5);
    }

    #[test]
    fn test_two_disjoint_paths() {
        // source -> A -> sink, source -> B -> sink
        let mut graph: FlowGraph<i64> = FlowGraph::new(4);
        graph.add_edge(0, 1, 3).unwrap();
        graph.add_edge(1, 3, 3).unwrap();
        graph.add_edge(0, 2, 3).unwrap();
        graph.add_edge(2, 3, 3).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 3).unwrap(), 6);
    }

    #[test]
    fn test_max_flow_complex() {
        let mut graph: FlowGraph<i32> = FlowGraph::new(6);
        graph.add_edge(0, 1, 16).unwrap();
        graph.add_edge(0, 2, 13).unwrap();
        graph.add_edge(1, 2, 10).unwrap();
        graph.add_edge(2, 1, 4).unwrap();
        graph.add_edge(1, 3, 12).unwrap();
        graph.add_edge(3, 2, 9).unwrap();
        graph.add_edge(2, 4, 14).unwrap();
        graph.add_edge(4, 3, 7).unwrap();
        graph.add_edge(3, 5, 20).unwrap();
        graph.add_edge(4, 5, 4).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 5).unwrap(), 23);
    }

    #[test]
    fn test_disconnected() {
        let mut graph: FlowGraph<i32> = FlowGraph::new(4);
        graph.add_edge(0, 1, 10).unwrap();
        graph.add_edge(2, 3, 5).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 3).unwrap(), 0);
        for edge in graph.edges().collect::<Vec<_>>() {
            assert_eq!(graph.flow_on_edge(edge).unwrap(), 0);
        }
    }

    #[test]
    fn test_excess_returns_to_source() {
        // The source can push 10 into vertex 1, but only 2 reach the sink.
        let mut graph: FlowGraph<i64> = FlowGraph::new(4);
        let a = graph.add_edge(0, 1, 10).unwrap();
        graph.add_edge(1, 2, 2).unwrap();
        graph.add_edge(2, 3, 8).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 3).unwrap(), 2);
        assert_eq!(graph.flow_on_edge(a).unwrap(), 2);
    }

    #[test]
    fn test_parallel_edges_add_up() {
        let mut graph: FlowGraph<i32> = FlowGraph::new(2);
        graph.add_edge(0, 1, 2).unwrap();
        graph.add_edge(0, 1, 3).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 1).unwrap(), 5);
    }

    #[test]
    fn test_rerun_starts_from_scratch() {
        let mut graph: FlowGraph<i32> = FlowGraph::new(3);
        graph.add_edge(0, 1, 4).unwrap();
        let control = graph.add_edge(1, 2, 4).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 2).unwrap(), 4);
        assert_eq!(max_flow(&mut graph, 0, 2).unwrap(), 4);

        graph.set_capacity(control, 1).unwrap();
        assert_eq!(max_flow(&mut graph, 0, 2).unwrap(), 1);
        assert_eq!(max_flow(&mut graph, 2, 0).unwrap(), 0);
    }

    #[test]
    fn test_without_periodic_global_relabel() {
        let config = FlowConfig {
            global_relabel_frequency: 0,
            ..FlowConfig::default()
        };
        let mut graph: FlowGraph<i64> = FlowGraph::new(5);
        graph.add_edge(0, 1, 10).unwrap();
        graph.add_edge(0, 2, 10).unwrap();
        graph.add_edge(1, 2, 2).unwrap();
        graph.add_edge(1, 3, 4).unwrap();
        graph.add_edge(2, 3, 9).unwrap();
        graph.add_edge(3, 4, 10).unwrap();
        assert_eq!(max_flow_with(&mut graph, 0, 4, &config).unwrap(), 10);
    }

    #[test]
    fn test_invalid_terminals() {
        let mut graph: FlowGraph<i32> = FlowGraph::new(2);
        graph.add_edge(0, 1, 1).unwrap();
        assert_eq!(
            max_flow(&mut graph, 0, 2),
            Err(Error::InvalidVertex {
                vertex: 2,
                vertex_count: 2
            })
        );
        assert_eq!(max_flow(&mut graph, 1, 1), Err(Error::SameSourceAndSink(1)));
    }
}
