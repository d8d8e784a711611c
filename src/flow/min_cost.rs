use log::{debug, trace, warn};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::flow::graph::{EdgeId, FlowGraph, VertexId};
use crate::flow::{FlowConfig, FlowNum};

/// Routes as much flow as possible from `source` to `sink` at minimum total
/// cost. Returns `(flow, cost)`.
///
/// See [`min_cost_flow_with`].
pub fn min_cost_max_flow<T: FlowNum>(
    graph: &mut FlowGraph<T>,
    source: VertexId,
    sink: VertexId,
) -> Result<(T, T)> {
    min_cost_flow_with(graph, source, sink, None, &FlowConfig::default())
}

/// Like [`min_cost_max_flow`], but stops once `limit` units are routed.
pub fn min_cost_flow<T: FlowNum>(
    graph: &mut FlowGraph<T>,
    source: VertexId,
    sink: VertexId,
    limit: Option<T>,
) -> Result<(T, T)> {
    min_cost_flow_with(graph, source, sink, limit, &FlowConfig::default())
}

/// Computes a minimum-cost flow with successive shortest augmenting paths.
///
/// Each round runs Dijkstra on reduced costs `cost(u, v) + p(u) - p(v)`,
/// augments along the cheapest residual path by its bottleneck and folds the
/// distances into the potentials `p`. When some edge starts with a negative
/// cost the potentials are seeded by Bellman-Ford, so negative edge costs are
/// allowed as long as no negative-cost cycle exists.
///
/// Any flow left over from a previous run is discarded first, so the graph
/// can be re-solved after [`FlowGraph::set_capacity`].
///
/// # Arguments
/// * `graph` - The flow network; only residual capacities are modified
/// * `source` - Vertex the flow leaves from
/// * `sink` - Vertex the flow arrives at
/// * `limit` - Upper bound on the routed flow, `None` for maximum flow
/// * `config` - Whether negative-cost cycles are detected
///
/// # Returns
/// * `Ok((flow, cost))` - Routed flow value and its total cost
/// * `Err(Error)` - On invalid terminals, a negative `limit`, or a negative-cost
///   cycle when `config.check_negative_cycles` is set
///
/// With `check_negative_cycles` off and a negative cycle present the call
/// still returns, but the reported cost need not be minimal.
///
/// # Complexity
/// * Time: O(F (E log V)) plus O(VE) for the initial potentials
/// * Space: O(V + E)
///
/// # Examples
/// ```
/// use flownet::{min_cost_max_flow, FlowGraph};
///
/// let mut graph: FlowGraph<i64> = FlowGraph::new(4);
/// graph.add_edge_with_cost(0, 1, 1, 1).unwrap();
/// graph.add_edge_with_cost(1, 3, 1, 0).unwrap();
/// graph.add_edge_with_cost(0, 2, 1, 10).unwrap();
/// graph.add_edge_with_cost(2, 3, 1, 0).unwrap();
///
/// assert_eq!(min_cost_max_flow(&mut graph, 0, 3).unwrap(), (2, 11));
/// ```
pub fn min_cost_flow_with<T: FlowNum>(
    graph: &mut FlowGraph<T>,
    source: VertexId,
    sink: VertexId,
    limit: Option<T>,
    config: &FlowConfig,
) -> Result<(T, T)> {
    graph.check_terminals(source, sink)?;
    if limit.is_some_and(|limit| limit < T::zero()) {
        return Err(Error::NegativeCapacity);
    }
    graph.reset_flow();

    let n = graph.vertex_count();
    let mut potential = initial_potentials(graph, config)?;
    let mut distance: Vec<Option<T>> = vec![None; n];
    let mut parent: Vec<Option<EdgeId>> = vec![None; n];

    let mut flow = T::zero();
    let mut cost = T::zero();
    let mut augmentations = 0usize;

    loop {
        let remaining = match limit {
            Some(limit) if flow >= limit => break,
            Some(limit) => limit - flow,
            None => T::max_value(),
        };

        shortest_paths(graph, source, &potential, &mut distance, &mut parent);
        if distance[sink].is_none() {
            break;
        }
        for (p, d) in potential.iter_mut().zip(&distance) {
            if let Some(d) = *d {
                *p = *p + d;
            }
        }

        let mut amount = remaining;
        let mut path_cost = T::zero();
        let mut v = sink;
        while let Some(edge) = parent[v] {
            let arc = graph.arc(edge);
            amount = amount.min(arc.residual_capacity());
            path_cost = path_cost + arc.cost();
            v = arc.from();
        }

        let mut v = sink;
        while let Some(edge) = parent[v] {
            graph.push(edge, amount);
            v = graph.arc(edge).from();
        }

        flow = flow + amount;
        cost = cost + amount * path_cost;
        augmentations += 1;
        trace!(
            "augmentation {}: {} units at unit cost {}",
            augmentations,
            amount,
            path_cost
        );
    }

    debug!(
        "successive shortest paths: flow {} at cost {} from {} to {} ({} augmentations)",
        flow, cost, source, sink, augmentations
    );
    Ok((flow, cost))
}

/// Potentials making every residual reduced cost non-negative. All zero when
/// no residual arc has a negative cost, otherwise Bellman-Ford from a virtual
/// root joined to every vertex.
fn initial_potentials<T: FlowNum>(
    graph: &FlowGraph<T>,
    config: &FlowConfig,
) -> Result<Vec<T>> {
    let n = graph.vertex_count();
    let mut potential = vec![T::zero(); n];

    let has_negative = graph.edges().any(|edge| {
        let arc = graph.arc(edge);
        arc.cost() < T::zero() && arc.residual_capacity() > T::zero()
    });
    if !has_negative {
        return Ok(potential);
    }

    for _ in 0..n {
        let mut changed = false;
        for u in 0..n {
            for &edge in graph.arcs(u) {
                let arc = graph.arc(edge);
                if arc.residual_capacity() <= T::zero() {
                    continue;
                }
                let candidate = potential[u] + arc.cost();
                if candidate < potential[arc.to()] {
                    potential[arc.to()] = candidate;
                    changed = true;
                }
            }
        }
        if !changed {
            return Ok(potential);
        }
    }

    if config.check_negative_cycles {
        return Err(Error::NegativeCostCycle);
    }
    warn!("negative-cost cycle in residual graph; min-cost flow result is unreliable");
    Ok(potential)
}

/// Dijkstra over reduced costs. `distance[v]` is `None` for vertices with no
/// residual path from `source`; `parent[v]` is the last arc of the path and
/// always leaves a vertex settled before `v`.
fn shortest_paths<T: FlowNum>(
    graph: &FlowGraph<T>,
    source: VertexId,
    potential: &[T],
    distance: &mut [Option<T>],
    parent: &mut [Option<EdgeId>],
) {
    distance.fill(None);
    parent.fill(None);
    distance[source] = Some(T::zero());

    // Each vertex is settled once, so the search terminates even when
    // unchecked negative cycles leave some reduced costs negative.
    let mut settled = vec![false; distance.len()];
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((T::zero(), source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if settled[u] || distance[u].is_some_and(|best| d > best) {
            continue;
        }
        settled[u] = true;
        for &edge in graph.arcs(u) {
            let arc = graph.arc(edge);
            let v = arc.to();
            if settled[v] || arc.residual_capacity() <= T::zero() {
                continue;
            }
            let candidate = d + arc.cost() + potential[u] - potential[v];
            if distance[v].map_or(true, |best| candidate < best) {
                distance[v] = Some(candidate);
                parent[v] = Some(edge);
                heap.push(Reverse((candidate, v)));
            }
        }
    }
}
