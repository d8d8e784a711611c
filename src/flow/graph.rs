use crate::error::{Error, Result};
use crate::flow::FlowNum;

/// Vertices are dense indices in `[0, vertex_count)`.
pub type VertexId = usize;

/// Handle to an arc in a [`FlowGraph`].
///
/// Forward arcs and their reverse companions share one arena; the forward
/// arc of the `k`-th [`FlowGraph::add_edge`] call has index `2k` and its
/// reverse `2k + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn new(index: usize) -> Self {
        EdgeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed arc with its residual state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<T> {
    from: VertexId,
    to: VertexId,
    capacity: T,
    residual: T,
    cost: T,
    reverse: EdgeId,
    is_reverse: bool,
}

impl<T: FlowNum> Edge<T> {
    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Capacity fixed at creation (zero for reverse arcs).
    pub fn capacity(&self) -> T {
        self.capacity
    }

    pub fn residual_capacity(&self) -> T {
        self.residual
    }

    pub fn cost(&self) -> T {
        self.cost
    }

    /// The paired arc running the opposite way.
    pub fn reverse(&self) -> EdgeId {
        self.reverse
    }

    pub fn is_reverse(&self) -> bool {
        self.is_reverse
    }

    /// Flow currently routed along the arc. Reverse arcs report the
    /// negated flow of their forward companion.
    pub fn flow(&self) -> T {
        self.capacity - self.residual
    }
}

/// Directed capacitated graph where every edge carries a reverse arc used
/// for flow cancellation.
///
/// # Examples
/// ```
/// use flownet::{max_flow, FlowGraph};
///
/// let mut graph: FlowGraph<i64> = FlowGraph::new(2);
/// let edge = graph.add_edge(0, 1, 5).unwrap();
///
/// assert_eq!(max_flow(&mut graph, 0, 1).unwrap(), 5);
/// assert_eq!(graph.flow_on_edge(edge).unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct FlowGraph<T> {
    adjacency: Vec<Vec<EdgeId>>,
    edges: Vec<Edge<T>>,
}

impl<T: FlowNum> Default for FlowGraph<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: FlowNum> FlowGraph<T> {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        FlowGraph {
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        }
    }

    /// Appends a vertex and returns its identifier.
    pub fn add_vertex(&mut self) -> VertexId {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges added by the caller, not counting reverse arcs.
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Adds an edge `from -> to` with zero cost.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, capacity: T) -> Result<EdgeId> {
        self.add_edge_with_cost(from, to, capacity, T::zero())
    }

    /// Adds an edge `from -> to` together with its reverse arc
    /// `to -> from` (capacity zero, cost `-cost`) and returns the handle of
    /// the forward edge.
    ///
    /// Repeated calls between the same pair create independent parallel
    /// edges.
    ///
    /// # Errors
    /// * `InvalidVertex` if either endpoint is out of range
    /// * `NegativeCapacity` if `capacity < 0`
    pub fn add_edge_with_cost(
        &mut self,
        from: VertexId,
        to: VertexId,
        capacity: T,
        cost: T,
    ) -> Result<EdgeId> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if capacity < T::zero() {
            return Err(Error::NegativeCapacity);
        }

        let forward = EdgeId(self.edges.len());
        let backward = EdgeId(self.edges.len() + 1);
        self.edges.push(Edge {
            from,
            to,
            capacity,
            residual: capacity,
            cost,
            reverse: backward,
            is_reverse: false,
        });
        self.edges.push(Edge {
            from: to,
            to: from,
            capacity: T::zero(),
            residual: T::zero(),
            cost: -cost,
            reverse: forward,
            is_reverse: true,
        });
        self.adjacency[from].push(forward);
        self.adjacency[to].push(backward);
        Ok(forward)
    }

    /// Replaces the capacity of a forward edge. The residual capacity is
    /// reset to match, so the next algorithm run starts from a clean state.
    pub fn set_capacity(&mut self, edge: EdgeId, capacity: T) -> Result<()> {
        self.check_edge(edge)?;
        if self.edges[edge.0].is_reverse {
            return Err(Error::InvalidEdge {
                edge: edge.0,
                edge_count: self.edges.len(),
            });
        }
        if capacity < T::zero() {
            return Err(Error::NegativeCapacity);
        }
        let reverse = self.edges[edge.0].reverse;
        self.edges[edge.0].capacity = capacity;
        self.edges[edge.0].residual = capacity;
        self.edges[reverse.0].residual = T::zero();
        Ok(())
    }

    /// Removes all flow: forward arcs regain their full capacity and
    /// reverse arcs drop back to zero.
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.residual = edge.capacity;
        }
    }

    pub fn edge(&self, edge: EdgeId) -> Result<&Edge<T>> {
        self.check_edge(edge)?;
        Ok(&self.edges[edge.0])
    }

    pub fn reverse(&self, edge: EdgeId) -> Result<EdgeId> {
        Ok(self.edge(edge)?.reverse)
    }

    /// Flow routed along `edge`, i.e. `capacity - residual_capacity`.
    pub fn flow_on_edge(&self, edge: EdgeId) -> Result<T> {
        Ok(self.edge(edge)?.flow())
    }

    /// Forward edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).step_by(2).map(EdgeId)
    }

    /// All residual arcs leaving `vertex`, reverse arcs included.
    pub fn out_edges(&self, vertex: VertexId) -> Result<impl Iterator<Item = EdgeId> + '_> {
        self.check_vertex(vertex)?;
        Ok(self.adjacency[vertex].iter().copied())
    }

    pub(crate) fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if vertex >= self.adjacency.len() {
            return Err(Error::InvalidVertex {
                vertex,
                vertex_count: self.adjacency.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_terminals(&self, source: VertexId, sink: VertexId) -> Result<()> {
        self.check_vertex(source)?;
        self.check_vertex(sink)?;
        if source == sink {
            return Err(Error::SameSourceAndSink(source));
        }
        Ok(())
    }

    fn check_edge(&self, edge: EdgeId) -> Result<()> {
        if edge.0 >= self.edges.len() {
            return Err(Error::InvalidEdge {
                edge: edge.0,
                edge_count: self.edges.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn arcs(&self, vertex: VertexId) -> &[EdgeId] {
        &self.adjacency[vertex]
    }

    pub(crate) fn arc(&self, edge: EdgeId) -> &Edge<T> {
        &self.edges[edge.0]
    }

    /// Moves `amount` units of flow along `edge`.
    pub(crate) fn push(&mut self, edge: EdgeId, amount: T) {
        let reverse = self.edges[edge.0].reverse;
        self.edges[edge.0].residual = self.edges[edge.0].residual - amount;
        self.edges[reverse.0].residual = self.edges[reverse.0].residual + amount;
    }
}
