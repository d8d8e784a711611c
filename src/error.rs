use thiserror::Error;

/// Errors raised while building a flow network or running a flow algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("vertex {vertex} is out of range (graph has {vertex_count} vertices)")]
    InvalidVertex { vertex: usize, vertex_count: usize },

    #[error("edge {edge} is out of range (graph has {edge_count} edges)")]
    InvalidEdge { edge: usize, edge_count: usize },

    #[error("edge capacity must be non-negative")]
    NegativeCapacity,

    #[error("source and sink are the same vertex ({0})")]
    SameSourceAndSink(usize),

    #[error("residual graph contains a negative-cost cycle")]
    NegativeCostCycle,

    #[error("invalid flow: {0}")]
    InvalidFlow(String),
}

impl Error {
    pub fn invalid_flow<S: Into<String>>(msg: S) -> Self {
        Error::InvalidFlow(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidVertex {
            vertex: 7,
            vertex_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "vertex 7 is out of range (graph has 3 vertices)"
        );
        assert_eq!(
            Error::invalid_flow("edge 0 over capacity").to_string(),
            "invalid flow: edge 0 over capacity"
        );
    }
}
