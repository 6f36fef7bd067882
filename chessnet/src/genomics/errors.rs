use crate::genomics::Topology;

use thiserror::Error;

/// Errors raised while building or breeding genomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    /// The parents of a crossover do not share a topology.
    #[error("cannot breed genomes of differing topologies {first} and {second}")]
    TopologyMismatch {
        /// Topology of the first parent.
        first: Topology,
        /// Topology of the second parent.
        second: Topology,
    },
    /// A layer or neuron count was zero.
    #[error("invalid topology: {0}")]
    InvalidTopology(&'static str),
    /// Weight or bias arrays disagree with the declared topology.
    #[error("malformed genome shape: {0}")]
    MalformedShape(String),
}
