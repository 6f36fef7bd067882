use crate::genomics::GenomeError;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::NonZeroUsize;

/// The shape of a genome's network: input and
/// output counts, number of hidden layers, and the
/// (uniform) number of neurons in each layer.
///
/// Two genomes can only be bred if their
/// topologies are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    input_count: NonZeroUsize,
    output_count: NonZeroUsize,
    hidden_layer_count: usize,
    neurons_per_layer: NonZeroUsize,
}

impl Topology {
    /// Returns a new topology, or an [`InvalidTopology`]
    /// error if any of `inputs`, `outputs` or
    /// `neurons_per_layer` is zero.
    ///
    /// [`InvalidTopology`]: crate::genomics::GenomeError::InvalidTopology
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::Topology;
    ///
    /// let topology = Topology::new(3, 2, 1, 4).unwrap();
    /// assert_eq!(topology.weight_layer_count(), 2);
    ///
    /// assert!(Topology::new(3, 0, 1, 4).is_err());
    /// ```
    pub fn new(
        inputs: usize,
        outputs: usize,
        hidden_layers: usize,
        neurons_per_layer: usize,
    ) -> Result<Topology, GenomeError> {
        let input_count = NonZeroUsize::new(inputs)
            .ok_or(GenomeError::InvalidTopology("input count must be positive"))?;
        let output_count = NonZeroUsize::new(outputs)
            .ok_or(GenomeError::InvalidTopology("output count must be positive"))?;
        let neurons_per_layer = NonZeroUsize::new(neurons_per_layer).ok_or(
            GenomeError::InvalidTopology("neurons per layer must be positive"),
        )?;
        Ok(Self::from_counts(
            input_count,
            output_count,
            hidden_layers,
            neurons_per_layer,
        ))
    }

    /// Infallible constructor for counts already known to be positive.
    pub fn from_counts(
        input_count: NonZeroUsize,
        output_count: NonZeroUsize,
        hidden_layer_count: usize,
        neurons_per_layer: NonZeroUsize,
    ) -> Topology {
        Topology {
            input_count,
            output_count,
            hidden_layer_count,
            neurons_per_layer,
        }
    }

    pub fn input_count(&self) -> NonZeroUsize {
        self.input_count
    }

    pub fn output_count(&self) -> NonZeroUsize {
        self.output_count
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.hidden_layer_count
    }

    pub fn neurons_per_layer(&self) -> NonZeroUsize {
        self.neurons_per_layer
    }

    /// Number of weight layers, one more than the hidden
    /// layer count: the last one feeds the output layer.
    pub fn weight_layer_count(&self) -> usize {
        self.hidden_layer_count + 1
    }

    /// Number of bias layers, which also cover the output layer.
    pub fn bias_layer_count(&self) -> usize {
        self.hidden_layer_count + 2
    }

    /// Number of incoming connections of each neuron in
    /// weight layer `layer`.
    ///
    /// The first layer takes precedence over the last
    /// when the network has no hidden layers.
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::Topology;
    ///
    /// let topology = Topology::new(3, 2, 2, 4).unwrap();
    /// assert_eq!(topology.connection_count(0), 3);
    /// assert_eq!(topology.connection_count(1), 4);
    /// assert_eq!(topology.connection_count(2), 2);
    /// ```
    pub fn connection_count(&self, layer: usize) -> usize {
        if layer == 0 {
            self.input_count.get()
        } else if layer == self.hidden_layer_count {
            self.output_count.get()
        } else {
            self.neurons_per_layer.get()
        }
    }

    /// Checks whether genomes of both topologies can be bred.
    pub fn is_breed_compatible(&self, other: &Topology) -> bool {
        self == other
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} in, {} out, {}x{} hidden]",
            self.input_count, self.output_count, self.hidden_layer_count, self.neurons_per_layer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_counts() {
        assert_eq!(
            Topology::new(0, 1, 1, 1),
            Err(GenomeError::InvalidTopology("input count must be positive"))
        );
        assert_eq!(
            Topology::new(1, 0, 1, 1),
            Err(GenomeError::InvalidTopology("output count must be positive"))
        );
        assert_eq!(
            Topology::new(1, 1, 1, 0),
            Err(GenomeError::InvalidTopology("neurons per layer must be positive"))
        );
        assert!(Topology::new(1, 1, 0, 1).is_ok());
    }

    #[test]
    fn connection_counts() {
        let topology = Topology::new(7, 3, 4, 5).unwrap();
        let widths: Vec<usize> = (0..topology.weight_layer_count())
            .map(|l| topology.connection_count(l))
            .collect();
        assert_eq!(widths, vec![7, 5, 5, 5, 3]);
        assert_eq!(topology.bias_layer_count(), 6);
    }

    #[test]
    fn single_layer_uses_input_width() {
        let topology = Topology::new(7, 3, 0, 5).unwrap();
        assert_eq!(topology.weight_layer_count(), 1);
        assert_eq!(topology.connection_count(0), 7);
    }

    #[test]
    fn breed_compatibility() {
        let a = Topology::new(3, 2, 4, 8).unwrap();
        assert!(a.is_breed_compatible(&Topology::new(3, 2, 4, 8).unwrap()));
        assert!(!a.is_breed_compatible(&Topology::new(3, 2, 5, 8).unwrap()));
        assert!(!a.is_breed_compatible(&Topology::new(3, 2, 4, 9).unwrap()));
        assert!(!a.is_breed_compatible(&Topology::new(4, 2, 4, 8).unwrap()));
        assert!(!a.is_breed_compatible(&Topology::new(3, 1, 4, 8).unwrap()));
    }
}
