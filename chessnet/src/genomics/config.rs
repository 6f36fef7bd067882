use crate::genomics::Topology;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Chance of a single neuron being re-randomized
/// during a mutating crossover.
pub const DEFAULT_NEURON_MUTATION_CHANCE: f64 = 1.0 / 166.0;

/// Divisor applied to the neuron count when drawing the
/// vertical offset of a crossover boundary.
pub const DEFAULT_BOUNDARY_OFFSET_DIVISOR: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(divisor) => divisor,
    None => unreachable!(),
};

/// Configuration data for genome generation
/// and inter-genome operations.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Values
/// outside of it saturate: anything ≤0.0 never
/// triggers, anything ≥1.0 always does.
///
/// Fields missing during deserialization
/// take their [`Default`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Number of inputs in a genome.
    pub input_count: NonZeroUsize,
    /// Number of outputs in a genome.
    pub output_count: NonZeroUsize,
    /// Number of hidden layers in a genome.
    pub hidden_layer_count: usize,
    /// Number of neurons in every layer of a genome.
    pub neurons_per_layer: NonZeroUsize,
    /// Chance of a neuron's incoming weights being replaced
    /// by fresh random values during a mutating crossover.
    pub neuron_mutation_chance: f64,
    /// Bounds the vertical offset of crossover boundaries to
    /// `neurons_per_layer / boundary_offset_divisor`, keeping
    /// the boundary's slope shallow relative to the grid.
    pub boundary_offset_divisor: NonZeroUsize,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::GeneticConfig;
    ///
    /// let cfg1 = GeneticConfig::zero();
    ///
    /// let cfg2 = GeneticConfig {
    ///     // Specify some values here...
    ///     hidden_layer_count: 3,
    ///     neuron_mutation_chance: 0.01,
    ///     // Default the rest...
    ///     ..GeneticConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::MIN,
            output_count: NonZeroUsize::MIN,
            hidden_layer_count: 0,
            neurons_per_layer: NonZeroUsize::MIN,
            neuron_mutation_chance: 0.0,
            boundary_offset_divisor: NonZeroUsize::MIN,
        }
    }

    /// Returns the network shape described by the configuration.
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::GeneticConfig;
    ///
    /// let config = GeneticConfig {
    ///     hidden_layer_count: 2,
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// assert_eq!(config.topology().weight_layer_count(), 3);
    /// ```
    pub fn topology(&self) -> Topology {
        Topology::from_counts(
            self.input_count,
            self.output_count,
            self.hidden_layer_count,
            self.neurons_per_layer,
        )
    }
}

impl Default for GeneticConfig {
    /// The smallest topology, with the standard
    /// mutation chance and boundary divisor.
    fn default() -> GeneticConfig {
        GeneticConfig {
            neuron_mutation_chance: DEFAULT_NEURON_MUTATION_CHANCE,
            boundary_offset_divisor: DEFAULT_BOUNDARY_OFFSET_DIVISOR,
            ..GeneticConfig::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_standard_crossover_parameters() {
        let config = GeneticConfig::default();
        assert_eq!(config.neuron_mutation_chance, 1.0 / 166.0);
        assert_eq!(config.boundary_offset_divisor.get(), 5);
        assert_eq!(config.topology(), GeneticConfig::zero().topology());
    }

    #[test]
    fn serde_roundtrip() {
        let config = GeneticConfig {
            hidden_layer_count: 4,
            neurons_per_layer: NonZeroUsize::new(12).unwrap(),
            ..GeneticConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<GeneticConfig>(&json).unwrap(), config);
    }
}
