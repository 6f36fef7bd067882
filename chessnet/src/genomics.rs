//! Genomes are the focus of evolution.
//! They hold the weights and biases of a fixed-topology
//! feed-forward network, and are bred by recombining whole
//! neurons of two parents across a geometric boundary.

mod config;
mod crossover;
mod errors;
mod partition;
mod topology;

pub use config::{GeneticConfig, DEFAULT_BOUNDARY_OFFSET_DIVISOR, DEFAULT_NEURON_MUTATION_CHANCE};
pub use crossover::{breed, breed_with_boundary, CrossoverKind, NeuronIndex, Offspring};
pub use errors::GenomeError;
pub use partition::{Band, Boundary, BoundaryPoint, Parent, BOUNDARY_POINTS};
pub use topology::Topology;

use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};

use std::fmt;

/// The weights and biases of a feed-forward network.
///
/// Weights are indexed by `[layer][neuron][connection]`, for
/// `hidden_layer_count + 1` layers, the last of which feeds the
/// output layer. Biases are indexed by `[layer][neuron]`, for
/// `hidden_layer_count + 2` layers, including the output layer.
///
/// Supports Serde for convenient genome saving and loading.
/// Deserialized genomes are checked against their topology.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "GenomeParts")]
pub struct Genome {
    topology: Topology,
    weights: Vec<Vec<Vec<f64>>>,
    biases: Vec<Vec<f64>>,
}

/// Unchecked genome contents, as read by Serde.
#[derive(Deserialize)]
struct GenomeParts {
    topology: Topology,
    weights: Vec<Vec<Vec<f64>>>,
    biases: Vec<Vec<f64>>,
}

impl TryFrom<GenomeParts> for Genome {
    type Error = GenomeError;

    fn try_from(parts: GenomeParts) -> Result<Genome, GenomeError> {
        Genome::from_parts(parts.topology, parts.weights, parts.biases)
    }
}

impl Genome {
    /// Create a new random genome with the specified
    /// configuration's topology, using the thread-local rng.
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::{GeneticConfig, Genome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     hidden_layer_count: 2,
    ///     neurons_per_layer: NonZeroUsize::new(8).unwrap(),
    ///     ..GeneticConfig::default()
    /// };
    ///
    /// let genome = Genome::new(&config);
    /// assert!(genome.conforms_to(&config));
    /// ```
    pub fn new(config: &GeneticConfig) -> Genome {
        Self::random(&config.topology(), &mut thread_rng())
    }

    /// Allocates a genome of the given shape and fills every weight
    /// and bias with an independent uniform value in `[0, 1)`.
    ///
    /// Fails with [`InvalidTopology`] if `inputs`, `outputs`
    /// or `neurons_per_layer` is zero.
    ///
    /// [`InvalidTopology`]: crate::genomics::GenomeError::InvalidTopology
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::Genome;
    ///
    /// let genome = Genome::initialize(3, 2, 1, 4, &mut rand::thread_rng()).unwrap();
    ///
    /// assert_eq!(genome.weights().len(), 2);
    /// assert_eq!(genome.weight_row(0, 0).unwrap().len(), 3);
    /// assert_eq!(genome.weight_row(1, 0).unwrap().len(), 2);
    /// assert_eq!(genome.biases().len(), 3);
    /// ```
    pub fn initialize<R: Rng + ?Sized>(
        inputs: usize,
        outputs: usize,
        hidden_layers: usize,
        neurons_per_layer: usize,
        rng: &mut R,
    ) -> Result<Genome, GenomeError> {
        let topology = Topology::new(inputs, outputs, hidden_layers, neurons_per_layer)?;
        Ok(Self::random(&topology, rng))
    }

    /// Returns a genome of the given topology with
    /// uniformly random weights and biases in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Genome {
        let neurons = topology.neurons_per_layer().get();
        let weights = (0..topology.weight_layer_count())
            .map(|layer| {
                let width = topology.connection_count(layer);
                (0..neurons).map(|_| Self::random_row(width, rng)).collect()
            })
            .collect();
        let biases = (0..topology.bias_layer_count())
            .map(|_| Self::random_row(neurons, rng))
            .collect();

        Genome {
            topology: *topology,
            weights,
            biases,
        }
    }

    /// Builds a genome from existing weights and biases,
    /// checking their dimensions against `topology`.
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::{Genome, Topology};
    ///
    /// let topology = Topology::new(1, 1, 0, 2).unwrap();
    /// let weights = vec![vec![vec![0.5], vec![0.25]]];
    /// let biases = vec![vec![0.0, 0.1], vec![0.2, 0.3]];
    /// assert!(Genome::from_parts(topology, weights, biases).is_ok());
    ///
    /// let short_biases = vec![vec![0.0, 0.1]];
    /// let weights = vec![vec![vec![0.5], vec![0.25]]];
    /// assert!(Genome::from_parts(topology, weights, short_biases).is_err());
    /// ```
    pub fn from_parts(
        topology: Topology,
        weights: Vec<Vec<Vec<f64>>>,
        biases: Vec<Vec<f64>>,
    ) -> Result<Genome, GenomeError> {
        let neurons = topology.neurons_per_layer().get();

        if weights.len() != topology.weight_layer_count() {
            return Err(GenomeError::MalformedShape(format!(
                "expected {} weight layers, found {}",
                topology.weight_layer_count(),
                weights.len()
            )));
        }
        for (layer, rows) in weights.iter().enumerate() {
            if rows.len() != neurons {
                return Err(GenomeError::MalformedShape(format!(
                    "expected {} neurons in weight layer {}, found {}",
                    neurons,
                    layer,
                    rows.len()
                )));
            }
            let width = topology.connection_count(layer);
            if let Some(neuron) = rows.iter().position(|row| row.len() != width) {
                return Err(GenomeError::MalformedShape(format!(
                    "expected {} connections for neuron {} of layer {}, found {}",
                    width,
                    neuron,
                    layer,
                    rows[neuron].len()
                )));
            }
        }

        if biases.len() != topology.bias_layer_count() {
            return Err(GenomeError::MalformedShape(format!(
                "expected {} bias layers, found {}",
                topology.bias_layer_count(),
                biases.len()
            )));
        }
        if let Some(layer) = biases.iter().position(|row| row.len() != neurons) {
            return Err(GenomeError::MalformedShape(format!(
                "expected {} biases in layer {}, found {}",
                neurons,
                layer,
                biases[layer].len()
            )));
        }

        Ok(Genome {
            topology,
            weights,
            biases,
        })
    }

    /// Returns a vector of `width` uniform values in `[0, 1)`.
    fn random_row<R: Rng + ?Sized>(width: usize, rng: &mut R) -> Vec<f64> {
        (0..width).map(|_| rng.gen::<f64>()).collect()
    }

    /// Combines two genomes into a child by geometric crossover,
    /// without mutation.
    ///
    /// Fails with [`TopologyMismatch`] if the parents
    /// are not breed-compatible.
    ///
    /// [`TopologyMismatch`]: crate::genomics::GenomeError::TopologyMismatch
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::{GeneticConfig, Genome};
    ///
    /// let mut rng = rand::thread_rng();
    /// let config = GeneticConfig::default();
    /// let p1 = Genome::initialize(4, 2, 5, 10, &mut rng).unwrap();
    /// let p2 = Genome::initialize(4, 2, 5, 10, &mut rng).unwrap();
    ///
    /// let child = Genome::crossover_exact(&p1, &p2, &config, &mut rng).unwrap();
    /// assert_eq!(child.topology(), p1.topology());
    ///
    /// let stranger = Genome::initialize(4, 2, 6, 10, &mut rng).unwrap();
    /// assert!(Genome::crossover_exact(&p1, &stranger, &config, &mut rng).is_err());
    /// ```
    pub fn crossover_exact<R: Rng + ?Sized>(
        parent1: &Genome,
        parent2: &Genome,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Result<Genome, GenomeError> {
        breed(parent1, parent2, CrossoverKind::Exact, config, rng).map(|o| o.genome)
    }

    /// Combines two genomes into a child by geometric crossover,
    /// re-randomizing each of the child's neurons with chance
    /// [`neuron_mutation_chance`].
    ///
    /// Fails with [`TopologyMismatch`] if the parents
    /// are not breed-compatible.
    ///
    /// [`neuron_mutation_chance`]: crate::genomics::GeneticConfig::neuron_mutation_chance
    /// [`TopologyMismatch`]: crate::genomics::GenomeError::TopologyMismatch
    pub fn crossover_mutating<R: Rng + ?Sized>(
        parent1: &Genome,
        parent2: &Genome,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Result<Genome, GenomeError> {
        breed(parent1, parent2, CrossoverKind::Mutating, config, rng).map(|o| o.genome)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns all weights, indexed by `[layer][neuron][connection]`.
    pub fn weights(&self) -> &[Vec<Vec<f64>>] {
        &self.weights
    }

    /// Returns all biases, indexed by `[layer][neuron]`.
    pub fn biases(&self) -> &[Vec<f64>] {
        &self.biases
    }

    /// Returns the incoming weights of a neuron, if it exists.
    pub fn weight_row(&self, layer: usize, neuron: usize) -> Option<&[f64]> {
        self.weights
            .get(layer)
            .and_then(|rows| rows.get(neuron))
            .map(Vec::as_slice)
    }

    /// Returns the biases of a layer, if it exists.
    pub fn bias_row(&self, layer: usize) -> Option<&[f64]> {
        self.biases.get(layer).map(Vec::as_slice)
    }

    /// Checks whether the genome's shape matches the configuration.
    pub fn conforms_to(&self, config: &GeneticConfig) -> bool {
        self.topology == config.topology()
    }

    /// Checks whether the genome can be bred with `other`.
    pub fn is_breed_compatible(&self, other: &Genome) -> bool {
        self.topology.is_breed_compatible(&other.topology)
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters: usize = self.weights.iter().flatten().map(Vec::len).sum::<usize>()
            + self.biases.iter().map(Vec::len).sum::<usize>();
        write!(f, "Genome{} ({} parameters)", self.topology, parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;

    #[test]
    fn initialize_example_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let genome = Genome::initialize(3, 2, 1, 4, &mut rng).unwrap();

        let widths: Vec<Vec<usize>> = genome
            .weights()
            .iter()
            .map(|rows| rows.iter().map(Vec::len).collect())
            .collect();
        assert_eq!(widths, vec![vec![3; 4], vec![2; 4]]);
        assert_eq!(genome.biases().len(), 3);
        assert!(genome.biases().iter().all(|row| row.len() == 4));

        let values = genome
            .weights()
            .iter()
            .flatten()
            .flatten()
            .chain(genome.biases().iter().flatten());
        for value in values {
            assert!((0.0..1.0).contains(value));
        }
    }

    #[test]
    fn initialize_shapes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for inputs in 1..4 {
            for outputs in 1..4 {
                for hidden in 0..5 {
                    for neurons in 1..6 {
                        let genome =
                            Genome::initialize(inputs, outputs, hidden, neurons, &mut rng)
                                .unwrap();
                        let topology = *genome.topology();
                        assert!(
                            Genome::from_parts(
                                topology,
                                genome.weights().to_vec(),
                                genome.biases().to_vec()
                            )
                            .is_ok(),
                            "{}",
                            genome
                        );
                        assert_eq!(genome.weights().len(), hidden + 1);
                        assert_eq!(genome.weight_row(0, 0).unwrap().len(), inputs);
                        if hidden > 0 {
                            assert_eq!(genome.weight_row(hidden, 0).unwrap().len(), outputs);
                        }
                        assert_eq!(genome.biases().len(), hidden + 2);
                    }
                }
            }
        }
    }

    #[test]
    fn initialize_rejects_zero_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(matches!(
            Genome::initialize(0, 2, 1, 4, &mut rng),
            Err(GenomeError::InvalidTopology(_))
        ));
        assert!(matches!(
            Genome::initialize(3, 0, 1, 4, &mut rng),
            Err(GenomeError::InvalidTopology(_))
        ));
        assert!(matches!(
            Genome::initialize(3, 2, 1, 0, &mut rng),
            Err(GenomeError::InvalidTopology(_))
        ));
    }

    #[test]
    fn new_conforms_to_config() {
        let config = GeneticConfig {
            input_count: NonZeroUsize::new(5).unwrap(),
            hidden_layer_count: 3,
            neurons_per_layer: NonZeroUsize::new(6).unwrap(),
            ..GeneticConfig::zero()
        };
        let genome = Genome::new(&config);
        assert!(genome.conforms_to(&config));
        assert!(!genome.conforms_to(&GeneticConfig::zero()));
    }

    #[test]
    fn accessors_out_of_range() {
        let genome = Genome::initialize(2, 2, 1, 3, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert!(genome.weight_row(2, 0).is_none());
        assert!(genome.weight_row(0, 3).is_none());
        assert!(genome.bias_row(2).is_some());
        assert!(genome.bias_row(3).is_none());
    }

    #[test]
    fn from_parts_rejects_bad_widths() {
        let topology = Topology::new(2, 1, 1, 2).unwrap();
        let biases = vec![vec![0.0; 2]; 3];

        let narrow_input = vec![vec![vec![0.0; 1]; 2], vec![vec![0.0; 1]; 2]];
        assert!(matches!(
            Genome::from_parts(topology, narrow_input, biases.clone()),
            Err(GenomeError::MalformedShape(_))
        ));

        let missing_neuron = vec![vec![vec![0.0; 2]; 1], vec![vec![0.0; 1]; 2]];
        assert!(matches!(
            Genome::from_parts(topology, missing_neuron, biases.clone()),
            Err(GenomeError::MalformedShape(_))
        ));

        let weights = vec![vec![vec![0.0; 2]; 2], vec![vec![0.0; 1]; 2]];
        let ragged_biases = vec![vec![0.0; 2], vec![0.0; 1], vec![0.0; 2]];
        assert!(matches!(
            Genome::from_parts(topology, weights.clone(), ragged_biases),
            Err(GenomeError::MalformedShape(_))
        ));
        assert!(Genome::from_parts(topology, weights, biases).is_ok());
    }

    #[test]
    fn serde_roundtrip() {
        let genome = Genome::initialize(3, 2, 2, 4, &mut ChaCha8Rng::seed_from_u64(4)).unwrap();
        let json = serde_json::to_string(&genome).unwrap();
        assert_eq!(serde_json::from_str::<Genome>(&json).unwrap(), genome);
    }

    #[test]
    fn deserialization_checks_shape() {
        let json = r#"{
            "topology": {
                "input_count": 1,
                "output_count": 1,
                "hidden_layer_count": 0,
                "neurons_per_layer": 2
            },
            "weights": [[[0.5], [0.5, 0.5]]],
            "biases": [[0.0, 0.0], [0.0, 0.0]]
        }"#;
        let error = serde_json::from_str::<Genome>(json).unwrap_err();
        assert!(error.to_string().contains("malformed genome shape"));

        let zero_inputs = json.replace("\"input_count\": 1", "\"input_count\": 0");
        assert!(serde_json::from_str::<Genome>(&zero_inputs).is_err());
    }

    #[test]
    fn breeding_with_self_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let genome = Genome::initialize(4, 4, 6, 9, &mut rng).unwrap();
        let child =
            Genome::crossover_exact(&genome, &genome, &GeneticConfig::default(), &mut rng).unwrap();
        assert_eq!(child, genome);
    }

    #[test]
    fn display() {
        let genome = Genome::initialize(3, 2, 1, 4, &mut ChaCha8Rng::seed_from_u64(6)).unwrap();
        // 4 * 3 + 4 * 2 weights, 3 * 4 biases.
        assert_eq!(
            genome.to_string(),
            "Genome[3 in, 2 out, 1x4 hidden] (32 parameters)"
        );
    }
}
