//! Geometric crossover of two genomes.
//!
//! Children inherit whole neurons (a neuron's incoming weight row,
//! along with its layer's biases) from one parent or the other,
//! according to the [`Band`] a randomly drawn [`Boundary`] assigns
//! to each (layer, neuron) cell.

use super::partition::{Band, Boundary, Parent};
use super::{GeneticConfig, Genome, GenomeError};

use rand::Rng;

/// Crossover variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossoverKind {
    /// Pure recombination of the parents' neurons.
    Exact,
    /// Recombination where each neuron's weights may
    /// be re-randomized with the configured chance.
    Mutating,
}

/// Coordinates of a neuron in the (layer, neuron) grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeuronIndex {
    pub layer: usize,
    pub neuron: usize,
}

/// The result of a crossover: the child, and
/// how it was put together.
#[derive(Clone, Debug)]
pub struct Offspring {
    pub genome: Genome,
    pub boundary: Boundary,
    /// Neurons whose weights were re-randomized instead of inherited.
    pub mutated: Vec<NeuronIndex>,
}

impl Offspring {
    /// Fraction of the child's neurons that were mutated.
    pub fn mutation_ratio(&self) -> f64 {
        let topology = self.genome.topology();
        let cells = topology.weight_layer_count() * topology.neurons_per_layer().get();
        self.mutated.len() as f64 / cells as f64
    }
}

/// Breeds two genomes using a randomly drawn boundary.
///
/// Fails with [`TopologyMismatch`] if the parents' topologies
/// differ. Only the crossover parameters of `config` are used;
/// the child takes its topology from the parents.
///
/// [`TopologyMismatch`]: crate::genomics::GenomeError::TopologyMismatch
pub fn breed<R: Rng + ?Sized>(
    parent1: &Genome,
    parent2: &Genome,
    kind: CrossoverKind,
    config: &GeneticConfig,
    rng: &mut R,
) -> Result<Offspring, GenomeError> {
    check_compatibility(parent1, parent2)?;
    let boundary = Boundary::random(&parent1.topology, config.boundary_offset_divisor, rng);
    log::debug!("crossover boundary {}", boundary);
    Ok(breed_across(parent1, parent2, boundary, kind, config, rng))
}

/// Breeds two genomes across a predetermined boundary.
///
/// # Examples
/// ```
/// use chessnet::genomics::{breed_with_boundary, Boundary, CrossoverKind, GeneticConfig, Genome};
///
/// let mut rng = rand::thread_rng();
/// let p1 = Genome::initialize(2, 2, 3, 4, &mut rng).unwrap();
/// let p2 = Genome::initialize(2, 2, 3, 4, &mut rng).unwrap();
///
/// // Layers 1 and 2 come from the second parent.
/// let boundary = Boundary::new([(0, 4), (2, 4), (3, 0), (4, 0)]);
/// let child = breed_with_boundary(
///     &p1,
///     &p2,
///     boundary,
///     CrossoverKind::Exact,
///     &GeneticConfig::default(),
///     &mut rng,
/// )
/// .unwrap();
///
/// assert_eq!(child.genome.weight_row(0, 0), p1.weight_row(0, 0));
/// assert_eq!(child.genome.weight_row(1, 3), p2.weight_row(1, 3));
/// assert_eq!(child.genome.weight_row(2, 0), p2.weight_row(2, 0));
/// assert_eq!(child.genome.weight_row(3, 1), p1.weight_row(3, 1));
/// ```
pub fn breed_with_boundary<R: Rng + ?Sized>(
    parent1: &Genome,
    parent2: &Genome,
    boundary: Boundary,
    kind: CrossoverKind,
    config: &GeneticConfig,
    rng: &mut R,
) -> Result<Offspring, GenomeError> {
    check_compatibility(parent1, parent2)?;
    Ok(breed_across(parent1, parent2, boundary, kind, config, rng))
}

fn check_compatibility(parent1: &Genome, parent2: &Genome) -> Result<(), GenomeError> {
    if parent1.topology.is_breed_compatible(&parent2.topology) {
        Ok(())
    } else {
        Err(GenomeError::TopologyMismatch {
            first: parent1.topology,
            second: parent2.topology,
        })
    }
}

/// Builds the child. Parents must already be known to be compatible.
fn breed_across<R: Rng + ?Sized>(
    parent1: &Genome,
    parent2: &Genome,
    boundary: Boundary,
    kind: CrossoverKind,
    config: &GeneticConfig,
    rng: &mut R,
) -> Offspring {
    let topology = parent1.topology;
    let neurons = topology.neurons_per_layer().get();
    let pick = |parent: Parent| match parent {
        Parent::First => parent1,
        Parent::Second => parent2,
    };

    let mut mutated = vec![];
    let mut weights = Vec::with_capacity(topology.weight_layer_count());
    let mut biases = Vec::with_capacity(topology.bias_layer_count());

    for layer in 0..topology.weight_layer_count() {
        let width = topology.connection_count(layer);
        let mut rows = Vec::with_capacity(neurons);
        let mut bias_source = Parent::First;

        for neuron in 0..neurons {
            let mutate = kind == CrossoverKind::Mutating
                && rng.gen::<f64>() < config.neuron_mutation_chance;
            let source = boundary.band(layer, neuron).parent();

            rows.push(if mutate {
                mutated.push(NeuronIndex { layer, neuron });
                Genome::random_row(width, rng)
            } else {
                pick(source).weights[layer][neuron].clone()
            });
            // Biases are per layer: the last neuron's parent wins.
            bias_source = source;
        }

        weights.push(rows);
        biases.push(pick(bias_source).biases[layer].clone());
    }
    // Output biases lie past every boundary point.
    biases.push(pick(Band::E.parent()).biases[topology.weight_layer_count()].clone());

    if !mutated.is_empty() {
        log::trace!("mutated {} neurons during crossover", mutated.len());
    }

    Offspring {
        genome: Genome {
            topology,
            weights,
            biases,
        },
        boundary,
        mutated,
    }
}
