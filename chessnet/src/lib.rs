//! # chessnet
//! Fixed-topology feed-forward network genomes, evolved by a genetic
//! algorithm and meant to be scored by playing chess against one another.
//!
//! Provides:
//! - [`Genome`]: the weights and biases of one network, the unit of evolution.
//! - Two geometric crossover operators, [`Genome::crossover_exact`] and
//!   [`Genome::crossover_mutating`], which recombine whole neurons of two
//!   parents according to a randomly drawn piecewise-linear [`Boundary`]
//!   over the network's (layer, neuron) grid.
//! - A board encoder turning FEN strings into network inputs ([`encoding`]).
//! - The [`Evaluator`] interface expected of a game-playing fitness function.
//!
//! [`Genome`]: crate::genomics::Genome
//! [`Genome::crossover_exact`]: crate::genomics::Genome::crossover_exact
//! [`Genome::crossover_mutating`]: crate::genomics::Genome::crossover_mutating
//! [`Boundary`]: crate::genomics::Boundary
//! [`Evaluator`]: crate::evaluation::Evaluator
//!
//! # Example usage: breeding two random genomes
//! ```
//! use chessnet::genomics::{GeneticConfig, Genome};
//! use std::num::NonZeroUsize;
//!
//! let config = GeneticConfig {
//!     input_count: NonZeroUsize::new(chessnet::encoding::ENCODED_LEN).unwrap(),
//!     output_count: NonZeroUsize::new(2).unwrap(),
//!     hidden_layer_count: 4,
//!     neurons_per_layer: NonZeroUsize::new(32).unwrap(),
//!     ..GeneticConfig::default()
//! };
//!
//! let mut rng = rand::thread_rng();
//! let mother = Genome::new(&config);
//! let father = Genome::new(&config);
//!
//! let child = Genome::crossover_mutating(&mother, &father, &config, &mut rng).unwrap();
//! assert!(child.conforms_to(&config));
//!
//! let board = chessnet::encoding::encode_fen(
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
//! )
//! .unwrap();
//! let inputs = board.inputs_for(child.topology()).unwrap();
//! assert_eq!(inputs.len(), child.topology().input_count().get());
//! ```

pub mod encoding;
pub mod evaluation;
pub mod genomics;
