//! Breeds independent pairs of random chess genomes in parallel
//! and reports how the children were put together.
//!
//! Usage: `breeder [config.ron]`

mod config;
mod stats;

use config::{BreederConfig, ConfigError};
use stats::Stats;

use chessnet::genomics::{breed, CrossoverKind, Genome, GenomeError, Offspring, Parent};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use thiserror::Error;

use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Error)]
enum BreederError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Genome(#[from] GenomeError),
    #[error("could not serialize children: {0}")]
    Serialization(#[from] ron::Error),
    #[error("could not write {}: {source}", .path.display())]
    Output {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BreederError> {
    let config = match std::env::args().nth(1) {
        Some(path) => BreederConfig::from_file(Path::new(&path))?,
        None => BreederConfig::default(),
    };
    log::info!(
        "breeding {} pairs of {} genomes (seed {}, mutation {})",
        config.pairs,
        config.genetic.topology(),
        config.seed,
        if config.mutate { "on" } else { "off" }
    );

    let start = Instant::now();
    let offspring = breed_pool(&config)?;
    log::info!("bred {} children in {:?}", offspring.len(), start.elapsed());

    report(&offspring);

    if let Some(path) = &config.output {
        let children: Vec<&Genome> = offspring.iter().map(|o| &o.genome).collect();
        let text = ron::ser::to_string_pretty(&children, ron::ser::PrettyConfig::new())?;
        fs::write(path, text).map_err(|source| BreederError::Output {
            path: path.clone(),
            source,
        })?;
        log::info!("saved children to {}", path.display());
    }
    Ok(())
}

/// Generates `2 * pairs` random parents and breeds each
/// consecutive pair. Every pair gets its own stream of the
/// seeded generator, so results do not depend on scheduling.
fn breed_pool(config: &BreederConfig) -> Result<Vec<Offspring>, GenomeError> {
    let topology = config.genetic.topology();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let parents: Vec<Genome> = (0..config.pairs * 2)
        .map(|_| Genome::random(&topology, &mut rng))
        .collect();

    let kind = if config.mutate {
        CrossoverKind::Mutating
    } else {
        CrossoverKind::Exact
    };

    parents
        .par_chunks(2)
        .enumerate()
        .map(|(index, pair)| {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            rng.set_stream(index as u64 + 1);
            breed(&pair[0], &pair[1], kind, &config.genetic, &mut rng)
        })
        .collect()
}

/// Share of a child's grid cells assigned to the second parent.
fn second_parent_share(offspring: &Offspring) -> f64 {
    let topology = offspring.genome.topology();
    let neurons = topology.neurons_per_layer().get();
    let layers = topology.weight_layer_count();
    let inherited = (0..layers)
        .flat_map(|layer| (0..neurons).map(move |neuron| (layer, neuron)))
        .filter(|&(layer, neuron)| {
            offspring.boundary.band(layer, neuron).parent() == Parent::Second
        })
        .count();
    inherited as f64 / (layers * neurons) as f64
}

fn report(offspring: &[Offspring]) {
    if let Some(stats) = Stats::from(offspring.iter().map(second_parent_share)) {
        log::info!("second parent share: {:?}", stats);
    }
    if let Some(stats) = Stats::from(offspring.iter().map(Offspring::mutation_ratio)) {
        log::info!("mutated neuron ratio: {:?}", stats);
    }
    let mutated: usize = offspring.iter().map(|o| o.mutated.len()).sum();
    log::info!("{} neurons mutated in total", mutated);
}
