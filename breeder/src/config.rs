use chessnet::encoding::ENCODED_LEN;
use chessnet::genomics::GeneticConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const CHESS_INPUTS: NonZeroUsize = match NonZeroUsize::new(ENCODED_LEN) {
    Some(inputs) => inputs,
    None => unreachable!(),
};
const HIDDEN_NEURONS: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(neurons) => neurons,
    None => unreachable!(),
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Ron(#[from] ron::Error),
}

/// Settings of a breeding run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreederConfig {
    /// Shape and crossover parameters of the genomes.
    pub genetic: GeneticConfig,
    /// Number of parent pairs bred.
    pub pairs: usize,
    /// Seed of the run. Each pair is bred on its own
    /// stream of a generator seeded with it.
    pub seed: u64,
    /// Whether children are mutated during crossover.
    pub mutate: bool,
    /// Where to save the children, if anywhere.
    pub output: Option<PathBuf>,
}

impl Default for BreederConfig {
    fn default() -> BreederConfig {
        BreederConfig {
            genetic: GeneticConfig {
                input_count: CHESS_INPUTS,
                output_count: NonZeroUsize::MIN,
                hidden_layer_count: 8,
                neurons_per_layer: HIDDEN_NEURONS,
                ..GeneticConfig::default()
            },
            pairs: 500,
            seed: 0,
            mutate: true,
            output: None,
        }
    }
}

impl BreederConfig {
    /// Reads a RON configuration file. Missing fields take
    /// their default values.
    pub fn from_file(path: &Path) -> Result<BreederConfig, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(ron::from_str(&text)?)
    }
}
