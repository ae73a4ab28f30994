use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dataset::builder::Dataset;
use crate::error::Result;
use crate::network::network::Network;
use crate::network::spec::ClassifierTopology;
use crate::train::epoch_stats::TrainingRun;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Owns one freshly initialised model for the lifetime of a training request.
///
/// The same rng seeds the weights and drives the per-epoch shuffles, so a
/// trainer built with `Some(seed)` replays identically.
pub struct Trainer {
    network: Network,
    config: TrainConfig,
    rng: StdRng,
}

impl Trainer {
    pub fn new(topology: ClassifierTopology, config: TrainConfig, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let network = Network::classifier(&topology, &mut rng);
        Trainer { network, config, rng }
    }

    /// Builds a trainer sized for `dataset`.
    pub fn for_dataset(dataset: &Dataset, config: TrainConfig, seed: Option<u64>) -> Self {
        let inputs = dataset.feature_length().unwrap_or(0);
        Trainer::new(ClassifierTopology::new(inputs, dataset.class_count()), config, seed)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn run(&mut self, dataset: &Dataset) -> Result<TrainingRun> {
        train_loop(&mut self.network, dataset, &self.config, &mut self.rng)
    }
}
