use crate::level::config::LevelConfig;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`          — epoch budget `E`; the loop may stop sooner
/// - `batch_size`      — samples per mini-batch; `1` is online SGD
/// - `learning_rate`   — SGD step size
/// - `target_accuracy` — training stops at the first epoch reaching this
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub target_accuracy: f64,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64, target_accuracy: f64) -> Self {
        TrainConfig { epochs, batch_size, learning_rate, target_accuracy }
    }

    pub fn for_level(level: &LevelConfig) -> Self {
        TrainConfig {
            epochs: level.max_epochs,
            batch_size: level.batch_size,
            learning_rate: level.learning_rate,
            target_accuracy: level.target_accuracy,
        }
    }
}
