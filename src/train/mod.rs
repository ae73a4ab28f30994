pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{TrainingCurvePoint, TrainingRun};
pub use loop_fn::{compute_accuracy, train_loop};
pub use train_config::TrainConfig;
pub use trainer::Trainer;
