pub mod training;

pub use training::{build_training_result, SamplePrediction, TrainingResult, SAMPLE_PREDICTIONS};
