pub mod error;
pub mod logging;

pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;

pub mod features;
pub mod dataset;
pub mod train;
pub mod result;
pub mod architecture;
pub mod level;
pub mod education;
pub mod engine;

// Convenience re-exports
pub use error::{EngineError, Result};
pub use math::matrix::Matrix;
pub use network::network::Network;
pub use features::{FeatureEncoding, FeatureExtractor, Point, Stroke};
pub use dataset::{Dataset, DatasetBuilder, LabeledExample};
pub use train::{Trainer, TrainingCurvePoint};
pub use result::{SamplePrediction, TrainingResult};
pub use architecture::{ComponentKind, ComponentSpec, SimulationResult};
pub use level::{LevelCatalog, LevelConfig};
pub use education::Hint;
pub use engine::{Engine, HintRequest, SimulateRequest, TrainRequest};
