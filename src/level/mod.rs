pub mod catalog;
pub mod config;

pub use catalog::LevelCatalog;
pub use config::{LevelConfig, SimulationRules};
