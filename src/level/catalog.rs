use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::architecture::component::{ComponentKind, ComponentSpec};
use crate::error::{EngineError, Result};
use crate::level::config::{LevelConfig, SimulationRules};

/// The set of levels a caller can play.
///
/// A plain value: load it once, then hand it (or one of its levels) to each
/// engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelConfig>,
}

const SHAPES: [&str; 3] = ["circle", "square", "triangle"];

impl LevelCatalog {
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self> {
        let catalog = LevelCatalog { levels };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn get(&self, id: u32) -> Option<&LevelConfig> {
        self.levels.iter().find(|l| l.id == id)
    }

    pub fn ids(&self) -> Vec<u32> {
        self.levels.iter().map(|l| l.id).collect()
    }

    pub fn validate(&self) -> Result<()> {
        for (i, level) in self.levels.iter().enumerate() {
            if self.levels[..i].iter().any(|l| l.id == level.id) {
                return Err(EngineError::validation(format!("duplicate level id {}", level.id)));
            }
            level.validate()?;
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: LevelCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads and validates a catalog written as `{"levels": [...]}`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        info!(path = %path.display(), levels = catalog.levels.len(), "loaded level catalog");
        Ok(catalog)
    }

    /// The four levels of the first world: shape training, network building,
    /// pattern detection and the smart-pet mini-boss.
    pub fn builtin() -> Self {
        let neural = ComponentSpec::new("neural_layer", "Neural Layer", ComponentKind::Layer);
        let relu = ComponentSpec::new("activation_relu", "ReLU Activation", ComponentKind::Activation);
        let dense = ComponentSpec::new("dense_layer", "Dense Layer", ComponentKind::Layer);
        let dropout = ComponentSpec::new("dropout", "Dropout", ComponentKind::Regularization);
        let add = ComponentSpec::new("tensor_add", "Tensor Add", ComponentKind::Operation);
        let mul = ComponentSpec::new("tensor_multiply", "Tensor Multiply", ComponentKind::Operation);

        let mut first_ai = LevelConfig::new(1, "Train Your First AI Pet", 100, &SHAPES);
        first_ai.component_catalog = vec![neural.clone(), relu.clone()];
        first_ai.simulation.required_components = strings(&["neural_layer"]);
        first_ai.concepts = strings(&["neural_networks", "training", "classification"]);
        first_ai.hints = strings(&[
            "Try adding a Neural Layer first to give your AI a brain!",
            "Don't forget the Activation Function - it helps your AI think in complex ways!",
            "Draw at least 3 different shapes to teach your AI properly.",
        ]);

        let mut first_network = LevelConfig::new(2, "Build Your First Neural Network", 100, &SHAPES);
        first_network.component_catalog = vec![neural.clone(), relu.clone(), dense.clone(), dropout.clone()];
        first_network.simulation.required_components = strings(&["neural_layer", "activation"]);
        first_network.concepts = strings(&["deep_networks", "layer_stacking", "activation"]);
        first_network.hints = strings(&[
            "Start with a Neural Layer as your foundation.",
            "Add a Dense Layer to make your network deeper and smarter.",
            "Try adding Dropout to prevent overfitting and improve performance.",
        ]);

        let mut detective = LevelConfig::new(3, "Pattern Detective", 100, &SHAPES);
        detective.target_accuracy = 0.75;
        detective.component_catalog =
            vec![neural.clone(), relu.clone(), dense.clone(), add.clone(), mul.clone()];
        detective.simulation = SimulationRules {
            target_score: 0.75,
            required_components: strings(&["neural_layer", "tensor_add", "tensor_multiply"]),
            ..SimulationRules::default()
        };
        detective.concepts = strings(&["linear_models", "weights", "pattern_recognition"]);
        detective.hints = strings(&[
            "Use tensor operations to transform your input data.",
            "Try combining addition and multiplication to find patterns.",
            "Linear models use weighted combinations - multiplication helps with weighting!",
        ]);

        let mut smart_pet = LevelConfig::new(4, "Smart Pet Challenge", 100, &SHAPES);
        smart_pet.target_accuracy = 0.9;
        smart_pet.max_epochs = 250;
        smart_pet.component_catalog = vec![neural, relu, dense, dropout, add, mul];
        smart_pet.simulation = SimulationRules {
            min_components: 4,
            target_score: 0.9,
            required_components: strings(&["neural_layer", "activation", "dense_layer"]),
            ..SimulationRules::default()
        };
        smart_pet.concepts = strings(&["integration", "ai_systems"]);
        smart_pet.hints = strings(&[
            "This is a challenge level - you'll need to use everything you've learned!",
            "Build a deep network with multiple layers for better performance.",
            "Include regularization (Dropout) to make your AI more robust.",
        ]);

        LevelCatalog { levels: vec![first_ai, first_network, detective, smart_pet] }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = LevelCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.ids(), vec![1, 2, 3, 4]);
        assert_eq!(catalog.get(4).map(|l| l.simulation.min_components), Some(4));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn rejects_duplicate_level_ids() {
        let level = LevelConfig::new(1, "a", 16, &["x", "y"]);
        assert!(LevelCatalog::new(vec![level.clone(), level]).is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let catalog = LevelCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(LevelCatalog::from_json_str(&json).unwrap(), catalog);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(LevelCatalog::from_json_str("{\"levels\": 3}"), Err(EngineError::Json(_))));
    }
}
