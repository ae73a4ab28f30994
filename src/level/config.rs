use serde::{Deserialize, Serialize};

use crate::architecture::component::ComponentSpec;
use crate::error::{EngineError, Result};
use crate::features::extractor::{FeatureEncoding, FeatureExtractor};

/// Rules the architecture simulator applies for a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRules {
    /// Components needed before a chain is eligible for scoring.
    #[serde(default = "default_min_components")]
    pub min_components: usize,
    /// Score in `(0, 1]` a chain must reach to succeed.
    #[serde(default = "default_target_score")]
    pub target_score: f64,
    /// Running width never drops below this.
    #[serde(default = "default_width_floor")]
    pub width_floor: usize,
    /// Each entry must be matched by some component id in the chain
    /// (case-insensitive substring, so `activation` accepts `activation_relu`).
    #[serde(default)]
    pub required_components: Vec<String>,
}

impl Default for SimulationRules {
    fn default() -> Self {
        SimulationRules {
            min_components: default_min_components(),
            target_score: default_target_score(),
            width_floor: default_width_floor(),
            required_components: Vec::new(),
        }
    }
}

/// Everything the engine needs to know about one level.
///
/// Supplied by the level-definition side and passed into every call; the engine
/// never looks levels up from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    pub title: String,
    /// `N`, the feature vector length.
    pub feature_length: usize,
    #[serde(default)]
    pub encoding: FeatureEncoding,
    /// Known labels; index in this list is the class index.
    pub class_labels: Vec<String>,
    #[serde(default = "default_target_accuracy")]
    pub target_accuracy: f64,
    #[serde(default = "default_max_epochs")]
    pub max_epochs: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_min_stroke_points")]
    pub min_stroke_points: usize,
    #[serde(default = "default_min_examples")]
    pub min_examples: usize,
    /// Width fed into the simulator; defaults to `feature_length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal_input_size: Option<usize>,
    #[serde(default)]
    pub component_catalog: Vec<ComponentSpec>,
    #[serde(default)]
    pub simulation: SimulationRules,
    /// Concepts the level teaches, e.g. `neural_networks`, `activation`.
    #[serde(default)]
    pub concepts: Vec<String>,
    /// Introductory hints, gentlest first.
    #[serde(default)]
    pub hints: Vec<String>,
}

fn default_min_components() -> usize {
    3
}

fn default_target_score() -> f64 {
    0.85
}

fn default_width_floor() -> usize {
    2
}

fn default_target_accuracy() -> f64 {
    0.8
}

fn default_max_epochs() -> usize {
    150
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_batch_size() -> usize {
    8
}

fn default_min_stroke_points() -> usize {
    5
}

fn default_min_examples() -> usize {
    3
}

/// Index of `label` in `known`. Surrounding whitespace and ASCII case are
/// ignored.
pub fn match_label(known: &[String], label: &str) -> Option<usize> {
    let label = label.trim();
    known.iter().position(|k| k.eq_ignore_ascii_case(label))
}

/// Whether `required` is satisfied by a component id.
pub fn satisfies_requirement(component_id: &str, required: &str) -> bool {
    component_id
        .to_ascii_lowercase()
        .contains(&required.trim().to_ascii_lowercase())
}

impl LevelConfig {
    /// A level with every optional field at its default.
    pub fn new(id: u32, title: impl Into<String>, feature_length: usize, class_labels: &[&str]) -> Self {
        LevelConfig {
            id,
            title: title.into(),
            feature_length,
            encoding: FeatureEncoding::default(),
            class_labels: class_labels.iter().map(|s| s.to_string()).collect(),
            target_accuracy: default_target_accuracy(),
            max_epochs: default_max_epochs(),
            learning_rate: default_learning_rate(),
            batch_size: default_batch_size(),
            min_stroke_points: default_min_stroke_points(),
            min_examples: default_min_examples(),
            nominal_input_size: None,
            component_catalog: Vec::new(),
            simulation: SimulationRules::default(),
            concepts: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn extractor(&self) -> Result<FeatureExtractor> {
        FeatureExtractor::new(self.feature_length, self.encoding)
    }

    pub fn nominal_input_size(&self) -> usize {
        self.nominal_input_size.unwrap_or(self.feature_length)
    }

    pub fn catalog_entry(&self, id: &str) -> Option<&ComponentSpec> {
        self.component_catalog.iter().find(|c| c.id == id)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(EngineError::validation(format!("level {}: {msg}", self.id)));

        self.extractor()
            .map_err(|e| EngineError::validation(format!("level {}: {e}", self.id)))?;

        if self.class_labels.is_empty() {
            return fail("class_labels must not be empty".into());
        }
        for (i, label) in self.class_labels.iter().enumerate() {
            if label.trim().is_empty() {
                return fail(format!("class label #{i} is blank"));
            }
            if self.class_labels[..i].iter().any(|l| l.eq_ignore_ascii_case(label)) {
                return fail(format!("duplicate class label '{label}'"));
            }
        }
        if !(self.target_accuracy > 0.0 && self.target_accuracy <= 1.0) {
            return fail(format!("target_accuracy {} outside (0, 1]", self.target_accuracy));
        }
        if self.max_epochs == 0 {
            return fail("max_epochs must be at least 1".into());
        }
        if self.batch_size == 0 {
            return fail("batch_size must be at least 1".into());
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return fail(format!("learning_rate {} must be positive", self.learning_rate));
        }
        if self.min_examples == 0 {
            return fail("min_examples must be at least 1".into());
        }
        if self.nominal_input_size() == 0 {
            return fail("nominal_input_size must be at least 1".into());
        }

        let rules = &self.simulation;
        if !(rules.target_score > 0.0 && rules.target_score <= 1.0) {
            return fail(format!("simulation target_score {} outside (0, 1]", rules.target_score));
        }
        if rules.min_components == 0 || rules.width_floor == 0 {
            return fail("simulation min_components and width_floor must be at least 1".into());
        }
        for (i, c) in self.component_catalog.iter().enumerate() {
            if self.component_catalog[..i].iter().any(|o| o.id == c.id) {
                return fail(format!("duplicate catalog component '{}'", c.id));
            }
        }
        for required in &rules.required_components {
            if required.trim().is_empty() {
                return fail("required component names must not be blank".into());
            }
            // An empty catalog allows any component.
            let offered = self.component_catalog.is_empty()
                || self
                    .component_catalog
                    .iter()
                    .any(|c| satisfies_requirement(&c.id, required));
            if !offered {
                return fail(format!("required component '{required}' is not in the catalog"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::component::ComponentKind;

    #[test]
    fn json_defaults_fill_optional_fields() {
        let level: LevelConfig = serde_json::from_str(
            r#"{"id": 9, "title": "Doodles", "feature_length": 16, "class_labels": ["circle", "square"]}"#,
        )
        .unwrap();
        assert_eq!(level.encoding, FeatureEncoding::Raster);
        assert_eq!(level.max_epochs, 150);
        assert_eq!(level.min_examples, 3);
        assert_eq!(level.simulation, SimulationRules::default());
        assert_eq!(level.nominal_input_size(), 16);
        assert!(level.validate().is_ok());
    }

    #[test]
    fn labels_match_loosely() {
        let level = LevelConfig::new(1, "t", 16, &["circle", "square"]);
        assert_eq!(match_label(&level.class_labels, " Square "), Some(1));
        assert_eq!(match_label(&level.class_labels, "CIRCLE"), Some(0));
        assert_eq!(match_label(&level.class_labels, "hexagon"), None);
    }

    #[test]
    fn validation_catches_bad_settings() {
        let mut level = LevelConfig::new(1, "t", 15, &["a", "b"]);
        assert!(level.validate().is_err(), "15 is not a square");

        level.feature_length = 16;
        level.class_labels = vec!["a".into(), "A".into()];
        assert!(level.validate().is_err(), "duplicate labels");

        level.class_labels = vec!["a".into(), "b".into()];
        level.target_accuracy = 1.5;
        assert!(level.validate().is_err());

        level.target_accuracy = 0.9;
        level.max_epochs = 0;
        assert!(level.validate().is_err());

        level.max_epochs = 10;
        assert!(level.validate().is_ok());
    }

    #[test]
    fn required_components_must_be_offered() {
        let mut level = LevelConfig::new(1, "t", 16, &["a", "b"]);
        level.component_catalog = vec![
            ComponentSpec::new("neural_layer", "Neural Layer", ComponentKind::Layer),
            ComponentSpec::new("activation_relu", "ReLU", ComponentKind::Activation),
        ];
        level.simulation.required_components = vec!["neural_layer".into(), "activation".into()];
        assert!(level.validate().is_ok());

        level.simulation.required_components.push("tensor_add".into());
        assert!(level.validate().is_err());
    }

    #[test]
    fn requirement_matches_by_substring() {
        assert!(satisfies_requirement("activation_relu", "activation"));
        assert!(satisfies_requirement("Dense_Layer", "dense_layer"));
        assert!(!satisfies_requirement("dropout", "dense_layer"));
    }
}
