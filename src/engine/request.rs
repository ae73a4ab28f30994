use serde::{Deserialize, Serialize};

use crate::architecture::component::ComponentSpec;
use crate::dataset::builder::LabeledExample;

/// Body of a training call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRequest {
    pub examples: Vec<LabeledExample>,
    pub level_id: u32,
    /// Fixes weight init and shuffling; omitted means entropy-seeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl TrainRequest {
    pub fn new(examples: Vec<LabeledExample>, level_id: u32) -> Self {
        TrainRequest { examples, level_id, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Body of a simulation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub components: Vec<ComponentSpec>,
    pub level_id: u32,
}

/// Body of a hint call. Stateless: the caller counts attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintRequest {
    pub level_id: u32,
    /// The chain as it stands; omitted means the player has not started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentSpec>>,
    #[serde(default = "first_attempt")]
    pub attempt_count: u32,
}

fn first_attempt() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_request_reads_wire_form() {
        let req: TrainRequest = serde_json::from_str(
            r#"{"level_id": 1, "examples": [{"stroke": [[0, 0], [1.5, 2]], "label": "circle"}]}"#,
        )
        .unwrap();
        assert_eq!(req.seed, None);
        assert_eq!(req.examples.len(), 1);
        assert_eq!(req.examples[0].stroke.len(), 2);
        assert_eq!(req.examples[0].stroke.points[1].y, 2.0);
    }

    #[test]
    fn hint_request_defaults_to_first_attempt() {
        let req: HintRequest = serde_json::from_str(r#"{"level_id": 2}"#).unwrap();
        assert_eq!(req.attempt_count, 1);
        assert!(req.components.is_none());
    }
}
